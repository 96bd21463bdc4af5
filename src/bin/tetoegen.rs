//! tetoegen: Tetoegen CLI client
//!
//! Classify photos and fetch development tips from a running tetoegend.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tetoegen::client::ServiceClient;
use tetoegen::view::ClipboardTarget;
use tetoegen::{AnalyzeView, DevelopmentTip, ImageUpload, PersonalityType, TetoegenError};

/// Tetoegen CLI client
#[derive(Parser)]
#[command(name = "tetoegen")]
#[command(version = tetoegen::PKG_VERSION)]
#[command(about = "Tetoegen personality-type classification client")]
struct Args {
    /// Server address
    #[arg(
        short,
        long,
        env = "TETOEGEN_ADDRESS",
        default_value = "http://127.0.0.1:3000"
    )]
    address: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check service health
    Health,

    /// Classify a photo
    Analyze {
        /// Path to the photo
        path: PathBuf,
        /// Also fetch development tips for the result
        #[arg(long)]
        tips: bool,
        /// Print a shareable summary line
        #[arg(long)]
        share: bool,
        /// Link included in the share payload
        #[arg(long, default_value = "http://127.0.0.1:3000/analyze")]
        share_url: String,
    },

    /// Fetch development tips for a type (테토남, 테토녀, 에겐남, 에겐녀)
    Tips {
        /// Personality type
        label: PersonalityType,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let client = ServiceClient::new(&args.address);

    match args.command {
        Command::Health => {
            let health = client.health().await?;
            println!("status:   {}", health.status);
            println!("version:  {}", health.version);
            println!("upstream: {}", health.upstream);
        }
        Command::Analyze {
            path,
            tips,
            share,
            share_url,
        } => {
            let mut view = AnalyzeView::new();
            view.select_image(read_image(&path).await?);

            if let Some(upload) = view.begin_analysis() {
                let outcome = client.analyze(&upload).await;
                view.complete_analysis(outcome);
            }
            if let Some(error) = view.last_error() {
                return Err(error.to_string().into());
            }
            let Some(result) = view.result() else {
                return Err("no result".into());
            };

            println!("type:       {} {}", result.label, result.emoji);
            println!("confidence: {}%", result.confidence);
            println!("reasons:");
            for reason in &result.reasons {
                println!("  - {reason}");
            }

            if tips {
                if let Some(label) = view.begin_tips() {
                    let outcome = client.tips(label).await;
                    view.complete_tips(outcome);
                }
                if let Some(error) = view.last_error() {
                    return Err(error.to_string().into());
                }
                if let Some(tips) = view.tips() {
                    println!();
                    print_tips(tips);
                }
            }

            if share {
                view.share(share_url, None, &Stdout).transpose()?;
            }
        }
        Command::Tips { label } => {
            let tips = client.tips(label).await?;
            print_tips(&tips);
        }
    }

    Ok(())
}

/// Share text goes to stdout; a terminal has no clipboard or share sheet.
struct Stdout;

impl ClipboardTarget for Stdout {
    fn copy_text(&self, text: &str) -> tetoegen::Result<()> {
        println!();
        println!("{text}");
        Ok(())
    }
}

async fn read_image(path: &Path) -> Result<ImageUpload, TetoegenError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| TetoegenError::InvalidInput(format!("{}: {e}", path.display())))?;
    let mut upload = ImageUpload::new(bytes);
    if let Some(mime) = guess_mime(path) {
        upload = upload.content_type(mime);
    }
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        upload = upload.file_name(name);
    }
    Ok(upload)
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

fn print_tips(tips: &DevelopmentTip) {
    println!("{}", tips.title);
    for tip in &tips.tips {
        println!("  - {tip}");
    }
    if !tips.shopping_keywords.is_empty() {
        println!("shopping: {}", tips.shopping_keywords.join(", "));
    }
}
