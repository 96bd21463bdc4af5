//! Session and identity contract.
//!
//! Sign-in itself lives with an external identity service. This module only
//! fixes the shape the presentation layer consumes: query the current
//! session, sign out, and subscribe to auth changes through an explicit
//! [`AuthSubscription`] that detaches on [`AuthSubscription::unsubscribe`]
//! or drop.
//!
//! [`MemoryIdentity`] is an in-process implementation for tests and the CLI.

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;

use crate::Result;

/// Buffered auth events per subscriber before the slowest one lags.
const EVENT_BUFFER: usize = 16;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Change in authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
    TokenRefreshed(Session),
}

impl AuthEvent {
    /// The user after this event, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(session) | Self::TokenRefreshed(session) => Some(&session.user),
            Self::SignedOut => None,
        }
    }
}

/// Source of session state.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current session, if signed in.
    async fn session(&self) -> Result<Option<Session>>;

    /// The current user, if signed in.
    async fn current_user(&self) -> Result<Option<User>> {
        Ok(self.session().await?.map(|s| s.user))
    }

    /// End the current session. Signing out while signed out is a no-op.
    async fn sign_out(&self) -> Result<()>;

    /// Subscribe to auth changes from now on.
    fn subscribe(&self) -> AuthSubscription;
}

/// Live subscription to [`AuthEvent`]s.
///
/// Yields events until the provider is dropped. A subscriber that falls
/// more than a few events behind skips the missed ones.
pub struct AuthSubscription {
    inner: Pin<Box<dyn Stream<Item = AuthEvent> + Send>>,
}

impl AuthSubscription {
    pub fn new(receiver: broadcast::Receiver<AuthEvent>) -> Self {
        let inner = BroadcastStream::new(receiver).filter_map(|event| async move {
            match event {
                Ok(event) => Some(event),
                Err(e) => {
                    debug!(error = %e, "auth subscriber lagged");
                    None
                }
            }
        });
        Self {
            inner: Box::pin(inner),
        }
    }

    /// Detach from the provider.
    pub fn unsubscribe(self) {}
}

impl Stream for AuthSubscription {
    type Item = AuthEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// In-process [`IdentityProvider`].
pub struct MemoryIdentity {
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIdentity {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            session: RwLock::new(None),
            events,
        }
    }

    /// Install `session` and notify subscribers.
    ///
    /// Replacing a session for the same user counts as a token refresh.
    pub async fn sign_in(&self, session: Session) {
        let mut current = self.session.write().await;
        let refreshed = current
            .as_ref()
            .is_some_and(|existing| existing.user.id == session.user.id);
        *current = Some(session.clone());
        drop(current);

        let event = if refreshed {
            AuthEvent::TokenRefreshed(session)
        } else {
            AuthEvent::SignedIn(session)
        };
        self.publish(event);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn publish(&self, event: AuthEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn session(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        let previous = self.session.write().await.take();
        if previous.is_some() {
            self.publish(AuthEvent::SignedOut);
        }
        Ok(())
    }

    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.events.subscribe())
    }
}
