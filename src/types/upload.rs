//! Inbound image payloads

/// An uploaded image, as received at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
            file_name: None,
        }
    }

    /// Set the MIME type reported by the client.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the original file name.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type to embed in a data URL: the reported type when it is an
    /// image type, JPEG otherwise.
    pub fn image_mime(&self) -> &str {
        match self.content_type.as_deref() {
            Some(mime) if mime.starts_with("image/") => mime,
            _ => "image/jpeg",
        }
    }
}
