//! Inbound callback request view.

use std::collections::HashMap;

use bytes::Bytes;

/// The host-constructed view of an inbound gateway callback.
///
/// Signature verification recomputes the HMAC over the exact URL and raw
/// body bytes the gateway signed, so the host must hand both through
/// without re-serialization or URL normalization.
#[derive(Debug, Clone, Default)]
pub struct CallbackRequest {
    url: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl CallbackRequest {
    pub fn new(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Attach a header. Later writes to the same name win.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Full request URL as received by the host endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw request body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
