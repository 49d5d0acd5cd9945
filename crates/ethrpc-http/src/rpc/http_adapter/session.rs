use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};

const PAIR_SEPARATOR: &[u8] = b"; ";

/// Sticky-session cookie state for one client.
///
/// This is deliberately not an RFC 6265 cookie jar: each `Set-Cookie` value
/// is cut at the first `"; "`, attributes (`Path`, `Expires`, `HttpOnly`, ...)
/// are dropped, and the pairs are joined with `"; "`. The whole value is
/// replaced on every capture. Bytes are kept exactly as the server sent them.
#[derive(Debug, Default)]
pub(super) struct SessionCookie {
    enabled: bool,
    value: Option<HeaderValue>,
}

impl SessionCookie {
    pub(super) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            value: None,
        }
    }

    pub(super) fn get(&self) -> Option<&HeaderValue> {
        self.value.as_ref()
    }

    /// Value for the outgoing `Cookie` header, if one should be sent.
    pub(super) fn header_value(&self) -> Option<&HeaderValue> {
        if !self.enabled {
            return None;
        }
        self.value.as_ref().filter(|v| !v.is_empty())
    }

    /// Cookie carried by a response, or `None` when the session is disabled
    /// or the response sets nothing.
    pub(super) fn capture(&self, headers: &HeaderMap) -> Option<HeaderValue> {
        if !self.enabled {
            return None;
        }
        let mut joined: Vec<u8> = Vec::new();
        let mut any = false;
        for value in headers.get_all(SET_COOKIE) {
            if any {
                joined.extend_from_slice(PAIR_SEPARATOR);
            }
            joined.extend_from_slice(cookie_pair(value.as_bytes()));
            any = true;
        }
        if !any {
            return None;
        }
        // Slices of valid header values joined by "; " are valid header values.
        HeaderValue::from_bytes(&joined).ok()
    }

    /// Replace (or clear, with `None`) the stored cookie. No-op when the
    /// session is disabled.
    pub(super) fn set(&mut self, cookie: Option<HeaderValue>) {
        if self.enabled {
            self.value = cookie;
        }
    }
}

/// Everything before the first `"; "`.
fn cookie_pair(raw: &[u8]) -> &[u8] {
    raw.windows(PAIR_SEPARATOR.len())
        .position(|w| w == PAIR_SEPARATOR)
        .map_or(raw, |end| &raw[..end])
}
