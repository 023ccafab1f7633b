use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Header clients may use to supply their own correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request correlation id backed by a ULID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(pub ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Reuse the caller's id when it is a valid ULID, otherwise mint one.
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|s| s.trim().parse::<RequestId>().ok())
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(RequestId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value_is_reused() {
        let id = RequestId::new();
        let parsed = RequestId::from_header_or_new(Some(&id.to_string()));
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_garbage_header_mints_new_id() {
        let a = RequestId::from_header_or_new(Some("not-a-ulid"));
        let b = RequestId::from_header_or_new(None);
        assert_ne!(a, b);
    }
}
