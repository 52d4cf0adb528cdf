//! Relying party id resolution

use url::Url;

use crate::webauthn::WebAuthnError;

/// Resolve the relying party id for a request
///
/// An explicit, non-empty id wins; otherwise the hostname of `origin` is
/// used.
///
/// # Errors
/// Returns `WebAuthnError::InvalidOrigin` if no explicit id is given and the
/// origin has no hostname.
pub fn resolve_rp_id(explicit: Option<&str>, origin: &str) -> Result<String, WebAuthnError> {
    if let Some(id) = explicit.filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }

    let url = Url::parse(origin)
        .map_err(|e| WebAuthnError::InvalidOrigin(format!("Cannot parse origin '{origin}': {e}")))?;
    url.host_str()
        .map(ToString::to_string)
        .ok_or_else(|| WebAuthnError::InvalidOrigin(format!("Origin '{origin}' has no hostname")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_hostname() {
        assert_eq!(resolve_rp_id(None, "https://example.com").unwrap(), "example.com");
        assert_eq!(
            resolve_rp_id(None, "https://login.example.com:8443").unwrap(),
            "login.example.com"
        );
    }

    #[test]
    fn test_explicit_id_wins() {
        assert_eq!(
            resolve_rp_id(Some("example.com"), "https://sub.example.com").unwrap(),
            "example.com"
        );
        assert_eq!(resolve_rp_id(Some(""), "https://a.example").unwrap(), "a.example");
    }

    #[test]
    fn test_invalid_origin() {
        assert!(matches!(
            resolve_rp_id(None, "not an origin"),
            Err(WebAuthnError::InvalidOrigin(_))
        ));
        assert!(matches!(
            resolve_rp_id(None, "data:text/plain,hello"),
            Err(WebAuthnError::InvalidOrigin(_))
        ));
    }
}
