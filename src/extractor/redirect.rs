use crate::error::{Result, ScraperError};

const REDIRECT_MARKER: &str = "redirect=";

/// Extracts the destination URL embedded in a Yellow Pages outbound redirect link.
///
/// The link is percent-decoded first, then everything after the first
/// `redirect=` marker is returned verbatim. The payload is not validated or
/// trimmed; a malformed destination is the caller's problem. A link without
/// the marker is a hard error, not an empty result, so callers notice when
/// the directory changes its link shape.
pub fn unwrap_redirect_url(link: Option<&str>) -> Result<Option<String>> {
    let Some(link) = link else {
        return Ok(None);
    };

    let decoded_bytes = urlencoding::decode_binary(link.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded_bytes);

    match decoded.split_once(REDIRECT_MARKER) {
        Some((_, destination)) => Ok(Some(destination.to_string())),
        None => Err(ScraperError::MissingRedirectMarker(link.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_link_stays_absent() {
        assert_eq!(unwrap_redirect_url(None).unwrap(), None);
    }

    #[test]
    fn unwraps_percent_encoded_destination() {
        let link = "/gourl/?what=website&redirect=http%3A%2F%2Fymca.ca%2F";
        assert_eq!(
            unwrap_redirect_url(Some(link)).unwrap(),
            Some("http://ymca.ca/".to_string())
        );
    }

    #[test]
    fn destination_is_taken_verbatim_even_when_malformed() {
        let link = "http://x/?redirect=htp:/broken url";
        assert_eq!(
            unwrap_redirect_url(Some(link)).unwrap(),
            Some("htp:/broken url".to_string())
        );
    }

    #[test]
    fn broken_outer_url_is_tolerated() {
        let link = "x%20y?redirect=http://example.com";
        assert_eq!(
            unwrap_redirect_url(Some(link)).unwrap(),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn missing_marker_is_a_hard_error() {
        let err = unwrap_redirect_url(Some("http://x/?url=Y")).unwrap_err();
        assert!(matches!(err, ScraperError::MissingRedirectMarker(_)));
    }

    #[test]
    fn splits_on_first_marker_occurrence() {
        let link = "http://x/?redirect=http://y/?redirect=z";
        assert_eq!(
            unwrap_redirect_url(Some(link)).unwrap(),
            Some("http://y/?redirect=z".to_string())
        );
    }
}
