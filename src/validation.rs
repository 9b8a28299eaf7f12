//! Parsing of the error headers sent by the Image-Charts API.
//!
//! A refused chart comes back with a non-2xx status and up to two headers:
//! `x-ic-error-validation`, a JSON array of `{"message": ...}` objects, and
//! `x-ic-error-code`, a machine readable code.

use http::{HeaderMap, StatusCode};
use serde::Deserialize;

/// Header carrying the JSON list of validation messages.
pub const VALIDATION_HEADER: &str = "x-ic-error-validation";

/// Header carrying the error code.
pub const CODE_HEADER: &str = "x-ic-error-code";

#[derive(Debug, Deserialize)]
struct ValidationEntry {
    message: String,
}

/// The reason the API gave for refusing a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetails {
    /// Validation messages joined with `\n`, else the error code, else the status code.
    pub message: String,

    /// The `x-ic-error-code` header, else `HTTP_<status>`.
    pub validation_code: String,
}

impl ApiErrorDetails {
    /// Extracts the error details from an API response.
    ///
    /// # Examples
    ///
    /// ```
    /// use image_charts::validation::ApiErrorDetails;
    /// use http::{HeaderMap, StatusCode};
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert(
    ///     "x-ic-error-validation",
    ///     r#"[{"message":"\"chs\" is required"}]"#.parse().unwrap(),
    /// );
    ///
    /// let details = ApiErrorDetails::from_headers(StatusCode::BAD_REQUEST, &headers);
    /// assert_eq!(details.message, "\"chs\" is required");
    /// assert_eq!(details.validation_code, "HTTP_400");
    /// ```
    pub fn from_headers(status: StatusCode, headers: &HeaderMap) -> Self {
        let code = header_str(headers, CODE_HEADER);

        let message = parse_validation_messages(headers)
            .or_else(|| code.map(str::to_string))
            .unwrap_or_else(|| status.as_u16().to_string());

        let validation_code = code
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));

        Self {
            message,
            validation_code,
        }
    }
}

/// Returns a header as a non-empty string.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Joins the validation messages, or `None` if the header is missing,
/// unparsable or an empty list.
fn parse_validation_messages(headers: &HeaderMap) -> Option<String> {
    let raw = header_str(headers, VALIDATION_HEADER)?;

    match serde_json::from_str::<Vec<ValidationEntry>>(raw) {
        Ok(entries) if !entries.is_empty() => Some(
            entries
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(
                error = %e,
                header = %raw,
                "Unparsable validation header"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_validation_messages_are_joined() {
        let h = headers(&[
            (
                VALIDATION_HEADER,
                r#"[{"message":"\"chs\" is required"},{"message":"\"cht\" is invalid"}]"#,
            ),
            (CODE_HEADER, "IC_VALIDATION_ERROR"),
        ]);

        let details = ApiErrorDetails::from_headers(StatusCode::BAD_REQUEST, &h);
        assert_eq!(details.message, "\"chs\" is required\n\"cht\" is invalid");
        assert_eq!(details.validation_code, "IC_VALIDATION_ERROR");
    }

    #[test]
    fn test_code_used_as_message_without_validation() {
        let h = headers(&[(CODE_HEADER, "IC_MISSING_ENT_PARAMETER")]);

        let details = ApiErrorDetails::from_headers(StatusCode::FORBIDDEN, &h);
        assert_eq!(details.message, "IC_MISSING_ENT_PARAMETER");
        assert_eq!(details.validation_code, "IC_MISSING_ENT_PARAMETER");
    }

    #[test]
    fn test_status_fallback() {
        let details = ApiErrorDetails::from_headers(StatusCode::BAD_GATEWAY, &HeaderMap::new());
        assert_eq!(details.message, "502");
        assert_eq!(details.validation_code, "HTTP_502");
    }

    #[test]
    fn test_empty_validation_list_falls_through() {
        let h = headers(&[(VALIDATION_HEADER, "[]"), (CODE_HEADER, "IC_X")]);

        let details = ApiErrorDetails::from_headers(StatusCode::BAD_REQUEST, &h);
        assert_eq!(details.message, "IC_X");
    }

    #[test]
    fn test_unparsable_validation_falls_through() {
        let h = headers(&[(VALIDATION_HEADER, "not json")]);

        let details = ApiErrorDetails::from_headers(StatusCode::BAD_REQUEST, &h);
        assert_eq!(details.message, "400");
        assert_eq!(details.validation_code, "HTTP_400");
    }

    #[test]
    fn test_empty_code_header_is_ignored() {
        let h = headers(&[(CODE_HEADER, "")]);

        let details = ApiErrorDetails::from_headers(StatusCode::NOT_FOUND, &h);
        assert_eq!(details.message, "404");
        assert_eq!(details.validation_code, "HTTP_404");
    }
}
