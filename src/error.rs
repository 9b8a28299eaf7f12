//! Error types for chart requests.
//!
//! Three families of failure reach the caller: the request timed out, the
//! Image-Charts API refused the chart (with a message and a validation code
//! taken from its response headers), or the local filesystem rejected the
//! write performed by [`ImageCharts::to_file`](crate::ImageCharts::to_file).

use http::StatusCode;

/// The main error type for chart requests.
///
/// # Examples
///
/// ```no_run
/// use image_charts::{Error, ImageCharts};
///
/// # async fn example() {
/// match ImageCharts::new().cht("p").chd("t:1,2,3").to_blob().await {
///     Ok(bytes) => println!("Got {} bytes", bytes.len()),
///     Err(Error::Api { message, validation_code, status }) => {
///         eprintln!("API refused the chart ({status}, {validation_code}): {message}");
///     }
///     Err(Error::Timeout) => eprintln!("Image-Charts did not answer in time"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Connecting to the API or reading its response took longer than the
    /// configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// A network-level error occurred (connection refused, DNS lookup failed,
    /// TLS handshake failed, ...).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered with a status outside of `200..300`.
    ///
    /// # Fields
    ///
    /// * `message` - The validation messages (newline separated), the error
    ///   code, or the status code, whichever the response provided first
    /// * `validation_code` - The `x-ic-error-code` header, or `HTTP_<status>`
    /// * `status` - The HTTP status code
    #[error("{message}")]
    Api {
        /// Human readable reason
        message: String,
        /// Machine readable error code
        validation_code: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// Writing the chart to disk failed.
    ///
    /// The underlying [`std::io::Error`] is kept as-is, kind and message included.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Invalid configuration was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The generated chart URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(err)
        }
    }
}

impl Error {
    /// Returns the human readable message of an API error.
    ///
    /// Returns `None` for errors that did not come from an API response.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the validation code of an API error, e.g.
    /// `IC_MISSING_ENT_PARAMETER` or `HTTP_500`.
    pub fn validation_code(&self) -> Option<&str> {
        match self {
            Error::Api {
                validation_code, ..
            } => Some(validation_code),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this error has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use image_charts::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::Api {
    ///     message: "\"chs\" is required".to_string(),
    ///     validation_code: "IC_VALIDATION_ERROR".to_string(),
    ///     status: StatusCode::BAD_REQUEST,
    /// };
    /// assert_eq!(err.status_code(), Some(StatusCode::BAD_REQUEST));
    /// assert_eq!(Error::Timeout.status_code(), None);
    /// ```
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }
}

/// A specialized `Result` type for chart requests.
pub type Result<T> = std::result::Result<T, Error>;
