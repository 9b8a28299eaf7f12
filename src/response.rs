//! Rendered chart returned by a successful request.
//!
//! The [`ChartImage`] type keeps the raw image bytes along with metadata
//! about the HTTP transaction, for callers who need more than
//! [`ImageCharts::to_blob`](crate::ImageCharts::to_blob).

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A chart image downloaded from the API.
///
/// # Examples
///
/// ```no_run
/// use image_charts::ImageCharts;
///
/// # async fn example() -> Result<(), image_charts::Error> {
/// let image = ImageCharts::new()
///     .cht("p")
///     .chd("t:1,2,3")
///     .chs("100x100")
///     .fetch()
///     .await?;
///
/// println!("{} bytes of {:?}", image.bytes.len(), image.content_type());
/// println!("Request took {:?}", image.latency);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChartImage {
    /// The response body, verbatim.
    pub bytes: Vec<u8>,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the whole body was read.
    pub latency: Duration,
}

impl ChartImage {
    /// Creates a new `ChartImage`.
    pub fn new(bytes: Vec<u8>, status: StatusCode, headers: HeaderMap, latency: Duration) -> Self {
        Self {
            bytes,
            status,
            headers,
            latency,
        }
    }

    /// Returns the `content-type` the API announced, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// # use image_charts::ChartImage;
    /// # use http::{HeaderMap, HeaderValue, StatusCode};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("image/png"));
    ///
    /// let image = ChartImage::new(vec![], StatusCode::OK, headers, Duration::from_millis(10));
    /// assert_eq!(image.content_type(), Some("image/png"));
    /// ```
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Consumes the image and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for ChartImage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
