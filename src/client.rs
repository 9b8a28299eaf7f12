//! Immutable chart request value and its HTTP plumbing.
//!
//! The [`ImageCharts`] type is the main entry point: every parameter setter
//! returns a new value, and the output methods ([`to_url`](ImageCharts::to_url),
//! [`to_blob`](ImageCharts::to_blob), [`to_data_uri`](ImageCharts::to_data_uri),
//! [`to_file`](ImageCharts::to_file)) render whatever was accumulated.
//! Use [`ImageChartsBuilder`] to point the client at another host or to
//! provide an enterprise secret.

use crate::{
    params::keys,
    response::ChartImage,
    signature,
    validation::ApiErrorDetails,
    Error, Result,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::{header::USER_AGENT, HeaderValue};
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::{form_urlencoded, Url};

/// Default protocol.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Default API host.
pub const DEFAULT_HOST: &str = "image-charts.com";

/// Default API port.
pub const DEFAULT_PORT: u16 = 443;

/// Default timeout for connecting and reading a response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Path of the chart endpoint.
pub const PATHNAME: &str = "/chart";

/// Client name sent in the default user agent.
pub const CLIENT_NAME: &str = "rust-image-charts";

/// Client version sent in the default user agent.
pub const CLIENT_VERSION: &str = match option_env!("CARGO_PKG_VERSION") {
    Some(version) => version,
    None => "latest",
};

/// An immutable Image-Charts request.
///
/// Setting a parameter never changes the receiver: it returns a new value
/// sharing the same configuration, so any intermediate chart can serve as a
/// template for several divergent charts.
///
/// # Examples
///
/// ```no_run
/// use image_charts::ImageCharts;
///
/// # async fn example() -> Result<(), image_charts::Error> {
/// let pie = ImageCharts::new().cht("p").chs("300x300");
///
/// let small = pie.chd("t:1,2,3");
/// let large = pie.chd("t:10,20,30,40");
///
/// assert_eq!(
///     small.to_url(),
///     "https://image-charts.com:443/chart?cht=p&chs=300x300&chd=t%3A1%2C2%2C3"
/// );
///
/// let png = large.to_blob().await?;
/// println!("Downloaded {} bytes", png.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ImageCharts {
    inner: Arc<ClientInner>,
    query: IndexMap<String, String>,
}

struct ClientInner {
    http_client: reqwest::Client,
    protocol: String,
    host: String,
    port: u16,
    timeout: Duration,
    secret: Option<String>,
    user_agent: Option<String>,
}

impl ImageCharts {
    /// Creates a chart with the default configuration and an empty query.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, like
    /// `reqwest::Client::new()`. Use [`ImageCharts::builder`] to get an error instead.
    pub fn new() -> Self {
        ImageChartsBuilder::new().into_chart(reqwest::Client::new())
    }

    /// Creates a new `ImageChartsBuilder` for configuring the client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use image_charts::ImageCharts;
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), image_charts::Error> {
    /// let chart = ImageCharts::builder()
    ///     .secret("my-secret")
    ///     .timeout(Duration::from_secs(2))
    ///     .build()?
    ///     .icac("my-account");
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ImageChartsBuilder {
        ImageChartsBuilder::new()
    }

    /// Returns a new chart whose query has `key` set to `value`.
    ///
    /// An existing key is overwritten in place. The receiver is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use image_charts::ImageCharts;
    ///
    /// let base = ImageCharts::new().with_parameter("cht", "p");
    /// let derived = base.with_parameter("cht", "bvs");
    ///
    /// assert_eq!(base.get("cht"), Some("p"));
    /// assert_eq!(derived.get("cht"), Some("bvs"));
    /// ```
    pub fn with_parameter(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut query = self.query.clone();
        query.insert(key.into(), value.into());

        Self {
            inner: Arc::clone(&self.inner),
            query,
        }
    }

    /// Returns the full Image-Charts URL, signed when needed.
    ///
    /// The query is form-encoded in insertion order. When the chart carries
    /// an account id (`icac`) and a secret of more than one character was
    /// configured, `&ichm=<hex HMAC-SHA256 of the encoded query>` is appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use image_charts::ImageCharts;
    ///
    /// assert_eq!(ImageCharts::new().to_url(), "https://image-charts.com:443/chart?");
    ///
    /// let url = ImageCharts::new().cht("p").chd("t:1,2,3").to_url();
    /// assert_eq!(url, "https://image-charts.com:443/chart?cht=p&chd=t%3A1%2C2%2C3");
    /// ```
    pub fn to_url(&self) -> String {
        let mut search_params = self.encoded_query();

        if signature::should_sign(self.inner.secret.as_deref(), &self.query) {
            if let Some(secret) = self.inner.secret.as_deref() {
                let digest = signature::sign(secret, &search_params);
                search_params.push('&');
                search_params.push_str(signature::SIGNATURE_PARAM);
                search_params.push('=');
                search_params.push_str(&digest);
            }
        }

        format!(
            "{}://{}:{}{}?{}",
            self.inner.protocol, self.inner.host, self.inner.port, PATHNAME, search_params
        )
    }

    fn encoded_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Returns the `user-agent` header sent with requests.
    ///
    /// Unless overridden at construction, this is
    /// `rust-image-charts/<version>` followed by ` (<icac>)` when an account
    /// id is set.
    pub fn user_agent(&self) -> String {
        if let Some(user_agent) = &self.inner.user_agent {
            return user_agent.clone();
        }

        match self.query.get(keys::ICAC) {
            Some(account_id) => format!("{}/{} ({})", CLIENT_NAME, CLIENT_VERSION, account_id),
            None => format!("{}/{}", CLIENT_NAME, CLIENT_VERSION),
        }
    }

    /// Requests the chart and returns the image with its response metadata.
    ///
    /// # Errors
    ///
    /// * [`Error::Timeout`] if connecting or reading exceeded the configured timeout
    /// * [`Error::Api`] if the API answered with a status outside of `200..300`
    /// * [`Error::Network`] for any other transport failure
    pub async fn fetch(&self) -> Result<ChartImage> {
        let url = Url::parse(&self.to_url())?;
        let user_agent = self.user_agent();
        let user_agent_header = HeaderValue::from_str(&user_agent)
            .map_err(|e| Error::Configuration(format!("Invalid user agent: {}", e)))?;

        tracing::debug!(
            url = %url,
            user_agent = %user_agent,
            "Requesting chart"
        );

        let start_time = Instant::now();
        let response = self
            .inner
            .http_client
            .get(url)
            .header(USER_AGENT, user_agent_header)
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let details = ApiErrorDetails::from_headers(status, &headers);

            if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    code = %details.validation_code,
                    message = %details.message,
                    "Server error (5xx)"
                );
            } else {
                tracing::error!(
                    status = status.as_u16(),
                    code = %details.validation_code,
                    message = %details.message,
                    "Chart refused"
                );
            }

            return Err(Error::Api {
                message: details.message,
                validation_code: details.validation_code,
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?
            .to_vec();
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            bytes = bytes.len(),
            "Received chart"
        );

        Ok(ChartImage::new(bytes, status, headers, latency))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = Error::from(err);
        if err.is_timeout() {
            tracing::warn!(
                timeout_ms = self.inner.timeout.as_millis(),
                host = %self.inner.host,
                "Chart request timed out"
            );
        }
        err
    }

    /// Requests the chart and returns the raw image bytes.
    ///
    /// See [`fetch`](ImageCharts::fetch) for the possible errors.
    pub async fn to_blob(&self) -> Result<Vec<u8>> {
        Ok(self.fetch().await?.into_bytes())
    }

    /// Requests the chart and returns it as a base64 data URI.
    ///
    /// The mime type is `image/gif` for animated charts (`chan` set) and
    /// `image/png` otherwise.
    pub async fn to_data_uri(&self) -> Result<String> {
        let bytes = self.to_blob().await?;
        Ok(format!(
            "data:{};base64,{}",
            self.mime_type(),
            STANDARD.encode(bytes)
        ))
    }

    /// Requests the chart and writes the image bytes to `path`.
    ///
    /// # Errors
    ///
    /// Request errors as for [`fetch`](ImageCharts::fetch), and [`Error::Io`]
    /// carrying the untouched `std::io::Error` if the file cannot be written
    /// (missing directory, permissions, ...).
    pub async fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_blob().await?;

        tokio::fs::write(path, &bytes).await?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Chart written");
        Ok(())
    }

    fn mime_type(&self) -> &'static str {
        if self.query.contains_key(keys::CHAN) {
            "image/gif"
        } else {
            "image/png"
        }
    }

    /// Returns the configured protocol.
    pub fn protocol(&self) -> &str {
        &self.inner.protocol
    }

    /// Returns the configured host.
    pub fn host(&self) -> &str {
        &self.inner.host
    }

    /// Returns the configured port.
    pub fn port(&self) -> u16 {
        self.inner.port
    }

    /// Returns the path of the chart endpoint, always `/chart`.
    pub fn pathname(&self) -> &str {
        PATHNAME
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Returns the accumulated query, in insertion order.
    pub fn query(&self) -> &IndexMap<String, String> {
        &self.query
    }

    /// Returns the value of a single query parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

impl Default for ImageCharts {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ImageCharts {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.inner, &other.inner);
        a.protocol == b.protocol
            && a.host == b.host
            && a.port == b.port
            && a.timeout == b.timeout
            && a.secret == b.secret
            && a.user_agent == b.user_agent
            && self.query == other.query
    }
}

impl fmt::Debug for ImageCharts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCharts")
            .field("protocol", &self.inner.protocol)
            .field("host", &self.inner.host)
            .field("port", &self.inner.port)
            .field("timeout", &self.inner.timeout)
            .field("secret", &redacted(&self.inner.secret))
            .field("user_agent", &self.inner.user_agent)
            .field("query", &self.query)
            .finish()
    }
}

fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

/// Builder for configuring and creating an [`ImageCharts`].
///
/// The configuration is fixed once built and shared by every chart derived
/// from the result.
///
/// # Examples
///
/// ```no_run
/// use image_charts::ImageChartsBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), image_charts::Error> {
/// let chart = ImageChartsBuilder::new()
///     .host("on-premise-image-charts.com")
///     .port(8080)
///     .protocol("http")
///     .timeout(Duration::from_secs(10))
///     .user_agent("my-app/1.0")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ImageChartsBuilder {
    protocol: String,
    host: String,
    port: u16,
    timeout: Duration,
    secret: Option<String>,
    user_agent: Option<String>,
}

impl ImageChartsBuilder {
    /// Creates a new `ImageChartsBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            secret: None,
            user_agent: None,
        }
    }

    /// Sets the protocol, `http` or `https`.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Sets the API host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the API port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the timeout for both connecting and reading the response.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the enterprise secret used to sign charts carrying an account id.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Overrides the default `user-agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds an [`ImageCharts`] with an empty query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the protocol is neither `http`
    /// nor `https`, if the host is empty, or if the HTTP client cannot be built.
    pub fn build(self) -> Result<ImageCharts> {
        if self.protocol != "http" && self.protocol != "https" {
            return Err(Error::Configuration(format!(
                "Unsupported protocol: {}",
                self.protocol
            )));
        }

        if self.host.is_empty() {
            return Err(Error::Configuration("Host is required".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .connect_timeout(self.timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(self.into_chart(http_client))
    }

    fn into_chart(self, http_client: reqwest::Client) -> ImageCharts {
        ImageCharts {
            inner: Arc::new(ClientInner {
                http_client,
                protocol: self.protocol,
                host: self.host,
                port: self.port,
                timeout: self.timeout,
                secret: self.secret,
                user_agent: self.user_agent,
            }),
            query: IndexMap::new(),
        }
    }
}

impl Default for ImageChartsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ImageChartsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageChartsBuilder")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("secret", &redacted(&self.secret))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CATALOG;

    fn signed(secret: &str) -> ImageCharts {
        ImageCharts::builder().secret(secret).build().unwrap()
    }

    #[test]
    fn test_default_configuration() {
        let chart = ImageCharts::new();

        assert_eq!(chart.protocol(), "https");
        assert_eq!(chart.host(), "image-charts.com");
        assert_eq!(chart.port(), 443);
        assert_eq!(chart.pathname(), "/chart");
        assert_eq!(chart.timeout(), Duration::from_millis(5000));
        assert!(chart.query().is_empty());
    }

    #[test]
    fn test_user_defined_configuration() {
        let chart = ImageCharts::builder()
            .protocol("http")
            .host("on-premise-image-charts.com")
            .port(8080)
            .build()
            .unwrap();

        assert_eq!(chart.protocol(), "http");
        assert_eq!(chart.host(), "on-premise-image-charts.com");
        assert_eq!(chart.port(), 8080);
        assert_eq!(
            chart.cht("p").to_url(),
            "http://on-premise-image-charts.com:8080/chart?cht=p"
        );
    }

    #[test]
    fn test_empty_query_keeps_question_mark() {
        assert_eq!(ImageCharts::new().to_url(), "https://image-charts.com:443/chart?");
    }

    #[test]
    fn test_to_url_encodes_values() {
        assert_eq!(
            ImageCharts::new().cht("p").chd("t:1,2,3").to_url(),
            "https://image-charts.com:443/chart?cht=p&chd=t%3A1%2C2%2C3"
        );
        assert_eq!(
            ImageCharts::new().chtt("My beautiful chart").chl("a|b").to_url(),
            "https://image-charts.com:443/chart?chtt=My+beautiful+chart&chl=a%7Cb"
        );
    }

    #[test]
    fn test_every_parameter_is_exposed() {
        let mut chart = ImageCharts::new();
        let mut expected = Vec::new();

        for (method, key) in CATALOG {
            chart = chart.with_parameter(*key, "plop");
            expected.push(format!("{}=plop", method));
        }

        assert_eq!(chart.query().len(), CATALOG.len());
        assert_eq!(
            chart.to_url(),
            format!("https://image-charts.com:443/chart?{}", expected.join("&"))
        );
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let chart = ImageCharts::new().cht("p").chs("10x10").cht("bvg");

        assert_eq!(
            chart.to_url(),
            "https://image-charts.com:443/chart?cht=bvg&chs=10x10"
        );
    }

    #[test]
    fn test_derivation_leaves_receiver_untouched() {
        let base = ImageCharts::new().cht("p");
        let before = base.to_url();

        let derived = base.chd("t:1,2,3");
        let _other = base.chd("t:4,5,6").cht("bvs");

        assert_eq!(base.to_url(), before);
        assert_eq!(base.query().len(), 1);
        assert_eq!(derived.get("chd"), Some("t:1,2,3"));
        assert_eq!(derived.get("cht"), Some("p"));
        assert_ne!(base, derived);
        assert_eq!(base, base.clone());
    }

    #[test]
    fn test_query_exposes_parameters() {
        let chart = ImageCharts::new().cht("p").chd("t:1,2,3").icac("plop");
        let pairs: Vec<_> = chart
            .query()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        assert_eq!(pairs, vec![("cht", "p"), ("chd", "t:1,2,3"), ("icac", "plop")]);
    }

    #[test]
    fn test_signature_added_with_account_and_secret() {
        let url = signed("plop")
            .cht("p")
            .chd("t:1,2,3")
            .chs("100x100")
            .icac("test_fixture")
            .to_url();

        assert_eq!(
            url,
            "https://image-charts.com:443/chart?cht=p&chd=t%3A1%2C2%2C3&chs=100x100&icac=test_fixture&ichm=71bd93758b49ed28fdabd23a0ff366fe7bf877296ea888b9aaf4ede7978bdc8d"
        );
    }

    #[test]
    fn test_no_signature_without_usable_secret() {
        let unsigned = "https://image-charts.com:443/chart?cht=p&icac=test_fixture";

        assert_eq!(ImageCharts::new().cht("p").icac("test_fixture").to_url(), unsigned);
        assert_eq!(signed("x").cht("p").icac("test_fixture").to_url(), unsigned);
        assert_eq!(signed("").cht("p").icac("test_fixture").to_url(), unsigned);
    }

    #[test]
    fn test_no_signature_without_account_id() {
        assert_eq!(
            signed("plop").cht("p").to_url(),
            "https://image-charts.com:443/chart?cht=p"
        );
    }

    #[test]
    fn test_default_user_agent() {
        let chart = ImageCharts::new().cht("p");
        assert_eq!(
            chart.user_agent(),
            format!("rust-image-charts/{}", CLIENT_VERSION)
        );

        let chart = chart.icac("MY_ACCOUNT_ID");
        assert_eq!(
            chart.user_agent(),
            format!("rust-image-charts/{} (MY_ACCOUNT_ID)", CLIENT_VERSION)
        );
    }

    #[test]
    fn test_custom_user_agent_wins() {
        let chart = ImageCharts::builder()
            .user_agent("my-app/1.0")
            .build()
            .unwrap()
            .icac("MY_ACCOUNT_ID");

        assert_eq!(chart.user_agent(), "my-app/1.0");
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(ImageCharts::new().cht("p").mime_type(), "image/png");
        assert_eq!(ImageCharts::new().chan("100").mime_type(), "image/gif");
    }

    #[test]
    fn test_invalid_configuration() {
        let err = ImageCharts::builder().protocol("ftp").build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = ImageCharts::builder().host("").build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let chart = signed("super-secret").cht("p");
        let debug = format!("{:?}", chart);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));

        let builder = ImageCharts::builder().secret("super-secret");
        assert!(!format!("{:?}", builder).contains("super-secret"));
    }
}
