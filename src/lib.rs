//! # image-charts - Fluent client for the Image-Charts API
//!
//! Build a chart by chaining parameter setters on an immutable
//! [`ImageCharts`] value, then render it as a (signed) URL, raw image bytes,
//! a base64 data URI, or a file on disk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use image_charts::ImageCharts;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), image_charts::Error> {
//!     let chart = ImageCharts::new()
//!         .cht("bvg") // vertical bar chart
//!         .chs("300x300") // 300px x 300px
//!         .chd("a:60,40"); // 2 data points: 60 and 40
//!
//!     println!("{}", chart.to_url());
//!     println!("{}", chart.to_data_uri().await?);
//!     chart.to_file("/tmp/chart.png").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Immutable builder** - Every setter returns a new value; intermediate charts are reusable templates
//! - **Full parameter catalog** - One setter per API parameter, plus [`ImageCharts::with_parameter`]
//! - **Enterprise signing** - HMAC-SHA256 `ichm` signature computed for charts carrying an account id
//! - **Typed errors** - Timeouts, API validation failures and filesystem errors are distinct variants
//! - **Automatic logging** - Structured logging with `tracing`
//!
//! ## Enterprise accounts
//!
//! ```
//! use image_charts::ImageCharts;
//!
//! # fn example() -> Result<(), image_charts::Error> {
//! let url = ImageCharts::builder()
//!     .secret("plop")
//!     .build()?
//!     .cht("p")
//!     .chd("t:1,2,3")
//!     .chs("100x100")
//!     .icac("test_fixture")
//!     .to_url();
//!
//! assert!(url.ends_with("&ichm=71bd93758b49ed28fdabd23a0ff366fe7bf877296ea888b9aaf4ede7978bdc8d"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```no_run
//! use image_charts::{Error, ImageCharts};
//!
//! # async fn example() {
//! match ImageCharts::new().cht("p").chd("t:1,2,3").to_blob().await {
//!     Ok(bytes) => println!("{} bytes", bytes.len()),
//!     Err(Error::Api { message, validation_code, .. }) => {
//!         eprintln!("{validation_code}: {message}"); // IC_...: "chs" is required
//!     }
//!     Err(Error::Timeout) => eprintln!("Timed out"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # }
//! ```

mod client;
mod error;
pub mod params;
mod response;
pub mod signature;
pub mod validation;

pub use client::{
    ImageCharts, ImageChartsBuilder, CLIENT_NAME, CLIENT_VERSION, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_PROTOCOL, DEFAULT_TIMEOUT, PATHNAME,
};
pub use error::{Error, Result};
pub use response::ChartImage;
