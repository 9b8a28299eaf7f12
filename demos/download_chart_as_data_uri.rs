//! Downloads a bar chart and prints it as a base64 data URI.
//!
//! Run with: `cargo run --example download_chart_as_data_uri`

use image_charts::{Error, ImageCharts};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("image_charts=debug")
        .init();

    let chart = ImageCharts::new()
        .cht("bvg") // vertical bar chart
        .chs("300x300") // 300px x 300px
        .chd("a:60,40"); // 2 data points: 60 and 40

    println!("URL: {}", chart.to_url());

    match chart.to_data_uri().await {
        Ok(data_uri) => println!("{}", data_uri), // data:image/png;base64,iVBORw0KGgo...
        Err(Error::Api {
            message,
            validation_code,
            status,
        }) => {
            eprintln!("Chart refused ({}, {}): {}", status, validation_code, message);
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
