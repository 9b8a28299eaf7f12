//! Downloads a bar chart to a PNG file.
//!
//! Run with: `cargo run --example download_chart_as_image [path]`

use image_charts::ImageCharts;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("image_charts=debug")
        .init();

    let chart_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/chart.png".to_string());

    ImageCharts::builder()
        .timeout(Duration::from_secs(10))
        .build()?
        .cht("bvg") // vertical bar chart
        .chs("300x300") // 300px x 300px
        .chd("a:60,40") // 2 data points: 60 and 40
        .to_file(&chart_path)
        .await?;

    println!("Chart written to {}", chart_path);
    Ok(())
}
