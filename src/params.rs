//! The catalog of chart parameters understood by the Image-Charts API.
//!
//! Each entry becomes a fluent setter on [`ImageCharts`], a constant in
//! [`keys`] and a row in [`CATALOG`]. Values are passed through untouched:
//! their mini-language is interpreted by the API, not by this crate.
//!
//! Reference documentation lives at <https://documentation.image-charts.com/>.

use crate::ImageCharts;

macro_rules! chart_parameters {
    ($( $(#[$doc:meta])* $method:ident => $konst:ident = $key:literal; )*) => {
        /// Query parameter names.
        pub mod keys {
            $(
                #[doc = concat!("`", $key, "`")]
                pub const $konst: &str = $key;
            )*
        }

        /// Every `(method, key)` pair, in declaration order.
        pub const CATALOG: &[(&str, &str)] = &[ $( (stringify!($method), $key), )* ];

        impl ImageCharts {
            $(
                $(#[$doc])*
                pub fn $method(&self, value: impl Into<String>) -> ImageCharts {
                    self.with_parameter($key, value)
                }
            )*
        }
    };
}

chart_parameters! {
    /// Chart type: `bvg` grouped bars, `bvs` stacked bars, `lc` line chart,
    /// `ls` sparklines, `p` pie chart, `gv` GraphViz, ...
    ///
    /// ```
    /// let chart = image_charts::ImageCharts::new().cht("bvg");
    /// assert_eq!(chart.get("cht"), Some("bvg"));
    /// ```
    cht => CHT = "cht";
    /// Chart data, e.g. `a:-100,200.5,75.55,110` or `t:10,20,30|15,25,35`.
    chd => CHD = "chd";
    /// Data format with custom scaling, e.g. `-80,140`.
    chds => CHDS = "chds";
    /// QR code data encoding. `UTF-8` is the only supported value.
    choe => CHOE = "choe";
    /// QR code error correction level and optional margin, e.g. `L|4`.
    chld => CHLD = "chld";
    /// Axis data range, e.g. `0,0,500|1,0,200`.
    chxr => CHXR = "chxr";
    /// Image output format: `.png`, `.svg` or `.gif`.
    chof => CHOF = "chof";
    /// Chart size as `<width>x<height>`.
    chs => CHS = "chs";
    /// Legend text for each series, e.g. `NASDAQ|FTSE100|DOW`.
    chdl => CHDL = "chdl";
    /// Legend text color and font size, e.g. `9e9e9e,17`.
    chdls => CHDLS = "chdls";
    /// Solid or dotted grid lines.
    chg => CHG = "chg";
    /// Series colors in `RRGGBB[AA]` format, e.g. `FF0000,00FF00,0000FF`.
    chco => CHCO = "chco";
    /// Chart title.
    chtt => CHTT = "chtt";
    /// Chart title color and font size, e.g. `00FF00,17`.
    chts => CHTS = "chts";
    /// Visible axes, e.g. `x,y`.
    chxt => CHXT = "chxt";
    /// Custom axis labels, e.g. `0:|Jan|July|Jan`.
    chxl => CHXL = "chxl";
    /// Axis label styles, e.g. `1N*cUSD*Mil,FF0000`.
    chxs => CHXS = "chxs";
    /// Compound charts and line fills.
    chm => CHM = "chm";
    /// Line thickness and solid/dashed style, e.g. `3,6,3|5`.
    chls => CHLS = "chls";
    /// Bar, pie slice, doughnut slice and polar slice labels. Overrides `chdl`.
    chl => CHL = "chl";
    /// Position and style of labels on data.
    chlps => CHLPS = "chlps";
    /// Chart margins, e.g. `30,30,30,30`.
    chma => CHMA = "chma";
    /// Position of the legend and order of the legend entries.
    chdlp => CHDLP = "chdlp";
    /// Background fills, e.g. `b0,lg,0,f44336,0.3,03a9f4,0.8`.
    chf => CHF = "chf";
    /// Bar corner radius.
    chbr => CHBR = "chbr";
    /// GIF animation configuration, e.g. `1300|easeInOutSine`.
    ///
    /// A chart carrying this parameter is rendered as `image/gif`.
    chan => CHAN = "chan";
    /// Doughnut chart inside label.
    chli => CHLI = "chli";
    /// Image-Charts enterprise account id.
    ///
    /// Together with a secret, this makes [`ImageCharts::to_url`] sign the query.
    icac => ICAC = "icac";
    /// HMAC-SHA256 signature required to activate paid features.
    ///
    /// Usually computed by [`ImageCharts::to_url`] rather than set by hand.
    ichm => ICHM = "ichm";
    /// Default font family for all text, from Google Fonts.
    icff => ICFF = "icff";
    /// Default font style for all text.
    icfs => ICFS = "icfs";
    /// Localization (ISO 639-1).
    iclocale => ICLOCALE = "iclocale";
    /// Retina mode, activated with `1`.
    icretina => ICRETINA = "icretina";
    /// Background color for QR codes.
    icqrb => ICQRB = "icqrb";
    /// Foreground color for QR codes.
    icqrf => ICQRF = "icqrf";
}
