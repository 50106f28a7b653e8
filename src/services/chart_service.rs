//! Mini chart rendering
//!
//! Turns an ordered price series into a small self-contained SVG line
//! chart for inline embedding in watchlist rows and detail panels.
//! Output depends only on the input series and the chart options.

/// Label of the placeholder chart drawn for fewer than two points
pub const INSUFFICIENT_DATA_LABEL: &str = "insufficient data";

/// Stroke when the last price is above the first
pub const STROKE_UP: &str = "#e53a3a";
/// Stroke when the last price is below the first
pub const STROKE_DOWN: &str = "#1976d2";
/// Stroke for flat or too-short series
pub const STROKE_FLAT: &str = "#888888";

/// Chart geometry in SVG user units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub width: f64,
    pub height: f64,
    /// Blank band kept above and below the line
    pub padding: f64,
}

impl ChartOptions {
    /// Watchlist row chart
    pub const MINI: ChartOptions = ChartOptions {
        width: 100.0,
        height: 30.0,
        padding: 5.0,
    };

    /// Stock detail chart
    pub const DETAIL: ChartOptions = ChartOptions {
        width: 300.0,
        height: 100.0,
        padding: 10.0,
    };
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::MINI
    }
}

/// SVG line chart renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniChartRenderer {
    options: ChartOptions,
}

impl MiniChartRenderer {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ChartOptions {
        self.options
    }

    /// Render `prices` (oldest first) as an SVG string
    pub fn render(&self, prices: &[f64]) -> String {
        if prices.len() < 2 {
            return self.placeholder();
        }

        let path = self
            .points(prices)
            .iter()
            .enumerate()
            .map(|(i, (x, y))| {
                let command = if i == 0 { 'M' } else { 'L' };
                format!("{}{},{}", command, fmt_coord(*x), fmt_coord(*y))
            })
            .collect::<Vec<_>>()
            .join(" ");

        let mut svg = self.open_tag();
        svg.push_str(" preserveAspectRatio='none'>");
        svg.push_str(&format!(
            "<path d='{}' fill='none' stroke='{}' stroke-width='1.5'/></svg>",
            path,
            stroke_color(prices)
        ));
        svg
    }

    /// Map prices to SVG coordinates.
    ///
    /// X spreads evenly over `[0, width]` (a lone point is centered). Y is
    /// inverted since the SVG origin is top-left: the highest price sits at
    /// `padding`, the lowest at `height - padding`, and a flat series runs
    /// through the vertical midpoint.
    pub fn points(&self, prices: &[f64]) -> Vec<(f64, f64)> {
        let ChartOptions {
            width,
            height,
            padding,
        } = self.options;

        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let count = prices.len();

        prices
            .iter()
            .enumerate()
            .map(|(i, price)| {
                let x = if count > 1 {
                    i as f64 / (count - 1) as f64 * width
                } else {
                    width / 2.0
                };
                let y = if range == 0.0 {
                    height / 2.0
                } else {
                    height - padding - (price - min) / range * (height - 2.0 * padding)
                };
                (x, y)
            })
            .collect()
    }

    fn placeholder(&self) -> String {
        let ChartOptions { width, height, .. } = self.options;
        let mut svg = self.open_tag();
        svg.push_str(&format!(
            "><text x='{}' y='{}' font-size='10' fill='#aaa' text-anchor='middle' dominant-baseline='middle'>{}</text></svg>",
            fmt_coord(width / 2.0),
            fmt_coord(height / 2.0),
            INSUFFICIENT_DATA_LABEL
        ));
        svg
    }

    /// `<svg ...` without the closing `>`
    fn open_tag(&self) -> String {
        let ChartOptions { width, height, .. } = self.options;
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'",
            w = fmt_coord(width),
            h = fmt_coord(height)
        )
    }
}

/// Stroke color for a series: up, down, or flat
pub fn stroke_color(prices: &[f64]) -> &'static str {
    match (prices.first(), prices.last()) {
        (Some(first), Some(last)) if prices.len() >= 2 => {
            if last > first {
                STROKE_UP
            } else if last < first {
                STROKE_DOWN
            } else {
                STROKE_FLAT
            }
        }
        _ => STROKE_FLAT,
    }
}

/// At most two decimals, trailing zeros trimmed: `16.666` -> `16.67`, `15.0` -> `15`
fn fmt_coord(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse `M x,y L x,y ...` back into coordinates
    fn path_points(svg: &str) -> Vec<(f64, f64)> {
        let start = svg.find("d='").unwrap() + 3;
        let end = start + svg[start..].find('\'').unwrap();
        svg[start..end]
            .split(' ')
            .map(|segment| {
                let (x, y) = segment[1..].split_once(',').unwrap();
                (x.parse().unwrap(), y.parse().unwrap())
            })
            .collect()
    }

    #[test]
    fn test_short_series_render_placeholder() {
        let renderer = MiniChartRenderer::default();
        for prices in [vec![], vec![42.0]] {
            let svg = renderer.render(&prices);
            assert!(svg.contains(INSUFFICIENT_DATA_LABEL));
            assert!(!svg.contains("<path"));
            assert!(svg.contains("viewBox='0 0 100 30'"));
        }
    }

    #[test]
    fn test_flat_series_runs_through_midpoint() {
        let renderer = MiniChartRenderer::default();
        for len in 2..10 {
            let svg = renderer.render(&vec![7_000.0; len]);
            let points = path_points(&svg);
            assert_eq!(points.len(), len);
            assert!(points.iter().all(|(_, y)| *y == 15.0));
            assert!(svg.contains(STROKE_FLAT));
        }
    }

    #[test]
    fn test_extremes_map_to_padding_band() {
        let renderer = MiniChartRenderer::default();
        let points = renderer.points(&[100.0, 300.0, 200.0]);

        assert_eq!(points[0], (0.0, 25.0));
        assert_eq!(points[1], (50.0, 5.0));
        assert_eq!(points[2], (100.0, 15.0));
    }

    #[test]
    fn test_single_point_is_centered() {
        let renderer = MiniChartRenderer::default();
        assert_eq!(renderer.points(&[5.0]), vec![(50.0, 15.0)]);
    }

    #[test]
    fn test_path_moves_then_draws_lines() {
        let svg = MiniChartRenderer::default().render(&[1.0, 2.0, 3.0, 4.0]);
        assert!(svg.contains("d='M0,25 L33.33,18.33 L66.67,11.67 L100,5'"));
    }

    #[test]
    fn test_stroke_color_follows_first_and_last() {
        assert_eq!(stroke_color(&[1.0, 5.0, 2.0]), STROKE_UP);
        assert_eq!(stroke_color(&[3.0, 0.0, 2.0]), STROKE_DOWN);
        assert_eq!(stroke_color(&[3.0, 9.0, 3.0]), STROKE_FLAT);
        assert_eq!(stroke_color(&[3.0]), STROKE_FLAT);
        assert_eq!(stroke_color(&[]), STROKE_FLAT);

        let svg = MiniChartRenderer::default().render(&[10.0, 12.0]);
        assert!(svg.contains(&format!("stroke='{}'", STROKE_UP)));
    }

    #[test]
    fn test_render_is_deterministic_and_self_contained() {
        let renderer = MiniChartRenderer::new(ChartOptions::DETAIL);
        let prices = [10_150.0, 10_000.0, 10_300.0, 9_900.0];
        let first = renderer.render(&prices);
        assert_eq!(first, renderer.render(&prices));
        assert!(first.starts_with("<svg "));
        assert!(first.ends_with("</svg>"));
        assert!(first.contains("width='300' height='100' viewBox='0 0 300 100'"));
        assert!(!first.contains("href"));
    }

    #[test]
    fn test_fmt_coord() {
        assert_eq!(fmt_coord(15.0), "15");
        assert_eq!(fmt_coord(16.666), "16.67");
        assert_eq!(fmt_coord(2.5), "2.5");
        assert_eq!(fmt_coord(0.0), "0");
        assert_eq!(fmt_coord(-0.001), "0");
    }

    #[test]
    fn test_placeholder_markup_is_complete() {
        let svg = MiniChartRenderer::default().render(&[]);
        assert_eq!(
            svg,
            "<svg xmlns='http://www.w3.org/2000/svg' width='100' height='30' viewBox='0 0 100 30'>\
             <text x='50' y='15' font-size='10' fill='#aaa' text-anchor='middle' dominant-baseline='middle'>\
             insufficient data</text></svg>"
        );
    }
}
