//! Inline SVG charts: the performance area chart, the tokenomics pie and
//! the wave under the performance section.

use pizzafun_page_model::content::{Allocation, PerformancePoint};

use crate::node::{Element, Node};

const BASELINE_COLOR: &str = "#666666";
const PRODUCT_COLOR: &str = "#FF9325";

/// Pie geometry for one allocation. Angles are degrees clockwise from
/// twelve o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: u32,
    pub color: String,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl PieSlice {
    pub fn sweep_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    /// SVG path for this slice on a pie of `radius` centered at `(c, c)`.
    pub fn path(&self, c: f64, radius: f64) -> String {
        if self.sweep_deg() >= 359.999 {
            // A single arc cannot close on itself, so draw two halves.
            return format!(
                "M {c:.3} {top:.3} A {r:.3} {r:.3} 0 1 1 {c:.3} {bottom:.3} A {r:.3} {r:.3} 0 1 1 {c:.3} {top:.3} Z",
                c = c,
                r = radius,
                top = c - radius,
                bottom = c + radius,
            );
        }
        let (x0, y0) = polar(c, radius, self.start_deg);
        let (x1, y1) = polar(c, radius, self.end_deg);
        let large_arc = u8::from(self.sweep_deg() > 180.0);
        format!(
            "M {c:.3} {c:.3} L {x0:.3} {y0:.3} A {r:.3} {r:.3} 0 {large_arc} 1 {x1:.3} {y1:.3} Z",
            r = radius
        )
    }

    /// Where the slice's label goes.
    pub fn label_anchor(&self, c: f64, radius: f64) -> (f64, f64) {
        polar(c, radius, (self.start_deg + self.end_deg) / 2.0)
    }
}

fn polar(c: f64, radius: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (c + radius * rad.sin(), c - radius * rad.cos())
}

/// Split the circle proportionally to the allocation values.
pub fn pie_slices(allocations: &[Allocation]) -> Vec<PieSlice> {
    let total: u64 = allocations.iter().map(|a| u64::from(a.value)).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut cursor = 0u64;
    allocations
        .iter()
        .map(|a| {
            let start_deg = cursor as f64 / total as f64 * 360.0;
            cursor += u64::from(a.value);
            let end_deg = cursor as f64 / total as f64 * 360.0;
            PieSlice {
                name: a.name.clone(),
                value: a.value,
                color: a.color.clone(),
                start_deg,
                end_deg,
            }
        })
        .collect()
}

/// Tokenomics pie chart with a `"{value}%"` label per slice.
pub fn pie_chart(allocations: &[Allocation], size: f64) -> Node {
    let c = size / 2.0;
    let radius = c * 0.8;
    let slices = pie_slices(allocations);

    let paths = slices.iter().map(|slice| {
        Element::new("path")
            .class("slice")
            .attr("d", slice.path(c, radius))
            .attr("fill", slice.color.as_str())
            .attr("stroke", "#000")
            .attr("stroke-width", "2")
            .child(Element::new("title").text(format!("{}: {}%", slice.name, slice.value)))
    });
    let labels = slices.iter().map(|slice| {
        let (x, y) = slice.label_anchor(c, radius * 1.12);
        Element::new("text")
            .attr("x", format!("{x:.1}"))
            .attr("y", format!("{y:.1}"))
            .attr("fill", "#fff")
            .attr("font-size", "12")
            .attr("text-anchor", "middle")
            .text(format!("{}%", slice.value))
    });

    Element::new("svg")
        .class("pie-chart")
        .attr("viewBox", format!("0 0 {size} {size}"))
        .attr("role", "img")
        .children(paths)
        .children(labels)
        .into()
}

/// Polygon coordinates for one series, scaled so `max` touches the top.
fn series_points(values: &[f64], width: f64, height: f64, max: f64) -> Vec<(f64, f64)> {
    let last = values.len().saturating_sub(1).max(1) as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = i as f64 / last * width;
            let y = height - (v.max(0.0) / max) * height;
            (x, y)
        })
        .collect()
}

fn area_path(points: &[(f64, f64)], height: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    let mut d = format!("M {:.3} {:.3}", first.0, height);
    for (x, y) in points {
        d.push_str(&format!(" L {x:.3} {y:.3}"));
    }
    d.push_str(&format!(" L {:.3} {:.3} Z", last.0, height));
    d
}

fn line_path(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{} {x:.3} {y:.3}", if i == 0 { "M" } else { "L" }))
        .collect::<Vec<_>>()
        .join(" ")
}

fn gradient(id: &str, color: &str) -> Element {
    Element::new("linearGradient")
        .id(id)
        .attr("x1", "0")
        .attr("y1", "0")
        .attr("x2", "0")
        .attr("y2", "1")
        .child(
            Element::new("stop")
                .attr("offset", "5%")
                .attr("stop-color", color)
                .attr("stop-opacity", "0.8"),
        )
        .child(
            Element::new("stop")
                .attr("offset", "95%")
                .attr("stop-color", color)
                .attr("stop-opacity", "0"),
        )
}

/// Two-series area chart (baseline behind product), scaled to the data
/// maximum, with the point labels along the x axis.
pub fn area_chart(points: &[PerformancePoint], width: f64, height: f64) -> Node {
    let max = points
        .iter()
        .flat_map(|p| [p.baseline, p.product])
        .fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    let baseline: Vec<f64> = points.iter().map(|p| p.baseline).collect();
    let product: Vec<f64> = points.iter().map(|p| p.product).collect();
    let baseline = series_points(&baseline, width, height, max);
    let product = series_points(&product, width, height, max);

    let series = |id: &str, color: &str, pts: &[(f64, f64)]| {
        Element::new("g")
            .class(format!("series series-{id}"))
            .child(
                Element::new("path")
                    .class("area")
                    .attr("d", area_path(pts, height))
                    .attr("fill", format!("url(#{id})")),
            )
            .child(
                Element::new("path")
                    .class("line")
                    .attr("d", line_path(pts))
                    .attr("fill", "none")
                    .attr("stroke", color)
                    .attr("stroke-width", "2"),
            )
    };

    let labels = points.iter().zip(&baseline).map(|(p, (x, _))| {
        Element::new("text")
            .class("tick")
            .attr("x", format!("{x:.1}"))
            .attr("y", format!("{:.1}", height + 16.0))
            .attr("fill", "#666")
            .attr("font-size", "12")
            .attr("text-anchor", "middle")
            .text(p.label.as_str())
    });

    Element::new("svg")
        .class("area-chart")
        .attr("viewBox", format!("0 -8 {width} {}", height + 32.0))
        .attr("role", "img")
        .child(
            Element::new("defs")
                .child(gradient("baseline", BASELINE_COLOR))
                .child(gradient("product", PRODUCT_COLOR)),
        )
        .child(series("baseline", BASELINE_COLOR, &baseline))
        .child(series("product", PRODUCT_COLOR, &product))
        .children(labels)
        .into()
}

/// Wave crest heights (px, in a 1200 x 120 box) every 100 px, for the
/// two outlines the wave morphs between.
const WAVE_CRESTS: [[f64; 13]; 2] = [
    [46.0, 63.0, 73.0, 52.0, 36.0, 50.0, 75.0, 86.0, 84.0, 55.0, 30.0, 26.0, 52.0],
    [16.0, 98.0, 101.0, 58.0, 15.0, 16.0, 62.0, 107.0, 72.0, 40.0, 55.0, 62.0, 15.0],
];
const WAVE_WIDTH: f64 = 1200.0;
const WAVE_HEIGHT: f64 = 120.0;
const WAVE_FILL: &str = "rgba(255, 147, 37, 0.1)";

/// Outline of the wave, `morph` of the way from the first shape to the
/// second. The area above the crest line is filled.
pub fn wave_path(morph: f64) -> String {
    let morph = if morph.is_nan() { 0.0 } else { morph.clamp(0.0, 1.0) };
    let step = WAVE_WIDTH / (WAVE_CRESTS[0].len() - 1) as f64;
    let mut d = String::from("M 0 0");
    for (i, (a, b)) in WAVE_CRESTS[0].iter().zip(&WAVE_CRESTS[1]).enumerate() {
        let y = a + (b - a) * morph;
        d.push_str(&format!(" L {:.1} {y:.3}", i as f64 * step));
    }
    d.push_str(&format!(" L {WAVE_WIDTH} 0 Z"));
    d
}

pub fn wave(morph: f64) -> Node {
    Element::new("svg")
        .class("wave")
        .attr("viewBox", format!("0 0 {WAVE_WIDTH} {WAVE_HEIGHT}"))
        .attr("preserveAspectRatio", "none")
        .attr("aria-hidden", "true")
        .child(
            Element::new("path")
                .attr("d", wave_path(morph))
                .attr("fill", WAVE_FILL),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzafun_page_model::content::PageContent;

    fn allocation(name: &str, value: u32) -> Allocation {
        Allocation {
            name: name.into(),
            value,
            color: "#fff".into(),
        }
    }

    #[test]
    fn test_slices_cover_circle() {
        let content = PageContent::pizzafun();
        let slices = pie_slices(&content.tokenomics.allocations);
        assert_eq!(slices.len(), 9);
        assert_eq!(slices[0].start_deg, 0.0);
        assert!((slices[0].sweep_deg() - 108.0).abs() < 1e-9);
        assert_eq!(slices.last().unwrap().end_deg, 360.0);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end_deg, pair[1].start_deg);
        }
    }

    #[test]
    fn test_large_arc_flag() {
        let slices = pie_slices(&[allocation("a", 70), allocation("b", 30)]);
        assert!(slices[0].path(100.0, 80.0).contains(" 0 1 1 "));
        assert!(slices[1].path(100.0, 80.0).contains(" 0 0 1 "));
    }

    #[test]
    fn test_single_slice_is_full_circle() {
        let slices = pie_slices(&[allocation("all", 100)]);
        let path = slices[0].path(100.0, 80.0);
        assert_eq!(path.matches(" A ").count(), 2);
    }

    #[test]
    fn test_slices_with_huge_values() {
        let slices = pie_slices(&[allocation("a", u32::MAX), allocation("b", u32::MAX)]);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].end_deg - 180.0).abs() < 1e-9);
        assert_eq!(slices[1].end_deg, 360.0);
    }

    #[test]
    fn test_empty_pie() {
        assert!(pie_slices(&[]).is_empty());
        assert_eq!(pie_chart(&[], 300.0).count_tag("path"), 0);
    }

    #[test]
    fn test_pie_chart_labels() {
        let content = PageContent::pizzafun();
        let chart = pie_chart(&content.tokenomics.allocations, 300.0);
        assert_eq!(chart.count_tag("path"), 9);
        let html = chart.render();
        assert!(html.contains(">30%</text>"));
        assert!(html.contains("fill=\"#FF9325\""));
    }

    #[test]
    fn test_wave_morphs_between_outlines() {
        let first = wave_path(0.0);
        let second = wave_path(1.0);
        assert!(first.starts_with("M 0 0 L 0.0 46.000 L 100.0 63.000"));
        assert!(second.starts_with("M 0 0 L 0.0 16.000 L 100.0 98.000"));
        assert!(wave_path(0.5).contains("L 0.0 31.000"));
        assert_eq!(wave_path(f64::NAN), first);
        assert_eq!(wave_path(2.0), second);
        assert!(first.ends_with("L 1200 0 Z"));

        let svg = wave(0.25).render();
        assert!(svg.contains("viewBox=\"0 0 1200 120\""));
        assert!(svg.contains("rgba(255, 147, 37, 0.1)"));
    }

    #[test]
    fn test_area_chart_scaled_to_max() {
        let points = vec![
            PerformancePoint {
                label: "0s".into(),
                baseline: 0.0,
                product: 0.0,
            },
            PerformancePoint {
                label: "2s".into(),
                baseline: 25.0,
                product: 50.0,
            },
        ];
        let chart = area_chart(&points, 200.0, 100.0);
        let html = chart.render();
        // Product peak (50) is the maximum and reaches the top edge.
        assert!(html.contains("M 0.000 100.000 L 200.000 0.000"));
        // Baseline peak sits halfway.
        assert!(html.contains("M 0.000 100.000 L 200.000 50.000"));
        assert!(html.contains(">2s</text>"));
        assert_eq!(chart.count_tag("linearGradient"), 2);
    }

    #[test]
    fn test_area_chart_all_zero() {
        let points = vec![PerformancePoint {
            label: "0s".into(),
            baseline: 0.0,
            product: 0.0,
        }];
        let html = area_chart(&points, 200.0, 100.0).render();
        assert!(!html.contains("NaN"));
    }
}
