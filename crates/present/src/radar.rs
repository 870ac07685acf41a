//! Radar (spider) chart for challenge complexity.
//!
//! Axes are spaced evenly around the circle, starting at 12 o'clock and running clockwise. Each
//! axis value is plotted at `radius * complexity / 10` from the centre and the points are joined
//! into one closed, filled contour.

use casebook_core::constants::SCORE_SCALE;
use casebook_core::ContentBlock;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Grid rings drawn behind the contour, in score units.
const RING_STEPS: [u8; 5] = [2, 4, 6, 8, 10];

/// Share of the half-width kept free around the plot for axis labels.
const LABEL_MARGIN: f64 = 0.3;

#[derive(Clone, Debug, PartialEq)]
pub struct RadarPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadarChart {
    title: Option<String>,
    axes: Vec<(String, u8)>,
}

impl RadarChart {
    /// Build a chart from every [`ContentBlock::ChallengeAxis`] in `blocks`.
    ///
    /// Returns `None` when there are fewer than three axes, which cannot form a contour.
    pub fn from_blocks(title: Option<&str>, blocks: &[ContentBlock]) -> Option<Self> {
        let axes: Vec<(String, u8)> = blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ChallengeAxis { label, complexity } => {
                    Some((label.as_str().to_owned(), complexity.get()))
                }
                _ => None,
            })
            .collect();

        if axes.len() < 3 {
            return None;
        }

        Some(Self {
            title: title.map(str::to_owned),
            axes,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn axes(&self) -> &[(String, u8)] {
        &self.axes
    }

    fn angle(&self, index: usize) -> f64 {
        -FRAC_PI_2 + TAU * index as f64 / self.axes.len() as f64
    }

    fn polar(&self, index: usize, distance: f64, cx: f64, cy: f64) -> RadarPoint {
        let angle = self.angle(index);
        RadarPoint {
            x: cx + distance * angle.cos(),
            y: cy + distance * angle.sin(),
        }
    }

    /// Contour vertices for a chart centred on `(cx, cy)` with outer radius `radius`.
    pub fn points(&self, cx: f64, cy: f64, radius: f64) -> Vec<RadarPoint> {
        self.axes
            .iter()
            .enumerate()
            .map(|(index, (_, value))| {
                let distance = radius * f64::from(*value) / f64::from(SCORE_SCALE);
                self.polar(index, distance, cx, cy)
            })
            .collect()
    }

    fn ring(&self, cx: f64, cy: f64, distance: f64) -> Vec<RadarPoint> {
        (0..self.axes.len())
            .map(|index| self.polar(index, distance, cx, cy))
            .collect()
    }

    /// Render the chart as a standalone square SVG document `size` pixels wide.
    pub fn to_svg(&self, size: u32) -> String {
        let size_f = f64::from(size);
        let title_height = if self.title.is_some() { 28.0 } else { 0.0 };
        let cx = size_f / 2.0;
        let cy = title_height + (size_f - title_height) / 2.0;
        let radius = (size_f - title_height) / 2.0 * (1.0 - LABEL_MARGIN);

        let mut lines = vec![format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}" role="img">"#
        )];

        if let Some(title) = &self.title {
            lines.push(format!(
                r#"  <text class="radar-title" x="{cx:.2}" y="18" text-anchor="middle" font-size="16">{}</text>"#,
                escape_xml(title)
            ));
        }

        for step in RING_STEPS {
            let distance = radius * f64::from(step) / f64::from(SCORE_SCALE);
            lines.push(format!(
                r##"  <polygon class="radar-ring" points="{}" fill="none" stroke="#d0d4dc" stroke-width="1"/>"##,
                points_attr(&self.ring(cx, cy, distance))
            ));
        }

        for (index, (label, _)) in self.axes.iter().enumerate() {
            let end = self.polar(index, radius, cx, cy);
            lines.push(format!(
                r##"  <line class="radar-spoke" x1="{cx:.2}" y1="{cy:.2}" x2="{:.2}" y2="{:.2}" stroke="#d0d4dc" stroke-width="1"/>"##,
                end.x, end.y
            ));

            let anchor_point = self.polar(index, radius + 12.0, cx, cy);
            let anchor = if (anchor_point.x - cx).abs() < 1.0 {
                "middle"
            } else if anchor_point.x > cx {
                "start"
            } else {
                "end"
            };
            lines.push(format!(
                r#"  <text class="radar-label" x="{:.2}" y="{:.2}" text-anchor="{anchor}" dominant-baseline="middle" font-size="12">{}</text>"#,
                anchor_point.x,
                anchor_point.y,
                escape_xml(label)
            ));
        }

        lines.push(format!(
            r##"  <polygon class="radar-area" points="{}" fill="#4c78a8" fill-opacity="0.35" stroke="#4c78a8" stroke-width="2"/>"##,
            points_attr(&self.points(cx, cy, radius))
        ));
        lines.push("</svg>".to_owned());

        let mut svg = lines.join("\n");
        svg.push('\n');
        svg
    }
}

/// The heading that introduces the first challenge axis in `blocks`, if any.
pub fn axis_heading(blocks: &[ContentBlock]) -> Option<&str> {
    let mut heading = None;
    for block in blocks {
        match block {
            ContentBlock::Heading { text } => heading = Some(text.as_str()),
            ContentBlock::ChallengeAxis { .. } => return heading,
            _ => {}
        }
    }
    None
}

fn points_attr(points: &[RadarPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
