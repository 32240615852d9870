//! Backend-independent draw lists
//!
//! A [`Scene`] is the full list of primitives for one image, built from the
//! embedded points, their pair errors and the requested [`Indicator`]s.
//! Painting it is a single pass over [`DrawCommand`]s, see
//! [`crate::paint`].

use crate::color::Rgb;
use crate::error::{RenderError, RenderResult};
use crate::frame::Frame;
use serde::{Deserialize, Serialize};
use stargen_core::{canonical_pairs, pair_count, point_errors, LabeledPoint};

/// Pixel offset of a line label from its segment midpoint
const LINE_LABEL_SPACER: f64 = 20.0;

/// Error indication drawn on top of (or under) the points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Indicator {
    /// Trace every pair whose error is at least `threshold`
    Line {
        threshold: f64,
        color: Rgb,
        /// Write the pair error next to the segment
        label: bool,
    },
    /// Disc behind each point, grown in proportion to its error
    Halo { color: Rgb },
    /// Per-point error written above each point
    Text { color: Rgb },
}

impl Indicator {
    /// Paint order: lines, halos, points, text
    fn layer(&self) -> u8 {
        match self {
            Indicator::Line { .. } => 0,
            Indicator::Halo { .. } => 1,
            Indicator::Text { .. } => 3,
        }
    }
}

/// Points are always painted on this layer
const POINT_LAYER: u8 = 2;

/// A single drawing primitive in pixel space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Disc {
        center: (i32, i32),
        radius: i32,
        color: Rgb,
    },
    Segment {
        from: (i32, i32),
        to: (i32, i32),
        color: Rgb,
    },
    Label {
        text: String,
        at: (i32, i32),
        color: Rgb,
    },
}

/// Image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Image width in pixels; the height follows from the points (default: 800)
    pub width: u32,
    /// Point radius in pixels (default: 5)
    pub radius: i32,
    pub background: Rgb,
    pub point_color: Rgb,
    pub text_color: Rgb,
    pub legend_color: Rgb,
    /// World-space width and height to frame instead of the points' extent
    pub extent: Option<(f64, f64)>,
    /// Name of one world unit in the legend (default: "Unit")
    pub unit: String,
    pub indicators: Vec<Indicator>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            radius: 5,
            background: Rgb::BLACK,
            point_color: Rgb::WHITE,
            text_color: Rgb::WHITE,
            legend_color: Rgb::WHITE,
            extent: None,
            unit: "Unit".to_string(),
            indicators: Vec::new(),
        }
    }
}

/// Everything needed to paint one image
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Lay out `points` with their canonical-order `pair_errors`.
    pub fn build(
        points: &[LabeledPoint],
        pair_errors: &[f64],
        options: &RenderOptions,
    ) -> RenderResult<Self> {
        let expected = pair_count(points.len());
        let item_errors = point_errors(points.len(), pair_errors).ok_or(
            RenderError::PairErrorCount {
                expected,
                found: pair_errors.len(),
            },
        )?;

        let frame = Frame::fit(points, options.width, options.extent)?;
        let pixels = points
            .iter()
            .map(|p| frame.point_pixels(p))
            .collect::<RenderResult<Vec<_>>>()?;

        let layout = Layout {
            points,
            pixels: &pixels,
            pair_errors,
            item_errors: &item_errors,
            options,
        };

        let mut indicators: Vec<&Indicator> = options.indicators.iter().collect();
        indicators.sort_by_key(|i| i.layer());

        let mut commands = Vec::new();
        let mut points_drawn = false;
        for indicator in indicators {
            if !points_drawn && indicator.layer() > POINT_LAYER {
                layout.points_layer(&mut commands);
                points_drawn = true;
            }
            layout.indicator_layer(indicator, &mut commands);
        }
        if !points_drawn {
            layout.points_layer(&mut commands);
        }
        layout.legend(&frame, &mut commands);

        Ok(Self {
            width: frame.width,
            height: frame.height,
            background: options.background,
            commands,
        })
    }
}

struct Layout<'a> {
    points: &'a [LabeledPoint],
    pixels: &'a [(i32, i32)],
    pair_errors: &'a [f64],
    item_errors: &'a [f64],
    options: &'a RenderOptions,
}

impl Layout<'_> {
    fn indicator_layer(&self, indicator: &Indicator, out: &mut Vec<DrawCommand>) {
        match indicator {
            Indicator::Line {
                threshold,
                color,
                label,
            } => self.lines(*threshold, *color, *label, out),
            Indicator::Halo { color } => self.halos(*color, out),
            Indicator::Text { color } => self.item_labels(*color, out),
        }
    }

    fn lines(&self, threshold: f64, color: Rgb, label: bool, out: &mut Vec<DrawCommand>) {
        for ((i, j), &error) in canonical_pairs(self.points.len()).zip(self.pair_errors) {
            if error < threshold {
                continue;
            }
            let (from, to) = (self.pixels[i], self.pixels[j]);
            out.push(DrawCommand::Segment { from, to, color });
            if label {
                out.push(DrawCommand::Label {
                    text: format_error(error),
                    at: line_label_position(from, to),
                    color,
                });
            }
        }
    }

    fn halos(&self, color: Rgb, out: &mut Vec<DrawCommand>) {
        let radius = self.options.radius;
        let max_error = self.item_errors.iter().cloned().fold(0.0, f64::max);
        for (&center, &error) in self.pixels.iter().zip(self.item_errors) {
            let halo = if max_error > 0.0 {
                let per_pixel = max_error / radius as f64;
                (radius as f64 + error / per_pixel).round() as i32
            } else {
                radius
            };
            out.push(DrawCommand::Disc {
                center,
                radius: halo,
                color,
            });
        }
    }

    fn points_layer(&self, out: &mut Vec<DrawCommand>) {
        let radius = self.options.radius;
        for (point, &(x, y)) in self.points.iter().zip(self.pixels) {
            out.push(DrawCommand::Disc {
                center: (x, y),
                radius,
                color: self.options.point_color,
            });
            out.push(DrawCommand::Label {
                text: point.name.clone(),
                at: (x, y + 5 + radius),
                color: self.options.text_color,
            });
        }
    }

    fn item_labels(&self, color: Rgb, out: &mut Vec<DrawCommand>) {
        let lift = self.options.radius * 4;
        for (&(x, y), &error) in self.pixels.iter().zip(self.item_errors) {
            out.push(DrawCommand::Label {
                text: format_error(error),
                at: (x, y - lift),
                color,
            });
        }
    }

    /// One-unit scale bar in the bottom-left corner
    fn legend(&self, frame: &Frame, out: &mut Vec<DrawCommand>) {
        let margin = frame.margin as f64;
        let color = self.options.legend_color;
        let height = frame.height as i32;

        let left = (
            (margin * 0.15).round() as i32,
            height - (margin * 0.25).round() as i32,
        );
        let right = (left.0 + frame.unit_length(), left.1);
        let tick = (0.0333 * margin).round() as i32;

        out.push(DrawCommand::Segment {
            from: left,
            to: right,
            color,
        });
        for end in [left, right] {
            out.push(DrawCommand::Segment {
                from: end,
                to: (end.0, end.1 - tick),
                color,
            });
        }
        out.push(DrawCommand::Label {
            text: format!("One {}", self.options.unit),
            at: (left.0, left.1 + (0.0467 * margin).round() as i32),
            color,
        });
    }
}

/// Error value rounded to three decimals
pub fn format_error(error: f64) -> String {
    let rounded = (error * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

/// Label anchor offset perpendicular to the segment `from`-`to`
fn line_label_position(from: (i32, i32), to: (i32, i32)) -> (i32, i32) {
    let (x1, y1) = (from.0 as f64, from.1 as f64);
    let (x2, y2) = (to.0 as f64, to.1 as f64);
    let mid = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    let angle = if y1 == y2 {
        std::f64::consts::FRAC_PI_2
    } else {
        ((x1 - x2) / (y1 - y2)).atan()
    };
    (
        (mid.0 + LINE_LABEL_SPACER * angle.cos()).round() as i32,
        (mid.1 - LINE_LABEL_SPACER * angle.sin()).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn triangle() -> Vec<LabeledPoint> {
        vec![
            LabeledPoint::new("a", vec![0.0, 0.0]),
            LabeledPoint::new("b", vec![10.0, 0.0]),
            LabeledPoint::new("c", vec![0.0, 5.0]),
        ]
    }

    fn labels(scene: &Scene) -> Vec<&str> {
        scene
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn points_and_legend_without_indicators() {
        let scene = Scene::build(&triangle(), &[0.0, 0.0, 0.0], &RenderOptions::default())
            .unwrap();
        // 3 discs, 3 names, legend bar, 2 ticks, legend caption
        assert_eq!(scene.commands.len(), 10);
        assert_eq!(labels(&scene), vec!["a", "b", "c", "One Unit"]);
        assert_eq!(scene.width, 800);
    }

    #[test]
    fn rejects_wrong_pair_error_count() {
        let result = Scene::build(&triangle(), &[0.1, 0.2], &RenderOptions::default());
        assert_eq!(
            result,
            Err(RenderError::PairErrorCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn layers_follow_paint_order() {
        let options = RenderOptions {
            indicators: vec![
                Indicator::Text { color: Rgb::RED },
                Indicator::Halo { color: Rgb::GRAY },
                Indicator::Line {
                    threshold: 0.5,
                    color: Rgb::BLUE,
                    label: false,
                },
            ],
            ..Default::default()
        };
        let scene = Scene::build(&triangle(), &[0.9, 0.1, 0.6], &options).unwrap();
        let colors: Vec<Rgb> = scene
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Disc { color, .. }
                | DrawCommand::Segment { color, .. }
                | DrawCommand::Label { color, .. } => *color,
            })
            .collect();

        // two lines over threshold, three halos, three points with names,
        // three error labels, then the legend
        assert_eq!(&colors[..2], &[Rgb::BLUE, Rgb::BLUE]);
        assert_eq!(&colors[2..5], &[Rgb::GRAY, Rgb::GRAY, Rgb::GRAY]);
        assert_eq!(colors[5], Rgb::WHITE);
        assert_eq!(&colors[11..14], &[Rgb::RED, Rgb::RED, Rgb::RED]);
        assert_eq!(colors.len(), 18);
    }

    #[test]
    fn line_labels_show_pair_error() {
        let options = RenderOptions {
            indicators: vec![Indicator::Line {
                threshold: 0.8,
                color: Rgb::BLUE,
                label: true,
            }],
            ..Default::default()
        };
        let scene = Scene::build(&triangle(), &[0.8, 0.1234, 0.79], &options).unwrap();
        assert_eq!(labels(&scene)[0], "0.8");
        assert_eq!(
            scene
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Segment { color, .. } if *color == Rgb::BLUE))
                .count(),
            1
        );
    }

    #[test]
    fn halos_scale_with_point_error() {
        let options = RenderOptions {
            radius: 4,
            indicators: vec![Indicator::Halo { color: Rgb::GRAY }],
            ..Default::default()
        };
        // point errors: a = 0.25, b = 0.5, c = 0.25
        let scene = Scene::build(&triangle(), &[0.5, 0.0, 0.5], &options).unwrap();
        let radii: Vec<i32> = scene.commands[..3]
            .iter()
            .map(|c| match c {
                DrawCommand::Disc { radius, .. } => *radius,
                other => panic!("expected halo, got {:?}", other),
            })
            .collect();
        assert_eq!(radii, vec![6, 8, 6]);
    }

    #[test]
    fn halos_fall_back_to_point_radius_without_error() {
        let options = RenderOptions {
            indicators: vec![Indicator::Halo { color: Rgb::GRAY }],
            ..Default::default()
        };
        let scene = Scene::build(&triangle(), &[0.0, 0.0, 0.0], &options).unwrap();
        assert!(matches!(
            scene.commands[0],
            DrawCommand::Disc { radius: 5, .. }
        ));
    }

    #[test]
    fn text_indicator_writes_point_errors() {
        let options = RenderOptions {
            indicators: vec![Indicator::Text { color: Rgb::RED }],
            ..Default::default()
        };
        let scene = Scene::build(&triangle(), &[0.3, 0.6, 0.9], &options).unwrap();
        assert_eq!(
            labels(&scene),
            vec!["a", "b", "c", "0.45", "0.6", "0.75", "One Unit"]
        );
    }

    #[test]
    fn horizontal_segment_label_sits_above() {
        assert_eq!(line_label_position((0, 100), (40, 100)), (20, 80));
    }

    #[test]
    fn formats_three_decimals() {
        assert_eq!(format_error(0.123456), "0.123");
        assert_eq!(format_error(1.0), "1");
        assert_eq!(format_error(0.0005), "0.001");
    }

    #[test]
    fn indicators_deserialize_tagged() {
        let indicator: Indicator = serde_json::from_str(
            r#"{"kind": "line", "threshold": 0.8, "color": "blue", "label": true}"#,
        )
        .unwrap();
        assert_eq!(
            indicator,
            Indicator::Line {
                threshold: 0.8,
                color: Rgb::BLUE,
                label: true
            }
        );
    }
}
