//! Marker geometry for one time point.
//!
//! Each marker is a dot on the series with a stem down to the baseline and a
//! leader below it ending in the representative keyword. Keyword labels cycle
//! through five stacked rows so neighbouring labels don't overlap.

use super::scale::Scales;
use super::types::TimePoint;
use crate::surface::{Anchor, Hit, Shape, Surface};
use crate::theme::{self, QuantityHue};
use egui::{Color32, Pos2, Vec2};

/// Number of stacked label rows before the cycle repeats
pub const LABEL_ROWS: usize = 5;

/// Value label sits this far above the marker's top edge
const VALUE_LABEL_OFFSET: f32 = -10.0;

/// Keyword text baseline below the end of the leader
const KEYWORD_BASELINE: f32 = 14.0;

const FONT_SIZE: f32 = 11.0;

/// Geometry of one marker, in coordinates local to `origin`
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGeometry {
    pub index: usize,
    /// Top-left of the marker glyph's bounding box, in chart coordinates
    pub origin: Pos2,
    pub radius: f32,
    /// Distance from `origin` down to the chart baseline
    pub baseline_offset: f32,
    /// Distance from `origin` down to the end of the keyword leader
    pub label_offset: f32,
    pub value_label: String,
    pub keyword_label: Option<String>,
    pub color: Color32,
}

impl MarkerGeometry {
    /// Label row offset below the baseline
    #[cfg(test)]
    pub fn row_offset(&self) -> f32 {
        self.label_offset - self.baseline_offset
    }

    pub fn center(&self) -> Pos2 {
        self.local(self.radius)
    }

    /// Connector from the marker down to the baseline
    pub fn stem(&self) -> [Pos2; 2] {
        [self.local(self.radius), self.local(self.baseline_offset)]
    }

    /// Connector from the baseline down to the keyword label row
    pub fn leader(&self) -> [Pos2; 2] {
        [self.local(self.baseline_offset), self.local(self.label_offset)]
    }

    pub fn value_label_pos(&self) -> Pos2 {
        self.local(VALUE_LABEL_OFFSET)
    }

    pub fn keyword_label_pos(&self) -> Pos2 {
        self.local(self.label_offset + KEYWORD_BASELINE)
    }

    /// Point on the marker's vertical axis, `dy` below the origin
    fn local(&self, dy: f32) -> Pos2 {
        self.origin + Vec2::new(self.radius, dy)
    }

    /// Push the marker's shapes; the keyword label is the clickable part
    pub fn draw(&self, surface: &mut Surface) {
        surface.draw(Shape::Line {
            from: self.stem()[0],
            to: self.stem()[1],
            color: theme::chart::CONNECTOR,
        });
        surface.draw(Shape::Text {
            pos: self.value_label_pos(),
            text: self.value_label.clone(),
            size: FONT_SIZE,
            color: self.color,
            anchor: Anchor::Start,
        });
        surface.draw(Shape::Line {
            from: self.leader()[0],
            to: self.leader()[1],
            color: theme::chart::CONNECTOR,
        });
        if let Some(keyword) = &self.keyword_label {
            surface.draw_clickable(
                Shape::Text {
                    pos: self.keyword_label_pos(),
                    text: keyword.clone(),
                    size: FONT_SIZE,
                    color: theme::chart::KEYWORD,
                    anchor: Anchor::Start,
                },
                Hit::MarkerLabel(self.index),
            );
        }
        surface.draw(Shape::Circle {
            center: self.center(),
            radius: self.radius,
            fill: self.color,
        });
    }
}

/// Lay out the marker for `point` at time index `index`
pub fn layout_marker(
    point: &TimePoint,
    index: usize,
    scales: &Scales,
    hue: &QuantityHue,
    radius: f32,
    row_height: f32,
) -> MarkerGeometry {
    let x = scales.x.apply(index as f32).round() + 0.5 - radius;
    let y = scales.y.apply(point.quantity as f32) - radius;
    let baseline_offset = scales.height - y;
    let row = (index % LABEL_ROWS + 1) as f32;
    let label_offset = baseline_offset + row * row_height;

    MarkerGeometry {
        index,
        origin: Pos2::new(x, y),
        radius,
        baseline_offset,
        label_offset,
        value_label: format_quantity(point.quantity),
        keyword_label: point.representative().map(|k| k.value.clone()),
        color: hue.color(point.quantity),
    }
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}
