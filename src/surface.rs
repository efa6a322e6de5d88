//! Declarative drawing surface.
//!
//! Layout code pushes shapes here instead of painting directly; the UI layer
//! paints the list each frame and maps clicks on tagged shapes back to the
//! data they were drawn for.

use egui::{Color32, Pos2, Vec2};

/// Horizontal anchor for text, measured from the text position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
}

/// Something the user can click on the surface
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    /// Keyword label under the marker at this time index
    MarkerLabel(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Pos2,
        to: Pos2,
        color: Color32,
    },
    Polyline {
        points: Vec<Pos2>,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
    },
    /// Text positioned at its baseline
    Text {
        pos: Pos2,
        text: String,
        size: f32,
        color: Color32,
        anchor: Anchor,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub hit: Option<Hit>,
}

/// Ordered list of draw commands; later commands paint over earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    width: f32,
    height: f32,
    /// Where drawing coordinate (0, 0) lands inside the surface
    origin: Vec2,
    commands: Vec<DrawCommand>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything drawn so far
    pub fn clear(&mut self) {
        self.commands.clear();
        self.width = 0.0;
        self.height = 0.0;
        self.origin = Vec2::ZERO;
    }

    pub fn resize(&mut self, width: f32, height: f32, origin: Vec2) {
        self.width = width;
        self.height = height;
        self.origin = origin;
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn draw(&mut self, shape: Shape) {
        self.commands.push(DrawCommand { shape, hit: None });
    }

    pub fn draw_clickable(&mut self, shape: Shape, hit: Hit) {
        self.commands.push(DrawCommand {
            shape,
            hit: Some(hit),
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
