//! Keyword cloud for the selected year.
//!
//! The adapter turns ranked keywords into sized words and owns what is on
//! screen; placement is delegated to a [`CloudLayoutService`] that runs off
//! the UI thread and answers with a [`CloudLayout`].

pub mod adapter;
pub mod layout;
mod quadtree;

pub use adapter::{CloudRebuild, KeywordCloud};
pub use layout::SpiralLayout;

/// A word submitted for placement
#[derive(Debug, Clone, PartialEq)]
pub struct CloudWord {
    pub text: String,
    /// Font size in pixels
    pub size: f32,
}

/// A placed word; `x`/`y` are relative to the canvas center, `rotate` in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub rotate: f32,
}

/// One placement job
#[derive(Debug, Clone, PartialEq)]
pub struct CloudRequest {
    pub generation: u64,
    pub words: Vec<CloudWord>,
}

/// Result of a placement job
#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayout {
    pub generation: u64,
    pub words: Vec<PlacedWord>,
}

/// Positions words on the cloud canvas
pub trait CloudLayoutService: Send + Sync {
    fn place(&self, words: &[CloudWord]) -> Vec<PlacedWord>;
}
