//! Spiral word placement.
//!
//! Words are placed largest first. Each starts at a jittered point near the
//! middle of the canvas and walks outward along an Archimedean spiral until
//! its box fits inside the canvas without touching anything placed before.
//! Words that never fit are dropped.

use super::quadtree::RectTree;
use super::{CloudLayoutService, CloudWord, PlacedWord};
use crate::settings::CloudSettings;
use egui::{Pos2, Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Average glyph advance as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.55;

/// Spiral parameter step
const SPIRAL_STEP: f32 = 0.1;

pub struct SpiralLayout {
    width: f32,
    height: f32,
    padding: f32,
    seed: Option<u64>,
}

impl SpiralLayout {
    pub fn new(settings: &CloudSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            padding: settings.padding,
            seed: settings.seed,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Padded bounding box of a word centered on `center`
    fn word_box(&self, word: &CloudWord, rotate: f32, center: Pos2) -> Rect {
        let w = word.text.chars().count() as f32 * word.size * GLYPH_WIDTH + 2.0 * self.padding;
        let h = word.size + 2.0 * self.padding;
        let size = if rotate == 0.0 {
            Vec2::new(w, h)
        } else {
            Vec2::new(h, w)
        };
        Rect::from_center_size(center, size)
    }

    /// Point `t` along the spiral, stretched to the canvas aspect ratio
    fn spiral(&self, t: f32) -> Vec2 {
        let aspect = self.width / self.height;
        let t = t * SPIRAL_STEP;
        Vec2::new(aspect * t * t.cos(), t * t.sin())
    }
}

impl CloudLayoutService for SpiralLayout {
    fn place(&self, words: &[CloudWord]) -> Vec<PlacedWord> {
        let mut rng = self.rng();
        let canvas = Rect::from_min_size(Pos2::ZERO, Vec2::new(self.width, self.height));
        let max_delta = (self.width * self.width + self.height * self.height).sqrt();
        let mut placed_boxes = RectTree::new(canvas);

        let mut order: Vec<&CloudWord> = words.iter().collect();
        order.sort_by(|a, b| b.size.total_cmp(&a.size));

        let mut placed = Vec::with_capacity(order.len());
        for word in order {
            let rotate = if rng.gen_bool(0.5) { 90.0 } else { 0.0 };
            let start = Pos2::new(
                (self.width * (rng.gen::<f32>() + 0.5) / 2.0).floor(),
                (self.height * (rng.gen::<f32>() + 0.5) / 2.0).floor(),
            );
            let dt = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

            let mut t = 0.0_f32;
            loop {
                let delta = self.spiral(t);
                let (dx, dy) = (delta.x.trunc(), delta.y.trunc());
                if dx.abs().min(dy.abs()) >= max_delta {
                    tracing::debug!("No room for cloud word {:?}", word.text);
                    break;
                }
                t += dt;

                let center = start + Vec2::new(dx, dy);
                let bounds = self.word_box(word, rotate, center);
                if !canvas.contains_rect(bounds) || placed_boxes.collides(&bounds) {
                    continue;
                }

                placed_boxes.insert(bounds);
                placed.push(PlacedWord {
                    text: word.text.clone(),
                    size: word.size,
                    x: center.x - self.width / 2.0,
                    y: center.y - self.height / 2.0,
                    rotate,
                });
                break;
            }
        }
        tracing::debug!("Placed {} of {} cloud words", placed_boxes.len(), words.len());
        placed
    }
}
