//! Index and quantity scales for the timeline chart.
//!
//! Tick stepping and domain "nicing" follow the usual 1/2/5 × 10^k scheme so
//! the y axis tops out at a round number.

use super::types::{TimePoint, Year};

/// Below this zoom (pixels per time index) only every other tick is requested
const DENSE_TICK_THRESHOLD: f32 = 30.0;

/// Tick target used when nicing the quantity domain
const NICE_TICK_TARGET: usize = 10;

/// Linear mapping from a domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f32, f32),
    pub range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to pixels. A zero-width domain maps everything to the range start.
    pub fn apply(&self, value: f32) -> f32 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

/// One labelled position on the x axis
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub index: usize,
    pub x: f32,
    pub label: Year,
}

/// Everything needed to place points on the chart
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    /// Time index -> pixel
    pub x: LinearScale,
    /// Quantity -> pixel, inverted so larger quantities sit higher
    pub y: LinearScale,
    pub width: f32,
    pub height: f32,
    /// Requested tick density
    pub tick_count: usize,
    pub ticks: Vec<Tick>,
}

/// How many x ticks to ask for at a given zoom
pub fn tick_count(pixel_scale: f32, len: usize) -> usize {
    if pixel_scale < DENSE_TICK_THRESHOLD {
        // round(len / 2)
        (len + 1) / 2
    } else {
        len
    }
}

/// Build the scales for a dataset at a zoom level.
///
/// Pure: the caller clears whatever was drawn with the previous scales.
pub fn build_scales(data: &[TimePoint], pixel_scale: f32, height: f32) -> Scales {
    let len = data.len();
    let width = len as f32 * pixel_scale;
    let last_index = len.saturating_sub(1) as f32;
    let x = LinearScale::new((0.0, last_index), (0.0, width));

    let max_quantity = data.iter().map(|d| d.quantity as f32).fold(0.0_f32, f32::max);
    let y = LinearScale::new((0.0, nice_upper(max_quantity)), (height, 0.0));

    let tick_count = tick_count(pixel_scale, len);
    let ticks = tick_indices(len, tick_count)
        .into_iter()
        .map(|index| Tick {
            index,
            x: x.apply(index as f32),
            label: data[index].year.clone(),
        })
        .collect();

    Scales {
        x,
        y,
        width,
        height,
        tick_count,
        ticks,
    }
}

/// Round step covering `span` in roughly `count` steps
fn tick_step(span: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let mut step = 10_f64.powf((span / count).log10().floor());
    let error = count / span * step;
    if error <= 0.15 {
        step *= 10.0;
    } else if error <= 0.35 {
        step *= 5.0;
    } else if error <= 0.75 {
        step *= 2.0;
    }
    step
}

/// Extend `max` up to the next round number (domain starts at zero)
fn nice_upper(max: f32) -> f32 {
    let max = max as f64;
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let step = tick_step(max, NICE_TICK_TARGET);
    // tolerate powf rounding so an already-round max stays put
    let steps = (max / step - 1e-9).ceil();
    (steps * step) as f32
}

/// Integer tick positions over `[0, len - 1]`
fn tick_indices(len: usize, count: usize) -> Vec<usize> {
    match len {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let last = len - 1;
            let step = tick_step(last as f64, count).max(1.0).round() as usize;
            (0..=last).step_by(step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::types::Keyword;
    use proptest::prelude::*;

    fn series(quantities: &[f64]) -> Vec<TimePoint> {
        quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| TimePoint {
                year: Year::new((2000 + i).to_string()),
                quantity: q,
                keywords: vec![Keyword::new("kw", 1)],
            })
            .collect()
    }

    #[test]
    fn two_points_at_forty_pixels() {
        let scales = build_scales(&series(&[5.0, 9.0]), 40.0, 260.0);
        assert_eq!(scales.width, 80.0);
        assert_eq!(scales.tick_count, 2);
        assert_eq!(scales.x.apply(0.0), 0.0);
        assert_eq!(scales.x.apply(1.0), 80.0);
        let labels: Vec<&str> = scales.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["2000", "2001"]);
    }

    #[test]
    fn y_is_inverted_and_niced() {
        let scales = build_scales(&series(&[5.0, 123.0]), 40.0, 260.0);
        assert_eq!(scales.y.domain, (0.0, 130.0));
        assert_eq!(scales.y.apply(0.0), 260.0);
        assert_eq!(scales.y.apply(130.0), 0.0);
        assert!(scales.y.apply(123.0) < scales.y.apply(5.0));
    }

    #[test]
    fn nice_keeps_round_maxima() {
        assert_eq!(nice_upper(9.0), 9.0);
        assert_eq!(nice_upper(5.0), 5.0);
        assert_eq!(nice_upper(100.0), 100.0);
        assert_eq!(nice_upper(0.0), 1.0);
    }

    #[test]
    fn single_point_maps_to_origin() {
        let scales = build_scales(&series(&[3.0]), 40.0, 260.0);
        assert_eq!(scales.width, 40.0);
        assert_eq!(scales.x.apply(0.0), 0.0);
        assert_eq!(scales.ticks.len(), 1);
    }

    #[test]
    fn empty_dataset_has_no_ticks() {
        let scales = build_scales(&[], 40.0, 260.0);
        assert_eq!(scales.width, 0.0);
        assert!(scales.ticks.is_empty());
    }

    #[test]
    fn low_zoom_thins_labels() {
        let data = series(&[1.0; 40]);
        let dense = build_scales(&data, 40.0, 260.0);
        let sparse = build_scales(&data, 10.0, 260.0);
        assert_eq!(sparse.tick_count, 20);
        assert!(sparse.ticks.len() < dense.ticks.len());
        assert!(sparse.ticks.iter().all(|t| t.index < data.len()));
    }

    proptest! {
        #[test]
        fn tick_density_follows_zoom(len in 0usize..500, scale in 1.0f32..29.99) {
            prop_assert_eq!(tick_count(scale, len), ((len as f64) / 2.0).round() as usize);
        }

        #[test]
        fn full_density_at_or_above_threshold(len in 0usize..500, scale in 30.0f32..400.0) {
            prop_assert_eq!(tick_count(scale, len), len);
        }

        #[test]
        fn ticks_stay_on_data_indices(len in 1usize..300, scale in 1.0f32..100.0) {
            let data = series(&vec![1.0; len]);
            let scales = build_scales(&data, scale, 260.0);
            prop_assert!(!scales.ticks.is_empty());
            for tick in &scales.ticks {
                prop_assert!(tick.index < len);
                prop_assert_eq!(&tick.label, &data[tick.index].year);
            }
        }
    }
}
