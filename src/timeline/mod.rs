//! Quantity-over-year chart: scales, markers and the orchestration that
//! redraws them when the zoom changes.

mod curve;
pub mod marker;
pub mod scale;
pub mod types;

use crate::cloud::{CloudRebuild, KeywordCloud};
use crate::settings::ChartSettings;
use crate::surface::{Anchor, Shape, Surface};
use crate::theme::{self, QuantityHue};
use egui::{Pos2, Vec2};
use curve::monotone_curve;
use marker::{layout_marker, MarkerGeometry};
use scale::{build_scales, Scales};
use types::{year_options, TimePoint, Year};

/// Gap between the baseline and the top of the tick labels
const TICK_PADDING: f32 = 5.0;
const TICK_FONT_SIZE: f32 = 11.0;

/// One-shot flags for the session. Reset only by starting over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewFlags {
    /// A cloud has been built; timeline redraws no longer bootstrap one
    pub cloud_drawn: bool,
    /// The automatic top-keyword search has been issued
    pub auto_searched: bool,
}

/// Laid-out chart for the current zoom
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub scales: Scales,
    /// Smoothed series line through every point
    pub series: Vec<Pos2>,
    pub markers: Vec<MarkerGeometry>,
}

impl Chart {
    fn draw(&self, surface: &mut Surface) {
        let baseline = self.scales.height;

        // x axis: a baseline with year labels, no tick marks
        surface.draw(Shape::Line {
            from: Pos2::new(0.0, baseline),
            to: Pos2::new(self.scales.width, baseline),
            color: theme::chart::AXIS,
        });
        for tick in &self.scales.ticks {
            surface.draw(Shape::Text {
                pos: Pos2::new(tick.x, baseline + TICK_PADDING + TICK_FONT_SIZE),
                text: tick.label.to_string(),
                size: TICK_FONT_SIZE,
                color: theme::text::SECONDARY,
                anchor: Anchor::Middle,
            });
        }

        surface.draw(Shape::Polyline {
            points: self.series.clone(),
            color: theme::chart::SERIES,
        });

        for marker in &self.markers {
            marker.draw(surface);
        }
    }
}

/// Owns the dataset and the session flags, and redraws the chart on demand
pub struct Timeline {
    data: Vec<TimePoint>,
    years: Vec<Year>,
    hue: QuantityHue,
    flags: ViewFlags,
    pixel_scale: f32,
    settings: ChartSettings,
    chart: Option<Chart>,
}

impl Timeline {
    pub fn new(settings: ChartSettings, pixel_scale: f32) -> Self {
        Self {
            data: Vec::new(),
            years: vec![Year::any()],
            hue: QuantityHue::from_quantities(std::iter::empty()),
            flags: ViewFlags::default(),
            pixel_scale,
            settings,
            chart: None,
        }
    }

    /// Take ownership of a freshly fetched dataset
    pub fn load(&mut self, data: Vec<TimePoint>) {
        tracing::info!("Loaded timeline with {} points", data.len());
        self.years = year_options(&data);
        self.hue = QuantityHue::from_quantities(data.iter().map(|d| d.quantity));
        self.data = data;
    }

    /// Clear the surface and redraw every marker at `pixel_scale`.
    ///
    /// Until a cloud has been drawn this session, the first point also
    /// bootstraps the keyword cloud; the returned rebuild carries the
    /// layout request and possibly the automatic search.
    pub fn render(
        &mut self,
        pixel_scale: f32,
        surface: &mut Surface,
        cloud: &mut KeywordCloud,
    ) -> Option<CloudRebuild> {
        surface.clear();
        self.chart = None;
        self.pixel_scale = pixel_scale;

        if self.data.is_empty() {
            tracing::debug!("Nothing to render: timeline is empty");
            return None;
        }

        let s = self.settings;
        let scales = build_scales(&self.data, pixel_scale, s.height);
        let anchors: Vec<Pos2> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, d)| Pos2::new(scales.x.apply(i as f32), scales.y.apply(d.quantity as f32)))
            .collect();
        let series = monotone_curve(&anchors);
        let markers = self
            .data
            .iter()
            .enumerate()
            .map(|(i, d)| layout_marker(d, i, &scales, &self.hue, s.marker_radius, s.label_row_height))
            .collect();

        surface.resize(
            scales.width + 2.0 * s.margin,
            s.height + s.label_band + 2.0 * s.margin,
            Vec2::splat(s.margin),
        );
        let chart = Chart {
            scales,
            series,
            markers,
        };
        chart.draw(surface);
        self.chart = Some(chart);

        if self.flags.cloud_drawn {
            return None;
        }
        let rebuild = cloud.rebuild(&mut self.flags, &self.data[0]);
        if rebuild.is_some() {
            tracing::info!("Bootstrapped keyword cloud from year {}", self.data[0].year);
        }
        rebuild
    }

    /// Rebuild the cloud from the point at `index` (a marker label click)
    pub fn select(&mut self, index: usize, cloud: &mut KeywordCloud) -> Option<CloudRebuild> {
        let point = self.data.get(index)?;
        cloud.rebuild(&mut self.flags, point)
    }

    pub fn point(&self, index: usize) -> Option<&TimePoint> {
        self.data.get(index)
    }

    pub fn data(&self) -> &[TimePoint] {
        &self.data
    }

    pub fn is_loaded(&self) -> bool {
        !self.data.is_empty()
    }

    /// Year select options, "all years" first
    pub fn year_options(&self) -> &[Year] {
        &self.years
    }

    #[cfg(test)]
    pub fn flags(&self) -> ViewFlags {
        self.flags
    }

    pub fn pixel_scale(&self) -> f32 {
        self.pixel_scale
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }
}
