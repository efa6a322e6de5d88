//! Wires the timeline, the keyword cloud and the search state together.
//!
//! The explorer never blocks: every UI event is handled synchronously and
//! answers with the [`Effect`]s (remote searches, cloud layouts) the caller
//! should run in the background. Their results come back through
//! [`Explorer::on_search_response`] and [`Explorer::on_cloud_layout`].

use crate::cloud::{CloudLayout, CloudRebuild, CloudRequest, KeywordCloud};
use crate::error::FetchError;
use crate::search::{Applied, QueryState, SearchRequest, SearchResponse};
use crate::settings::Settings;
use crate::surface::Surface;
use crate::timeline::types::{TimePoint, Year};
use crate::timeline::Timeline;

/// Everything the user can do
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Zoom input changed to this many pixels per time index
    ZoomChanged(f32),
    /// Keyword label under the marker at this index
    MarkerLabelClicked(usize),
    CloudWordClicked(String),
    /// Term chip on a search result
    ResultTermClicked(String),
    PageClicked(u32),
    FormSubmitted,
}

/// Background work requested by the explorer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search(SearchRequest),
    LayoutCloud(CloudRequest),
}

pub struct Explorer {
    timeline: Timeline,
    cloud: KeywordCloud,
    query: QueryState,
    surface: Surface,
    default_page: u32,
    default_page_size: u32,
    min_pixel_scale: f32,
    max_pixel_scale: f32,
}

impl Explorer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            timeline: Timeline::new(settings.chart, settings.pixel_scale),
            cloud: KeywordCloud::new(&settings.cloud),
            query: QueryState::new(),
            surface: Surface::new(),
            default_page: settings.default_page,
            default_page_size: settings.default_page_size,
            min_pixel_scale: settings.min_pixel_scale,
            max_pixel_scale: settings.max_pixel_scale,
        }
    }

    /// The dataset arrived: draw the first chart
    pub fn on_dataset(&mut self, result: Result<Vec<TimePoint>, FetchError>) -> Vec<Effect> {
        match result {
            Ok(data) => {
                self.timeline.load(data);
                self.redraw(self.timeline.pixel_scale())
            }
            Err(e) => {
                tracing::warn!("Failed to load timeline: {}", e);
                Vec::new()
            }
        }
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        tracing::debug!("UI event: {:?}", event);
        match event {
            UiEvent::ZoomChanged(scale) => {
                if !self.timeline.is_loaded() {
                    return Vec::new();
                }
                let scale = scale.clamp(self.min_pixel_scale, self.max_pixel_scale);
                self.redraw(scale)
            }
            UiEvent::MarkerLabelClicked(index) => self.select_marker(index),
            UiEvent::CloudWordClicked(word) => {
                let request =
                    self.query
                        .search_by_term(word, self.default_page, self.default_page_size);
                vec![Effect::Search(request)]
            }
            UiEvent::ResultTermClicked(term) => {
                let size = self
                    .query
                    .active()
                    .map_or(self.default_page_size, |q| q.page_size);
                let request = self
                    .query
                    .search_explicit(term, Year::any(), self.default_page, size);
                vec![Effect::Search(request)]
            }
            UiEvent::PageClicked(page) => match self.query.pager().click(page) {
                Some((page, size)) => vec![Effect::Search(self.query.search_by_page(page, size))],
                None => Vec::new(),
            },
            UiEvent::FormSubmitted => {
                let request = self
                    .query
                    .submit_form(self.default_page, self.default_page_size);
                vec![Effect::Search(request)]
            }
        }
    }

    pub fn on_search_response(&mut self, response: SearchResponse) -> Applied {
        self.query.apply(response)
    }

    pub fn on_cloud_layout(&mut self, layout: CloudLayout) -> bool {
        self.cloud.on_layout(layout)
    }

    /// Redraw the chart at `pixel_scale`, bootstrapping the cloud if needed
    fn redraw(&mut self, pixel_scale: f32) -> Vec<Effect> {
        let rebuild = self
            .timeline
            .render(pixel_scale, &mut self.surface, &mut self.cloud);
        self.cloud_effects(rebuild)
    }

    /// Marker label click: new cloud for that year, then search its top keyword
    fn select_marker(&mut self, index: usize) -> Vec<Effect> {
        let Some(point) = self.timeline.point(index) else {
            return Vec::new();
        };
        let keyword = point.representative().map(|k| k.value.clone());
        let year = point.year.clone();

        let rebuild = self.timeline.select(index, &mut self.cloud);
        let mut effects = self.cloud_effects(rebuild);
        if let Some(word) = keyword {
            let request =
                self.query
                    .search_explicit(word, year, self.default_page, self.default_page_size);
            effects.push(Effect::Search(request));
        }
        effects
    }

    fn cloud_effects(&mut self, rebuild: Option<CloudRebuild>) -> Vec<Effect> {
        let Some(rebuild) = rebuild else {
            return Vec::new();
        };
        let mut effects = vec![Effect::LayoutCloud(rebuild.request)];
        if let Some(auto) = rebuild.auto_search {
            tracing::info!("Auto-searching {:?} in {}", auto.word, auto.year);
            let request = self.query.search_explicit(
                auto.word,
                auto.year,
                self.default_page,
                self.default_page_size,
            );
            effects.push(Effect::Search(request));
        }
        effects
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn cloud(&self) -> &KeywordCloud {
        &self.cloud
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
#[path = "explorer_tests.rs"]
mod tests;
