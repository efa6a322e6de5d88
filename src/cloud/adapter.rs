//! Keyword cloud state: turns a year's keywords into a layout request and
//! holds the placed words once the layout service answers.

use super::{CloudLayout, CloudRequest, CloudWord, PlacedWord};
use crate::settings::CloudSettings;
use crate::timeline::types::{Keyword, TimePoint, Year};
use crate::timeline::ViewFlags;
use std::time::Instant;

/// Search issued automatically the first time a cloud is built
#[derive(Debug, Clone, PartialEq)]
pub struct AutoSearch {
    pub word: String,
    pub year: Year,
}

/// What a rebuild asks the caller to do
#[derive(Debug, Clone, PartialEq)]
pub struct CloudRebuild {
    pub request: CloudRequest,
    pub auto_search: Option<AutoSearch>,
}

/// Square-root scale from keyword counts onto font sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl FontScale {
    /// Domain runs from the last (smallest) count to the first; a zero minimum counts as 1
    pub fn for_keywords(keywords: &[Keyword], range: (f32, f32)) -> Option<Self> {
        let first = keywords.first()?;
        let last = keywords.last()?;
        let min = if last.count == 0 { 1 } else { last.count };
        Some(Self {
            domain: (min as f32, first.count as f32),
            range,
        })
    }

    pub fn apply(&self, count: u32) -> f32 {
        let lo = self.domain.0.sqrt();
        let hi = self.domain.1.sqrt();
        let span = hi - lo;
        let t = if span == 0.0 {
            0.0
        } else {
            ((count as f32).sqrt() - lo) / span
        };
        (self.range.0 + t * (self.range.1 - self.range.0)).max(1.0)
    }
}

/// The keyword cloud panel
pub struct KeywordCloud {
    font_range: (f32, f32),
    generation: u64,
    year: Option<Year>,
    words: Vec<PlacedWord>,
    placed_at: Option<Instant>,
}

impl KeywordCloud {
    pub fn new(settings: &CloudSettings) -> Self {
        Self {
            font_range: (settings.min_font_size, settings.max_font_size),
            generation: 0,
            year: None,
            words: Vec::new(),
            placed_at: None,
        }
    }

    /// Start a new cloud for `point`.
    ///
    /// Visible words are dropped right away and any layout still in flight
    /// becomes stale. The first cloud of the session also asks for one
    /// automatic search of the point's top keyword. A point without keywords
    /// leaves everything untouched.
    pub fn rebuild(&mut self, flags: &mut ViewFlags, point: &TimePoint) -> Option<CloudRebuild> {
        let scale = FontScale::for_keywords(&point.keywords, self.font_range)?;

        self.generation += 1;
        self.words.clear();
        self.placed_at = None;
        self.year = Some(point.year.clone());

        let words = point
            .keywords
            .iter()
            .map(|k| CloudWord {
                text: k.value.clone(),
                size: scale.apply(k.count),
            })
            .collect();

        flags.cloud_drawn = true;
        let auto_search = if flags.auto_searched {
            None
        } else {
            flags.auto_searched = true;
            point.representative().map(|k| AutoSearch {
                word: k.value.clone(),
                year: point.year.clone(),
            })
        };

        tracing::debug!(
            "Cloud generation {} for year {} ({} words)",
            self.generation,
            point.year,
            point.keywords.len()
        );

        Some(CloudRebuild {
            request: CloudRequest {
                generation: self.generation,
                words,
            },
            auto_search,
        })
    }

    /// Accept a finished layout. Layouts for an older rebuild are ignored.
    pub fn on_layout(&mut self, layout: CloudLayout) -> bool {
        if layout.generation != self.generation {
            tracing::debug!(
                "Dropping stale cloud layout {} (current {})",
                layout.generation,
                self.generation
            );
            return false;
        }
        self.words = layout.words;
        self.placed_at = Some(Instant::now());
        true
    }

    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    /// Year the current cloud was built from
    pub fn year(&self) -> Option<&Year> {
        self.year.as_ref()
    }

    /// When the current words arrived, for the fade-in
    pub fn placed_at(&self) -> Option<Instant> {
        self.placed_at
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: &str, keywords: &[(&str, u32)]) -> TimePoint {
        TimePoint {
            year: Year::new(year),
            quantity: 1.0,
            keywords: keywords.iter().map(|&(v, c)| Keyword::new(v, c)).collect(),
        }
    }

    fn cloud() -> KeywordCloud {
        KeywordCloud::new(&CloudSettings::default())
    }

    #[test]
    fn first_rebuild_requests_one_auto_search() {
        let mut cloud = cloud();
        let mut flags = ViewFlags::default();

        let rebuild = cloud
            .rebuild(&mut flags, &point("2000", &[("ai", 10), ("ml", 3)]))
            .unwrap();
        assert_eq!(
            rebuild.auto_search,
            Some(AutoSearch {
                word: "ai".into(),
                year: Year::new("2000"),
            })
        );
        assert!(flags.cloud_drawn);
        assert!(flags.auto_searched);

        for _ in 0..5 {
            let again = cloud.rebuild(&mut flags, &point("2001", &[("nlp", 7)])).unwrap();
            assert!(again.auto_search.is_none());
        }
    }

    #[test]
    fn empty_keywords_are_skipped() {
        let mut cloud = cloud();
        let mut flags = ViewFlags::default();

        assert!(cloud.rebuild(&mut flags, &point("2000", &[])).is_none());
        assert_eq!(flags, ViewFlags::default());
        assert_eq!(cloud.generation(), 0);

        // A later non-empty point still gets the bootstrap search
        let rebuild = cloud.rebuild(&mut flags, &point("2001", &[("nlp", 7)])).unwrap();
        assert!(rebuild.auto_search.is_some());
    }

    #[test]
    fn sizes_span_the_font_range() {
        let mut cloud = cloud();
        let mut flags = ViewFlags::default();
        let rebuild = cloud
            .rebuild(&mut flags, &point("2000", &[("ai", 16), ("ml", 9), ("cv", 4)]))
            .unwrap();

        let sizes: Vec<f32> = rebuild.request.words.iter().map(|w| w.size).collect();
        assert_eq!(sizes[0], 60.0);
        assert_eq!(sizes[1], 36.0);
        assert_eq!(sizes[2], 12.0);
        assert_eq!(rebuild.request.words[0].text, "ai");
    }

    #[test]
    fn zero_minimum_count_uses_one() {
        let scale = FontScale::for_keywords(
            &[Keyword::new("a", 4), Keyword::new("b", 0)],
            (12.0, 60.0),
        )
        .unwrap();
        assert_eq!(scale.apply(1), 12.0);
        assert_eq!(scale.apply(4), 60.0);
        assert!(scale.apply(0) >= 1.0);
    }

    #[test]
    fn single_keyword_gets_the_minimum_size() {
        let scale = FontScale::for_keywords(&[Keyword::new("a", 5)], (12.0, 60.0)).unwrap();
        assert_eq!(scale.apply(5), 12.0);
    }

    #[test]
    fn stale_layouts_are_ignored() {
        let mut cloud = cloud();
        let mut flags = ViewFlags::default();
        let first = cloud.rebuild(&mut flags, &point("2000", &[("ai", 10)])).unwrap();
        let second = cloud.rebuild(&mut flags, &point("2001", &[("nlp", 7)])).unwrap();

        let placed = |text: &str| PlacedWord {
            text: text.into(),
            size: 12.0,
            x: 0.0,
            y: 0.0,
            rotate: 0.0,
        };

        assert!(!cloud.on_layout(CloudLayout {
            generation: first.request.generation,
            words: vec![placed("ai")],
        }));
        assert!(cloud.words().is_empty());

        assert!(cloud.on_layout(CloudLayout {
            generation: second.request.generation,
            words: vec![placed("nlp")],
        }));
        assert_eq!(cloud.words()[0].text, "nlp");
        assert_eq!(cloud.year(), Some(&Year::new("2001")));
        assert!(cloud.placed_at().is_some());
    }

    #[test]
    fn rebuild_clears_visible_words() {
        let mut cloud = cloud();
        let mut flags = ViewFlags::default();
        let first = cloud.rebuild(&mut flags, &point("2000", &[("ai", 10)])).unwrap();
        cloud.on_layout(CloudLayout {
            generation: first.request.generation,
            words: vec![PlacedWord {
                text: "ai".into(),
                size: 12.0,
                x: 0.0,
                y: 0.0,
                rotate: 0.0,
            }],
        });
        assert_eq!(cloud.words().len(), 1);

        cloud.rebuild(&mut flags, &point("2001", &[("nlp", 7)]));
        assert!(cloud.words().is_empty());
    }
}
