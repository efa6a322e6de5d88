//! The active search: one canonical query built from every way the user can
//! ask for results, and the bookkeeping that applies responses in order.

use super::pager::{compute_pager, PagerView};
use super::results::{ResultList, SearchResult};
use crate::error::FetchError;
use crate::timeline::types::Year;

/// One search request's parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub word: String,
    /// Empty means every year
    pub year: Year,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
}

impl Query {
    pub fn new(word: impl Into<String>, year: Year, page: u32, page_size: u32) -> Self {
        Self {
            word: word.into(),
            year,
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Zero-based offset of the first result on this page
    pub fn start(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

/// The word and year filter behind the last issued search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentFilter {
    pub word: String,
    pub year: Year,
}

/// Search form fields. Rewritten from the filter on every search; user
/// edits only take effect on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub word: String,
    pub year: Year,
}

/// A search to run, tagged with its issue order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: Query,
}

/// A finished search
#[derive(Debug)]
pub struct SearchResponse {
    pub seq: u64,
    pub query: Query,
    pub outcome: Result<SearchResult, FetchError>,
}

/// What happened to a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Result list and pager were replaced
    Replaced,
    /// A newer search already landed; response dropped
    Stale,
    /// The request failed; the view is unchanged
    Failed,
}

/// Owns the current filter, the form projection and the visible results
#[derive(Debug, Default)]
pub struct QueryState {
    filter: CurrentFilter,
    form: SearchForm,
    last_seq: u64,
    applied_seq: u64,
    active: Option<Query>,
    results: ResultList,
    pager: PagerView,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `word` within the current year filter
    pub fn search_by_term(&mut self, word: impl Into<String>, page: u32, size: u32) -> SearchRequest {
        let year = self.filter.year.clone();
        self.resolve(word.into(), year, page, size)
    }

    /// Another page of the current word and year
    pub fn search_by_page(&mut self, page: u32, size: u32) -> SearchRequest {
        let CurrentFilter { word, year } = self.filter.clone();
        self.resolve(word, year, page, size)
    }

    /// Search with every parameter given
    pub fn search_explicit(
        &mut self,
        word: impl Into<String>,
        year: Year,
        page: u32,
        size: u32,
    ) -> SearchRequest {
        self.resolve(word.into(), year, page, size)
    }

    /// Search whatever the form currently holds
    pub fn submit_form(&mut self, page: u32, size: u32) -> SearchRequest {
        let SearchForm { word, year } = self.form.clone();
        self.resolve(word, year, page, size)
    }

    /// Make `(word, year)` the current filter, mirror it into the form and
    /// hand back the request to issue.
    fn resolve(&mut self, word: String, year: Year, page: u32, size: u32) -> SearchRequest {
        self.filter = CurrentFilter {
            word: word.clone(),
            year: year.clone(),
        };
        self.form = SearchForm {
            word: word.clone(),
            year: year.clone(),
        };
        self.last_seq += 1;

        let query = Query::new(word, year, page, size);
        tracing::debug!(
            "Search #{}: word={:?} year={:?} start={} limit={}",
            self.last_seq,
            query.word,
            query.year.as_str(),
            query.start(),
            query.page_size
        );
        SearchRequest {
            seq: self.last_seq,
            query,
        }
    }

    /// Apply a finished search.
    ///
    /// Only responses newer than the last one to land (success or failure)
    /// replace the list and pager, so a slow early request can't overwrite a
    /// later one.
    pub fn apply(&mut self, response: SearchResponse) -> Applied {
        if response.seq <= self.applied_seq {
            tracing::debug!(
                "Dropping stale search #{} (showing #{})",
                response.seq,
                self.applied_seq
            );
            return Applied::Stale;
        }

        match response.outcome {
            Ok(result) => {
                self.applied_seq = response.seq;
                self.pager = compute_pager(response.query.page, response.query.page_size, result.total);
                self.results = ResultList::from_docs(result.docs);
                self.active = Some(response.query);
                Applied::Replaced
            }
            Err(e) => {
                // Still counts as landed: anything older is now stale
                self.applied_seq = response.seq;
                tracing::warn!("Search #{} failed: {}", response.seq, e);
                Applied::Failed
            }
        }
    }

    #[cfg(test)]
    pub fn filter(&self) -> &CurrentFilter {
        &self.filter
    }

    #[cfg(test)]
    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    /// Form fields for the UI to edit
    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    /// Query behind the visible results
    pub fn active(&self) -> Option<&Query> {
        self.active.as_ref()
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn pager(&self) -> &PagerView {
        &self.pager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::results::Document;

    fn doc(name: &str, terms: &[&str]) -> Document {
        Document {
            name: name.into(),
            year: Year::new("2000"),
            url: None,
            author: vec![],
            desc: String::new(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn ok(request: &SearchRequest, docs: Vec<Document>, total: u64) -> SearchResponse {
        SearchResponse {
            seq: request.seq,
            query: request.query.clone(),
            outcome: Ok(SearchResult { docs, total }),
        }
    }

    #[test]
    fn start_is_a_zero_based_offset() {
        assert_eq!(Query::new("ai", Year::any(), 1, 50).start(), 0);
        assert_eq!(Query::new("ai", Year::any(), 3, 50).start(), 100);
        assert_eq!(Query::new("ai", Year::any(), 0, 0).start(), 0);
    }

    #[test]
    fn resolve_projects_into_the_form() {
        let mut state = QueryState::new();
        state.form_mut().word = "typed but not submitted".into();

        let request = state.search_explicit("ai", Year::new("2000"), 1, 50);
        assert_eq!(request.query, Query::new("ai", Year::new("2000"), 1, 50));
        assert_eq!(state.form().word, "ai");
        assert_eq!(state.form().year, Year::new("2000"));

        state.search_explicit("ml", Year::any(), 1, 50);
        assert_eq!(
            state.form(),
            &SearchForm {
                word: "ml".into(),
                year: Year::any(),
            }
        );
    }

    #[test]
    fn term_search_keeps_the_year_and_page_search_keeps_both() {
        let mut state = QueryState::new();
        state.search_explicit("ai", Year::new("2000"), 1, 50);

        let by_term = state.search_by_term("nlp", 1, 50);
        assert_eq!(by_term.query.word, "nlp");
        assert_eq!(by_term.query.year, Year::new("2000"));

        let by_page = state.search_by_page(3, 20);
        assert_eq!(by_page.query, Query::new("nlp", Year::new("2000"), 3, 20));
    }

    #[test]
    fn submit_uses_form_edits() {
        let mut state = QueryState::new();
        state.search_explicit("ai", Year::new("2000"), 2, 50);
        state.form_mut().word = "vision".into();
        state.form_mut().year = Year::any();

        // Paging still follows the last search, not the draft
        assert_eq!(state.search_by_page(2, 50).query.word, "ai");
        // ...and the projection wiped the draft
        assert_eq!(state.form().word, "ai");

        state.form_mut().word = "vision".into();
        state.form_mut().year = Year::any();
        let submitted = state.submit_form(1, 50);
        assert_eq!(submitted.query, Query::new("vision", Year::any(), 1, 50));
        assert_eq!(state.filter().word, "vision");
    }

    #[test]
    fn response_replaces_results_and_pager() {
        let mut state = QueryState::new();
        let request = state.search_explicit("ai", Year::any(), 1, 50);
        let applied = state.apply(ok(&request, vec![doc("a", &["ai"])], 120));

        assert_eq!(applied, Applied::Replaced);
        assert_eq!(state.results().items().len(), 1);
        assert_eq!(state.pager().buttons().len(), 3);
        assert_eq!(state.active(), Some(&request.query));
    }

    #[test]
    fn out_of_order_responses_keep_the_newest() {
        let mut state = QueryState::new();
        let old = state.search_explicit("old", Year::any(), 1, 50);
        let new = state.search_explicit("new", Year::any(), 1, 50);

        assert_eq!(state.apply(ok(&new, vec![doc("new", &[])], 1)), Applied::Replaced);
        assert_eq!(state.apply(ok(&old, vec![doc("old", &[])], 1)), Applied::Stale);
        assert_eq!(state.results().items()[0].name, "new");
    }

    #[test]
    fn failure_leaves_the_view_alone() {
        let mut state = QueryState::new();
        let first = state.search_explicit("ai", Year::any(), 1, 50);
        state.apply(ok(&first, vec![doc("a", &[])], 120));

        let second = state.search_by_page(2, 50);
        let applied = state.apply(SearchResponse {
            seq: second.seq,
            query: second.query,
            outcome: Err(FetchError::Disconnected),
        });
        assert_eq!(applied, Applied::Failed);
        assert_eq!(state.results().items()[0].name, "a");
        assert!(state.pager().buttons()[0].active);
    }

    #[test]
    fn failed_newer_search_still_blocks_older_responses() {
        let mut state = QueryState::new();
        let old = state.search_explicit("old", Year::new("1999"), 1, 50);
        let new = state.search_explicit("new", Year::new("2001"), 1, 50);

        let failed = state.apply(SearchResponse {
            seq: new.seq,
            query: new.query,
            outcome: Err(FetchError::Disconnected),
        });
        assert_eq!(failed, Applied::Failed);

        assert_eq!(state.apply(ok(&old, vec![doc("old", &[])], 120)), Applied::Stale);
        assert!(state.results().is_empty());
        assert!(state.pager().is_hidden());
        assert_eq!(state.active(), None);
        assert_eq!(state.form().word, "new");
    }

    #[test]
    fn empty_result_hides_the_pager() {
        let mut state = QueryState::new();
        let request = state.search_explicit("nothing", Year::any(), 1, 50);
        state.apply(ok(&request, vec![], 0));
        assert!(state.results().is_empty());
        assert!(state.pager().is_hidden());
    }
}
