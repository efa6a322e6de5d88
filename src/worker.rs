//! Runs explorer effects on background threads and hands the results back
//! to the UI thread, which drains them once per frame.

use crate::api::Backend;
use crate::cloud::{CloudLayout, CloudLayoutService};
use crate::error::FetchError;
use crate::explorer::Effect;
use crate::search::SearchResponse;
use crate::timeline::types::TimePoint;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

/// A finished piece of background work
#[derive(Debug)]
pub enum Completion {
    Dataset(Result<Vec<TimePoint>, FetchError>),
    Search(SearchResponse),
    Cloud(CloudLayout),
}

pub struct Worker {
    backend: Arc<dyn Backend>,
    layout: Arc<dyn CloudLayoutService>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    pending: usize,
}

impl Worker {
    pub fn new(backend: Arc<dyn Backend>, layout: Arc<dyn CloudLayoutService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            layout,
            tx,
            rx,
            pending: 0,
        }
    }

    /// Fetch the timeline dataset
    pub fn fetch_dataset(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.spawn(
            move || Completion::Dataset(backend.fetch_timeline()),
            Completion::Dataset(Err(FetchError::Disconnected)),
        );
    }

    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Search(request) => {
                let backend = Arc::clone(&self.backend);
                let lost = Completion::Search(SearchResponse {
                    seq: request.seq,
                    query: request.query.clone(),
                    outcome: Err(FetchError::Disconnected),
                });
                self.spawn(
                    move || {
                        let outcome = backend.search(&request.query);
                        Completion::Search(SearchResponse {
                            seq: request.seq,
                            query: request.query,
                            outcome,
                        })
                    },
                    lost,
                );
            }
            Effect::LayoutCloud(request) => {
                let layout = Arc::clone(&self.layout);
                // A crashed layout leaves an empty cloud for that generation
                let lost = Completion::Cloud(CloudLayout {
                    generation: request.generation,
                    words: Vec::new(),
                });
                self.spawn(
                    move || {
                        let words = layout.place(&request.words);
                        Completion::Cloud(CloudLayout {
                            generation: request.generation,
                            words,
                        })
                    },
                    lost,
                );
            }
        }
    }

    /// Run `job` on its own thread. If it panics, `lost` is reported in its
    /// place so the pending count still drains.
    fn spawn<F>(&mut self, job: F, lost: Completion)
    where
        F: FnOnce() -> Completion + Send + 'static,
    {
        self.pending += 1;
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let completion = panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|_| {
                tracing::warn!("Background job panicked before answering");
                lost
            });
            let _ = tx.send(completion);
        });
    }

    /// Everything that finished since the last poll
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut done = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(completion) => {
                    self.pending = self.pending.saturating_sub(1);
                    done.push(completion);
                }
                Err(TryRecvError::Empty) => break,
                // The worker keeps its own sender, so this can't happen
                Err(TryRecvError::Disconnected) => break,
            }
        }
        done
    }

    /// Jobs spawned but not yet polled
    pub fn pending(&self) -> usize {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{CloudRequest, CloudWord, PlacedWord};
    use crate::search::{Query, SearchRequest, SearchResult};
    use crate::timeline::types::Year;
    use std::time::{Duration, Instant};

    struct FakeBackend;

    impl Backend for FakeBackend {
        fn fetch_timeline(&self) -> Result<Vec<TimePoint>, FetchError> {
            Err(FetchError::Status {
                url: "http://test/data.json".into(),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })
        }

        fn search(&self, query: &Query) -> Result<SearchResult, FetchError> {
            Ok(SearchResult {
                docs: vec![],
                total: u64::from(query.page),
            })
        }
    }

    struct StackLayout;

    impl CloudLayoutService for StackLayout {
        fn place(&self, words: &[CloudWord]) -> Vec<PlacedWord> {
            words
                .iter()
                .enumerate()
                .map(|(i, w)| PlacedWord {
                    text: w.text.clone(),
                    size: w.size,
                    x: 0.0,
                    y: i as f32 * w.size,
                    rotate: 0.0,
                })
                .collect()
        }
    }

    fn worker() -> Worker {
        Worker::new(Arc::new(FakeBackend), Arc::new(StackLayout))
    }

    fn wait_for(worker: &mut Worker, count: usize) -> Vec<Completion> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut done = Vec::new();
        while done.len() < count && Instant::now() < deadline {
            done.extend(worker.poll());
            std::thread::sleep(Duration::from_millis(5));
        }
        done
    }

    #[test]
    fn search_response_keeps_the_request_seq() {
        let mut worker = worker();
        worker.run(Effect::Search(SearchRequest {
            seq: 7,
            query: Query::new("ai", Year::any(), 3, 50),
        }));
        assert_eq!(worker.pending(), 1);

        let done = wait_for(&mut worker, 1);
        match &done[..] {
            [Completion::Search(response)] => {
                assert_eq!(response.seq, 7);
                assert_eq!(response.query.page, 3);
                assert_eq!(response.outcome.as_ref().unwrap().total, 3);
            }
            other => panic!("unexpected completions: {:?}", other),
        }
        assert_eq!(worker.pending(), 0);
    }

    #[test]
    fn cloud_layout_keeps_the_generation() {
        let mut worker = worker();
        worker.run(Effect::LayoutCloud(CloudRequest {
            generation: 4,
            words: vec![CloudWord {
                text: "ai".into(),
                size: 20.0,
            }],
        }));

        let done = wait_for(&mut worker, 1);
        match &done[..] {
            [Completion::Cloud(layout)] => {
                assert_eq!(layout.generation, 4);
                assert_eq!(layout.words[0].text, "ai");
            }
            other => panic!("unexpected completions: {:?}", other),
        }
    }

    #[test]
    fn dataset_failure_is_reported() {
        let mut worker = worker();
        worker.fetch_dataset();
        let done = wait_for(&mut worker, 1);
        assert!(matches!(
            &done[..],
            [Completion::Dataset(Err(FetchError::Status { .. }))]
        ));
    }

    struct CrashingBackend;

    impl Backend for CrashingBackend {
        fn fetch_timeline(&self) -> Result<Vec<TimePoint>, FetchError> {
            panic!("backend crashed");
        }

        fn search(&self, _query: &Query) -> Result<SearchResult, FetchError> {
            panic!("backend crashed");
        }
    }

    #[test]
    fn crashed_job_reports_disconnected() {
        let mut worker = Worker::new(Arc::new(CrashingBackend), Arc::new(StackLayout));
        worker.run(Effect::Search(SearchRequest {
            seq: 3,
            query: Query::new("ai", Year::any(), 1, 50),
        }));

        let done = wait_for(&mut worker, 1);
        match &done[..] {
            [Completion::Search(response)] => {
                assert_eq!(response.seq, 3);
                assert!(matches!(response.outcome, Err(FetchError::Disconnected)));
            }
            other => panic!("unexpected completions: {:?}", other),
        }
        assert_eq!(worker.pending(), 0);
    }
}
