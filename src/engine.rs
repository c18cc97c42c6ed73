use std::{
    num::NonZeroUsize,
    thread,
    time::{Duration, Instant},
};

use serde::Serialize;
use tracing::debug;

use crate::{PresentError, Trie, Word};

/// Whatever displays query results, e.g. a terminal or a list widget.
#[async_trait::async_trait]
pub trait ResultSink: Send + Sync {
    async fn present(&self, query: &str, results: &[String]) -> Result<(), PresentError>;
}

/// Outcome of one query, with how long each half of it took.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub results: Vec<String>,
    /// Time spent looking the results up.
    pub search_duration_ms: f64,
    /// Time spent handing the results to the sink.
    pub update_duration_ms: f64,
}

/// Read side of the word store. Answers queries against a finished trie and
/// forwards the results to a [`ResultSink`].
#[derive(Debug)]
pub struct SuggestionEngine<S> {
    trie: Trie,
    sink: S,
}

impl<S: ResultSink> SuggestionEngine<S> {
    pub fn new(trie: Trie, sink: S) -> Self {
        Self { trie, sink }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn into_parts(self) -> (Trie, S) {
        (self.trie, self.sink)
    }

    /// Words starting with `text`; an empty text lists the whole corpus.
    /// Text that contains symbols outside A-Z matches nothing.
    pub fn suggest(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return self.trie.words().collect();
        }
        match self.trie.suggestions_for(text) {
            Ok(results) => results,
            Err(err) => {
                debug!("Query {:?} cannot match: {}", text, err);
                Vec::new()
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        Word::parse(word).is_ok_and(|word| self.trie.contains(&word))
    }

    /// Answers a batch of queries on up to `workers` threads. The results line
    /// up with `queries`.
    pub fn suggest_many<Q>(&self, queries: &[Q], workers: NonZeroUsize) -> Vec<Vec<String>>
    where
        Q: AsRef<str> + Sync,
    {
        let chunk = queries.len().div_ceil(workers.get()).max(1);
        thread::scope(|scope| {
            let handles: Vec<_> = queries
                .chunks(chunk)
                .map(|part| {
                    scope.spawn(move || {
                        part.iter()
                            .map(|query| self.suggest(query.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
                .collect()
        })
    }

    /// Called whenever the query text changes.
    pub async fn on_query_changed(&self, text: &str) -> Result<QueryReport, PresentError> {
        let start = Instant::now();
        let results = self.suggest(text);
        let search_duration = start.elapsed();

        let start = Instant::now();
        self.sink.present(text, &results).await?;
        let update_duration = start.elapsed();

        debug!(
            "Query {:?} matched {} words, search took {:?}, update took {:?}",
            text,
            results.len(),
            search_duration,
            update_duration
        );

        Ok(QueryReport {
            query: text.to_string(),
            results,
            search_duration_ms: millis(search_duration),
            update_duration_ms: millis(update_duration),
        })
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
