use crate::index::InvertedIndex;
use crate::query::{search, MatchMode, SearchOptions, DEFAULT_LIMIT, MIN_QUERY_LEN};
use crate::{DocId, Document, FieldWeights, SearchHit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub weights: FieldWeights,
    pub mode: MatchMode,
    pub limit: usize,
    pub min_query_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { weights: FieldWeights::default(), mode: MatchMode::Exact, limit: DEFAULT_LIMIT, min_query_len: MIN_QUERY_LEN }
    }
}

/// An index plus the policy the host queries it with. Construct once at
/// startup and share by reference.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: InvertedIndex,
    config: EngineConfig,
}

impl SearchEngine {
    pub fn new<I>(documents: I, config: EngineConfig) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let index = InvertedIndex::build(documents, &config.weights);
        tracing::info!(num_docs = index.document_count(), num_terms = index.term_count(), mode = ?config.mode, "search engine ready");
        Self { index, config }
    }

    /// Wrap an index loaded from a snapshot. The snapshot's own weights win.
    pub fn from_index(index: InvertedIndex, config: EngineConfig) -> Self {
        let config = EngineConfig { weights: *index.weights(), ..config };
        Self { index, config }
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.search_with(query, &SearchOptions { mode: self.config.mode, limit: self.config.limit })
    }

    /// Search with an explicit mode and limit. Queries shorter than the
    /// configured minimum return nothing.
    pub fn search_with(&self, query: &str, opts: &SearchOptions) -> Vec<SearchHit> {
        if !self.accepts(query) {
            return Vec::new();
        }
        search(&self.index, query.trim(), opts)
    }

    pub fn accepts(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.config.min_query_len
    }

    pub fn document(&self, id: DocId) -> Option<&Document> { self.index.document(id) }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn config(&self) -> &EngineConfig { &self.config }
}
