use crate::index::InvertedIndex;
use crate::tokenizer::tokenize;
use crate::{DocId, Field, SearchHit};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// Shortest trimmed query (in characters) worth sending to the engine.
pub const MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_LIMIT: usize = 8;

/// Fixed per-field scores used by [`MatchMode::Substring`].
const SUBSTRING_SCORES: [(Field, f32); 3] = [(Field::Title, 10.0), (Field::Category, 5.0), (Field::Content, 1.0)];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Whole-token lookup in the inverted index, scored as count x field weight.
    #[default]
    #[serde(alias = "exact_token", alias = "token")]
    Exact,
    /// Case-insensitive containment of the whole query in title, category and content.
    #[serde(alias = "contains")]
    Substring,
}

impl FromStr for MatchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "exact_token" | "token" => Ok(MatchMode::Exact),
            "substring" | "contains" => Ok(MatchMode::Substring),
            other => anyhow::bail!("unknown match mode {other:?} (expected exact or substring)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub mode: MatchMode,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self { Self { mode: MatchMode::Exact, limit: DEFAULT_LIMIT } }
}

/// Caller-side guard: true when the trimmed query is long enough to search for.
pub fn accepts_query(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LEN
}

/// Rank documents for `query`. Never fails; no match yields an empty vec.
///
/// Results are ordered by score descending, then by ascending doc id, and
/// truncated to `opts.limit`.
pub fn search(index: &InvertedIndex, query: &str, opts: &SearchOptions) -> Vec<SearchHit> {
    let scores = match opts.mode {
        MatchMode::Exact => score_tokens(index, query),
        MatchMode::Substring => score_substring(index, query),
    };

    let mut hits: Vec<SearchHit> = scores
        .into_iter()
        .filter(|(_, score)| *score > 0.0)
        .map(|(doc_id, score)| SearchHit { doc_id, score })
        .collect();
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    let total_hits = hits.len();
    hits.truncate(opts.limit);
    tracing::debug!(query, mode = ?opts.mode, total_hits, returned = hits.len(), "search");
    hits
}

fn score_tokens(index: &InvertedIndex, query: &str) -> HashMap<DocId, f32> {
    let weights = index.weights();
    let mut seen: HashSet<String> = HashSet::new();
    let mut scores: HashMap<DocId, f32> = HashMap::new();
    for (term, _pos) in tokenize(query) {
        // repeated query words count once
        if !seen.insert(term.clone()) { continue; }
        for p in index.postings(&term) {
            *scores.entry(p.doc_id).or_insert(0.0) += p.count as f32 * weights.get(p.field);
        }
    }
    scores
}

fn score_substring(index: &InvertedIndex, query: &str) -> HashMap<DocId, f32> {
    let needle = query.trim().to_lowercase();
    let mut scores: HashMap<DocId, f32> = HashMap::new();
    if needle.is_empty() {
        return scores;
    }
    for doc in index.documents() {
        let score: f32 = SUBSTRING_SCORES
            .iter()
            .filter(|(field, _)| doc.field(*field).to_lowercase().contains(&needle))
            .map(|(_, s)| *s)
            .sum();
        *scores.entry(doc.id).or_insert(0.0) += score;
    }
    scores
}
