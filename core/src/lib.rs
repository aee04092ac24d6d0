//! Field-weighted full-text search over a small, fixed set of guide pages.
//!
//! Build an [`InvertedIndex`] once from the page corpus, then run [`search`]
//! against it (or hold both in a [`SearchEngine`]).

pub mod engine;
pub mod index;
pub mod persist;
pub mod query;
pub mod snippet;
pub mod tokenizer;

pub use engine::{EngineConfig, SearchEngine};
pub use index::InvertedIndex;
pub use query::{accepts_query, search, MatchMode, SearchOptions, DEFAULT_LIMIT, MIN_QUERY_LEN};
pub use snippet::{excerpt, highlight, highlighted_excerpt, DEFAULT_EXCERPT_LEN};

use serde::{Deserialize, Serialize};
use std::fmt;

pub type DocId = u32;

/// One page of the guide as supplied by the content pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    #[serde(default)]
    pub url: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    /// Space separated tag list.
    #[serde(default)]
    pub tags: String,
}

impl Document {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
            Field::Category => &self.category,
            Field::Tags => &self.tags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
    Category,
    Tags,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Title, Field::Content, Field::Category, Field::Tags];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Category => "category",
            Field::Tags => "tags",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Boost factor per field. Declared when the index is built, applied when it is queried.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub title: f32,
    pub content: f32,
    pub category: f32,
    pub tags: f32,
}

impl FieldWeights {
    pub fn get(&self, field: Field) -> f32 {
        match field {
            Field::Title => self.title,
            Field::Content => self.content,
            Field::Category => self.category,
            Field::Tags => self.tags,
        }
    }

    /// Fields that carry a positive weight and therefore get indexed.
    pub fn weighted_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| self.get(*f) > 0.0)
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self { title: 10.0, content: 1.0, category: 5.0, tags: 3.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub field: Field,
    pub count: u32, // raw occurrences of the term in this field
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
}
