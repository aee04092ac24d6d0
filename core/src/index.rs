use crate::tokenizer::tokenize;
use crate::{DocId, Document, Field, FieldWeights, Posting};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Immutable snapshot of the corpus: raw per-field term counts plus the documents themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>, // sorted by (doc_id, field)
    docs: Vec<Document>,                     // input order
    positions: HashMap<DocId, usize>,        // first position of each id in `docs`
    weights: FieldWeights,
}

impl InvertedIndex {
    /// Build a fresh index. Fields with zero weight are not indexed.
    pub fn build<I>(documents: I, weights: &FieldWeights) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let mut counts: HashMap<String, BTreeMap<(DocId, Field), u32>> = HashMap::new();
        let mut docs: Vec<Document> = Vec::new();
        let mut positions: HashMap<DocId, usize> = HashMap::new();

        for doc in documents {
            if positions.contains_key(&doc.id) {
                tracing::warn!(doc_id = doc.id, "duplicate document id; postings will be merged");
            } else {
                positions.insert(doc.id, docs.len());
            }
            for field in weights.weighted_fields() {
                for (term, _pos) in tokenize(doc.field(field)) {
                    *counts.entry(term).or_default().entry((doc.id, field)).or_insert(0) += 1;
                }
            }
            docs.push(doc);
        }

        let postings: HashMap<String, Vec<Posting>> = counts
            .into_iter()
            .map(|(term, per_doc)| {
                let list = per_doc
                    .into_iter()
                    .map(|((doc_id, field), count)| Posting { doc_id, field, count })
                    .collect();
                (term, list)
            })
            .collect();

        tracing::debug!(num_docs = docs.len(), num_terms = postings.len(), "built inverted index");
        Self { postings, docs, positions, weights: *weights }
    }

    pub fn document_count(&self) -> usize { self.docs.len() }

    pub fn term_count(&self) -> usize { self.postings.len() }

    pub fn documents(&self) -> &[Document] { &self.docs }

    /// First document carrying `id`.
    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.positions.get(&id).and_then(|&i| self.docs.get(i))
    }

    /// Postings for an already tokenized term; empty when the term is unknown.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn weights(&self) -> &FieldWeights { &self.weights }
}
