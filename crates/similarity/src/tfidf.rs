use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;

use crate::{SparseVector, stopwords};

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// TF-IDF vectorizer over lowercase word tokens with English stop words
/// removed.
///
/// ```text
/// tfidf(t, d) = count(t, d) * idf(t)
/// idf(t)      = ln((1 + n) / (1 + df(t))) + 1
/// ```
///
/// Rows are L2-normalized. When the corpus has more distinct terms than
/// `max_features`, only the most frequent terms (by total count, ties broken
/// alphabetically) are kept. Column indices follow alphabetical term order.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn tokenize(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        RE_TOKEN
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| !stopwords::is_english_stop_word(token))
            .map(str::to_string)
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<SparseVector> {
        let tokenized = documents
            .iter()
            .map(|doc| Self::tokenize(doc.as_ref()))
            .collect::<Vec<_>>();

        self.fit_tokens(&tokenized);

        tokenized
            .iter()
            .map(|tokens| self.transform_tokens(tokens))
            .collect()
    }

    pub fn transform(&self, document: &str) -> SparseVector {
        self.transform_tokens(&Self::tokenize(document))
    }

    fn fit_tokens(&mut self, documents: &[Vec<String>]) {
        let mut term_count: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for tokens in documents {
            let mut seen = HashSet::new();
            for token in tokens {
                *term_count.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut terms = term_count.into_iter().collect::<Vec<_>>();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(self.max_features);

        let mut kept = terms.into_iter().map(|(term, _)| term).collect::<Vec<_>>();
        kept.sort_unstable();

        let n_docs = documents.len() as f64;
        self.idf = kept
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();
    }

    fn transform_tokens(&self, tokens: &[String]) -> SparseVector {
        let entries = tokens
            .iter()
            .filter_map(|token| self.vocabulary.get(token))
            .map(|&col| (col, self.idf[col]))
            .collect();

        SparseVector::from_entries(entries).normalized()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
