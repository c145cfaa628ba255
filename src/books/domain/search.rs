use std::cmp::Ordering;
use std::collections::HashSet;

/// A parsed full-text query: documents match when they contain any of `terms`
/// and none of `excluded`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextQuery {
    pub terms: Vec<String>,
    pub excluded: Vec<String>,
}

impl TextQuery {
    pub fn parse(text: &str) -> Self {
        let mut terms = vec![];
        let mut excluded = vec![];
        for word in text.split_whitespace() {
            let (negated, word) = match word.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, word),
            };
            for token in tokenize(word) {
                let target = if negated { &mut excluded } else { &mut terms };
                if !target.contains(&token) {
                    target.push(token);
                }
            }
        }
        TextQuery { terms, excluded }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Relevance of a document given as weighted fields, `None` when it does not match.
    ///
    /// Every query term found in a field adds `weight * (0.5 + 0.5 * freq / tokens)`, so
    /// short fields dominated by the term rank above long fields that mention it once.
    pub fn score(&self, fields: &[(&str, f64)]) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let mut score = 0.0;
        let mut matched = false;
        for (text, weight) in fields {
            let tokens = tokenize(text);
            if tokens.is_empty() {
                continue;
            }
            let present: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            if self.excluded.iter().any(|t| present.contains(t.as_str())) {
                return None;
            }
            for term in &self.terms {
                let freq = tokens.iter().filter(|t| *t == term).count();
                if freq > 0 {
                    matched = true;
                    score += weight * (0.5 + 0.5 * freq as f64 / tokens.len() as f64);
                }
            }
        }
        if matched {
            Some(score)
        } else {
            None
        }
    }
}

// Orders hits by descending score, stable so equal scores keep the natural order.
pub(crate) fn rank<T>(hits: &mut [(T, f64)]) {
    hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
}

pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| stem(w.to_lowercase()))
        .collect()
}

// plural folding only: "dragons" and "dragon" index the same
fn stem(word: String) -> String {
    if word.chars().count() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::search::{rank, TextQuery, tokenize};

    #[tokio::test]
    async fn test_should_tokenize() {
        assert_eq!(vec!["the", "dragon", "reborn"], tokenize("The Dragon-Reborn"));
        assert_eq!(vec!["dragon", "glass"], tokenize("Dragons, glass!"));
        assert!(tokenize("  ").is_empty());
    }

    #[tokio::test]
    async fn test_should_parse_query() {
        let query = TextQuery::parse("dragon -fire Dragons");
        assert_eq!(vec!["dragon"], query.terms);
        assert_eq!(vec!["fire"], query.excluded);
        assert!(TextQuery::parse("").is_empty());
    }

    #[tokio::test]
    async fn test_should_score_matches() {
        let query = TextQuery::parse("dragon");
        let short = query.score(&[("Dragon", 1.0)]).expect("should match");
        let long = query.score(&[("The Dragon and the Knight", 1.0)]).expect("should match");
        assert!(short > long);
        assert_eq!(None, query.score(&[("Knight", 1.0)]));
        let both = query.score(&[("Dragon", 1.0), ("a dragon tale", 1.0)]).expect("should match");
        assert!(both > short);
    }

    #[tokio::test]
    async fn test_should_exclude_negated_terms() {
        let query = TextQuery::parse("dragon -fire");
        assert_eq!(None, query.score(&[("Fire Dragon", 1.0)]));
        assert!(query.score(&[("Ice Dragon", 1.0)]).is_some());
    }

    #[tokio::test]
    async fn test_should_rank_by_descending_score() {
        let mut hits = vec![("a", 0.6), ("b", 1.0), ("c", 0.6), ("d", 0.75)];
        rank(&mut hits);
        let names: Vec<&str> = hits.iter().map(|(n, _)| *n).collect();
        assert_eq!(vec!["b", "d", "a", "c"], names);
    }
}
