use crate::{IdfTable, Query, Term, TermSequence};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFile {
    pub id: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub text: String,
    /// Sum of sentence-level idf over the distinct query terms present.
    pub idf_score: f64,
    /// Share of the sentence's tokens that are matched query terms.
    pub density: f64,
}

/// Score every document by summed tf-idf over the query terms and keep the best `n`.
///
/// Query terms unknown to `idfs` add nothing. Ties keep identifier order.
pub fn rank_files(query: &Query, files: &BTreeMap<String, TermSequence>, idfs: &IdfTable, n: usize) -> Vec<ScoredFile> {
    let mut scored: Vec<ScoredFile> = files
        .iter()
        .map(|(id, terms)| {
            let score = query
                .iter()
                .filter_map(|word| {
                    let tf = terms.iter().filter(|t| *t == word).count();
                    if tf == 0 { return None; }
                    Some(idfs.weight(word).unwrap_or(0.0) * tf as f64)
                })
                .sum::<f64>();
            ScoredFile { id: id.clone(), score }
        })
        .collect();
    // stable sort: BTreeMap order breaks ties by identifier ascending
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(n);
    scored
}

pub fn top_files(query: &Query, files: &BTreeMap<String, TermSequence>, idfs: &IdfTable, n: usize) -> Vec<String> {
    rank_files(query, files, idfs, n).into_iter().map(|f| f.id).collect()
}

/// Rank sentences by matched idf, then by query term density, then by input order.
///
/// Sentences without tokens are skipped.
pub fn rank_sentences(query: &Query, sentences: &[(String, TermSequence)], idfs: &IdfTable, n: usize) -> Vec<ScoredSentence> {
    let mut scored: Vec<ScoredSentence> = sentences
        .iter()
        .filter(|(_, terms)| !terms.is_empty())
        .map(|(text, terms)| {
            let matched: HashSet<&Term> = terms.iter().filter(|t| query.contains(*t)).collect();
            let idf_score = matched.iter().map(|t| idfs.weight(t).unwrap_or(0.0)).sum::<f64>();
            let hits = terms.iter().filter(|t| matched.contains(t)).count();
            ScoredSentence { text: text.clone(), idf_score, density: hits as f64 / terms.len() as f64 }
        })
        .collect();
    scored.sort_by(|a, b| {
        b.idf_score
            .partial_cmp(&a.idf_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.density.partial_cmp(&a.density).unwrap_or(Ordering::Equal))
    });
    scored.truncate(n);
    scored
}

pub fn top_sentences(query: &Query, sentences: &[(String, TermSequence)], idfs: &IdfTable, n: usize) -> Vec<String> {
    rank_sentences(query, sentences, idfs, n).into_iter().map(|s| s.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_idfs;
    use crate::tokenizer::{query_terms, tokenize};

    fn files(docs: &[(&str, &str)]) -> BTreeMap<String, TermSequence> {
        docs.iter().map(|(id, text)| (id.to_string(), tokenize(text))).collect()
    }

    fn sentences(texts: &[&str]) -> Vec<(String, TermSequence)> {
        texts.iter().map(|t| (t.to_string(), tokenize(t))).collect()
    }

    #[test]
    fn tf_idf_orders_files() {
        let docs = files(&[
            ("a.txt", "Rust rust rust programming."),
            ("b.txt", "Rust programming and python programming."),
            ("c.txt", "Gardening tips for spring."),
        ]);
        let idfs = compute_idfs(docs.values().map(Vec::as_slice)).unwrap();
        let ranked = rank_files(&query_terms("rust"), &docs, &idfs, 3);
        assert_eq!(ranked.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), vec!["a.txt", "b.txt", "c.txt"]);
        assert!((ranked[0].score - 3.0 * 1.5f64.ln()).abs() < 1e-12);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn unknown_query_terms_score_zero() {
        let docs = files(&[("b.txt", "beta"), ("a.txt", "alpha")]);
        let idfs = compute_idfs(docs.values().map(Vec::as_slice)).unwrap();
        let ranked = rank_files(&query_terms("zeta"), &docs, &idfs, 5);
        assert_eq!(ranked, vec![
            ScoredFile { id: "a.txt".into(), score: 0.0 },
            ScoredFile { id: "b.txt".into(), score: 0.0 },
        ]);
    }

    #[test]
    fn truncates_to_n() {
        let docs = files(&[("a", "one"), ("b", "two"), ("c", "three")]);
        let idfs = compute_idfs(docs.values().map(Vec::as_slice)).unwrap();
        assert_eq!(top_files(&query_terms("two"), &docs, &idfs, 1), vec!["b"]);
        assert!(top_files(&Query::new(), &docs, &idfs, 0).is_empty());
        assert_eq!(top_files(&Query::new(), &docs, &idfs, 10), vec!["a", "b", "c"]);
    }

    #[test]
    fn density_breaks_idf_ties() {
        let sents = sentences(&["The cat sat.", "The cat ran fast."]);
        let idfs = compute_idfs(sents.iter().map(|(_, t)| t.as_slice())).unwrap();
        let ranked = rank_sentences(&query_terms("cat"), &sents, &idfs, 2);
        assert_eq!(ranked[0].text, "The cat sat.");
        assert_eq!(ranked[0].idf_score, 0.0);
        assert!((ranked[0].density - 0.5).abs() < 1e-12);
        assert!((ranked[1].density - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn idf_outranks_density() {
        let sents = sentences(&["Cats nap.", "Dogs bark loudly at cats near trains."]);
        let idfs = compute_idfs(sents.iter().map(|(_, t)| t.as_slice())).unwrap();
        let top = top_sentences(&query_terms("dogs cats"), &sents, &idfs, 1);
        assert_eq!(top, vec!["Dogs bark loudly at cats near trains."]);
    }

    #[test]
    fn density_counts_repeats() {
        let sents = sentences(&["rust rust code"]);
        let idfs = compute_idfs(sents.iter().map(|(_, t)| t.as_slice())).unwrap();
        let ranked = rank_sentences(&query_terms("rust"), &sents, &idfs, 1);
        assert!((ranked[0].density - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn unmatched_sentences_keep_input_order() {
        let sents = sentences(&["Second place.", "First place?", "The."]);
        let idfs = compute_idfs(sents.iter().map(|(_, t)| t.as_slice())).unwrap();
        let ranked = rank_sentences(&query_terms("nothing"), &sents, &idfs, 5);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].text, "Second place.");
        assert!(ranked.iter().all(|s| s.idf_score == 0.0 && s.density == 0.0));
    }
}
