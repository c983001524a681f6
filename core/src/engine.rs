use crate::rank::{rank_files, rank_sentences, ScoredFile, ScoredSentence};
use crate::sentences::split_sentences;
use crate::tokenizer::{query_terms, tokenize};
use crate::{compute_idfs, Corpus, IdfTable, QaError, Result, TermSequence};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// How many documents feed the sentence stage, and how many sentences answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankConfig {
    pub file_matches: usize,
    pub sentence_matches: usize,
}

impl Default for RankConfig {
    fn default() -> Self { Self { file_matches: 1, sentence_matches: 1 } }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub files: Vec<ScoredFile>,
    pub sentences: Vec<ScoredSentence>,
}

impl Answer {
    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }
}

/// Corpus plus its document-level idf table, built once and only read afterwards.
#[derive(Debug)]
pub struct QaEngine {
    corpus: Corpus,
    file_terms: BTreeMap<String, TermSequence>,
    idfs: IdfTable,
    config: RankConfig,
}

impl QaEngine {
    pub fn new(corpus: Corpus, config: RankConfig) -> Result<Self> {
        let file_terms: BTreeMap<String, TermSequence> =
            corpus.iter().map(|(id, text)| (id.to_string(), tokenize(text))).collect();
        let idfs = if file_terms.is_empty() {
            IdfTable::default()
        } else {
            compute_idfs(file_terms.values().map(Vec::as_slice))?
        };
        tracing::info!(num_docs = file_terms.len(), num_terms = idfs.len(), "corpus indexed");
        Ok(Self { corpus, file_terms, idfs, config })
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }
    pub fn idfs(&self) -> &IdfTable { &self.idfs }
    pub fn config(&self) -> RankConfig { self.config }

    pub fn answer(&self, question: &str) -> Result<Answer> {
        self.answer_with(question, self.config.file_matches, self.config.sentence_matches)
    }

    /// Answer with explicit document and sentence counts.
    pub fn answer_with(&self, question: &str, file_matches: usize, sentence_matches: usize) -> Result<Answer> {
        let query = query_terms(question);
        if query.is_empty() || self.file_terms.is_empty() {
            tracing::debug!(question, "nothing to rank");
            return Ok(Answer::default());
        }

        let files = rank_files(&query, &self.file_terms, &self.idfs, file_matches);
        let candidates = self.sentences_of(&files)?;
        if candidates.is_empty() {
            return Ok(Answer { files, sentences: Vec::new() });
        }
        let sentence_idfs = compute_idfs(candidates.iter().map(|(_, t)| t.as_slice()))?;
        let sentences = rank_sentences(&query, &candidates, &sentence_idfs, sentence_matches);
        tracing::debug!(
            query = ?query,
            files = ?files.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(),
            candidates = candidates.len(),
            "ranked"
        );
        Ok(Answer { files, sentences })
    }

    /// Sentences of the selected documents that keep at least one term,
    /// in document rank order and deduplicated by text.
    fn sentences_of(&self, files: &[ScoredFile]) -> Result<Vec<(String, TermSequence)>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        for file in files {
            let text = self.corpus.get(&file.id).ok_or_else(|| QaError::UnknownDocument(file.id.clone()))?;
            for sentence in split_sentences(text) {
                let terms = tokenize(&sentence);
                if terms.is_empty() || seen.contains(&sentence) { continue; }
                seen.insert(sentence.clone());
                out.push((sentence, terms));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(docs: &[(&str, &str)], config: RankConfig) -> QaEngine {
        QaEngine::new(Corpus::from_documents(docs.iter().copied()), config).unwrap()
    }

    #[test]
    fn answers_from_best_document() {
        let e = engine(
            &[
                ("python.txt", "Python is a language. Python uses indentation for blocks."),
                ("rust.txt", "Rust has a borrow checker. The borrow checker enforces ownership rules."),
            ],
            RankConfig::default(),
        );
        let a = e.answer("What rules does the borrow checker enforce?").unwrap();
        assert_eq!(a.files.len(), 1);
        assert_eq!(a.files[0].id, "rust.txt");
        assert_eq!(a.sentences.len(), 1);
        assert_eq!(a.sentences[0].text, "The borrow checker enforces ownership rules.");
    }

    #[test]
    fn empty_corpus_or_query_gives_empty_answer() {
        let empty = engine(&[], RankConfig::default());
        assert!(empty.idfs().is_empty());
        assert!(empty.answer("anything").unwrap().is_empty());

        let e = engine(&[("a.txt", "Cats sleep.")], RankConfig::default());
        let a = e.answer("the and of ?").unwrap();
        assert!(a.is_empty());
        assert!(a.files.is_empty());
    }

    #[test]
    fn duplicate_sentences_across_files_count_once() {
        let e = engine(
            &[("a.txt", "Shared line here. Alpha only."), ("b.txt", "Shared line here. Beta only.")],
            RankConfig { file_matches: 2, sentence_matches: 10 },
        );
        let a = e.answer("shared line alpha beta").unwrap();
        let texts: Vec<&str> = a.sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts.iter().filter(|t| **t == "Shared line here.").count(), 1);
    }

    #[test]
    fn abbreviations_stay_inside_the_answer() {
        let e = engine(
            &[("dc.txt", "Mr. Smith went to Washington. He stayed for a week.")],
            RankConfig { file_matches: 1, sentence_matches: 3 },
        );
        let texts: Vec<String> = e.answer("Who went to Washington?").unwrap().sentences.into_iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["Mr. Smith went to Washington.", "He stayed for a week."]);
    }

    #[test]
    fn answer_with_overrides_counts() {
        let e = engine(&[("a.txt", "One cat. Two cats. Three cats here.")], RankConfig::default());
        let texts: Vec<String> = e.answer_with("cats", 1, 3).unwrap().sentences.into_iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["Two cats.", "Three cats here.", "One cat."]);
        assert!(e.answer_with("cats", 0, 3).unwrap().sentences.is_empty());
    }
}
