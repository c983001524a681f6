use lazy_static::lazy_static;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    // Lower-cased, without the final period.
    static ref ABBREVIATIONS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "mr","mrs","ms","dr","prof","sr","jr","st","mt","ft","rev","gen","col","capt","lt","sgt","gov","sen","rep","hon",
            "vs","e.g","i.e","cf","approx","vol","fig","ch","sec","pp",
            "jan","feb","mar","apr","jun","jul","aug","sep","sept","oct","nov","dec",
            "inc","ltd","co","corp","dept","univ","ave","blvd","rd",
            "a.m","p.m","u.s","u.k","d.c",
        ];
        words.iter().copied().collect()
    };
}

/// Split text into sentences: line breaks separate passages, and each passage
/// is cut on Unicode sentence boundaries. A boundary right after a known
/// abbreviation or an initial ("Mr.", "St.", "J.") is not a sentence end.
/// Sentences come back trimmed and in order of appearance.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for passage in text.lines() {
        let mut pending = String::new();
        for segment in passage.unicode_sentences() {
            pending.push_str(segment);
            if ends_with_abbreviation(pending.trim_end()) { continue; }
            push_trimmed(&mut sentences, &pending);
            pending.clear();
        }
        push_trimmed(&mut sentences, &pending);
    }
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() { sentences.push(s.to_string()); }
}

fn ends_with_abbreviation(segment: &str) -> bool {
    let Some(last) = segment.split_whitespace().last() else { return false };
    let Some(word) = last.strip_suffix('.') else { return false };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    let mut chars = word.chars();
    let initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
    initial || ABBREVIATIONS.contains(word.as_str())
}
