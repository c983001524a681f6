use crate::{Query, Term};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    // Treebank-style clitics: "don't" -> "do" + "n't", "it's" -> "it" + "'s".
    static ref CLITIC: Regex = Regex::new(r"^(.+?)(n't|'s|'re|'ve|'ll|'d|'m)$").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","ain","all","am","an","and","any","are","aren","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","couldn","couldn't",
            "d","did","didn","didn't","do","does","doesn","doesn't","doing","don","don't","down","during",
            "each","few","for","from","further",
            "had","hadn","hadn't","has","hasn","hasn't","have","haven","haven't","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","isn","isn't","it","it's","its","itself",
            "just","ll","m","ma","me","mightn","mightn't","more","most","mustn","mustn't","my","myself",
            "needn","needn't","no","nor","not","now",
            "o","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "re","s","same","shan","shan't","she","she's","should","should've","shouldn","shouldn't","so","some","such",
            "t","than","that","that'll","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","wasn","wasn't","we","were","weren","weren't","what","when","where","which","while","who","whom","why","will","with","won","won't","wouldn","wouldn't",
            "y","you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
            "n't","'s","'re","'ve","'ll","'d","'m",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// True when the token carries no letter or digit at all.
pub fn is_punctuation(token: &str) -> bool { !token.chars().any(char::is_alphanumeric) }

/// Tokenize text into terms using NFKC normalization, lowercase, Unicode word
/// boundaries, clitic splitting and stopword removal. Hyphenated compounds stay
/// one term. Duplicates are kept.
pub fn tokenize(text: &str) -> Vec<Term> {
    let normalized = text.nfkc().collect::<String>().to_lowercase().replace('\u{2019}', "'");
    let mut terms = Vec::new();
    for word in words(&normalized) {
        for token in split_clitic(word) {
            if is_punctuation(token) || is_stopword(token) { continue; }
            terms.push(token.to_string());
        }
    }
    terms
}

/// Tokenize a query and collapse it into a set.
pub fn query_terms(text: &str) -> Query {
    tokenize(text).into_iter().collect()
}

/// Unicode words, with `word-word` runs joined back into a single slice.
fn words(text: &str) -> Vec<&str> {
    let is_word = |s: &str| s.chars().any(char::is_alphanumeric);
    let pieces: Vec<(usize, &str)> = text.split_word_bound_indices().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < pieces.len() {
        let (start, piece) = pieces[i];
        i += 1;
        if !is_word(piece) { continue; }
        let mut end = start + piece.len();
        while i + 1 < pieces.len() && pieces[i].1 == "-" && is_word(pieces[i + 1].1) {
            end = pieces[i + 1].0 + pieces[i + 1].1.len();
            i += 2;
        }
        out.push(&text[start..end]);
    }
    out
}

fn split_clitic(word: &str) -> Vec<&str> {
    if word == "cannot" { return vec!["can", "not"]; }
    let Some(caps) = CLITIC.captures(word) else { return vec![word] };
    let (stem, clitic) = (caps.get(1).map_or("", |m| m.as_str()), caps.get(2).map_or("", |m| m.as_str()));
    let stem = match (stem, clitic) {
        ("ca", "n't") => "can",
        ("wo", "n't") => "will",
        ("sha", "n't") => "shall",
        _ => stem,
    };
    vec![stem, clitic]
}
