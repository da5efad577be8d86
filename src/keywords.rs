use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

const STOP_WORDS: [&str; 10] = ["the", "and", "a", "to", "of", "in", "it", "is", "that", "for"];

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("word pattern is valid");
}

/// Lowercases `text`, splits it into word tokens, drops stop words and
/// duplicates, and joins what is left with commas.
///
/// Tokens keep the order of their first occurrence, but the result is a set
/// and should be compared as one.
pub fn extract_keywords(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();

    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word))
        .filter(|word| seen.insert(*word))
        .collect::<Vec<_>>()
        .join(",")
}

/// Keywords supplied by a caller go through the same extractor, so a stored
/// keyword string is always lowercase and free of stop words and duplicates.
pub fn normalize_keywords(supplied: Option<&str>, content: &str) -> String {
    match supplied {
        Some(keywords) if !keywords.trim().is_empty() => extract_keywords(keywords),
        _ => extract_keywords(content),
    }
}
