//! Keyword vocabularies used by the classifier.

use serde::{Deserialize, Serialize};

/// The four keyword lists the classifier counts against.
///
/// Matching is case-insensitive on the concatenated interaction text. A
/// keyword must start at a word boundary and counts at most once per
/// interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeywordSets {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub helping: Vec<String>,
    pub conflict: Vec<String>,
}

const POSITIVE: &[&str] = &[
    "thank",
    "appreciate",
    "great",
    "love",
    "happy",
    "glad",
    "wonderful",
    "excellent",
    "amazing",
    "awesome",
    "fantastic",
    "welcome",
    "support",
    "kind",
    "enjoy",
    "agree",
];

const NEGATIVE: &[&str] = &[
    "hate",
    "angry",
    "annoyed",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "stupid",
    "useless",
    "disappointed",
    "upset",
    "frustrat",
    "sad",
    "sorry",
    "wrong",
];

const HELPING: &[&str] = &[
    "help",
    "support",
    "assist",
    "guide",
    "teach",
    "explain",
    "advice",
    "mentor",
];

const CONFLICT: &[&str] = &[
    "disagree",
    "argue",
    "fight",
    "refuse",
    "blame",
    "attack",
    "betray",
    "liar",
    "shut up",
    "no way",
];

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            positive: to_owned(POSITIVE),
            negative: to_owned(NEGATIVE),
            helping: to_owned(HELPING),
            conflict: to_owned(CONFLICT),
        }
    }
}

impl KeywordSets {
    /// Lower-case and trim every keyword, dropping blanks and duplicates.
    pub fn normalized(&self) -> Self {
        Self {
            positive: normalize(&self.positive),
            negative: normalize(&self.negative),
            helping: normalize(&self.helping),
            conflict: normalize(&self.conflict),
        }
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn normalize(words: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lowercase_and_non_empty() {
        let sets = KeywordSets::default();
        for list in [&sets.positive, &sets.negative, &sets.helping, &sets.conflict] {
            assert!(!list.is_empty());
            assert!(list.iter().all(|w| *w == w.to_lowercase()));
        }
    }

    #[test]
    fn test_normalized_drops_blanks_and_duplicates() {
        let sets = KeywordSets {
            positive: vec!["  Merci ".into(), "merci".into(), "".into()],
            negative: vec!["NUL".into()],
            helping: vec!["aider".into()],
            conflict: vec!["dispute".into()],
        };
        let normalized = sets.normalized();
        assert_eq!(normalized.positive, vec!["merci"]);
        assert_eq!(normalized.negative, vec!["nul"]);
    }
}
