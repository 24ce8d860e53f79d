use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rust_embed::Embed;

use crate::error::WordListError;
use crate::generator::scramble::has_distinct_scramble;

#[derive(Embed)]
#[folder = "assets/"]
struct WordAssets;

const BUNDLED_WORDS: &str = "words.json";

/// Source list that trainings draw their words from.
#[derive(Clone, Debug)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// The word list compiled into the binary.
    pub fn load() -> Result<Self> {
        let file = WordAssets::get(BUNDLED_WORDS)
            .ok_or_else(|| anyhow!("bundled word list {BUNDLED_WORDS} is missing"))?;
        Self::parse(&file.data).context("bundled word list is invalid")
    }

    /// A JSON array of words from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read(path).with_context(|| format!("reading word list {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("word list {}", path.display()))
    }

    fn parse(bytes: &[u8]) -> Result<Self> {
        let words: Vec<String> = serde_json::from_slice(bytes)?;
        Ok(Self::from_words(words)?)
    }

    pub fn from_words(words: Vec<String>) -> Result<Self, WordListError> {
        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        for word in &words {
            validate_word(word)?;
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A playable word is lowercase ascii, at least two letters, and can be
/// shuffled into something other than itself.
pub fn validate_word(word: &str) -> Result<(), WordListError> {
    if !word.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(WordListError::NotLowercase {
            word: word.to_string(),
        });
    }
    if word.len() < 2 {
        return Err(WordListError::TooShort {
            word: word.to_string(),
        });
    }
    if !has_distinct_scramble(word) {
        return Err(WordListError::NoDistinctScramble {
            word: word.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn bundled_list_loads() {
        let dictionary = Dictionary::load().unwrap();
        assert_eq!(dictionary.len(), 11);
        assert!(dictionary.words().iter().any(|w| w == "software"));
        assert!(dictionary.words().iter().all(|w| w.len() >= 2));
    }

    #[test]
    fn rejects_single_letters_and_repeats() {
        assert_eq!(
            Dictionary::from_words(vec!["ok".into(), "a".into()]).unwrap_err(),
            WordListError::TooShort { word: "a".into() }
        );
        assert_eq!(
            Dictionary::from_words(vec!["zz".into()]).unwrap_err(),
            WordListError::NoDistinctScramble { word: "zz".into() }
        );
    }

    #[test]
    fn rejects_non_lowercase_words() {
        assert!(matches!(
            Dictionary::from_words(vec!["Hello".into()]),
            Err(WordListError::NotLowercase { .. })
        ));
        assert!(matches!(
            Dictionary::from_words(vec!["two words".into()]),
            Err(WordListError::NotLowercase { .. })
        ));
    }

    #[test]
    fn rejects_empty_list() {
        assert_eq!(
            Dictionary::from_words(Vec::new()).unwrap_err(),
            WordListError::Empty
        );
    }

    #[test]
    fn loads_list_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["river", "stone", "cloud"]"#).unwrap();
        let dictionary = Dictionary::from_file(file.path()).unwrap();
        assert_eq!(dictionary.words(), ["river", "stone", "cloud"]);
    }

    #[test]
    fn file_with_bad_word_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["river", "x"]"#).unwrap();
        let err = Dictionary::from_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("shorter than 2"));
    }
}
