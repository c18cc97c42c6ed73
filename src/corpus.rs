//! Word lists to build tries from.

use std::path::Path;

use tracing::debug;

use crate::{CorpusError, ALPHABET_SIZE};

/// Longest word length [`exhaustive`] will generate (26^5 words).
pub const MAX_EXHAUSTIVE_LENGTH: usize = 5;

/// Every word of `length` letters over A-Z, in lexicographic order.
pub fn exhaustive(length: usize) -> Result<Vec<String>, CorpusError> {
    if length == 0 || length > MAX_EXHAUSTIVE_LENGTH {
        return Err(CorpusError::UnsupportedLength { length });
    }

    let count = ALPHABET_SIZE.pow(length as u32);
    let mut words = Vec::with_capacity(count);
    let mut digits = vec![0u8; length];
    for _ in 0..count {
        words.push(digits.iter().map(|d| char::from(b'A' + d)).collect());
        for digit in digits.iter_mut().rev() {
            *digit += 1;
            if usize::from(*digit) < ALPHABET_SIZE {
                break;
            }
            *digit = 0;
        }
    }
    Ok(words)
}

/// One word per line. Surrounding whitespace is trimmed and blank lines are
/// skipped; the words themselves are validated when the trie is built.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub async fn load(path: &Path) -> Result<Vec<String>, CorpusError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let words = parse_lines(&text);
    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustive_sizes_and_order() {
        let words = exhaustive(2).unwrap();
        assert_eq!(words.len(), 676);
        assert_eq!(words[0], "AA");
        assert_eq!(words[1], "AB");
        assert_eq!(words[26], "BA");
        assert_eq!(words[675], "ZZ");
        assert!(words.windows(2).all(|pair| pair[0] < pair[1]));

        assert_eq!(exhaustive(4).unwrap().len(), 456_976);
    }

    #[test]
    fn test_exhaustive_rejects_lengths() {
        assert!(matches!(
            exhaustive(0),
            Err(CorpusError::UnsupportedLength { length: 0 })
        ));
        assert!(matches!(
            exhaustive(6),
            Err(CorpusError::UnsupportedLength { length: 6 })
        ));
    }

    #[test]
    fn test_parse_lines() {
        let words = parse_lines("CAT\n  DOG \r\n\n\nbird\n");
        assert_eq!(words, vec!["CAT", "DOG", "bird"]);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let path = Path::new("/nonexistent/wordtrie/corpus.txt");
        match load(path).await {
            Err(CorpusError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_file() {
        let path = std::env::temp_dir().join(format!("wordtrie-corpus-{}.txt", std::process::id()));
        tokio::fs::write(&path, "CATALOG\nCAT\n\nCAR\n").await.unwrap();
        let words = load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(words, vec!["CATALOG", "CAT", "CAR"]);
    }
}
