use std::{fmt, str::FromStr};

use crate::TrieError;

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// An uppercase ASCII letter, stored as its index into the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_uppercase().then(|| Symbol(c as u8 - b'A'))
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < ALPHABET_SIZE).then(|| Symbol(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn to_char(self) -> char {
        char::from(b'A' + self.0)
    }

    /// Every symbol, in alphabet order.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..ALPHABET_SIZE as u8).map(Symbol)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A validated sequence of symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(Vec<Symbol>);

impl Word {
    /// Validates every character of `text` before anything is stored.
    pub fn parse(text: &str) -> Result<Self, TrieError> {
        text.chars()
            .enumerate()
            .map(|(position, symbol)| {
                Symbol::from_char(symbol).ok_or(TrieError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Word)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Word {
    type Err = TrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Word::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|symbol| write!(f, "{}", symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_bounds() {
        assert_eq!(Symbol::from_char('A').map(Symbol::index), Some(0));
        assert_eq!(Symbol::from_char('Z').map(Symbol::index), Some(25));
        assert_eq!(Symbol::from_char('a'), None);
        assert_eq!(Symbol::from_char('4'), None);
        assert_eq!(Symbol::from_char('Ä'), None);
        assert_eq!(Symbol::from_index(26), None);
        assert_eq!(Symbol::all().map(Symbol::to_char).collect::<String>().len(), 26);
    }

    #[test]
    fn test_parse_word() {
        let word: Word = "CAT".parse().unwrap();
        assert_eq!(word.len(), 3);
        assert_eq!(word.to_string(), "CAT");
        assert!(Word::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_reports_first_invalid_symbol() {
        assert_eq!(
            Word::parse("C4T"),
            Err(TrieError::InvalidSymbol {
                symbol: '4',
                position: 1
            })
        );
        assert_eq!(
            Word::parse("cat"),
            Err(TrieError::InvalidSymbol {
                symbol: 'c',
                position: 0
            })
        );
    }
}
