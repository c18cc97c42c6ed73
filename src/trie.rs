use std::{iter::FusedIterator, slice};

use crate::{Symbol, TrieError, Word};

/// A node in the trie. The path of symbols from the root spells the prefix it
/// represents.
#[derive(Debug, Default)]
pub struct TrieNode {
    // Sorted by symbol, at most one entry per symbol.
    pub(crate) children: Vec<(Symbol, TrieNode)>,
    // Whether the prefix of this node is a stored word.
    pub(crate) is_word_end: bool,
}

impl TrieNode {
    fn child(&self, symbol: Symbol) -> Option<&TrieNode> {
        self.children
            .binary_search_by_key(&symbol, |(s, _)| *s)
            .ok()
            .map(|at| &self.children[at].1)
    }

    /// Returns the child for `symbol`, creating it on first use.
    pub(crate) fn child_or_insert(&mut self, symbol: Symbol) -> &mut TrieNode {
        let at = match self.children.binary_search_by_key(&symbol, |(s, _)| *s) {
            Ok(at) => at,
            Err(at) => {
                self.children.insert(at, (symbol, TrieNode::default()));
                at
            }
        };
        &mut self.children[at].1
    }

    /// Inserts the path below this node, returning `true` if it was not
    /// already a word.
    pub(crate) fn insert(&mut self, symbols: &[Symbol]) -> bool {
        let node = symbols
            .iter()
            .fold(self, |node, symbol| node.child_or_insert(*symbol));
        !std::mem::replace(&mut node.is_word_end, true)
    }

    fn descend(&self, symbols: &[Symbol]) -> Option<&TrieNode> {
        symbols
            .iter()
            .try_fold(self, |node, symbol| node.child(*symbol))
    }

    pub fn is_word_end(&self) -> bool {
        self.is_word_end
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Prefix tree over the A-Z alphabet.
#[derive(Debug, Default)]
pub struct Trie {
    pub(crate) root: TrieNode,
    pub(crate) len: usize,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    /// Inserts `word`, returning whether it was new. Inserting a word twice is
    /// a no-op.
    pub fn insert(&mut self, word: &str) -> Result<bool, TrieError> {
        let word = Word::parse(word)?;
        Ok(self.insert_word(&word))
    }

    pub fn insert_word(&mut self, word: &Word) -> bool {
        let added = self.root.insert(word.symbols());
        if added {
            self.len += 1;
        }
        added
    }

    /// Exact membership. A path that exists but does not end a word is not a
    /// match.
    pub fn search(&self, word: &str) -> Result<bool, TrieError> {
        Ok(self.contains(&Word::parse(word)?))
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.root
            .descend(word.symbols())
            .is_some_and(TrieNode::is_word_end)
    }

    /// All stored words starting with `prefix`, in lexicographic order.
    pub fn suggestions_for(&self, prefix: &str) -> Result<Vec<String>, TrieError> {
        let prefix = Word::parse(prefix)?;
        Ok(self.iter_prefix(&prefix).collect())
    }

    /// Lazily enumerates the stored words starting with `prefix`.
    pub fn iter_prefix(&self, prefix: &Word) -> Suggestions<'_> {
        match self.root.descend(prefix.symbols()) {
            Some(node) => Suggestions::from_node(node, prefix.to_string()),
            None => Suggestions::empty(),
        }
    }

    /// Every stored word, in lexicographic order.
    pub fn words(&self) -> Suggestions<'_> {
        Suggestions::from_node(&self.root, String::new())
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Depth-first, lexicographically ordered walk below a node.
///
/// The walk is iterative, so its depth is bounded only by memory. Each call to
/// `next` resumes where the previous one stopped.
#[derive(Debug)]
pub struct Suggestions<'a> {
    // One child iterator per level entered. Every frame but the first pushed a
    // symbol onto `path`.
    stack: Vec<slice::Iter<'a, (Symbol, TrieNode)>>,
    path: String,
    pending_start: bool,
}

impl<'a> Suggestions<'a> {
    fn from_node(node: &'a TrieNode, prefix: String) -> Self {
        Suggestions {
            stack: vec![node.children.iter()],
            path: prefix,
            pending_start: node.is_word_end,
        }
    }

    fn empty() -> Self {
        Suggestions {
            stack: Vec::new(),
            path: String::new(),
            pending_start: false,
        }
    }
}

impl Iterator for Suggestions<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if std::mem::take(&mut self.pending_start) {
            return Some(self.path.clone());
        }

        loop {
            let frame = self.stack.last_mut()?;
            match frame.next() {
                Some((symbol, child)) => {
                    self.path.push(symbol.to_char());
                    self.stack.push(child.children.iter());
                    if child.is_word_end {
                        return Some(self.path.clone());
                    }
                }
                None => {
                    self.stack.pop();
                    if !self.stack.is_empty() {
                        self.path.pop();
                    }
                }
            }
        }
    }
}

impl FusedIterator for Suggestions<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_of(words: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(word).unwrap();
        }
        trie
    }

    #[test]
    fn test_suggestions_share_word_node() {
        let trie = trie_of(&["CAT", "CATALOG", "CAR"]);
        assert_eq!(
            trie.suggestions_for("CA").unwrap(),
            vec!["CAR", "CAT", "CATALOG"]
        );
        assert_eq!(trie.suggestions_for("CAT").unwrap(), vec!["CAT", "CATALOG"]);
    }

    #[test]
    fn test_search_requires_word_end() {
        let trie = trie_of(&["DOG"]);
        assert_eq!(trie.search("DO"), Ok(false));
        assert_eq!(trie.search("DOG"), Ok(true));
        assert_eq!(trie.search("DOGS"), Ok(false));
        assert_eq!(trie.search("CAT"), Ok(false));
    }

    #[test]
    fn test_terminal_prefix_returns_itself() {
        let trie = trie_of(&["DOG", "DOT"]);
        assert_eq!(trie.suggestions_for("DOG").unwrap(), vec!["DOG"]);
    }

    #[test]
    fn test_unmatched_prefix_is_empty() {
        let trie = trie_of(&["AAAA", "ZZZZ"]);
        assert!(trie.suggestions_for("ZZZZZ").unwrap().is_empty());
        assert!(trie.suggestions_for("M").unwrap().is_empty());
    }

    #[test]
    fn test_empty_prefix_lists_everything_sorted() {
        let trie = trie_of(&["ZEBRA", "APPLE", "MANGO", "APP"]);
        assert_eq!(
            trie.suggestions_for("").unwrap(),
            vec!["APP", "APPLE", "MANGO", "ZEBRA"]
        );
        assert_eq!(trie.words().count(), 4);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut trie = trie_of(&["CAT"]);
        assert_eq!(trie.insert("CAT"), Ok(false));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.suggestions_for("C").unwrap(), vec!["CAT"]);
    }

    #[test]
    fn test_invalid_symbol_leaves_trie_unchanged() {
        let mut trie = trie_of(&["CAT"]);
        assert_eq!(
            trie.insert("C4T"),
            Err(TrieError::InvalidSymbol {
                symbol: '4',
                position: 1
            })
        );
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.words().collect::<Vec<_>>(), vec!["CAT"]);
        assert!(trie.search("C4T").is_err());
        assert!(trie.suggestions_for("c").is_err());
    }

    #[test]
    fn test_empty_word() {
        let mut trie = Trie::new();
        assert!(trie.words().next().is_none());
        assert!(trie.is_empty());

        trie.insert("").unwrap();
        trie.insert("A").unwrap();
        assert_eq!(trie.search(""), Ok(true));
        assert_eq!(trie.suggestions_for("").unwrap(), vec!["", "A"]);
    }

    #[test]
    fn test_iterator_is_lazy_and_fused() {
        let trie = trie_of(&["AB", "ABC", "ABD", "B"]);
        let prefix = Word::parse("AB").unwrap();
        let mut iter = trie.iter_prefix(&prefix);
        assert_eq!(iter.next().as_deref(), Some("AB"));
        assert_eq!(iter.next().as_deref(), Some("ABC"));
        assert_eq!(iter.next().as_deref(), Some("ABD"));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_node_shape() {
        let trie = trie_of(&["CAT", "CATALOG"]);
        let cat = trie.root.descend(Word::parse("CAT").unwrap().symbols()).unwrap();
        assert!(cat.is_word_end());
        assert!(!cat.is_leaf());
        let catalog = cat.descend(Word::parse("ALOG").unwrap().symbols()).unwrap();
        assert!(catalog.is_leaf());
    }
}
