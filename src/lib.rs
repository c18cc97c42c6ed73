//! A prefix-indexed word store over the letters A-Z.
//!
//! Build a [`Trie`] with a [`ParallelBuilder`], then query it through a
//! [`SuggestionEngine`].

mod builder;
pub mod corpus;
mod engine;
mod error;
mod symbol;
mod trie;

pub use builder::*;
pub use engine::*;
pub use error::*;
pub use symbol::*;
pub use trie::*;
