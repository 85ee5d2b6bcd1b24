//! # Sophia - Abstract Syntax Tree
//!
//! Tokens produced by the lexer and the node contract shared by every
//! syntax-tree node.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens and their kinds
//! - **[node]** - The [`Node`] trait: origin token, evaluation, JavaScript emission
//! - **[merge]** - The `++` operator node
//! - **[literals]** - Leaf nodes for strings, numbers, booleans and lists
//!
//! ## Dual Backend
//!
//! A tree can be walked two ways. [`Node::eval`] interprets it and produces a
//! runtime [`Value`](crate::Value); [`Node::compile_js`] appends equivalent
//! JavaScript to a buffer. Nodes do not know which walk is happening.
//!
//! ```text
//! (++ "a" "b")          eval    => "ab"
//!                       compile => [].concat("a","b")
//! (++ 1 [2 3] "x")      eval    => [1, 2, 3, "x"]
//!                       compile => [].concat(1,[2,3],"x")
//! ```
//!
//! The interpreter picks string or list semantics from the runtime values;
//! generated code always goes through `[].concat` and leaves the choice to
//! the JavaScript runtime.
pub mod literals;
pub mod merge;
pub mod node;
pub mod tokens;

pub use literals::{Bool, Float, List, Str};
pub use merge::Merge;
pub use node::Node;
pub use tokens::{Token, TokenKind};
