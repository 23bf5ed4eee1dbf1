//! Yet Another Backtracking Parser.
//!
//! A table-driven parser which explores every applicable decision, forking
//! the parse on ambiguity and reporting the result of each branch.
//!
//! # Example
//!
//! ```
//! use yabp::{Grammar, Parser, RuleDef, Symbol, TokenStream, EOS};
//!
//! let grammar = Grammar::new(
//!     [
//!         Symbol::nterm("Source"),
//!         Symbol::nterm("Rule"),
//!         Symbol::term("Id"),
//!         Symbol::eos(),
//!     ],
//!     [
//!         RuleDef::new("Source", &["Rule", EOS]),
//!         RuleDef::new("Rule", &["Id"]),
//!     ],
//! );
//!
//! let table = grammar.table().unwrap();
//! let input = TokenStream::from_kinds([Symbol::term("Id"), Symbol::eos()]);
//!
//! let verdict = Parser::new(&table).parse(&input).verdict();
//! assert!(verdict.is_accepted());
//! ```
pub use yabp_core::*;
