pub mod error;
pub mod forest;
pub mod grammar;
pub mod item;
pub mod options;
pub mod parser;
pub mod rule;
pub mod stack;
pub mod state;
pub mod symbol;
pub mod table;
pub mod token;
pub mod tree;

pub use error::{
    ErrorKind, ExpectedSymbols, Found, GrammarError, GrammarResult, ParseError, StackKinds,
};
pub use forest::{ParseResult, Verdict};
pub use grammar::{Grammar, RuleDef};
pub use item::{Action, Item};
pub use options::SearchOptions;
pub use parser::{Parser, Search};
pub use rule::*;
pub use stack::TransactionalStack;
pub use state::{ActiveParseState, Diagnostics, Event, Phase};
pub use symbol::{Symbol, SymbolKind, EOS};
pub use table::DecisionTable;
pub use token::{Token, TokenStream};
pub use tree::{ParseTree, Walk};

pub mod traits {
    pub use crate::symbol::traits::Symbol;
    pub use crate::token::traits::Token;
}
