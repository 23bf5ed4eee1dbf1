#![allow(dead_code)]

use yabp::{rules, traits, DecisionTable, Parser, TokenStream, Verdict};

/// Symbols of the test grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sym {
    Source,
    Rule,
    Id,
    Eof,

    A,
    B,
    C,

    Start,
    Expr,
    Term,
    Plus,
    Num,
    LParen,
    RParen,
}

impl std::fmt::Display for Sym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sym::B => write!(f, "b"),
            Sym::C => write!(f, "c"),
            Sym::Plus => write!(f, "+"),
            Sym::LParen => write!(f, "("),
            Sym::RParen => write!(f, ")"),
            sym => write!(f, "{:?}", sym),
        }
    }
}

impl traits::Symbol for Sym {
    fn is_terminal(&self) -> bool {
        matches!(
            self,
            Sym::Id | Sym::Eof | Sym::B | Sym::C | Sym::Plus | Sym::Num | Sym::LParen | Sym::RParen
        )
    }

    fn is_eos(&self) -> bool {
        matches!(self, Sym::Eof)
    }
}

/// Source -> Rule Eof ; Rule -> Id
pub fn source_table() -> DecisionTable<Sym> {
    DecisionTable::build(rules! {
        Sym::Source => Sym::Rule, Sym::Eof;
        Sym::Rule => Sym::Id
    })
    .expect("cannot build the table")
}

/// A -> b ; A -> b c
pub fn ambiguous_table() -> DecisionTable<Sym> {
    DecisionTable::build(rules! {
        Sym::A => Sym::B;
        Sym::A => Sym::B, Sym::C
    })
    .expect("cannot build the table")
}

/// Left-recursive sums of numbers, with parenthesis.
pub fn expression_table() -> DecisionTable<Sym> {
    DecisionTable::build(rules! {
        Sym::Start => Sym::Expr, Sym::Eof;
        Sym::Expr => Sym::Expr, Sym::Plus, Sym::Term;
        Sym::Expr => Sym::Term;
        Sym::Term => Sym::Num;
        Sym::Term => Sym::LParen, Sym::Expr, Sym::RParen
    })
    .expect("cannot build the table")
}

pub fn stream(kinds: &[Sym]) -> TokenStream<Sym> {
    TokenStream::from_kinds(kinds.iter().copied())
}

/// Appends the end-marker.
pub fn terminated(kinds: &[Sym]) -> TokenStream<Sym> {
    TokenStream::from_kinds(kinds.iter().copied().chain([Sym::Eof]))
}

pub fn verdict(table: &DecisionTable<Sym>, input: &TokenStream<Sym>) -> Verdict<Sym> {
    Parser::new(table).parse(input).verdict()
}

/// Recognizes the sums of numbers, without the end-marker.
pub fn is_expression(tokens: &[Sym]) -> bool {
    fn expr(tokens: &[Sym], pos: usize) -> Option<usize> {
        let mut pos = term(tokens, pos)?;
        while tokens.get(pos) == Some(&Sym::Plus) {
            pos = term(tokens, pos + 1)?;
        }
        Some(pos)
    }

    fn term(tokens: &[Sym], pos: usize) -> Option<usize> {
        match tokens.get(pos) {
            Some(Sym::Num) => Some(pos + 1),
            Some(Sym::LParen) => {
                let pos = expr(tokens, pos + 1)?;
                (tokens.get(pos) == Some(&Sym::RParen)).then_some(pos + 1)
            }
            _ => None,
        }
    }

    expr(tokens, 0) == Some(tokens.len())
}
