use std::rc::{Rc, Weak};

pub mod traits {
    /// A token produced by a lexer.
    pub trait Token<S> {
        fn kind(&self) -> S;
        fn value(&self) -> &str;
        /// Position of the token in the source.
        fn position(&self) -> usize;
    }
}

/// A parse-tree node.
///
/// Terminal tokens come from the stream and carry their raw value, reduced tokens
/// own their children and have an empty value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<S> {
    pub kind: S,
    pub value: String,
    pub position: usize,
    pub children: Vec<Token<S>>,
    /// The next token of the stream, never owned.
    #[cfg_attr(feature = "serde", serde(skip))]
    lookahead: Option<Weak<Token<S>>>,
}

impl<S: Copy> traits::Token<S> for Token<S> {
    fn kind(&self) -> S {
        self.kind
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn position(&self) -> usize {
        self.position
    }
}

/// Compares the structure, the lookahead is ignored.
impl<S: PartialEq> PartialEq for Token<S> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.value == other.value
            && self.position == other.position
            && self.children == other.children
    }
}

impl<S: Eq> Eq for Token<S> {}

impl<S: Copy> Token<S> {
    pub fn new<V>(kind: S, value: V, position: usize) -> Self
    where
        V: ToString,
    {
        Self {
            kind,
            value: value.to_string(),
            position,
            children: vec![],
            lookahead: None,
        }
    }

    /// Reduces the children, given left to right, into a new node.
    ///
    /// The node takes the position of its leftmost child and the lookahead of its rightmost one.
    pub fn reduce(kind: S, children: Vec<Self>) -> Self {
        let position = children.first().map(|tok| tok.position).unwrap_or_default();
        let lookahead = children.last().and_then(|tok| tok.lookahead.clone());

        Self {
            kind,
            value: String::default(),
            position,
            children,
            lookahead,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The next token of the stream, if the stream is still alive.
    pub fn lookahead(&self) -> Option<Rc<Token<S>>> {
        self.lookahead.as_ref().and_then(Weak::upgrade)
    }

    pub fn lookahead_kind(&self) -> Option<S> {
        self.lookahead().map(|tok| tok.kind)
    }
}

/// The tokens to parse, with their lookahead linked.
///
/// The stream is shared, read-only, by every branch of a search.
#[derive(Debug)]
pub struct TokenStream<S>(Vec<Rc<Token<S>>>);

impl<S: Copy> TokenStream<S> {
    /// Copies the lexer's tokens and links every token to its successor.
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: traits::Token<S>,
    {
        let tokens: Vec<_> = tokens
            .into_iter()
            .map(|tok| Token::new(tok.kind(), tok.value(), tok.position()))
            .collect();

        let mut linked = Vec::with_capacity(tokens.len());
        let mut next: Option<Rc<Token<S>>> = None;

        for mut tok in tokens.into_iter().rev() {
            tok.lookahead = next.as_ref().map(Rc::downgrade);
            let tok = Rc::new(tok);
            next = Some(Rc::clone(&tok));
            linked.push(tok);
        }

        linked.reverse();
        Self(linked)
    }

    /// Builds a stream from kinds alone, the value is the kind's text and
    /// the position its index.
    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: std::fmt::Display,
    {
        Self::new(
            kinds
                .into_iter()
                .enumerate()
                .map(|(position, kind)| Token::new(kind, kind, position)),
        )
    }

    pub fn get(&self, index: usize) -> Option<&Rc<Token<S>>> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token<S>> {
        self.0.iter().map(AsRef::as_ref)
    }

    pub fn kinds(&self) -> impl Iterator<Item = S> + '_ {
        self.iter().map(|tok| tok.kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
