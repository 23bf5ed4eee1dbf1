use std::hash::Hash;

pub mod traits {
    use std::fmt::{Debug, Display};
    use std::hash::Hash;

    /// A grammar symbol.
    ///
    /// The engine never creates symbols, it only compares them. The order is
    /// used to build deterministic tables, it carries no grammar meaning.
    pub trait Symbol: Copy + Ord + Hash + Debug + Display {
        fn is_terminal(&self) -> bool;

        /// The symbol is the designated end-marker ($, or <eos>).
        fn is_eos(&self) -> bool;

        #[inline(always)]
        fn is_non_terminal(&self) -> bool {
            !self.is_terminal()
        }
    }
}

#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
    EOS,
}

pub const EOS: &str = "<eos>";

/// Defines a symbol identified by a string.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Symbol<'s> {
    /// *Unique* identifier of the symbol
    pub id: &'s str,
    kind: SymbolKind,
}

impl std::fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Hash for Symbol<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<'s> Symbol<'s> {
    pub const fn new(id: &'s str, terminal: bool) -> Self {
        Self {
            id,
            kind: if terminal {
                SymbolKind::Terminal
            } else {
                SymbolKind::NonTerminal
            },
        }
    }

    pub const fn term(id: &'s str) -> Self {
        Self::new(id, true)
    }

    pub const fn nterm(id: &'s str) -> Self {
        Self::new(id, false)
    }

    /// Creates an end-of-stream symbol ($, or <eos>)
    pub const fn eos() -> Self {
        Self {
            id: EOS,
            kind: SymbolKind::EOS,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is<Id: AsRef<str>>(&self, id: Id) -> bool {
        self.id == id.as_ref()
    }
}

impl traits::Symbol for Symbol<'_> {
    #[inline(always)]
    fn is_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::Terminal | SymbolKind::EOS)
    }

    #[inline(always)]
    fn is_eos(&self) -> bool {
        matches!(self.kind, SymbolKind::EOS)
    }
}

#[cfg(test)]
mod tests {
    use super::{traits::Symbol as _, Symbol, SymbolKind};

    #[test]
    fn test_001_symbol_kinds() {
        assert!(Symbol::term("n").is_terminal());
        assert!(Symbol::eos().is_terminal());
        assert!(Symbol::eos().is_eos());
        assert!(Symbol::nterm("E").is_non_terminal());
        assert_eq!(Symbol::nterm("E").kind(), SymbolKind::NonTerminal);
    }

    #[test]
    fn test_002_symbol_order_is_stable() {
        let mut symbols = vec![Symbol::nterm("T"), Symbol::term("+"), Symbol::nterm("E")];
        symbols.sort();

        let ids: Vec<_> = symbols.iter().map(|sym| sym.id).collect();
        assert_eq!(ids, vec!["+", "E", "T"]);
    }
}
