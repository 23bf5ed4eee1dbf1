use crate::{DecisionTable, GrammarError, GrammarResult, Rule, Symbol};

/// Defines a grammar rule with symbol identifiers.
///
/// The grammar resolves the identifiers into a [Rule].
/// X := A1..An
#[derive(Debug, PartialEq)]
pub struct RuleDef<'sid> {
    pub lhs: &'sid str,
    pub rhs: &'sid [&'sid str],
}

impl<'sid> RuleDef<'sid> {
    pub const fn new(lhs: &'sid str, rhs: &'sid [&'sid str]) -> Self {
        Self { lhs, rhs }
    }
}

#[macro_export]
macro_rules! rule {
    ($lhs:literal => $($rhs:literal)+) => {
        $crate::RuleDef::new($lhs, &[$($rhs),+])
    };
}

#[derive(Debug, PartialEq)]
/// A grammar described with string identifiers.
///
/// The first rule produces the start symbol. Terminating it with <eos> makes
/// the accepting item explicit.
///
/// # Example
///
/// For the following grammar :
///
/// ```grammar
/// 1. <start> := E <eos>
/// 2. E := E * B
/// 3. E := E + B
/// 4. E := B
/// 5. B := 0
/// 6. B := 1
/// ```
///
/// ```ignore
/// const GRAMMAR: Grammar<'static, 8, 6> = Grammar::new(
///     [
///         Symbol::nterm("<start>"),
///         Symbol::eos(),
///         Symbol::term("0"),
///         Symbol::term("1"),
///         Symbol::term("+"),
///         Symbol::term("*"),
///         Symbol::nterm("E"),
///         Symbol::nterm("B"),
///     ],
///     [
///         rule!("<start>" => "E" "<eos>"),
///         rule!("E" => "E" "*" "B"),
///         rule!("E" => "E" "+" "B"),
///         rule!("E" => "B"),
///         rule!("B" => "0"),
///         rule!("B" => "1"),
///     ],
/// );
/// ```
pub struct Grammar<'sid, const NB_SYMBOLS: usize, const NB_RULES: usize> {
    symbols: [Symbol<'sid>; NB_SYMBOLS],
    rules: [RuleDef<'sid>; NB_RULES],
}

impl<'sid, const NB_SYMBOLS: usize, const NB_RULES: usize> Grammar<'sid, NB_SYMBOLS, NB_RULES> {
    pub const fn new(symbols: [Symbol<'sid>; NB_SYMBOLS], rules: [RuleDef<'sid>; NB_RULES]) -> Self {
        Self { symbols, rules }
    }

    pub fn sym(&self, id: &str) -> Option<Symbol<'sid>> {
        self.symbols.iter().find(|sym| sym.is(id)).copied()
    }

    pub fn try_sym(&self, id: &str) -> GrammarResult<Symbol<'sid>> {
        self.sym(id)
            .ok_or_else(|| GrammarError::UnknownSymbol(id.to_string()))
    }

    pub fn iter_symbols(&self) -> impl Iterator<Item = Symbol<'sid>> + '_ {
        self.symbols.iter().copied()
    }

    /// Resolves the rule definitions.
    pub fn rules(&self) -> GrammarResult<Vec<Rule<Symbol<'sid>>>> {
        self.rules
            .iter()
            .enumerate()
            .map(|(id, def)| {
                Ok(Rule {
                    id,
                    lhs: self.try_sym(def.lhs)?,
                    rhs: def
                        .rhs
                        .iter()
                        .map(|id| self.try_sym(id))
                        .collect::<GrammarResult<_>>()?,
                })
            })
            .collect()
    }

    /// Build the decision table of the grammar.
    pub fn table(&self) -> GrammarResult<DecisionTable<Symbol<'sid>>> {
        DecisionTable::build(self.rules()?)
    }
}
