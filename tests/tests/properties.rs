mod common;

use common::{expression_table, is_expression, terminated, Sym};
use proptest::prelude::*;
use yabp::Parser;

/// Any sequence of expression tokens, valid or not.
fn tokens() -> impl Strategy<Value = Vec<Sym>> {
    prop::collection::vec(
        prop_oneof![
            Just(Sym::Num),
            Just(Sym::Plus),
            Just(Sym::LParen),
            Just(Sym::RParen),
        ],
        0..10,
    )
}

/// Valid sums of numbers.
fn expressions() -> impl Strategy<Value = Vec<Sym>> {
    Just(vec![Sym::Num]).prop_recursive(3, 8, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(mut lhs, rhs)| {
                lhs.push(Sym::Plus);
                lhs.extend(rhs);
                lhs
            }),
            inner.prop_map(|expr| {
                let mut tokens = vec![Sym::LParen];
                tokens.extend(expr);
                tokens.push(Sym::RParen);
                tokens
            }),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn the_search_is_deterministic(tokens in tokens()) {
        let (table, other) = (expression_table(), expression_table());
        let input = terminated(&tokens);

        let first: Vec<_> = Parser::new(&table).parse(&input).collect();
        let second: Vec<_> = Parser::new(&other).parse(&input).collect();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn accepted_trees_cover_the_input(tokens in tokens()) {
        let table = expression_table();
        let input = terminated(&tokens);

        for result in Parser::new(&table).parse(&input).filter(|result| result.is_accepted()) {
            let tree = result.tree().expect("an accepted result holds one tree");

            prop_assert_eq!(tree.kind(), Sym::Start);
            prop_assert_eq!(
                tree.leaves().map(|tok| tok.kind).collect::<Vec<_>>(),
                input.kinds().collect::<Vec<_>>()
            );
            prop_assert_eq!(
                tree.leaves().map(|tok| tok.position).collect::<Vec<_>>(),
                (0..input.len()).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn every_branch_ends_with_a_result(tokens in tokens()) {
        let table = expression_table();
        let input = terminated(&tokens);

        let mut search = Parser::new(&table).parse(&input);
        let results: Vec<_> = search.by_ref().collect();

        prop_assert!(!results.is_empty());
        prop_assert_eq!(results.len(), search.explored());

        for result in results {
            prop_assert!(result.is_accepted() || result.error().is_some());
            if result.is_accepted() {
                prop_assert_eq!(result.forest.len(), 1);
            }
        }
    }

    #[test]
    fn accepts_exactly_the_language(tokens in tokens()) {
        let table = expression_table();
        let input = terminated(&tokens);

        let verdict = Parser::new(&table).parse(&input).verdict();

        prop_assert_eq!(verdict.is_accepted(), is_expression(&tokens), "{:?}", verdict);
        prop_assert!(!verdict.is_ambiguous());
    }

    #[test]
    fn accepts_every_expression(tokens in expressions()) {
        let table = expression_table();
        let input = terminated(&tokens);

        prop_assert!(Parser::new(&table).parse(&input).verdict().is_accepted());
    }
}
