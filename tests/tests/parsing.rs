mod common;

use common::{ambiguous_table, expression_table, source_table, stream, terminated, verdict, Sym};
use rstest::{fixture, rstest};
use yabp::{ActiveParseState, DecisionTable, ErrorKind, Parser, SearchOptions};

#[fixture]
fn source() -> DecisionTable<Sym> {
    source_table()
}

#[fixture]
fn ambiguous() -> DecisionTable<Sym> {
    ambiguous_table()
}

#[fixture]
fn expression() -> DecisionTable<Sym> {
    expression_table()
}

#[rstest]
fn accepts_a_single_rule(source: DecisionTable<Sym>) {
    let input = stream(&[Sym::Id, Sym::Eof]);
    let results: Vec<_> = Parser::new(&source).parse(&input).collect();

    assert_eq!(results.len(), 1);
    assert!(results[0].error().is_none());

    let tree = results[0].tree().expect("no tree");
    assert_eq!(
        tree.walk().map(|(_, node)| node.kind).collect::<Vec<_>>(),
        vec![Sym::Source, Sym::Rule, Sym::Id, Sym::Eof]
    );
}

#[rstest]
fn rejects_a_missing_identifier(source: DecisionTable<Sym>) {
    let input = stream(&[Sym::Eof]);
    let results: Vec<_> = Parser::new(&source).parse(&input).collect();

    assert_eq!(results.len(), 1);
    assert!(results.iter().all(|result| !result.is_accepted()));

    match results[0].error().expect("no error").kind() {
        ErrorKind::NoApplicableRule { symbol, expected } => {
            assert_eq!(symbol.0, Some(Sym::Eof));
            assert!(expected.contains(&Sym::Id));
        }
        ErrorKind::ReductionMismatch { expected, actual } => {
            assert!(matches!(actual.0, None | Some(Sym::Eof)));
            assert!(expected.contains(&Sym::Id));
        }
        kind => panic!("unexpected error {}", kind),
    }
}

#[rstest]
fn reports_every_branch_of_an_ambiguity(ambiguous: DecisionTable<Sym>) {
    let input = stream(&[Sym::B, Sym::C, Sym::Eof]);
    let mut search = Parser::new(&ambiguous).parse(&input);
    let results: Vec<_> = search.by_ref().collect();

    assert!(search.forks() >= 1);
    assert_eq!(results.len(), search.explored());

    let accepted: Vec<_> = results.iter().filter(|result| result.is_accepted()).collect();
    assert_eq!(accepted.len(), 1);
    assert_eq!(
        accepted[0]
            .tree()
            .expect("no tree")
            .leaves()
            .map(|tok| tok.kind)
            .collect::<Vec<_>>(),
        vec![Sym::B, Sym::C]
    );

    // A -> b, then c is left over.
    assert!(results.iter().any(|result| result.error().is_some()));
}

#[rstest]
#[case::single(&[Sym::Num], true)]
#[case::sum(&[Sym::Num, Sym::Plus, Sym::Num], true)]
#[case::long_sum(&[Sym::Num, Sym::Plus, Sym::Num, Sym::Plus, Sym::Num], true)]
#[case::parenthesis(&[Sym::LParen, Sym::Num, Sym::RParen], true)]
#[case::nested(&[Sym::Num, Sym::Plus, Sym::LParen, Sym::Num, Sym::Plus, Sym::Num, Sym::RParen], true)]
#[case::empty(&[], false)]
#[case::dangling_plus(&[Sym::Num, Sym::Plus], false)]
#[case::leading_plus(&[Sym::Plus, Sym::Num], false)]
#[case::unbalanced(&[Sym::LParen, Sym::Num], false)]
#[case::juxtaposed(&[Sym::Num, Sym::Num], false)]
fn sums_of_numbers(expression: DecisionTable<Sym>, #[case] tokens: &[Sym], #[case] valid: bool) {
    let input = terminated(tokens);
    let verdict = verdict(&expression, &input);

    assert_eq!(verdict.is_accepted(), valid, "{:?}", verdict);
    assert_eq!(verdict.is_rejected(), !valid, "{:?}", verdict);
}

#[rstest]
#[case::trailing_identifier(&[Sym::Id, Sym::Id, Sym::Eof])]
#[case::missing_end_marker(&[Sym::Id])]
#[case::nothing(&[])]
#[case::after_end_marker(&[Sym::Id, Sym::Eof, Sym::Id])]
fn rejected_sources(source: DecisionTable<Sym>, #[case] tokens: &[Sym]) {
    let input = stream(tokens);
    assert!(verdict(&source, &input).is_rejected());
}

#[rstest]
fn prefers_the_smallest_distance(expression: DecisionTable<Sym>) {
    let input = terminated(&[Sym::Num, Sym::Plus, Sym::Num]);
    let mut state = ActiveParseState::new(&expression, &input);

    // Num => Term => Expr, shift +, shift Num, Num => Term.
    for _ in 0..5 {
        let events = state.next_events();
        assert_eq!(events.len(), 1);
        state.apply(events[0]).expect("cannot apply");
    }

    assert_eq!(state.stack_kinds(), vec![Sym::Expr, Sym::Plus, Sym::Term]);

    // Expr => Term settles at distance 2, Expr => Expr + Term at distance 4.
    let events = state.next_events();
    assert_eq!(
        events.iter().map(|event| event.item.rule.id).collect::<Vec<_>>(),
        vec![2, 1]
    );
}

#[rstest]
fn long_sums_stay_linear(expression: DecisionTable<Sym>) {
    let terms = 32;
    let mut tokens = vec![Sym::Num];
    for _ in 1..terms {
        tokens.extend([Sym::Plus, Sym::Num]);
    }

    let input = terminated(&tokens);
    let mut search = Parser::new(&expression).parse(&input);
    let accepted = search.by_ref().filter(|result| result.is_accepted()).count();

    assert_eq!(accepted, 1);
    assert!(
        search.explored() <= 2 * terms,
        "{} branches explored for {} terms",
        search.explored(),
        terms
    );
}

#[rstest]
fn deduplicates_accepted_forests() {
    let table = DecisionTable::build(yabp::rules! {
        Sym::A => Sym::B;
        Sym::A => Sym::B
    })
    .expect("cannot build the table");

    let input = stream(&[Sym::B, Sym::Eof]);
    let options = SearchOptions::default().deduplicate(true);

    assert_eq!(Parser::new(&table).parse(&input).count(), 2);
    assert_eq!(Parser::with_options(&table, options).parse(&input).count(), 1);
}
