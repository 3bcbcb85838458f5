//! Property tests over randomly built expression trees.

use bramble::{CharRange, Grammar, Quantifier};
use proptest::prelude::*;

fn bounds() -> impl Strategy<Value = (char, char)> {
    (proptest::char::range('a', 'z'), proptest::char::range('a', 'z'))
        .prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

fn quantifier() -> impl Strategy<Value = Quantifier> {
    prop_oneof![
        Just(Quantifier::ONE),
        Just(Quantifier::OPTIONAL),
        Just(Quantifier::ZERO_OR_MORE),
        Just(Quantifier::ONE_OR_MORE),
        (0u32..3, 0u32..3).prop_map(|(min, extra)| Quantifier::new(min, Some(min + extra)).unwrap()),
    ]
}

fn leaf() -> impl Strategy<Value = Grammar> {
    prop_oneof![
        "[a-c]{0,3}".prop_map(Grammar::string),
        (proptest::collection::vec(bounds(), 1..4), any::<bool>())
            .prop_map(|(pairs, negate)| Grammar::char_range(pairs, negate).unwrap()),
    ]
}

fn grammar() -> impl Strategy<Value = Grammar> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            3 => (proptest::collection::vec(inner.clone(), 1..4), any::<bool>(), quantifier()).prop_map(
                |(children, is_choice, q)| {
                    if is_choice {
                        Grammar::choice(children, q).unwrap()
                    } else {
                        Grammar::sequence(children, q).unwrap()
                    }
                },
            ),
            1 => (inner, "[a-z][a-z0-9-]{0,4}")
                .prop_map(|(content, symbol)| Grammar::rule(symbol, content).unwrap()),
        ]
    })
}

proptest! {
    #[test]
    fn char_range_ignores_entry_order(
        pairs in proptest::collection::vec(bounds(), 1..6)
            .prop_flat_map(|pairs| Just(pairs).prop_shuffle()),
        negate in any::<bool>(),
    ) {
        let mut sorted = pairs.clone();
        sorted.sort_unstable();
        let shuffled = CharRange::new(pairs, negate).unwrap();
        let ordered = CharRange::new(sorted, negate).unwrap();
        prop_assert_eq!(&shuffled, &ordered);
        prop_assert!(shuffled.ranges().windows(2).all(|w| u32::from(w[0].end()) + 1 < u32::from(w[1].start())));
    }

    #[test]
    fn simplify_is_idempotent(g in grammar()) {
        if let Some(once) = g.simplify() {
            prop_assert_eq!(once.simplify(), Some(once.clone()));
        }
    }

    #[test]
    fn simplified_trees_render(g in grammar()) {
        if let Some(once) = g.simplify() {
            prop_assert!(once.render().is_ok());
        }
    }

    #[test]
    fn copy_is_equal_but_distinct(g in grammar()) {
        let copied = g.copy();
        prop_assert_eq!(&copied, &g);
        prop_assert!(!copied.ptr_eq(&g));
    }
}
