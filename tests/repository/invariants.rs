//! State Invariant Tests
//!
//! Property tests over random sequences of operation names:
//! - applied names are recorded lower-cased, in order, duplicates kept
//! - an unknown name fails without recording and keeps earlier names
//! - clean always returns to the full collection and empty state

use crate::common::*;
use proptest::prelude::*;

const ANNOTATIONS: [&str; 2] = ["price_band", "is_owned"];
const FILTERS: [&str; 3] = ["is_minted", "is_owned", "expensive"];

/// A known name in random letter case
fn cased(names: &'static [&'static str]) -> impl Strategy<Value = String> {
    (prop::sample::select(names), any::<u64>()).prop_map(|(name, mask)| {
        name.chars()
            .enumerate()
            .map(|(i, c)| {
                if mask & (1 << (i % 64)) != 0 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    })
}

fn lowered(names: &[String]) -> Vec<String> {
    names.iter().map(|n| n.to_lowercase()).collect()
}

proptest! {
    #[test]
    fn annotations_recorded_in_call_order(names in prop::collection::vec(cased(&ANNOTATIONS), 0..12)) {
        let mut repo = token_repo();
        repo.add_annotations(&names).unwrap();

        prop_assert_eq!(&repo.state().annotations, &lowered(&names));
        prop_assert!(repo.state().filters.is_empty());
        // Annotations never drop records
        prop_assert_eq!(repo.get_all().unwrap().len(), 5);
    }

    #[test]
    fn filters_recorded_in_call_order(names in prop::collection::vec(cased(&FILTERS), 0..8)) {
        let mut repo = token_repo();
        repo.set_context(Context::new().with("user", 1));
        repo.add_filters(&names).unwrap();

        prop_assert_eq!(&repo.state().filters, &lowered(&names));
        prop_assert!(repo.get_all().unwrap().len() <= 5);
    }

    #[test]
    fn unknown_name_keeps_prefix_of_batch(
        known in prop::collection::vec(cased(&FILTERS), 0..6),
        tail in prop::collection::vec(cased(&FILTERS), 0..6),
    ) {
        let mut repo = token_repo();
        let mut batch = known.clone();
        batch.push("no_such_filter".to_string());
        batch.extend(tail);

        let err = repo.add_filters(&batch).unwrap_err();

        let is_missing = matches!(
            err,
            Error::OperationNotImplemented { kind: OperationKind::Filter, ref name } if name == "no_such_filter"
        );
        prop_assert!(is_missing);
        prop_assert_eq!(&repo.state().filters, &lowered(&known));
    }

    #[test]
    fn clean_always_restores_fresh_state(
        annotations in prop::collection::vec(cased(&ANNOTATIONS), 0..5),
        filters in prop::collection::vec(cased(&FILTERS), 0..5),
        user in 0i64..4,
    ) {
        let mut repo = token_repo();
        let context = Context::new().with("user", user);
        repo.extend(
            Extension::new()
                .annotations(annotations)
                .filters(filters)
                .context(context.clone()),
        )
        .unwrap();

        repo.clean();

        prop_assert!(repo.state().is_empty());
        prop_assert!(repo.instance_list().is_unfiltered());
        prop_assert_eq!(repo.get_all().unwrap().len(), 5);
        prop_assert_eq!(repo.context(), &context);
    }
}
