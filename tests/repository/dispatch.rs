//! Named Dispatch Tests
//!
//! Applying names runs the registered operation and narrows/augments the
//! current collection; unknown names fail without touching state.

use crate::common::*;

// ============================================================================
// Applying operations
// ============================================================================

#[test]
fn filters_compose_in_order() {
    let mut repo = token_repo();
    repo.add_filters(["is_minted", "expensive"]).unwrap();

    assert_eq!(names(&repo.get_all().unwrap()), vec!["alpha", "gamma"]);
    assert_eq!(repo.state().filters, vec!["is_minted", "expensive"]);
}

#[test]
fn annotations_add_fields_without_dropping_records() {
    let mut repo = token_repo();
    repo.add_annotations(["price_band"]).unwrap();

    let rows = repo.get_all().unwrap();
    assert_eq!(rows.len(), 5);
    let bands: Vec<Value> = rows.iter().map(|r| r.get("price_band")).collect();
    assert_eq!(
        bands,
        vec![
            Value::from("high"),
            Value::from("low"),
            Value::from("high"),
            Value::from("low"),
            Value::from("unpriced"),
        ]
    );
}

#[test]
fn names_are_case_insensitive() {
    let mut repo = token_repo();
    repo.add_filters(["IS_MINTED"]).unwrap();
    repo.add_annotations(["Price_Band"]).unwrap();

    assert_eq!(repo.state().filters, vec!["is_minted"]);
    assert_eq!(repo.state().annotations, vec!["price_band"]);
}

#[test]
fn chained_calls() {
    let mut repo = token_repo();
    let rows = repo
        .add_annotations(["price_band"])
        .unwrap()
        .add_filters(["is_minted"])
        .unwrap()
        .get_all()
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn same_name_in_both_kinds_dispatches_by_kind() {
    let mut repo = token_repo();
    repo.set_context(Context::new().with("user", 2));

    repo.add_annotations(["is_owned"]).unwrap();
    assert_eq!(repo.get_all().unwrap().len(), 5);

    repo.add_filters(["is_owned"]).unwrap();
    let rows = repo.get_all().unwrap();
    assert_eq!(names(&rows), vec!["gamma", "delta"]);
    assert!(rows.iter().all(|r| r.get("is_owned") == Value::Bool(true)));
}

// ============================================================================
// Missing operations
// ============================================================================

#[test]
fn unknown_name_reports_kind_and_name() {
    let mut repo = token_repo();
    let err = repo.add_annotations(["Rarity"]).unwrap_err();
    assert!(err.to_string().contains("Rarity"));

    match err {
        Error::OperationNotImplemented { kind, name } => {
            assert_eq!(kind, OperationKind::Annotation);
            assert_eq!(name, "Rarity");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn batch_stops_at_first_unknown_name() {
    let mut repo = token_repo();
    let result = repo.add_filters(["is_minted", "nope", "expensive"]);

    assert!(result.is_err());
    assert_eq!(repo.state().filters, vec!["is_minted"]);
    // "expensive" was never reached
    assert_eq!(repo.get_all().unwrap().len(), 3);
}

#[test]
fn annotation_name_is_not_a_filter() {
    let mut repo = token_repo();
    let err = repo.add_filters(["price_band"]).unwrap_err();
    assert!(err.is_not_implemented());
    assert!(repo.state().is_empty());
}

// ============================================================================
// Ad-hoc filtering
// ============================================================================

#[test]
fn adhoc_filter_is_not_tracked_or_stored() {
    let mut repo = token_repo();
    repo.add_filters(["is_minted"]).unwrap();

    let cheap = repo
        .filter(&Criteria::new().with("price__lt", 100))
        .unwrap();
    assert_eq!(names(&cheap.all().unwrap()), vec!["delta"]);

    assert_eq!(repo.state().filters, vec!["is_minted"]);
    assert_eq!(repo.get_all().unwrap().len(), 3);
}

#[test]
fn adhoc_filter_errors_propagate() {
    let repo = token_repo();
    let err = repo
        .filter(&Criteria::new().with("price__roughly", 10))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLookup { .. }));
}

#[test]
fn get_all_reflects_table_changes() {
    let mut repo = token_repo();
    repo.add_filters(["is_minted"]).unwrap();
    assert_eq!(repo.get_all().unwrap().len(), 3);

    repo.definition().tokens.insert([
        ("name", Value::from("zeta")),
        ("minted", Value::Bool(true)),
    ]);
    assert_eq!(repo.get_all().unwrap().len(), 4);
}
