//! Repository Lifecycle Tests
//!
//! Tests the repository transitions:
//! - fresh → operations applied (add_annotations / add_filters / extend)
//! - any state → fresh (clean), context untouched

use crate::common::*;
use quarry::Model;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn fresh_repository_starts_from_full_collection() {
    let repo = token_repo();

    assert_eq!(repo.state(), &quarry::RepositoryState::default());
    assert!(repo.context().is_empty());
    assert!(repo.instance_list().is_unfiltered());
    assert_eq!(
        repo.get_all().unwrap(),
        repo.definition().tokens.objects().all().unwrap()
    );
}

// ============================================================================
// extend
// ============================================================================

#[test]
fn extend_with_annotations_filters_and_context() {
    let mut repo = token_repo();
    repo.extend(
        Extension::new()
            .annotations(["PRICE_BAND"])
            .filters(["is_owned"])
            .context(Context::new().with("user", 1)),
    )
    .unwrap();

    assert_eq!(repo.state().annotations, vec!["price_band"]);
    assert_eq!(repo.state().filters, vec!["is_owned"]);
    assert_eq!(repo.context(), &Context::new().with("user", 1));
    assert_eq!(names(&repo.get_all().unwrap()), vec!["alpha", "beta"]);
}

#[test]
fn extend_replaces_context_without_merging() {
    let mut repo = token_repo();
    repo.set_context(Context::new().with("user", 1).with("tenant", "acme"));

    repo.extend(Extension::new().context(Context::new().with("user", 3)))
        .unwrap();

    assert_eq!(repo.context().len(), 1);
    assert!(repo.context().get("tenant").is_none());
    assert_eq!(repo.context().get("user"), Some(&Value::Int(3)));
}

#[test]
fn extend_without_arguments_is_noop() {
    let mut repo = token_repo();
    repo.set_context(Context::new().with("user", 2));
    repo.add_filters(["is_owned"]).unwrap();

    let state = repo.state().clone();
    let context = repo.context().clone();
    let rows = repo.get_all().unwrap();

    repo.extend(Extension::default()).unwrap();

    assert_eq!(repo.state(), &state);
    assert_eq!(repo.context(), &context);
    assert_eq!(repo.get_all().unwrap(), rows);
}

#[test]
fn extend_accumulates_on_previous_state() {
    let mut repo = token_repo();
    repo.add_annotations(["price_band"]).unwrap();
    repo.add_filters(["is_minted"]).unwrap();

    repo.extend(
        Extension::new()
            .annotations(["price_band"])
            .filters(["expensive"]),
    )
    .unwrap();

    assert_eq!(repo.state().annotations, vec!["price_band", "price_band"]);
    assert_eq!(repo.state().filters, vec!["is_minted", "expensive"]);
}

#[test]
fn extend_sets_context_before_failing_operation() {
    let mut repo = token_repo();
    let err = repo
        .extend(
            Extension::new()
                .context(Context::new().with("user", 9))
                .annotations(["price_band", "missing"])
                .filters(["is_minted"]),
        )
        .unwrap_err();

    assert!(err.is_not_implemented());
    assert_eq!(repo.context().get("user"), Some(&Value::Int(9)));
    assert_eq!(repo.state().annotations, vec!["price_band"]);
    assert!(repo.state().filters.is_empty());
}

#[test]
fn extend_from_json_payload() {
    let mut repo = token_repo();
    let payload = r#"{"annotations": ["price_band"], "filters": ["is_owned"], "context": {"user": 2}}"#;
    let extension: Extension = serde_json::from_str(payload).unwrap();

    repo.extend(extension).unwrap();

    assert_eq!(names(&repo.get_all().unwrap()), vec!["gamma", "delta"]);
    assert_eq!(
        serde_json::to_value(repo.state()).unwrap(),
        serde_json::json!({"annotations": ["price_band"], "filters": ["is_owned"]})
    );
}

// ============================================================================
// clean
// ============================================================================

#[test]
fn clean_resets_collection_and_state_but_not_context() {
    let mut repo = token_repo();
    repo.extend(
        Extension::new()
            .filters(["is_owned", "is_minted"])
            .context(Context::new().with("user", 2)),
    )
    .unwrap();
    assert_eq!(repo.get_all().unwrap().len(), 2);

    repo.clean();

    assert!(repo.state().is_empty());
    assert!(repo.instance_list().is_unfiltered());
    assert_eq!(repo.get_all().unwrap().len(), 5);
    assert_eq!(repo.context().get("user"), Some(&Value::Int(2)));
}

#[test]
fn clean_on_fresh_repository_is_harmless() {
    let mut repo = token_repo();
    repo.clean().clean();
    assert!(repo.state().is_empty());
    assert_eq!(repo.get_all().unwrap().len(), 5);
}

#[test]
fn clean_then_reuse_for_another_use_case() {
    let mut repo = token_repo();
    repo.add_filters(["expensive"]).unwrap();
    assert_eq!(repo.get_all().unwrap().len(), 2);

    let rows = repo.clean().add_filters(["is_minted"]).unwrap().get_all().unwrap();
    assert_eq!(names(&rows), vec!["alpha", "gamma", "delta"]);
    assert_eq!(repo.state().filters, vec!["is_minted"]);
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn prototype_clone_per_request() {
    let prototype = token_repo();

    let handles: Vec<_> = (1..=3)
        .map(|user| {
            let mut repo = prototype.clone();
            std::thread::spawn(move || {
                repo.set_context(Context::new().with("user", user));
                repo.add_filters(["is_owned"]).unwrap();
                repo.get_all().unwrap().len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![2, 2, 1]);
    assert!(prototype.state().is_empty());
}

// ============================================================================
// Introspection
// ============================================================================

#[test]
fn introspection_lists_registered_operations() {
    let mut repo = token_repo();
    let annotations = repo.get_annotations();
    let filters = repo.get_filters();

    assert_eq!(
        annotations.into_iter().collect::<Vec<_>>(),
        vec!["is_owned", "price_band"]
    );
    assert_eq!(
        filters.iter().cloned().collect::<Vec<_>>(),
        vec!["expensive", "is_minted", "is_owned"]
    );

    // Independent of what has been applied
    repo.add_filters(["expensive"]).unwrap();
    assert_eq!(repo.get_filters(), filters);
}

#[test]
fn qualified_operations_use_method_prefixes() {
    let repo = token_repo();
    let qualified: Vec<String> = repo.qualified_operations().into_iter().collect();
    assert_eq!(
        qualified,
        vec![
            "annotate_is_owned",
            "annotate_price_band",
            "filter_expensive",
            "filter_is_minted",
            "filter_is_owned",
        ]
    );
}
