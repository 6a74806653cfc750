//! Integration tests for the selection store.
//!
//! Exercises: idempotent toggle, count, bulk select/deselect equivalence,
//! explicit removal, entry pruning, and cross-repository independence.

use testgen_core::selection::SelectionStore;

#[test]
fn toggle_is_idempotent_in_both_directions() {
    let mut store = SelectionStore::new();

    assert!(store.toggle("octo/demo", "src/main.rs", true), "first select changes state");
    assert!(!store.toggle("octo/demo", "src/main.rs", true), "re-select is a no-op");
    assert!(!store.toggle("octo/demo", "src/main.rs", true));
    assert_eq!(store.count(), 1, "N selects of one path count once");

    assert!(store.toggle("octo/demo", "src/main.rs", false), "deselect changes state");
    assert!(!store.toggle("octo/demo", "src/main.rs", false), "re-deselect is a no-op");
    assert_eq!(store.count(), 0);
    assert!(store.is_empty());
}

#[test]
fn noop_toggles_leave_revision_untouched() {
    let mut store = SelectionStore::new();
    store.toggle("octo/demo", "a.rs", true);
    let after_select = store.revision();

    store.toggle("octo/demo", "a.rs", true);
    assert_eq!(store.revision(), after_select, "idempotent select must not look like a change");

    store.toggle("octo/demo", "missing.rs", false);
    assert_eq!(store.revision(), after_select, "removing an absent path must not look like a change");

    store.toggle("octo/demo", "a.rs", false);
    assert!(store.revision() > after_select, "an effective mutation bumps the revision");
}

#[test]
fn count_spans_repositories_and_paths_are_independent_per_repo() {
    let mut store = SelectionStore::new();
    store.toggle("octo/one", "src/lib.rs", true);
    store.toggle("octo/two", "src/lib.rs", true);

    assert_eq!(store.count(), 2, "same relative path under two repos is two selections");
    assert!(store.is_selected("octo/one", "src/lib.rs"));
    assert!(store.is_selected("octo/two", "src/lib.rs"));

    store.remove("octo/one", "src/lib.rs");
    assert!(!store.is_selected("octo/one", "src/lib.rs"));
    assert!(store.is_selected("octo/two", "src/lib.rs"), "removal is scoped to its repo");
}

#[test]
fn select_all_matches_individual_toggles() {
    let batch = [
        ("octo/one", "a.rs"),
        ("octo/one", "b.rs"),
        ("octo/two", "a.rs"),
        ("octo/one", "a.rs"), // duplicate on purpose — idempotence must hold
    ];

    let mut bulk = SelectionStore::new();
    bulk.select_all(batch);

    let mut manual = SelectionStore::new();
    for (repo, path) in batch {
        manual.toggle(repo, path, true);
    }

    let collect = |s: &SelectionStore| {
        s.entries()
            .map(|(repo, paths)| (repo.to_owned(), paths.iter().cloned().collect::<Vec<_>>()))
            .collect::<Vec<_>>()
    };
    assert_eq!(collect(&bulk), collect(&manual), "bulk and per-element selection end states differ");
    assert_eq!(bulk.count(), 3, "duplicate entry must not double-count");
}

#[test]
fn deselect_all_clears_every_repository() {
    let mut store = SelectionStore::new();
    store.select_all([("octo/one", "a.rs"), ("octo/two", "b.rs")]);
    assert_eq!(store.count(), 2);

    store.deselect_all();
    assert_eq!(store.count(), 0);
    assert_eq!(store.entries().count(), 0);

    let rev = store.revision();
    store.deselect_all();
    assert_eq!(store.revision(), rev, "clearing an empty store is a no-op");
}

#[test]
fn entries_only_yields_non_empty_repositories() {
    let mut store = SelectionStore::new();
    store.toggle("octo/one", "a.rs", true);
    store.toggle("octo/two", "b.rs", true);
    store.remove("octo/one", "a.rs");

    let repos: Vec<&str> = store.entries().map(|(repo, _)| repo).collect();
    assert_eq!(repos, ["octo/two"], "emptied repo must be pruned from entries");
}

#[test]
fn entries_orders_paths_within_a_repository() {
    let mut store = SelectionStore::new();
    store.toggle("octo/demo", "src/z.rs", true);
    store.toggle("octo/demo", "src/a.rs", true);
    store.toggle("octo/demo", "README.md", true);

    let (_, paths) = store.entries().next().expect("one repo selected");
    let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
    assert_eq!(paths, ["README.md", "src/a.rs", "src/z.rs"]);
}
