//! Integration tests for the file-tree controller.
//!
//! Exercises the full directory state machine against simulated listing
//! completions: sibling ordering, selection surviving collapse/re-expand,
//! coalesced in-flight fetches, failure rollback, and last-request-wins on
//! root reloads. No network is involved — the ticket API is the whole
//! synchronization contract.

use testgen_core::error::InvalidOperation;
use testgen_core::selection::SelectionStore;
use testgen_core::tree::{DirState, FileTreeController};
use testgen_core::types::{EntryKind, EntrySummary};

fn file(name: &str, path: &str) -> EntrySummary {
    EntrySummary { name: name.to_owned(), path: path.to_owned(), kind: EntryKind::File }
}

fn dir(name: &str, path: &str) -> EntrySummary {
    EntrySummary { name: name.to_owned(), path: path.to_owned(), kind: EntryKind::Dir }
}

/// Loads a root listing and returns the controller, asserting the apply
/// succeeded.
fn loaded(repo: &str, entries: Vec<EntrySummary>) -> FileTreeController {
    let mut ctrl = FileTreeController::new();
    let ticket = ctrl.begin_load_root(repo);
    assert!(ctrl.apply_root(&ticket, entries), "fresh root ticket must apply");
    ctrl
}

#[test]
fn siblings_sort_directories_first_then_case_insensitive() {
    let ctrl = loaded(
        "octo/demo",
        vec![file("b", "b"), dir("A", "A"), file("a", "a")],
    );

    let names: Vec<&str> = ctrl.visible_rows().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["A", "a", "b"], "expected dirs first, then case-insensitive by name");
}

#[test]
fn expand_materializes_sorted_children_under_the_node() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src"), file("README.md", "README.md")]);

    let ticket = ctrl.begin_expand("src").unwrap().expect("collapsed dir yields a ticket");
    assert_eq!(ctrl.node("src").unwrap().state, DirState::Loading);

    let applied = ctrl.apply_children(
        &ticket,
        vec![file("main.rs", "src/main.rs"), dir("util", "src/util"), file("Lib.rs", "src/Lib.rs")],
    );
    assert!(applied);
    assert_eq!(ctrl.node("src").unwrap().state, DirState::Expanded);

    let paths: Vec<&str> = ctrl.visible_rows().iter().map(|n| n.path.as_str()).collect();
    assert_eq!(
        paths,
        ["src", "src/util", "src/Lib.rs", "src/main.rs", "README.md"],
        "children must sit under their parent, dirs first, case-insensitive"
    );
    assert_eq!(ctrl.node("src/main.rs").unwrap().depth, 1);
}

#[test]
fn selection_survives_collapse_and_reexpand() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src")]);
    let mut selection = SelectionStore::new();

    let ticket = ctrl.begin_expand("src").unwrap().unwrap();
    ctrl.apply_children(&ticket, vec![file("main.rs", "src/main.rs")]);
    ctrl.toggle_file(&mut selection, "src/main.rs", true).unwrap();
    assert!(selection.is_selected("octo/demo", "src/main.rs"));

    ctrl.collapse("src").unwrap();
    assert!(ctrl.node("src/main.rs").is_none(), "collapse discards descendants");
    assert_eq!(ctrl.node("src").unwrap().state, DirState::Collapsed);
    assert!(
        selection.is_selected("octo/demo", "src/main.rs"),
        "selection is keyed by path, independent of materialization"
    );

    // Re-expansion with the same backend listing reproduces the same nodes,
    // so the old selection lines up again without re-toggling.
    let ticket = ctrl.begin_expand("src").unwrap().unwrap();
    ctrl.apply_children(&ticket, vec![file("main.rs", "src/main.rs")]);
    assert!(ctrl.node("src/main.rs").is_some());
    assert!(selection.is_selected("octo/demo", "src/main.rs"));
}

#[test]
fn collapse_removes_descendants_recursively() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src")]);

    let ticket = ctrl.begin_expand("src").unwrap().unwrap();
    ctrl.apply_children(&ticket, vec![dir("util", "src/util")]);
    let ticket = ctrl.begin_expand("src/util").unwrap().unwrap();
    ctrl.apply_children(&ticket, vec![file("io.rs", "src/util/io.rs")]);
    assert_eq!(ctrl.visible_rows().len(), 3);

    ctrl.collapse("src").unwrap();
    assert!(ctrl.node("src/util").is_none());
    assert!(ctrl.node("src/util/io.rs").is_none(), "grandchildren must be removed too");
    assert_eq!(ctrl.visible_rows().len(), 1);
}

#[test]
fn reentrant_expand_coalesces_onto_one_fetch() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src")]);

    let first = ctrl.begin_expand("src").unwrap();
    let second = ctrl.begin_expand("src").unwrap();
    assert!(first.is_some(), "first expand issues the fetch");
    assert!(second.is_none(), "expand while Loading must not issue a second fetch");

    assert!(ctrl.apply_children(&first.unwrap(), vec![file("a.rs", "src/a.rs")]));
    let rows = ctrl.visible_rows();
    assert_eq!(rows.len(), 2, "exactly one set of children inserted");

    // Expanding an already-Expanded node is also fetch-free.
    assert!(ctrl.begin_expand("src").unwrap().is_none());
}

#[test]
fn failed_expand_reverts_to_collapsed_with_nothing_inserted() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src"), file("README.md", "README.md")]);
    let mut selection = SelectionStore::new();
    selection.toggle("octo/demo", "README.md", true);

    let ticket = ctrl.begin_expand("src").unwrap().unwrap();
    assert!(ctrl.fail_expand(&ticket));

    let node = ctrl.node("src").unwrap();
    assert_eq!(node.state, DirState::Collapsed);
    assert!(node.children.is_none(), "no partial children after a failed fetch");
    assert_eq!(ctrl.visible_rows().len(), 2, "siblings untouched");
    assert_eq!(selection.count(), 1, "selection untouched by tree failure");

    // The node is expandable again after the failure.
    assert!(ctrl.begin_expand("src").unwrap().is_some());
}

#[test]
fn stale_expand_completion_is_discarded_after_failure_rollback() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src")]);

    let old = ctrl.begin_expand("src").unwrap().unwrap();
    assert!(ctrl.fail_expand(&old));
    let new = ctrl.begin_expand("src").unwrap().unwrap();

    assert!(
        !ctrl.apply_children(&old, vec![file("ghost.rs", "src/ghost.rs")]),
        "completion for a superseded expansion must be discarded"
    );
    assert!(ctrl.node("src/ghost.rs").is_none());

    assert!(ctrl.apply_children(&new, vec![file("real.rs", "src/real.rs")]));
    assert!(ctrl.node("src/real.rs").is_some());
}

#[test]
fn fetched_empty_directory_differs_from_unfetched() {
    let mut ctrl = loaded("octo/demo", vec![dir("empty", "empty")]);
    assert!(ctrl.node("empty").unwrap().children.is_none(), "unfetched starts as None");

    let ticket = ctrl.begin_expand("empty").unwrap().unwrap();
    assert!(ctrl.apply_children(&ticket, Vec::new()));

    let node = ctrl.node("empty").unwrap();
    assert_eq!(node.state, DirState::Expanded);
    assert_eq!(node.children.as_deref(), Some(&[][..]), "fetched-and-empty is Some([])");
}

#[test]
fn last_root_request_wins_over_a_slow_earlier_one() {
    let mut ctrl = FileTreeController::new();

    let first = ctrl.begin_load_root("octo/one");
    let second = ctrl.begin_load_root("octo/two");

    // The newer request resolves first.
    assert!(ctrl.apply_root(&second, vec![file("two.rs", "two.rs")]));
    assert_eq!(ctrl.repo(), Some("octo/two"));

    // The superseded request resolves late — its result must be discarded.
    assert!(!ctrl.apply_root(&first, vec![file("one.rs", "one.rs")]));
    assert_eq!(ctrl.repo(), Some("octo/two"), "stale root listing must not replace the tree");
    assert!(ctrl.node("two.rs").is_some());
    assert!(ctrl.node("one.rs").is_none());

    // Same for a late failure of the superseded request.
    assert!(!ctrl.fail_root(&first));
    assert!(!ctrl.is_root_loading());
}

#[test]
fn root_reload_invalidates_in_flight_expansions() {
    let mut ctrl = loaded("octo/one", vec![dir("src", "src")]);
    let expand = ctrl.begin_expand("src").unwrap().unwrap();

    let reload = ctrl.begin_load_root("octo/two");
    assert!(ctrl.apply_root(&reload, vec![dir("lib", "lib")]));

    assert!(
        !ctrl.apply_children(&expand, vec![file("old.rs", "src/old.rs")]),
        "children for a replaced tree must not be merged into the new one"
    );
    assert!(ctrl.node("src/old.rs").is_none());
    assert!(ctrl.node("lib").is_some());
}

#[test]
fn reloading_the_same_repo_builds_a_fresh_tree() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src")]);
    let ticket = ctrl.begin_expand("src").unwrap().unwrap();
    ctrl.apply_children(&ticket, vec![file("main.rs", "src/main.rs")]);

    // Reopening the browser: a fresh root load must not rely on leftover
    // state — expansion state resets with the new materialization.
    let reload = ctrl.begin_load_root("octo/demo");
    assert!(ctrl.apply_root(&reload, vec![dir("src", "src")]));
    assert_eq!(ctrl.node("src").unwrap().state, DirState::Collapsed);
    assert!(ctrl.node("src/main.rs").is_none());
}

#[test]
fn misuse_is_rejected_as_invalid_operation() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src"), file("README.md", "README.md")]);
    let mut selection = SelectionStore::new();

    assert_eq!(
        ctrl.toggle_file(&mut selection, "src", true),
        Err(InvalidOperation::NotAFile { path: "src".to_owned() }),
        "directories are never selectable"
    );
    assert_eq!(selection.count(), 0);

    assert_eq!(
        ctrl.begin_expand("README.md"),
        Err(InvalidOperation::NotADirectory { path: "README.md".to_owned() }),
    );
    assert_eq!(
        ctrl.begin_expand("nope"),
        Err(InvalidOperation::UnknownPath { path: "nope".to_owned() }),
    );
    assert_eq!(
        ctrl.collapse("README.md"),
        Err(InvalidOperation::NotADirectory { path: "README.md".to_owned() }),
    );
}

#[test]
fn toggle_all_files_spans_every_materialized_file() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src"), file("README.md", "README.md")]);
    let ticket = ctrl.begin_expand("src").unwrap().unwrap();
    ctrl.apply_children(&ticket, vec![file("main.rs", "src/main.rs")]);

    let mut selection = SelectionStore::new();
    ctrl.toggle_all_files(&mut selection, true);
    assert_eq!(selection.count(), 2, "all materialized files, no directories");
    assert!(selection.is_selected("octo/demo", "README.md"));
    assert!(selection.is_selected("octo/demo", "src/main.rs"));
    assert!(!selection.is_selected("octo/demo", "src"));

    ctrl.toggle_all_files(&mut selection, false);
    assert_eq!(selection.count(), 0);
}

#[test]
fn clear_discards_the_tree_and_strands_outstanding_tickets() {
    let mut ctrl = loaded("octo/demo", vec![dir("src", "src")]);
    let expand = ctrl.begin_expand("src").unwrap().unwrap();

    ctrl.clear();
    assert!(ctrl.repo().is_none());
    assert!(ctrl.visible_rows().is_empty());
    assert!(!ctrl.apply_children(&expand, vec![file("a.rs", "src/a.rs")]));
}
