//! The selection store: which files are queued for test generation.
//!
//! This is the single source of truth for selection. It is a leaf — no I/O,
//! no rendering, no knowledge of the tree. Selection is keyed by
//! `(repository, path)` string pairs, deliberately independent of whether
//! the path is currently materialized in a tree: collapsing a folder must
//! not lose the user's choices, and a later re-expansion lines checkboxes
//! back up by path equality alone.
//!
//! Mutation happens only on the event loop, so no interior locking is
//! needed. Renderers detect changes by comparing [`SelectionStore::revision`]
//! between frames instead of subscribing to callbacks.

use std::collections::{BTreeMap, BTreeSet};

/// Session-scoped set of selected files, grouped per repository.
///
/// Paths are repository-relative, so the same path string under two
/// repositories is two independent selections. Repositories with an empty
/// set are pruned immediately — `entries()` never yields them.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selected: BTreeMap<String, BTreeSet<String>>,
    revision: u64,
}

impl SelectionStore {
    /// Creates an empty store. Lives for the whole session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (`selected = true`) or removes (`selected = false`) a path.
    ///
    /// Idempotent in both directions: selecting a present path and removing
    /// an absent one are no-ops that leave the revision untouched. An unknown
    /// repository is created lazily on its first successful select. Returns
    /// `true` when membership actually changed.
    pub fn toggle(&mut self, repo: &str, path: &str, selected: bool) -> bool {
        let changed = if selected {
            self.selected
                .entry(repo.to_owned())
                .or_default()
                .insert(path.to_owned())
        } else {
            match self.selected.get_mut(repo) {
                Some(paths) => {
                    let removed = paths.remove(path);
                    if paths.is_empty() {
                        self.selected.remove(repo);
                    }
                    removed
                }
                None => false,
            }
        };
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Explicit removal, used by the generation list view. Equivalent to
    /// `toggle(repo, path, false)`.
    pub fn remove(&mut self, repo: &str, path: &str) -> bool {
        self.toggle(repo, path, false)
    }

    /// Whether the pair is currently selected.
    pub fn is_selected(&self, repo: &str, path: &str) -> bool {
        self.selected.get(repo).is_some_and(|paths| paths.contains(path))
    }

    /// Total number of selected paths across all repositories.
    ///
    /// Drives UI enablement: the generate action is disabled iff this is 0.
    pub fn count(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    /// True when nothing is selected anywhere.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Bulk select: applies `toggle(repo, path, true)` in order. Produces
    /// exactly the end state of the individual toggles.
    pub fn select_all<'a, I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (repo, path) in paths {
            self.toggle(repo, path, true);
        }
    }

    /// Clears the entire selection, all repositories at once.
    pub fn deselect_all(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.revision += 1;
        }
    }

    /// Iterates `(repository, selected paths)` pairs for rendering.
    ///
    /// Only repositories with a non-empty set are yielded (guaranteed by the
    /// pruning in `toggle`). Ordering is stable: repositories and paths both
    /// iterate in lexicographic order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.selected.iter().map(|(repo, paths)| (repo.as_str(), paths))
    }

    /// Monotonic change counter — bumped on every effective mutation.
    ///
    /// The immediate-mode render loop compares this between frames to decide
    /// whether derived widget state needs rebuilding.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
