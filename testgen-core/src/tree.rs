//! Lazily materialized repository file tree with expand/collapse state.
//!
//! The tree is an arena: a flat table of nodes keyed by repository-relative
//! path, with children recorded as ordered path lists. No parent/child
//! object references exist, so there are no ownership cycles and removal is
//! a plain key delete.
//!
//! All listing I/O completes as events on the single event loop, so the
//! controller never performs a fetch itself. Instead it hands out *tickets*:
//! `begin_load_root` / `begin_expand` transition state and describe the
//! fetch the caller must issue; `apply_*` / `fail_*` consume the completion
//! and validate the ticket before touching any state. A ticket whose epoch
//! no longer matches is stale — its result is discarded, which is what makes
//! superseded root loads (last-request-wins) and post-collapse completions
//! harmless.

use std::collections::HashMap;

use crate::error::InvalidOperation;
use crate::selection::SelectionStore;
use crate::types::{EntryKind, EntrySummary};

/// Expansion state of a directory node.
///
/// Transitions: `Collapsed → Loading` (expand requested),
/// `Loading → Expanded` (children applied), `Loading → Collapsed` (fetch
/// failed), `Expanded → Collapsed` (collapse). File nodes stay `Collapsed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirState {
    #[default]
    Collapsed,
    Loading,
    Expanded,
}

/// One materialized filesystem entry.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Repository-relative path, unique within the tree. The arena key.
    pub path: String,
    /// Display name (last path segment).
    pub name: String,
    pub kind: EntryKind,
    /// Nesting depth; root entries are 0.
    pub depth: usize,
    /// Meaningful only for directories.
    pub state: DirState,
    /// `None` = children never fetched. `Some(vec)` = a complete, ordered
    /// materialization of the immediate children — never partial. Emptied
    /// back to `None` on collapse.
    pub children: Option<Vec<String>>,
    /// Bumped on every `begin_expand` so a completion for a superseded
    /// expansion of this node can be told apart and discarded.
    expand_epoch: u64,
}

impl TreeNode {
    fn from_entry(entry: EntrySummary, depth: usize) -> Self {
        Self {
            path: entry.path,
            name: entry.name,
            kind: entry.kind,
            depth,
            state: DirState::Collapsed,
            children: None,
            expand_epoch: 0,
        }
    }
}

/// The materialized tree for one repository.
#[derive(Debug)]
struct FileTree {
    repo: String,
    nodes: HashMap<String, TreeNode>,
    /// Ordered top-level paths.
    roots: Vec<String>,
}

/// Describes a pending root-listing fetch. Echoed back with the completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTicket {
    pub repo: String,
    epoch: u64,
}

/// Describes a pending directory-listing fetch. Echoed back with the
/// completion. Carries both the root epoch (so results for a tree that was
/// reloaded meanwhile are dropped) and the node's own expand epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandTicket {
    pub repo: String,
    pub path: String,
    root_epoch: u64,
    epoch: u64,
}

/// Owns the materialized tree and its synchronization with the listing API.
///
/// Selection is *not* owned here: `toggle_file` and the bulk helpers
/// delegate to the [`SelectionStore`] passed in, and collapse never touches
/// selection at all — choices must survive tree navigation.
#[derive(Debug, Default)]
pub struct FileTreeController {
    tree: Option<FileTree>,
    /// Last-request-wins token for root loads. Only the newest ticket may
    /// apply its result.
    root_epoch: u64,
    root_loading: bool,
    revision: u64,
}

impl FileTreeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) loading a repository's top-level listing.
    ///
    /// Always issues a fresh fetch: there is no cross-call cache, so served
    /// content is exactly what the backend last returned. Any earlier root
    /// load still in flight is superseded — its completion will carry a
    /// stale epoch and be discarded by [`apply_root`](Self::apply_root).
    /// The previous tree (possibly of a different repository) stays on
    /// screen until the new listing arrives.
    pub fn begin_load_root(&mut self, repo: &str) -> RootTicket {
        self.root_epoch += 1;
        self.root_loading = true;
        self.bump();
        RootTicket { repo: repo.to_owned(), epoch: self.root_epoch }
    }

    /// Applies a completed root listing. Returns `false` (and changes
    /// nothing) when the ticket was superseded by a newer `begin_load_root`.
    ///
    /// On success the tree is replaced entirely: a fresh, sorted
    /// materialization with no state carried over from the previous tree.
    pub fn apply_root(&mut self, ticket: &RootTicket, mut entries: Vec<EntrySummary>) -> bool {
        if ticket.epoch != self.root_epoch {
            return false;
        }
        sort_entries(&mut entries);
        let mut nodes = HashMap::with_capacity(entries.len());
        let mut roots = Vec::with_capacity(entries.len());
        for entry in entries {
            roots.push(entry.path.clone());
            nodes.insert(entry.path.clone(), TreeNode::from_entry(entry, 0));
        }
        self.tree = Some(FileTree { repo: ticket.repo.clone(), nodes, roots });
        self.root_loading = false;
        self.bump();
        true
    }

    /// Records a failed root load. Returns `false` for superseded tickets.
    /// The previous tree, if any, is left untouched.
    pub fn fail_root(&mut self, ticket: &RootTicket) -> bool {
        if ticket.epoch != self.root_epoch {
            return false;
        }
        self.root_loading = false;
        self.bump();
        true
    }

    /// True while the newest root listing is still in flight.
    pub fn is_root_loading(&self) -> bool {
        self.root_loading
    }

    /// The repository of the currently materialized tree, if any.
    pub fn repo(&self) -> Option<&str> {
        self.tree.as_ref().map(|t| t.repo.as_str())
    }

    /// Requests expansion of a directory node.
    ///
    /// Returns `Ok(Some(ticket))` when a fetch must be issued — the node
    /// moves `Collapsed → Loading`. Returns `Ok(None)` when the node is
    /// already `Loading` (re-entrant expands coalesce onto the in-flight
    /// fetch; at most one fetch per node) or already `Expanded`.
    ///
    /// # Errors
    ///
    /// `InvalidOperation::UnknownPath` when no such node is materialized,
    /// `InvalidOperation::NotADirectory` for file nodes.
    pub fn begin_expand(&mut self, path: &str) -> Result<Option<ExpandTicket>, InvalidOperation> {
        let root_epoch = self.root_epoch;
        let tree = self.tree_mut(path)?;
        let repo = tree.repo.clone();
        let node = tree
            .nodes
            .get_mut(path)
            .ok_or_else(|| InvalidOperation::UnknownPath { path: path.to_owned() })?;
        if node.kind != EntryKind::Dir {
            return Err(InvalidOperation::NotADirectory { path: path.to_owned() });
        }
        match node.state {
            DirState::Loading | DirState::Expanded => Ok(None),
            DirState::Collapsed => {
                node.state = DirState::Loading;
                node.expand_epoch += 1;
                let ticket = ExpandTicket {
                    repo,
                    path: node.path.clone(),
                    root_epoch,
                    epoch: node.expand_epoch,
                };
                self.bump();
                Ok(Some(ticket))
            }
        }
    }

    /// Applies a completed child listing for `ticket`.
    ///
    /// The result is discarded (returns `false`) when the tree was reloaded
    /// since the fetch began, the node no longer exists, or the node is not
    /// in the `Loading` state this ticket put it in. On success the children
    /// are sorted, inserted as a complete set, and the node becomes
    /// `Expanded`. An empty listing still counts as fetched: the node gets
    /// `Some(vec![])`, distinguishing "fetched, empty" from "never fetched".
    pub fn apply_children(&mut self, ticket: &ExpandTicket, mut entries: Vec<EntrySummary>) -> bool {
        if !self.ticket_is_current(ticket) {
            return false;
        }
        sort_entries(&mut entries);
        let tree = self.tree.as_mut().expect("ticket_is_current checked tree");
        let depth = tree.nodes[&ticket.path].depth + 1;
        let mut child_paths = Vec::with_capacity(entries.len());
        for entry in entries {
            child_paths.push(entry.path.clone());
            tree.nodes.insert(entry.path.clone(), TreeNode::from_entry(entry, depth));
        }
        let node = tree.nodes.get_mut(&ticket.path).expect("checked above");
        node.children = Some(child_paths);
        node.state = DirState::Expanded;
        self.bump();
        true
    }

    /// Records a failed child listing: the node reverts `Loading →
    /// Collapsed` with no children present. Stale tickets return `false`.
    /// Sibling nodes and the selection store are never touched.
    pub fn fail_expand(&mut self, ticket: &ExpandTicket) -> bool {
        if !self.ticket_is_current(ticket) {
            return false;
        }
        let tree = self.tree.as_mut().expect("ticket_is_current checked tree");
        let node = tree.nodes.get_mut(&ticket.path).expect("checked above");
        node.state = DirState::Collapsed;
        self.bump();
        true
    }

    /// Collapses an expanded directory, removing all descendant nodes from
    /// the arena recursively. A later expand re-fetches and, given an
    /// unchanged backend listing, reproduces the identical node set and
    /// order — which is why selection survives purely by path equality.
    ///
    /// No-op for `Collapsed` nodes and for nodes still `Loading` (their
    /// in-flight result will land normally; collapse is only offered from
    /// `Expanded`).
    ///
    /// # Errors
    ///
    /// `InvalidOperation::UnknownPath` / `NotADirectory` as for expand.
    pub fn collapse(&mut self, path: &str) -> Result<(), InvalidOperation> {
        let tree = self.tree_mut(path)?;
        let node = tree
            .nodes
            .get(path)
            .ok_or_else(|| InvalidOperation::UnknownPath { path: path.to_owned() })?;
        if node.kind != EntryKind::Dir {
            return Err(InvalidOperation::NotADirectory { path: path.to_owned() });
        }
        if node.state != DirState::Expanded {
            return Ok(());
        }
        remove_descendants(tree, path);
        let node = tree.nodes.get_mut(path).expect("checked above");
        node.state = DirState::Collapsed;
        self.bump();
        Ok(())
    }

    /// Expand/collapse toggle for the UI: expands collapsed directories and
    /// collapses expanded ones. Returns the ticket when a fetch is needed.
    pub fn toggle_dir(&mut self, path: &str) -> Result<Option<ExpandTicket>, InvalidOperation> {
        let state = self
            .node(path)
            .ok_or_else(|| InvalidOperation::UnknownPath { path: path.to_owned() })?
            .state;
        match state {
            DirState::Expanded => {
                self.collapse(path)?;
                Ok(None)
            }
            _ => self.begin_expand(path),
        }
    }

    /// Toggles selection for a file node, delegating to the store.
    ///
    /// # Errors
    ///
    /// `InvalidOperation::UnknownPath` when the path is not materialized,
    /// `InvalidOperation::NotAFile` for directory nodes — selection never
    /// contains directories.
    pub fn toggle_file(
        &self,
        selection: &mut SelectionStore,
        path: &str,
        selected: bool,
    ) -> Result<bool, InvalidOperation> {
        let tree = self
            .tree
            .as_ref()
            .ok_or_else(|| InvalidOperation::UnknownPath { path: path.to_owned() })?;
        let node = tree
            .nodes
            .get(path)
            .ok_or_else(|| InvalidOperation::UnknownPath { path: path.to_owned() })?;
        if node.kind != EntryKind::File {
            return Err(InvalidOperation::NotAFile { path: path.to_owned() });
        }
        Ok(selection.toggle(&tree.repo, path, selected))
    }

    /// Selects (or deselects) every materialized file node of the current
    /// tree. What is visible in the browser is exactly what gets toggled.
    pub fn toggle_all_files(&self, selection: &mut SelectionStore, selected: bool) {
        let Some(tree) = &self.tree else { return };
        for node in tree.nodes.values() {
            if node.kind == EntryKind::File {
                selection.toggle(&tree.repo, &node.path, selected);
            }
        }
    }

    /// Looks up a node by path.
    pub fn node(&self, path: &str) -> Option<&TreeNode> {
        self.tree.as_ref()?.nodes.get(path)
    }

    /// Depth-first flattening of the visible tree for the renderer:
    /// every root, and the children of every `Expanded` directory, in order.
    pub fn visible_rows(&self) -> Vec<&TreeNode> {
        let mut rows = Vec::new();
        let Some(tree) = &self.tree else { return rows };
        let mut stack: Vec<&str> = tree.roots.iter().rev().map(String::as_str).collect();
        while let Some(path) = stack.pop() {
            let Some(node) = tree.nodes.get(path) else { continue };
            rows.push(node);
            if node.state == DirState::Expanded {
                if let Some(children) = &node.children {
                    for child in children.iter().rev() {
                        stack.push(child);
                    }
                }
            }
        }
        rows
    }

    /// Discards the materialized tree (browser closed / session teardown).
    /// Outstanding tickets become stale via the epoch bump.
    pub fn clear(&mut self) {
        self.root_epoch += 1;
        self.root_loading = false;
        if self.tree.take().is_some() {
            self.bump();
        }
    }

    /// Monotonic change counter, same contract as
    /// [`SelectionStore::revision`](crate::selection::SelectionStore::revision).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn tree_mut(&mut self, path: &str) -> Result<&mut FileTree, InvalidOperation> {
        self.tree
            .as_mut()
            .ok_or_else(|| InvalidOperation::UnknownPath { path: path.to_owned() })
    }

    /// A child-listing completion is applicable only when nothing moved
    /// underneath it: same root generation, node still present, still
    /// `Loading`, and still the expansion this ticket started.
    fn ticket_is_current(&self, ticket: &ExpandTicket) -> bool {
        if ticket.root_epoch != self.root_epoch {
            return false;
        }
        let Some(tree) = &self.tree else { return false };
        match tree.nodes.get(&ticket.path) {
            Some(node) => node.state == DirState::Loading && node.expand_epoch == ticket.epoch,
            None => false,
        }
    }
}

/// Sibling ordering invariant: directories before files, then
/// case-insensitive lexicographic by name (ties broken case-sensitively so
/// the order is total and reproducible across re-expansions).
fn sort_entries(entries: &mut [EntrySummary]) {
    entries.sort_by(|a, b| {
        match (a.kind, b.kind) {
            (EntryKind::Dir, EntryKind::File) => std::cmp::Ordering::Less,
            (EntryKind::File, EntryKind::Dir) => std::cmp::Ordering::Greater,
            _ => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    });
}

/// Removes every descendant of `path` from the arena and clears the node's
/// child list back to "unfetched".
fn remove_descendants(tree: &mut FileTree, path: &str) {
    let Some(children) = tree.nodes.get_mut(path).and_then(|n| n.children.take()) else {
        return;
    };
    for child in children {
        remove_descendants(tree, &child);
        tree.nodes.remove(&child);
    }
}
