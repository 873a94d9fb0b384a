//! Selection tracking and marquee selection.
//!
//! The [`SelectionManager`] works on anything implementing [`Selectable`];
//! nodes and edges are the two implementations, told apart by their
//! [`EntityKind`]. The shell registers shared references to its node and
//! edge collections, and drains committed changes with
//! [`SelectionManager::take_changes`].
//!
//! Marquee selection runs a small state machine: `start_selection_box`
//! enters the active state, `update_selection_box` previews the items under
//! the box by flipping their selected flags without recording a change, and
//! `end_selection_box` commits while `cancel_selection_box` restores the
//! committed flags.

use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;
use log::{debug, trace};

use linework_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use crate::{config::InteractionConfig, edge::Edge, node::Node};

/// Discriminant of selectable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Node,
    Edge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Node => "node",
            Self::Edge => "edge",
        })
    }
}

/// Identity of a selectable item. Node and edge ids live in separate namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey {
    kind: EntityKind,
    id: Id,
}

impl ItemKey {
    pub fn new(kind: EntityKind, id: impl Into<Id>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn node(id: impl Into<Id>) -> Self {
        Self::new(EntityKind::Node, id)
    }

    pub fn edge(id: impl Into<Id>) -> Self {
        Self::new(EntityKind::Edge, id)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn id(&self) -> Id {
        self.id
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Capability set shared by every selectable entity.
pub trait Selectable {
    fn kind(&self) -> EntityKind;

    fn id(&self) -> Id;

    fn key(&self) -> ItemKey {
        ItemKey::new(self.kind(), self.id())
    }

    fn select(&mut self);

    fn deselect(&mut self);

    fn is_selected(&self) -> bool;

    /// Returns true if `point` is within `tolerance` of the entity.
    fn hit_test(&self, point: Point, tolerance: f32) -> bool;

    /// Axis-aligned bounds, or `None` when the entity has no usable geometry.
    fn bounds(&self) -> Option<Bounds>;
}

/// A shared reference to a node or an edge.
///
/// Items are borrowed only for the duration of each manager call; callers
/// must not hold a mutable borrow while calling into the manager.
#[derive(Debug, Clone)]
pub enum SelectableItem {
    Node(Rc<RefCell<Node>>),
    Edge(Rc<RefCell<Edge>>),
}

impl SelectableItem {
    pub fn key(&self) -> ItemKey {
        self.with(|item| item.key())
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Node(_) => EntityKind::Node,
            Self::Edge(_) => EntityKind::Edge,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.with(|item| item.is_selected())
    }

    pub fn hit_test(&self, point: Point, tolerance: f32) -> bool {
        self.with(|item| item.hit_test(point, tolerance))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.with(|item| item.bounds())
    }

    fn set_selected(&self, selected: bool) {
        self.with_mut(|item| {
            if selected {
                item.select();
            } else {
                item.deselect();
            }
        });
    }

    fn with<R>(&self, f: impl FnOnce(&dyn Selectable) -> R) -> R {
        match self {
            Self::Node(node) => f(&*node.borrow()),
            Self::Edge(edge) => f(&*edge.borrow()),
        }
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut dyn Selectable) -> R) -> R {
        match self {
            Self::Node(node) => f(&mut *node.borrow_mut()),
            Self::Edge(edge) => f(&mut *edge.borrow_mut()),
        }
    }
}

impl From<Rc<RefCell<Node>>> for SelectableItem {
    fn from(node: Rc<RefCell<Node>>) -> Self {
        Self::Node(node)
    }
}

impl From<Rc<RefCell<Edge>>> for SelectableItem {
    fn from(edge: Rc<RefCell<Edge>>) -> Self {
        Self::Edge(edge)
    }
}

/// A committed change of the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    added: Vec<ItemKey>,
    removed: Vec<ItemKey>,
}

impl SelectionChange {
    /// Items that became selected.
    pub fn added(&self) -> &[ItemKey] {
        &self.added
    }

    /// Items that stopped being selected.
    pub fn removed(&self) -> &[ItemKey] {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Rubber-band rectangle of an active marquee drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBox {
    start: Point,
    current: Point,
}

impl SelectionBox {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn current(&self) -> Point {
        self.current
    }

    /// The box spanned by the drag start and the current pointer.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.start, self.current)
    }
}

/// Tracks which nodes and edges are selected.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use linework::{
///     node::NodeFactory,
///     selection::{ItemKey, SelectionManager},
/// };
/// use linework_core::{geometry::Point, model::NodeDraft};
///
/// let mut factory = NodeFactory::new();
/// let node = factory
///     .create_node("process", NodeDraft::new().with_position(Point::new(0.0, 0.0)))
///     .unwrap();
/// let node = Rc::new(RefCell::new(node));
///
/// let mut selection = SelectionManager::new();
/// selection.set_selectable_nodes(vec![node.clone()]);
///
/// selection.select_at_point(Point::new(10.0, 10.0), false);
/// assert!(selection.is_selected(ItemKey::node("node_1")));
/// assert_eq!(selection.take_changes().len(), 1);
/// ```
#[derive(Debug)]
pub struct SelectionManager {
    nodes: Vec<Rc<RefCell<Node>>>,
    edges: Vec<Rc<RefCell<Edge>>>,
    selected: IndexMap<ItemKey, SelectableItem>,
    selection_box: Option<SelectionBox>,
    multi_select: bool,
    hit_tolerance: f32,
    changes: Vec<SelectionChange>,
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::with_config(&InteractionConfig::default())
    }
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager using the hit tolerance and multi-selection setting of `config`.
    pub fn with_config(config: &InteractionConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            selected: IndexMap::new(),
            selection_box: None,
            multi_select: config.multi_select(),
            hit_tolerance: config.hit_tolerance(),
            changes: Vec::new(),
        }
    }

    /// Registers the nodes available to point, marquee and bulk selection.
    ///
    /// The previous collection is replaced. Already selected items stay
    /// selected until explicitly removed.
    pub fn set_selectable_nodes(&mut self, nodes: Vec<Rc<RefCell<Node>>>) {
        self.nodes = nodes;
    }

    /// Registers the edges available to point, marquee and bulk selection.
    pub fn set_selectable_edges(&mut self, edges: Vec<Rc<RefCell<Edge>>>) {
        self.edges = edges;
    }

    pub fn is_multi_select_enabled(&self) -> bool {
        self.multi_select
    }

    /// Enables or disables multi-selection.
    ///
    /// Disabling it collapses a multi-item selection to its first item, and
    /// later additive calls behave as non-additive ones.
    pub fn set_multi_select_enabled(&mut self, enabled: bool) {
        self.multi_select = enabled;
        if enabled || self.selected.len() <= 1 {
            return;
        }

        let mut change = SelectionChange::default();
        for (key, item) in self.selected.drain(1..) {
            item.set_selected(false);
            change.removed.push(key);
        }
        self.record(change);
    }

    /// Selects `item`, clearing the rest of the selection unless `add` is set.
    pub fn select(&mut self, item: impl Into<SelectableItem>, add: bool) {
        let item = item.into();
        let add = self.effective_add(add);
        let key = item.key();

        let mut change = SelectionChange::default();
        if !add {
            self.retain_only(&[key], &mut change);
        }
        if !self.selected.contains_key(&key) {
            item.set_selected(true);
            self.selected.insert(key, item);
            change.added.push(key);
        }
        self.record(change);
    }

    /// Removes `key` from the selection.
    pub fn deselect(&mut self, key: ItemKey) {
        if let Some(item) = self.selected.shift_remove(&key) {
            item.set_selected(false);
            self.record(SelectionChange {
                added: Vec::new(),
                removed: vec![key],
            });
        }
    }

    /// Flips the selection state of `item`.
    ///
    /// A selected item is deselected only when `add` is set or other items
    /// remain selected, so a plain toggle never empties the selection.
    pub fn toggle(&mut self, item: impl Into<SelectableItem>, add: bool) {
        let item = item.into();
        let add = self.effective_add(add);
        let key = item.key();

        if self.selected.contains_key(&key) {
            if add || self.selected.len() > 1 {
                self.deselect(key);
            }
        } else {
            self.select(item, add);
        }
    }

    /// Selects every item, clearing the rest of the selection unless `add` is set.
    ///
    /// Only items that were not already selected are reported as added.
    /// With multi-selection disabled only the first item is selected.
    pub fn select_multiple(&mut self, items: impl IntoIterator<Item = SelectableItem>, add: bool) {
        let add = self.effective_add(add);
        let mut items: Vec<SelectableItem> = items.into_iter().collect();
        if !self.multi_select {
            items.truncate(1);
        }

        let mut change = SelectionChange::default();
        if !add {
            let keep: Vec<ItemKey> = items.iter().map(SelectableItem::key).collect();
            self.retain_only(&keep, &mut change);
        }
        for item in items {
            let key = item.key();
            if self.selected.contains_key(&key) {
                continue;
            }
            item.set_selected(true);
            self.selected.insert(key, item);
            change.added.push(key);
        }
        self.record(change);
    }

    pub fn clear_selection(&mut self) {
        let mut change = SelectionChange::default();
        self.retain_only(&[], &mut change);
        self.record(change);
    }

    /// Selects every registered node and edge.
    pub fn select_all(&mut self) {
        let all: Vec<SelectableItem> = self.registered_items().collect();
        self.select_multiple(all, false);
    }

    /// Replaces the selection with every registered item that is not selected.
    pub fn invert_selection(&mut self) {
        let complement: Vec<SelectableItem> = self
            .registered_items()
            .filter(|item| !self.selected.contains_key(&item.key()))
            .collect();
        self.select_multiple(complement, false);
    }

    /// Selects the topmost item under `point`.
    ///
    /// Nodes are tested before edges, last registered first. With `add` the
    /// hit item is toggled; without it the hit item becomes the only
    /// selection, and a miss clears the selection.
    pub fn select_at_point(&mut self, point: Point, add: bool) -> Option<ItemKey> {
        let add = self.effective_add(add);
        let hit = self.item_at_point(point);

        match &hit {
            Some(item) if add => self.toggle(item.clone(), true),
            Some(item) => self.select(item.clone(), false),
            None if !add => self.clear_selection(),
            None => {}
        }
        hit.map(|item| item.key())
    }

    /// The topmost registered item under `point`, nodes first.
    pub fn item_at_point(&self, point: Point) -> Option<SelectableItem> {
        let tolerance = self.hit_tolerance;
        let node = self
            .nodes
            .iter()
            .rev()
            .find(|node| node.borrow().hit_test(point, tolerance))
            .map(|node| SelectableItem::Node(node.clone()));
        node.or_else(|| {
            self.edges
                .iter()
                .rev()
                .find(|edge| edge.borrow().hit_test(point, tolerance))
                .map(|edge| SelectableItem::Edge(edge.clone()))
        })
    }

    /// Starts a marquee drag at `point`, discarding any unfinished one.
    pub fn start_selection_box(&mut self, point: Point) {
        if self.selection_box.is_some() {
            self.restore_committed_flags();
        }
        trace!(point:?; "Selection box started");
        self.selection_box = Some(SelectionBox {
            start: point,
            current: point,
        });
    }

    /// Moves the marquee corner to `point` and previews the items under it.
    ///
    /// Does nothing when no drag is active. Preview flags are not recorded
    /// as selection changes.
    pub fn update_selection_box(&mut self, point: Point) {
        let Some(selection_box) = self.selection_box.as_mut() else {
            return;
        };
        selection_box.current = point;
        let area = selection_box.bounds();

        for item in self.registered_items() {
            let under_box = item.bounds().is_some_and(|bounds| bounds.intersects(area));
            let committed = self.selected.contains_key(&item.key());
            if item.is_selected() != (under_box || committed) {
                item.set_selected(under_box || committed);
            }
        }
    }

    /// Ends the marquee drag and commits the items under the box.
    ///
    /// Returns the number of items under the box, or `None` if no drag was active.
    pub fn end_selection_box(&mut self, add: bool) -> Option<usize> {
        let selection_box = self.selection_box.take()?;
        self.restore_committed_flags();

        let area = selection_box.bounds();
        let hits: Vec<SelectableItem> = self
            .registered_items()
            .filter(|item| item.bounds().is_some_and(|bounds| bounds.intersects(area)))
            .collect();
        let count = hits.len();
        debug!(hits = count, add; "Selection box finished");

        self.select_multiple(hits, add);
        Some(count)
    }

    /// Ends the marquee drag without touching the committed selection.
    pub fn cancel_selection_box(&mut self) {
        if self.selection_box.take().is_some() {
            self.restore_committed_flags();
            trace!("Selection box cancelled");
        }
    }

    pub fn selection_box(&self) -> Option<&SelectionBox> {
        self.selection_box.as_ref()
    }

    pub fn is_box_selecting(&self) -> bool {
        self.selection_box.is_some()
    }

    pub fn is_selected(&self, key: ItemKey) -> bool {
        self.selected.contains_key(&key)
    }

    /// Selected items, in selection order.
    pub fn selected_items(&self) -> impl Iterator<Item = &SelectableItem> {
        self.selected.values()
    }

    pub fn selected_keys(&self) -> Vec<ItemKey> {
        self.selected.keys().copied().collect()
    }

    pub fn selected_nodes(&self) -> Vec<Rc<RefCell<Node>>> {
        self.selected
            .values()
            .filter_map(|item| match item {
                SelectableItem::Node(node) => Some(node.clone()),
                SelectableItem::Edge(_) => None,
            })
            .collect()
    }

    pub fn selected_edges(&self) -> Vec<Rc<RefCell<Edge>>> {
        self.selected
            .values()
            .filter_map(|item| match item {
                SelectableItem::Edge(edge) => Some(edge.clone()),
                SelectableItem::Node(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drains the committed changes recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<SelectionChange> {
        std::mem::take(&mut self.changes)
    }

    /// Clears the selection, the marquee, the registered collections and
    /// pending changes, without recording a change.
    pub fn reset(&mut self) {
        if self.selection_box.take().is_some() {
            self.restore_committed_flags();
        }
        for item in self.selected.values() {
            item.set_selected(false);
        }
        self.selected.clear();
        self.nodes.clear();
        self.edges.clear();
        self.changes.clear();
    }

    fn effective_add(&self, add: bool) -> bool {
        add && self.multi_select
    }

    fn registered_items(&self) -> impl Iterator<Item = SelectableItem> + '_ {
        self.nodes
            .iter()
            .cloned()
            .map(SelectableItem::Node)
            .chain(self.edges.iter().cloned().map(SelectableItem::Edge))
    }

    /// Deselects every selected item whose key is not in `keep`.
    fn retain_only(&mut self, keep: &[ItemKey], change: &mut SelectionChange) {
        let removed: Vec<ItemKey> = self
            .selected
            .keys()
            .filter(|key| !keep.contains(key))
            .copied()
            .collect();
        for key in removed {
            if let Some(item) = self.selected.shift_remove(&key) {
                item.set_selected(false);
                change.removed.push(key);
            }
        }
    }

    /// Sets every registered item's flag back to its committed state.
    fn restore_committed_flags(&self) {
        for item in self.registered_items() {
            let committed = self.selected.contains_key(&item.key());
            if item.is_selected() != committed {
                item.set_selected(committed);
            }
        }
    }

    fn record(&mut self, change: SelectionChange) {
        if change.is_empty() {
            return;
        }
        debug!(
            added = change.added.len(),
            removed = change.removed.len(),
            selected = self.selected.len();
            "Selection changed"
        );
        self.changes.push(change);
    }
}
