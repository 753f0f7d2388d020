use std::cell::{Cell, RefCell};

use thiserror::Error;

use crate::list::ListType;

/// Host-assigned identity of a rendered UI node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UiNodeId(pub u64);

/// Axis-aligned bounding box in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Read access to the rendered UI tree, plus focus
pub trait UiTree {
    fn parent(&self, node: UiNodeId) -> Option<UiNodeId>;

    /// Whether `node` is an element (as opposed to text or other leaf content)
    fn is_element(&self, node: UiNodeId) -> bool;

    /// List-type marker set by the renderer on list-item containers
    fn list_type(&self, node: UiNodeId) -> Option<ListType>;

    fn bounding_rect(&self, node: UiNodeId) -> Rect;

    fn focus(&self, node: UiNodeId);
}

#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("UI node {node:?} does not exist")]
    UnknownNode { node: UiNodeId },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NodeKind {
    Element,
    Text,
}

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<UiNodeId>,
    kind: NodeKind,
    list_type: Option<ListType>,
    rect: Rect,
}

/// In-memory [`UiTree`] for hosts without a native widget tree, and for tests.
///
/// Nodes are append-only; ids are indices into the arena.
#[derive(Debug, Default)]
pub struct UiArena {
    nodes: RefCell<Vec<NodeData>>,
    focused: Cell<Option<UiNodeId>>,
}

impl UiArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&self, parent: Option<UiNodeId>, rect: Rect) -> Result<UiNodeId, TreeError> {
        self.push(parent, NodeKind::Element, rect)
    }

    /// Text nodes have no geometry of their own
    pub fn add_text(&self, parent: UiNodeId) -> Result<UiNodeId, TreeError> {
        self.push(Some(parent), NodeKind::Text, Rect::default())
    }

    pub fn set_list_type(
        &self,
        node: UiNodeId,
        list_type: Option<ListType>,
    ) -> Result<(), TreeError> {
        let mut nodes = self.nodes.borrow_mut();
        let data = nodes
            .get_mut(Self::index(node))
            .ok_or(TreeError::UnknownNode { node })?;
        data.list_type = list_type;
        Ok(())
    }

    pub fn set_rect(&self, node: UiNodeId, rect: Rect) -> Result<(), TreeError> {
        let mut nodes = self.nodes.borrow_mut();
        let data = nodes
            .get_mut(Self::index(node))
            .ok_or(TreeError::UnknownNode { node })?;
        data.rect = rect;
        Ok(())
    }

    /// Node that last received focus
    pub fn focused(&self) -> Option<UiNodeId> {
        self.focused.get()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    fn push(
        &self,
        parent: Option<UiNodeId>,
        kind: NodeKind,
        rect: Rect,
    ) -> Result<UiNodeId, TreeError> {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = parent {
            if Self::index(parent) >= nodes.len() {
                return Err(TreeError::UnknownNode { node: parent });
            }
        }
        let id = UiNodeId(nodes.len() as u64);
        nodes.push(NodeData {
            parent,
            kind,
            list_type: None,
            rect,
        });
        Ok(id)
    }

    fn index(node: UiNodeId) -> usize {
        node.0 as usize
    }

    fn with_node<T>(&self, node: UiNodeId, f: impl FnOnce(&NodeData) -> T) -> Option<T> {
        self.nodes.borrow().get(Self::index(node)).map(f)
    }
}

impl UiTree for UiArena {
    fn parent(&self, node: UiNodeId) -> Option<UiNodeId> {
        self.with_node(node, |data| data.parent).flatten()
    }

    fn is_element(&self, node: UiNodeId) -> bool {
        self.with_node(node, |data| data.kind == NodeKind::Element)
            .unwrap_or(false)
    }

    fn list_type(&self, node: UiNodeId) -> Option<ListType> {
        self.with_node(node, |data| data.list_type).flatten()
    }

    fn bounding_rect(&self, node: UiNodeId) -> Rect {
        self.with_node(node, |data| data.rect).unwrap_or_default()
    }

    fn focus(&self, node: UiNodeId) {
        self.focused.set(Some(node));
    }
}
