//! Host-side interfaces the list plugin drives.
//!
//! The document model and the list-mutation algorithms belong to the host
//! editor. This module only names what the plugin needs from them.

use uuid::Uuid;

use crate::commands::CommandBus;
use crate::pointer::UiNodeId;

/// Kind of list a list item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListType {
    Number,
    Bullet,
    Check,
}

/// Identity of an editor instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(pub Uuid);

impl EditorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EditorId {
    fn default() -> Self {
        Self::new()
    }
}

/// Key of a node in the host's document model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub Uuid);

impl NodeKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Document access available inside [`ListEditor::update`]
pub trait DocumentTransaction {
    /// Nearest document node rendered at or above `ui_node`
    fn nearest_node(&self, ui_node: UiNodeId) -> Option<NodeKey>;

    fn is_list_item(&self, node: NodeKey) -> bool;

    /// Flip the checked state of a list item
    fn toggle_checked(&mut self, node: NodeKey) -> anyhow::Result<()>;
}

/// An editor instance as seen by the list plugin.
///
/// Methods take `&self`: editors are shared through `Rc` between the command
/// bus, the owner registry and the host, so implementations keep their
/// document behind interior mutability. List primitives are expected to be
/// no-ops when their preconditions are not met (e.g. `remove_list` outside
/// a list); any error they do return reaches the caller of
/// [`CommandBus::dispatch`] untouched.
pub trait ListEditor {
    fn id(&self) -> EditorId;

    fn commands(&self) -> &CommandBus;

    fn indent_list(&self) -> anyhow::Result<()>;

    fn outdent_list(&self) -> anyhow::Result<()>;

    fn insert_list(&self, list_type: ListType) -> anyhow::Result<()>;

    fn remove_list(&self) -> anyhow::Result<()>;

    /// Split the current list item at the caret.
    ///
    /// Returns `true` when the caret was in a list item and the split was
    /// performed, `false` when default paragraph insertion should run.
    fn handle_list_insert_paragraph(&self) -> anyhow::Result<bool>;

    /// Run `mutation` inside a document transaction
    fn update(
        &self,
        mutation: &mut dyn FnMut(&mut dyn DocumentTransaction) -> anyhow::Result<()>,
    ) -> anyhow::Result<()>;
}
