use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::list::ListEditor;
use crate::pointer::{UiNodeId, UiTree};

/// Maps rendered root nodes back to the editor that owns them.
///
/// Entries are weak: the registry never keeps an editor alive. The renderer
/// attaches an entry when it mounts an editor's root node and detaches it on
/// unmount.
#[derive(Default)]
pub struct OwnerRegistry {
    owners: RefCell<HashMap<UiNodeId, Weak<dyn ListEditor>>>,
}

impl OwnerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, node: UiNodeId, editor: &Rc<dyn ListEditor>) {
        self.owners.borrow_mut().insert(node, Rc::downgrade(editor));
    }

    pub fn detach(&self, node: UiNodeId) {
        self.owners.borrow_mut().remove(&node);
    }

    /// Editor registered directly on `node`, if it is still alive
    pub fn owner_of(&self, node: UiNodeId) -> Option<Rc<dyn ListEditor>> {
        self.owners.borrow().get(&node).and_then(Weak::upgrade)
    }

    /// Walk from `target` up through its ancestors and return the first owner found.
    pub fn find_editor(&self, tree: &dyn UiTree, target: UiNodeId) -> Option<Rc<dyn ListEditor>> {
        let mut node = Some(target);
        while let Some(current) = node {
            if let Some(editor) = self.owner_of(current) {
                return Some(editor);
            }
            node = tree.parent(current);
        }
        None
    }

    /// Drop entries whose editor has been dropped
    pub fn prune(&self) {
        self.owners
            .borrow_mut()
            .retain(|_, editor| editor.strong_count() > 0);
    }

    pub fn len(&self) -> usize {
        self.owners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.borrow().is_empty()
    }
}

impl std::fmt::Debug for OwnerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let owners = self.owners.borrow();
        let mut nodes: Vec<&UiNodeId> = owners.keys().collect();
        nodes.sort();
        f.debug_struct("OwnerRegistry").field("nodes", &nodes).finish()
    }
}
