use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::commands::Disposer;
use crate::list::DocumentTransaction;
use crate::pointer::{
    CheckboxHitTest, OwnerRegistry, PointerEvent, PointerEventKind, UiNodeId, UiTree,
};

pub type PointerListener = Rc<dyn Fn(&PointerEvent) -> anyhow::Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// The host surface that global pointer listeners are attached to
pub trait PointerEventTarget {
    fn add_listener(&self, kind: PointerEventKind, listener: PointerListener) -> ListenerId;

    fn remove_listener(&self, kind: PointerEventKind, id: ListenerId);
}

/// In-memory [`PointerEventTarget`] that delivers events with [`EventListeners::emit`].
#[derive(Default)]
pub struct EventListeners {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(PointerEventKind, ListenerId, PointerListener)>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener of its kind, in attachment order.
    ///
    /// Stops at and returns the first listener error.
    pub fn emit(&self, event: &PointerEvent) -> anyhow::Result<()> {
        let matching: Vec<PointerListener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(kind, _, _)| *kind == event.kind)
            .map(|(_, _, listener)| listener.clone())
            .collect();

        for listener in matching {
            listener(event)?;
        }
        Ok(())
    }

    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(listener_kind, _, _)| *listener_kind == kind)
            .count()
    }
}

impl PointerEventTarget for EventListeners {
    fn add_listener(&self, kind: PointerEventKind, listener: PointerListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((kind, id, listener));
        id
    }

    fn remove_listener(&self, kind: PointerEventKind, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(listener_kind, listener_id, _)| {
                !(*listener_kind == kind && *listener_id == id)
            });
    }
}

/// Everything the checklist listeners need to interpret an event
pub struct PointerContext {
    tree: Rc<dyn UiTree>,
    owners: Rc<OwnerRegistry>,
    hit_test: CheckboxHitTest,
}

impl PointerContext {
    pub fn new(tree: Rc<dyn UiTree>, owners: Rc<OwnerRegistry>, hit_test: CheckboxHitTest) -> Self {
        Self {
            tree,
            owners,
            hit_test,
        }
    }

    pub fn owners(&self) -> &Rc<OwnerRegistry> {
        &self.owners
    }

    pub fn hit_test(&self) -> &CheckboxHitTest {
        &self.hit_test
    }

    /// Toggle the checklist item whose glyph was clicked.
    ///
    /// Events that miss the glyph, or land outside any editor, are ignored.
    pub fn handle_click(&self, event: &PointerEvent) -> anyhow::Result<()> {
        if !self.hit_test.accepts(self.tree.as_ref(), event) {
            return Ok(());
        }
        let Some(editor) = self.owners.find_editor(self.tree.as_ref(), event.target) else {
            return Ok(());
        };

        let target: UiNodeId = event.target;
        let tree = self.tree.clone();
        editor.update(&mut |document: &mut dyn DocumentTransaction| {
            let Some(node) = document.nearest_node(target) else {
                return Ok(());
            };
            if document.is_list_item(node) {
                tree.focus(target);
                document.toggle_checked(node)?;
            }
            Ok(())
        })
    }

    /// Keep the caret where it is when the press lands on a checkbox glyph.
    /// The toggle itself happens on the following click.
    pub fn handle_pointer_down(&self, event: &PointerEvent) {
        if self.hit_test.accepts(self.tree.as_ref(), event) {
            event.prevent_default();
        }
    }
}

struct ManagerState {
    target: Rc<dyn PointerEventTarget>,
    context: Rc<PointerContext>,
    count: Cell<usize>,
    attached: Cell<Option<(ListenerId, ListenerId)>>,
}

impl ManagerState {
    fn acquire(&self) {
        let count = self.count.get();
        self.count.set(count + 1);
        if count > 0 {
            return;
        }

        let click_context = self.context.clone();
        let click = self.target.add_listener(
            PointerEventKind::Click,
            Rc::new(move |event: &PointerEvent| click_context.handle_click(event)),
        );
        let down_context = self.context.clone();
        let pointer_down = self.target.add_listener(
            PointerEventKind::PointerDown,
            Rc::new(move |event: &PointerEvent| {
                down_context.handle_pointer_down(event);
                Ok(())
            }),
        );
        self.attached.set(Some((click, pointer_down)));
        log::debug!("attached checklist pointer listeners");
    }

    fn release(&self) {
        let count = self.count.get().saturating_sub(1);
        self.count.set(count);
        if count > 0 {
            return;
        }

        if let Some((click, pointer_down)) = self.attached.take() {
            self.target.remove_listener(PointerEventKind::Click, click);
            self.target
                .remove_listener(PointerEventKind::PointerDown, pointer_down);
            log::debug!("detached checklist pointer listeners");
        }
    }
}

/// Shares one pair of click / pointer-down listeners between all editors.
///
/// Create one manager at the application root and hand it to every
/// activation. The first outstanding [`ListenerGuard`] attaches the listeners
/// to the event target; releasing the last one detaches them.
#[derive(Clone)]
pub struct PointerListenerManager {
    state: Rc<ManagerState>,
}

impl PointerListenerManager {
    pub fn new(target: Rc<dyn PointerEventTarget>, context: PointerContext) -> Self {
        Self {
            state: Rc::new(ManagerState {
                target,
                context: Rc::new(context),
                count: Cell::new(0),
                attached: Cell::new(None),
            }),
        }
    }

    pub fn acquire(&self) -> ListenerGuard {
        self.state.acquire();
        ListenerGuard {
            state: self.state.clone(),
        }
    }

    /// Number of outstanding guards
    pub fn active_count(&self) -> usize {
        self.state.count.get()
    }

    pub fn is_attached(&self) -> bool {
        self.state.attached.get().is_some()
    }

    pub fn context(&self) -> &PointerContext {
        &self.state.context
    }
}

/// Outstanding claim on the shared pointer listeners, released on drop
#[must_use = "dropping a ListenerGuard releases the shared pointer listeners"]
pub struct ListenerGuard {
    state: Rc<ManagerState>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.state.release();
    }
}

impl From<ListenerGuard> for Disposer {
    fn from(guard: ListenerGuard) -> Self {
        Disposer::new(move || drop(guard))
    }
}
