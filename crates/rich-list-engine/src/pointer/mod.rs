/*!
 * # Checklist Pointer Handling
 *
 * Clicking a checklist item's checkbox glyph toggles the item without moving
 * the caret. Two global listeners cooperate for each gesture:
 *
 * - **pointer-down** on a glyph calls [`PointerEvent::prevent_default`] so the
 *   host does not place the caret
 * - **click** on a glyph resolves the owning editor and toggles the list item
 *   inside a document transaction
 *
 * ## Hit testing
 *
 * [`CheckboxHitTest`] accepts an event when its target is an element whose
 * parent is marked [`ListType::Check`](crate::list::ListType::Check) and the
 * pointer lies strictly inside the glyph band at the target's left edge. A
 * non-zero pressed-buttons mask skips the geometry check (voice control).
 *
 * ## Sharing listeners
 *
 * [`PointerListenerManager`] is created once per application and shared by
 * every editor. It counts outstanding [`ListenerGuard`]s and keeps exactly one
 * pair of listeners attached while any guard is alive.
 *
 * ## Finding the editor
 *
 * [`OwnerRegistry`] maps rendered root nodes to their editors through weak
 * references. A click walks up from its target until it finds a registered
 * node; clicks outside every editor are ignored.
 */

pub mod event;
pub mod listeners;
pub mod owners;
pub mod tree;

pub use event::{PointerEvent, PointerEventKind};
pub use hit_test::{CheckboxHitTest, DEFAULT_GLYPH_WIDTH};
pub use listeners::{
    EventListeners, ListenerGuard, ListenerId, PointerContext, PointerEventTarget,
    PointerListener, PointerListenerManager,
};
pub use owners::OwnerRegistry;
pub use tree::{Rect, TreeError, UiArena, UiNodeId, UiTree};
