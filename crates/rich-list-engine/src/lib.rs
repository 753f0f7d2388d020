pub mod commands;
pub mod list;
pub mod plugin;
pub mod pointer;


// Re-export key types for easier usage
pub use commands::{Command, CommandBus, CommandOutcome, Disposer, Priority};
pub use list::{DocumentTransaction, EditorId, ListEditor, ListType, NodeKey};
pub use plugin::{LIST_COMMAND_PRIORITY, ListBinding, activate_list};
pub use pointer::{
    CheckboxHitTest, EventListeners, OwnerRegistry, PointerContext, PointerEvent,
    PointerEventKind, PointerEventTarget, PointerListenerManager, UiArena, UiNodeId, UiTree,
};
