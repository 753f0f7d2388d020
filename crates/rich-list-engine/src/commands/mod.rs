/*!
 * # Command Bus
 *
 * Editor actions are named by [`Command`] and dispatched through a
 * [`CommandBus`]. Any number of handlers may listen for the same command;
 * each is registered at a [`Priority`] tier.
 *
 * ## Dispatch order
 *
 * - Tiers run from [`Priority::Critical`] down to [`Priority::Editor`]
 * - Within a tier, handlers run in registration order
 * - The first handler returning [`CommandOutcome::Handled`] ends the chain
 * - An error from a handler ends the chain and is returned to the caller
 *
 * ## Teardown
 *
 * Every registration returns a [`Disposer`]. Plugins that register several
 * handlers combine them with [`Disposer::merge`] so the host holds a single
 * handle per activation.
 *
 * ```rust
 * use rich_list_engine::commands::{Command, CommandBus, CommandOutcome, Priority};
 *
 * let bus = CommandBus::new();
 * let registration = bus.register(Command::RemoveList, Priority::Low, || {
 *     Ok(CommandOutcome::Handled)
 * });
 *
 * assert_eq!(bus.dispatch(Command::RemoveList).unwrap(), CommandOutcome::Handled);
 *
 * registration.dispose();
 * assert_eq!(bus.dispatch(Command::RemoveList).unwrap(), CommandOutcome::NotHandled);
 * ```
 */

pub mod bus;
pub mod disposer;

pub use bus::{CommandBus, HandlerId};
pub use disposer::Disposer;

/// Editor commands understood by the list plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    IndentContent,
    OutdentContent,
    InsertOrderedList,
    InsertUnorderedList,
    InsertCheckList,
    RemoveList,
    InsertParagraph,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::IndentContent,
        Command::OutdentContent,
        Command::InsertOrderedList,
        Command::InsertUnorderedList,
        Command::InsertCheckList,
        Command::RemoveList,
        Command::InsertParagraph,
    ];
}

/// Ordering key for handlers of the same command. Higher tiers run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Reserved for the editor core's own default behaviour
    Editor,
    Low,
    Normal,
    High,
    Critical,
}

/// Result of a single handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Stop the chain; no lower handler sees the command
    Handled,
    /// Let the next handler run
    NotHandled,
}

impl CommandOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, CommandOutcome::Handled)
    }
}

impl From<bool> for CommandOutcome {
    fn from(handled: bool) -> Self {
        if handled {
            CommandOutcome::Handled
        } else {
            CommandOutcome::NotHandled
        }
    }
}
