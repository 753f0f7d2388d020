use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::commands::{Command, CommandOutcome, Disposer, Priority};

type Handler = Rc<dyn Fn() -> anyhow::Result<CommandOutcome>>;

/// Identifies one registration on a [`CommandBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub u64);

struct Registration {
    id: HandlerId,
    priority: Priority,
    handler: Handler,
    /// Cleared by the disposer, so an in-flight dispatch skips the handler
    alive: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    /// Per command, kept sorted by descending priority, then registration order
    handlers: HashMap<Command, Vec<Registration>>,
}

impl Registry {
    fn insert(
        &mut self,
        command: Command,
        priority: Priority,
        handler: Handler,
        alive: Rc<Cell<bool>>,
    ) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;

        let list = self.handlers.entry(command).or_default();
        let index = list
            .iter()
            .position(|existing| existing.priority < priority)
            .unwrap_or(list.len());
        list.insert(
            index,
            Registration {
                id,
                priority,
                handler,
                alive,
            },
        );
        id
    }

    /// Detach a registration. The caller drops it once the registry is no
    /// longer borrowed, since a handler may own further disposers.
    fn remove(&mut self, command: Command, id: HandlerId) -> Option<Registration> {
        let list = self.handlers.get_mut(&command)?;
        let index = list.iter().position(|registration| registration.id == id)?;
        let removed = list.remove(index);
        if list.is_empty() {
            self.handlers.remove(&command);
        }
        Some(removed)
    }
}

/// Chain-of-responsibility dispatcher for editor commands.
///
/// The bus is single-threaded and cheap to share: clones refer to the same
/// set of registrations.
#[derive(Clone, Default)]
pub struct CommandBus {
    registry: Rc<RefCell<Registry>>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `command` at the given tier.
    ///
    /// The handler stays registered until the returned [`Disposer`] is
    /// disposed or dropped. Disposing after the bus itself is gone does nothing.
    pub fn register<F>(&self, command: Command, priority: Priority, handler: F) -> Disposer
    where
        F: Fn() -> anyhow::Result<CommandOutcome> + 'static,
    {
        let alive = Rc::new(Cell::new(true));
        let id = self
            .registry
            .borrow_mut()
            .insert(command, priority, Rc::new(handler), alive.clone());
        log::trace!("registered handler {id:?} for {command:?} at {priority:?}");

        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        Disposer::new(move || {
            alive.set(false);
            if let Some(registry) = registry.upgrade() {
                let removed = registry.borrow_mut().remove(command, id);
                drop(removed);
                log::trace!("unregistered handler {id:?} for {command:?}");
            }
        })
    }

    /// Run the handlers for `command` until one reports [`CommandOutcome::Handled`].
    ///
    /// Handlers may register or dispose handlers freely. New registrations
    /// apply from the next dispatch; a handler disposed mid-dispatch is skipped
    /// right away. Errors are returned as-is and stop the chain.
    pub fn dispatch(&self, command: Command) -> anyhow::Result<CommandOutcome> {
        let chain: Vec<(HandlerId, Handler, Rc<Cell<bool>>)> =
            match self.registry.borrow().handlers.get(&command) {
                Some(list) => list
                    .iter()
                    .map(|registration| {
                        (
                            registration.id,
                            registration.handler.clone(),
                            registration.alive.clone(),
                        )
                    })
                    .collect(),
                None => return Ok(CommandOutcome::NotHandled),
            };

        for (id, handler, alive) in chain {
            if !alive.get() {
                continue;
            }
            if handler()?.is_handled() {
                log::trace!("{command:?} handled by {id:?}");
                return Ok(CommandOutcome::Handled);
            }
        }

        Ok(CommandOutcome::NotHandled)
    }

    /// Number of live registrations for `command`
    pub fn handler_count(&self, command: Command) -> usize {
        self.registry
            .borrow()
            .handlers
            .get(&command)
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for CommandBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.borrow();
        let mut counts: Vec<(Command, usize)> = registry
            .handlers
            .iter()
            .map(|(command, list)| (*command, list.len()))
            .collect();
        counts.sort_by_key(|(command, _)| *command as u8);
        f.debug_struct("CommandBus")
            .field("handlers", &counts)
            .finish()
    }
}
