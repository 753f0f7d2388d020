//! Wires list editing into an editor's command bus.

use std::rc::Rc;

use crate::commands::{Command, CommandOutcome, Disposer, Priority};
use crate::list::{EditorId, ListEditor, ListType};
use crate::pointer::PointerListenerManager;

/// Tier every list handler is registered at. Anything registered above it,
/// such as code-block indentation, gets the command first.
pub const LIST_COMMAND_PRIORITY: Priority = Priority::Low;

/// Register the list command handlers on `editor` and claim the shared
/// checklist pointer listeners.
///
/// The returned [`Disposer`] unregisters all seven handlers and releases the
/// listener claim together. Handlers hold the editor weakly, so registering
/// them on the editor's own bus does not keep it alive.
pub fn activate_list(editor: &Rc<dyn ListEditor>, listeners: &PointerListenerManager) -> Disposer {
    let editor_id = editor.id();
    let mut registrations: Vec<Disposer> = Command::ALL
        .into_iter()
        .map(|command| register_list_handler(editor, command))
        .collect();
    registrations.push(listeners.acquire().into());
    log::debug!("activated list commands for editor {editor_id:?}");

    let registrations = Disposer::merge(registrations);
    Disposer::new(move || {
        registrations.dispose();
        log::debug!("deactivated list commands for editor {editor_id:?}");
    })
}

fn register_list_handler(editor: &Rc<dyn ListEditor>, command: Command) -> Disposer {
    let editor_ref = Rc::downgrade(editor);
    editor
        .commands()
        .register(command, LIST_COMMAND_PRIORITY, move || match editor_ref.upgrade() {
            Some(editor) => run_list_command(editor.as_ref(), command),
            None => Ok(CommandOutcome::NotHandled),
        })
}

/// Indent and outdent never claim the command: other content-indent handlers
/// still need to see it. Creating or removing a list is final.
fn run_list_command(editor: &dyn ListEditor, command: Command) -> anyhow::Result<CommandOutcome> {
    match command {
        Command::IndentContent => {
            editor.indent_list()?;
            Ok(CommandOutcome::NotHandled)
        }
        Command::OutdentContent => {
            editor.outdent_list()?;
            Ok(CommandOutcome::NotHandled)
        }
        Command::InsertOrderedList => {
            editor.insert_list(ListType::Number)?;
            Ok(CommandOutcome::Handled)
        }
        Command::InsertUnorderedList => {
            editor.insert_list(ListType::Bullet)?;
            Ok(CommandOutcome::Handled)
        }
        Command::InsertCheckList => {
            editor.insert_list(ListType::Check)?;
            Ok(CommandOutcome::Handled)
        }
        Command::RemoveList => {
            editor.remove_list()?;
            Ok(CommandOutcome::Handled)
        }
        Command::InsertParagraph => Ok(editor.handle_list_insert_paragraph()?.into()),
    }
}

/// Keeps list handling bound to at most one editor at a time.
///
/// Mirrors a mount/unmount lifecycle: binding a different editor first tears
/// down the previous activation, and dropping the binding tears down the
/// current one.
pub struct ListBinding {
    listeners: PointerListenerManager,
    active: Option<(EditorId, Disposer)>,
}

impl ListBinding {
    pub fn new(listeners: PointerListenerManager) -> Self {
        Self {
            listeners,
            active: None,
        }
    }

    /// Activate list handling for `editor`. Rebinding the same editor is a no-op.
    pub fn bind(&mut self, editor: &Rc<dyn ListEditor>) {
        let editor_id = editor.id();
        if self.bound_editor() == Some(editor_id) {
            return;
        }
        self.unbind();
        self.active = Some((editor_id, activate_list(editor, &self.listeners)));
    }

    pub fn unbind(&mut self) {
        if let Some((_, activation)) = self.active.take() {
            activation.dispose();
        }
    }

    pub fn bound_editor(&self) -> Option<EditorId> {
        self.active.as_ref().map(|(editor_id, _)| *editor_id)
    }
}
