use std::cell::Cell;

use crate::pointer::UiNodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Click,
    PointerDown,
}

/// A raw pointer event as delivered by the host
#[derive(Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Nominal target of the event
    pub target: UiNodeId,
    /// Horizontal page coordinate
    pub page_x: f64,
    /// Pressed-buttons mask
    pub buttons: u16,
    default_prevented: Cell<bool>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, target: UiNodeId, page_x: f64) -> Self {
        Self {
            kind,
            target,
            page_x,
            buttons: 0,
            default_prevented: Cell::new(false),
        }
    }

    pub fn click(target: UiNodeId, page_x: f64) -> Self {
        Self::new(PointerEventKind::Click, target, page_x)
    }

    pub fn pointer_down(target: UiNodeId, page_x: f64) -> Self {
        Self::new(PointerEventKind::PointerDown, target, page_x)
    }

    pub fn with_buttons(mut self, buttons: u16) -> Self {
        self.buttons = buttons;
        self
    }

    /// Suppress the host's default action (caret placement)
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
