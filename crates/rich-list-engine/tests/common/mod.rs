//! A small in-memory editor used by the integration tests.
//!
//! Blocks are a flat sequence; list membership and nesting depth are stored
//! per block, which is enough to observe what the list commands do.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rich_list_engine::pointer::{Rect, TreeError};
use rich_list_engine::{
    CommandBus, DocumentTransaction, EditorId, ListEditor, ListType, NodeKey, UiArena, UiNodeId,
};

pub const ITEM_HEIGHT: f64 = 20.0;
pub const INDENT_WIDTH: f64 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub key: NodeKey,
    pub list: Option<ListType>,
    pub depth: usize,
    pub checked: bool,
}

impl Block {
    fn paragraph() -> Self {
        Self {
            key: NodeKey::new(),
            list: None,
            depth: 0,
            checked: false,
        }
    }
}

#[derive(Default)]
struct State {
    blocks: Vec<Block>,
    caret: usize,
    rendered: HashMap<UiNodeId, NodeKey>,
    fail_toggles: bool,
}

pub struct MemoryEditor {
    id: EditorId,
    bus: CommandBus,
    state: RefCell<State>,
}

impl MemoryEditor {
    /// Editor holding `paragraphs` plain paragraphs, caret in the first
    pub fn with_paragraphs(paragraphs: usize) -> Rc<Self> {
        Rc::new(Self {
            id: EditorId::new(),
            bus: CommandBus::new(),
            state: RefCell::new(State {
                blocks: (0..paragraphs).map(|_| Block::paragraph()).collect(),
                ..State::default()
            }),
        })
    }

    pub fn shared(editor: &Rc<Self>) -> Rc<dyn ListEditor> {
        editor.clone()
    }

    pub fn blocks(&self) -> Vec<Block> {
        self.state.borrow().blocks.clone()
    }

    pub fn caret(&self) -> usize {
        self.state.borrow().caret
    }

    pub fn move_caret(&self, block: usize) {
        self.state.borrow_mut().caret = block;
    }

    pub fn fail_toggles(&self) {
        self.state.borrow_mut().fail_toggles = true;
    }

    /// Append a paragraph after the caret block, as the editor core's default
    /// paragraph insertion would.
    pub fn insert_plain_paragraph(&self) {
        let mut state = self.state.borrow_mut();
        let at = (state.caret + 1).min(state.blocks.len());
        state.blocks.insert(at, Block::paragraph());
        state.caret = at;
    }

    /// Render every block under a fresh root element.
    ///
    /// List items become an element carrying the list-type marker with one
    /// child row element whose left edge is the checkbox glyph. Returns the
    /// root node and the row node of each block, in block order.
    pub fn render(
        &self,
        arena: &UiArena,
        origin_x: f64,
    ) -> Result<(UiNodeId, Vec<UiNodeId>), TreeError> {
        let mut state = self.state.borrow_mut();
        let height = ITEM_HEIGHT * state.blocks.len() as f64;
        let root = arena.add_element(None, Rect::new(origin_x, 0.0, 600.0, height))?;

        let mut rows = Vec::with_capacity(state.blocks.len());
        let mut rendered = HashMap::new();
        for (index, block) in state.blocks.iter().enumerate() {
            let left = origin_x + INDENT_WIDTH * block.depth as f64;
            let rect = Rect::new(left, ITEM_HEIGHT * index as f64, 400.0, ITEM_HEIGHT);
            let container = arena.add_element(Some(root), rect)?;
            arena.set_list_type(container, block.list)?;
            let row = arena.add_element(Some(container), rect)?;
            arena.add_text(row)?;
            rendered.insert(row, block.key);
            rows.push(row);
        }
        state.rendered = rendered;
        Ok((root, rows))
    }

    fn with_caret_block(&self, edit: impl FnOnce(&mut Block)) {
        let mut state = self.state.borrow_mut();
        let caret = state.caret;
        if let Some(block) = state.blocks.get_mut(caret) {
            edit(block);
        }
    }
}

struct MemoryTransaction<'a> {
    state: &'a mut State,
}

impl DocumentTransaction for MemoryTransaction<'_> {
    fn nearest_node(&self, ui_node: UiNodeId) -> Option<NodeKey> {
        self.state.rendered.get(&ui_node).copied()
    }

    fn is_list_item(&self, node: NodeKey) -> bool {
        self.state
            .blocks
            .iter()
            .any(|block| block.key == node && block.list.is_some())
    }

    fn toggle_checked(&mut self, node: NodeKey) -> anyhow::Result<()> {
        if self.state.fail_toggles {
            anyhow::bail!("document is read-only");
        }
        if let Some(block) = self.state.blocks.iter_mut().find(|block| block.key == node) {
            block.checked = !block.checked;
        }
        Ok(())
    }
}

impl ListEditor for MemoryEditor {
    fn id(&self) -> EditorId {
        self.id
    }

    fn commands(&self) -> &CommandBus {
        &self.bus
    }

    fn indent_list(&self) -> anyhow::Result<()> {
        self.with_caret_block(|block| {
            if block.list.is_some() {
                block.depth += 1;
            }
        });
        Ok(())
    }

    fn outdent_list(&self) -> anyhow::Result<()> {
        self.with_caret_block(|block| {
            if block.list.is_some() {
                block.depth = block.depth.saturating_sub(1);
            }
        });
        Ok(())
    }

    fn insert_list(&self, list_type: ListType) -> anyhow::Result<()> {
        self.with_caret_block(|block| block.list = Some(list_type));
        Ok(())
    }

    fn remove_list(&self) -> anyhow::Result<()> {
        self.with_caret_block(|block| {
            block.list = None;
            block.depth = 0;
            block.checked = false;
        });
        Ok(())
    }

    fn handle_list_insert_paragraph(&self) -> anyhow::Result<bool> {
        let mut state = self.state.borrow_mut();
        let caret = state.caret;
        let Some(current) = state.blocks.get(caret).cloned() else {
            return Ok(false);
        };
        if current.list.is_none() {
            return Ok(false);
        }

        state.blocks.insert(
            caret + 1,
            Block {
                key: NodeKey::new(),
                checked: false,
                ..current
            },
        );
        state.caret = caret + 1;
        Ok(true)
    }

    fn update(
        &self,
        mutation: &mut dyn FnMut(&mut dyn DocumentTransaction) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        let mut transaction = MemoryTransaction { state: &mut *state };
        mutation(&mut transaction)
    }
}
