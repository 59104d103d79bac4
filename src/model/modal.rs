//! Modal stack for overlays drawn above the current screen

/// An overlay that captures input while it is on top
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Showcase video player
    VideoPlayer { video_id: String },
    /// Keyboard shortcut reference
    Help,
}

/// Overlays rendered bottom to top; only the top one receives input.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Remove every video player, wherever it sits in the stack
    pub fn remove_players(&mut self) {
        self.stack
            .retain(|modal| !matches!(modal, Modal::VideoPlayer { .. }));
    }
}
