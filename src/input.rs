//! Input sampling
//!
//! The simulation only sees edge-triggered `InputState`s. `JumpButton` turns
//! raw key down/up events into one edge per physical press.

use crate::sim::InputState;

/// Anything the scheduler can sample once per frame
pub trait InputSource {
    fn sample(&mut self) -> InputState;
}

/// Edge detector for the jump key
#[derive(Debug, Clone, Default)]
pub struct JumpButton {
    held: bool,
    pressed_edge: bool,
}

impl JumpButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key down. Auto-repeat while held does not produce new edges.
    pub fn press(&mut self) {
        if !self.held {
            self.pressed_edge = true;
        }
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl InputSource for JumpButton {
    fn sample(&mut self) -> InputState {
        let jump_pressed = std::mem::take(&mut self.pressed_edge);
        InputState { jump_pressed }
    }
}
