//! # Input Module
//!
//! Discrete input events, the per-tick batch they arrive in, and the
//! macroquad source that polls them from the window.

pub mod keymap;

pub use keymap::*;

use macroquad::prelude::*;
use std::collections::HashSet;

/// One discrete input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close requested
    Quit,
    /// Key went down
    KeyDown(KeyCode),
    /// Key was released
    KeyUp(KeyCode),
    /// Mouse button pressed at a screen position
    MouseDown(Vec2),
    /// Mouse button released at a screen position
    MouseUp(Vec2),
}

/// Everything that happened since the previous tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBatch {
    pub events: Vec<InputEvent>,
    /// Pointer position at poll time
    pub pointer: Vec2,
}

impl InputBatch {
    pub fn new(events: Vec<InputEvent>, pointer: Vec2) -> Self {
        Self { events, pointer }
    }
}

/// Input state carried across ticks.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub pointer: Vec2,
    pub keys_down: HashSet<KeyCode>,
}

/// Produces a finite batch of events once per tick.
pub trait InputSource {
    fn poll(&mut self) -> InputBatch;
}

/// Polls keyboard, mouse and window-close state from macroquad.
pub struct MacroquadInput {
    buttons: [MouseButton; 3],
}

impl Default for MacroquadInput {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadInput {
    /// Creates the source and stops macroquad from closing the window on its
    /// own, so the close request arrives as [`InputEvent::Quit`].
    pub fn new() -> Self {
        prevent_quit();
        Self {
            buttons: [MouseButton::Left, MouseButton::Right, MouseButton::Middle],
        }
    }
}

impl InputSource for MacroquadInput {
    fn poll(&mut self) -> InputBatch {
        let (x, y) = mouse_position();
        let pointer = vec2(x, y);
        let mut events = Vec::new();

        if is_quit_requested() {
            events.push(InputEvent::Quit);
        }
        events.extend(get_keys_pressed().into_iter().map(InputEvent::KeyDown));
        events.extend(get_keys_released().into_iter().map(InputEvent::KeyUp));
        for button in self.buttons {
            if is_mouse_button_pressed(button) {
                events.push(InputEvent::MouseDown(pointer));
            }
            if is_mouse_button_released(button) {
                events.push(InputEvent::MouseUp(pointer));
            }
        }

        InputBatch::new(events, pointer)
    }
}
