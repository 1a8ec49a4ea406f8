use egui::{self, Key, Modifiers, Pos2, Vec2};
use std::collections::HashSet;

/// Edge and level state of one pointer button for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this frame
    pub pressed: bool,
    /// Currently held (true on the press frame too)
    pub down: bool,
    /// Went up this frame
    pub released: bool,
}

impl ButtonState {
    pub const IDLE: Self = Self { pressed: false, down: false, released: false };
    pub const PRESS: Self = Self { pressed: true, down: true, released: false };
    pub const HOLD: Self = Self { pressed: false, down: true, released: false };
    pub const RELEASE: Self = Self { pressed: false, down: false, released: true };
}

/// Everything the editor reads from the input devices in one frame
#[derive(Debug, Clone, Default)]
pub struct InputSample {
    // Pointer state
    pub pointer_pos: Option<Pos2>,
    pub pointer_delta: Vec2,
    pub primary: ButtonState,
    pub secondary_pressed: bool,
    pub middle_down: bool,
    pub scroll_delta: Vec2,

    // Keyboard state
    pub modifiers: Modifiers,
    pub pressed_keys: HashSet<Key>,
    pub space_down: bool,
}

impl InputSample {
    /// A pointer-only sample, mostly useful for driving the editor headless
    pub fn pointer(pos: Pos2, primary: ButtonState) -> Self {
        Self {
            pointer_pos: Some(pos),
            primary,
            ..Default::default()
        }
    }

    /// A key-press-only sample
    pub fn keys(keys: impl IntoIterator<Item = Key>, modifiers: Modifiers) -> Self {
        Self {
            pressed_keys: keys.into_iter().collect(),
            modifiers,
            ..Default::default()
        }
    }

    /// Create a new sample from egui's input for the current frame
    pub fn from_egui(ctx: &egui::Context) -> Self {
        let mut sample = Self::default();

        ctx.input(|i| {
            // Pointer state
            sample.pointer_pos = i.pointer.hover_pos();
            sample.pointer_delta = i.pointer.delta();
            sample.primary = ButtonState {
                pressed: i.pointer.primary_pressed(),
                down: i.pointer.primary_down(),
                released: i.pointer.primary_released(),
            };
            sample.secondary_pressed = i.pointer.secondary_pressed();
            sample.middle_down = i.pointer.middle_down();
            sample.scroll_delta = i.raw_scroll_delta;

            // Keyboard state
            sample.modifiers = i.modifiers;
            sample.space_down = i.key_down(Key::Space);
            sample.pressed_keys = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key { key, pressed: true, repeat: false, .. } => Some(*key),
                    _ => None,
                })
                .collect();
        });

        sample
    }

    /// Returns true if a specific key went down this frame
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Returns true if the camera should pan instead of painting
    pub fn is_panning(&self) -> bool {
        self.middle_down || (self.space_down && self.primary.down)
    }

    /// Drop the primary button edges so painting ignores this frame
    pub fn suppress_primary(&mut self) {
        self.primary = ButtonState::IDLE;
    }
}
