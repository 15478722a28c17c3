//! # Activation Tracker
//!
//! Edge detection for the single modifier key that turns a normal block break into a vein
//! mine. Raw key events may arrive at any time during a frame; the tracked state only moves
//! forward once per tick, in [`ActivationTracker::end_tick`].

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Represents the state of the modifier key across two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyTransition {
    /// Key is not pressed
    #[default]
    NotPressed,
    /// Key was just pressed this tick
    Pressed,
    /// Key has been held down for multiple ticks
    Held,
    /// Key was just released this tick
    Released,
}

impl KeyTransition {
    /// Determines if the key is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, KeyTransition::Pressed | KeyTransition::Held)
    }

    /// Determines if the key was just pressed or released this tick
    pub fn is_edge(&self) -> bool {
        matches!(self, KeyTransition::Pressed | KeyTransition::Released)
    }

    /// Derives the transition from the previous and current raw states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => KeyTransition::Pressed,
            (true, true) => KeyTransition::Held,
            (true, false) => KeyTransition::Released,
            (false, false) => KeyTransition::NotPressed,
        }
    }
}

/// Tracks the configured activation key.
///
/// Key events update the "new" raw state immediately; `end_tick` compares it with the
/// state from the previous tick, publishes the resulting [`KeyTransition`] and moves the
/// new state into the old one.
#[derive(Debug)]
pub struct ActivationTracker {
    key: KeyCode,
    pressed_old: bool,
    pressed_new: bool,
    transition: KeyTransition,
}

impl ActivationTracker {
    /// Creates a tracker for `key`, initially released.
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            pressed_old: false,
            pressed_new: false,
            transition: KeyTransition::NotPressed,
        }
    }

    /// The key this tracker listens to.
    pub fn key(&self) -> KeyCode {
        self.key
    }

    /// Processes a window event and updates the raw key state.
    ///
    /// Only keyboard input for the tracked key is considered. Losing window focus counts
    /// as a release so the modifier cannot get stuck down.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } if *key == self.key => {
                self.set_pressed(*state == ElementState::Pressed);
            }
            WindowEvent::Focused(false) => self.set_pressed(false),
            _ => {}
        }
    }

    /// Sets the raw key state directly, for hosts with their own input layer.
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed_new = pressed;
    }

    /// Advances the tracker by one tick.
    ///
    /// # Returns
    /// `Some(held)` if the key changed state since the previous tick, `None` otherwise
    pub fn end_tick(&mut self) -> Option<bool> {
        self.transition = KeyTransition::from_raw_states(self.pressed_old, self.pressed_new);
        self.pressed_old = self.pressed_new;

        self.transition
            .is_edge()
            .then(|| self.transition.is_active())
    }

    /// Returns `true` while the modifier is held, as of the last tick.
    pub fn is_held(&self) -> bool {
        self.transition.is_active()
    }

    pub fn transition(&self) -> KeyTransition {
        self.transition
    }
}
