// Keyboard mapping - physical keys to controller buttons

use winit::keyboard::KeyCode;

use crate::input::Buttons;

/// Key bindings for the standard controller
#[derive(Debug, Clone, Copy)]
pub struct KeyboardMapping {
    pub button_a: KeyCode,
    pub button_b: KeyCode,
    pub select: KeyCode,
    pub start: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl Default for KeyboardMapping {
    fn default() -> Self {
        KeyboardMapping {
            button_a: KeyCode::KeyX,
            button_b: KeyCode::KeyZ,
            select: KeyCode::ShiftRight,
            start: KeyCode::Enter,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
        }
    }
}

impl KeyboardMapping {
    /// The button a key maps to, if any
    pub fn button_for(&self, key: KeyCode) -> Option<Buttons> {
        match key {
            k if k == self.button_a => Some(Buttons::A),
            k if k == self.button_b => Some(Buttons::B),
            k if k == self.select => Some(Buttons::SELECT),
            k if k == self.start => Some(Buttons::START),
            k if k == self.up => Some(Buttons::UP),
            k if k == self.down => Some(Buttons::DOWN),
            k if k == self.left => Some(Buttons::LEFT),
            k if k == self.right => Some(Buttons::RIGHT),
            _ => None,
        }
    }
}

/// Track held buttons across key events
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: Buttons,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, mapping: &KeyboardMapping, key: KeyCode) {
        if let Some(button) = mapping.button_for(key) {
            self.held |= button;
        }
    }

    pub fn release(&mut self, mapping: &KeyboardMapping, key: KeyCode) {
        if let Some(button) = mapping.button_for(key) {
            self.held &= !button;
        }
    }

    pub fn held(&self) -> Buttons {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let mapping = KeyboardMapping::default();
        assert_eq!(mapping.button_for(KeyCode::KeyX), Some(Buttons::A));
        assert_eq!(mapping.button_for(KeyCode::ArrowUp), Some(Buttons::UP));
        assert_eq!(mapping.button_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_press_release_tracking() {
        let mapping = KeyboardMapping::default();
        let mut state = KeyboardState::new();

        state.press(&mapping, KeyCode::KeyX);
        state.press(&mapping, KeyCode::ArrowRight);
        assert_eq!(state.held(), Buttons::A | Buttons::RIGHT);

        state.release(&mapping, KeyCode::KeyX);
        assert_eq!(state.held(), Buttons::RIGHT);
    }
}
