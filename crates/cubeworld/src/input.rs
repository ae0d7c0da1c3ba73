//! # Movement Input
//!
//! Snapshot of what the input collaborator reports for one frame: which
//! movement keys are held and whether input is captured (pointer lock).

/// A movement key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    /// Walk toward the view direction.
    Forward,
    /// Walk away from the view direction.
    Back,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
}

impl MoveKey {
    /// Maps a DOM-style key code (`KeyW`, `KeyS`, `KeyA`, `KeyD`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Back),
            "KeyA" => Some(Self::Left),
            "KeyD" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Held movement keys plus the capture gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct InputState {
    /// Forward key held.
    pub forward: bool,
    /// Back key held.
    pub back: bool,
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
    /// Input is captured. When false the controller does not move.
    pub captured: bool,
}

impl InputState {
    /// Captured input with no keys held.
    #[must_use]
    pub const fn captured() -> Self {
        Self {
            forward: false,
            back: false,
            left: false,
            right: false,
            captured: true,
        }
    }

    /// Builds a snapshot from held key codes. Unknown codes are ignored.
    #[must_use]
    pub fn from_keys<'a>(codes: impl IntoIterator<Item = &'a str>, captured: bool) -> Self {
        let mut state = Self {
            captured,
            ..Self::default()
        };
        for key in codes.into_iter().filter_map(MoveKey::from_code) {
            state.set(key, true);
        }
        state
    }

    /// Marks `key` as held or released.
    pub fn set(&mut self, key: MoveKey, held: bool) {
        match key {
            MoveKey::Forward => self.forward = held,
            MoveKey::Back => self.back = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
        }
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, key: MoveKey) -> Self {
        self.set(key, true);
        self
    }

    /// `(forward, right)` input axes, unit length or zero.
    ///
    /// Opposing keys cancel. Diagonals are normalized so they are not faster
    /// than straight movement.
    #[must_use]
    pub fn movement_axes(&self) -> (f32, f32) {
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        let f = axis(self.forward, self.back);
        let r = axis(self.right, self.left);

        let len = f.hypot(r);
        if len > 0.0 {
            (f / len, r / len)
        } else {
            (f, r)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposing_keys_cancel() {
        let input = InputState::captured()
            .with(MoveKey::Forward)
            .with(MoveKey::Back);
        assert_eq!(input.movement_axes(), (0.0, 0.0));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let input = InputState::captured()
            .with(MoveKey::Forward)
            .with(MoveKey::Left);
        let (f, r) = input.movement_axes();
        assert!((f.hypot(r) - 1.0).abs() < 1e-6);
        assert!(f > 0.0 && r < 0.0);
    }

    #[test]
    fn test_from_keys() {
        let input = InputState::from_keys(["KeyW", "KeyD", "Space"], true);
        assert!(input.forward && input.right && input.captured);
        assert!(!input.back && !input.left);
    }
}
