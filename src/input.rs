//! Keyboard input state machine
//!
//! Each control is level-triggered: its flag is "key currently held". Repeated
//! key-down events (auto-repeat) leave the flag set; there is no counting.

use crate::engine::Engine;

/// A game control driven by one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Boost,
    Shoot,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::TurnLeft,
        Control::TurnRight,
        Control::Boost,
        Control::Shoot,
    ];

    /// Map a `KeyboardEvent.key` value to its control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Control::TurnLeft),
            "ArrowRight" => Some(Control::TurnRight),
            "ArrowUp" => Some(Control::Boost),
            " " => Some(Control::Shoot),
            _ => None,
        }
    }

    /// Forward a held/released state to the engine's setter for this control
    pub fn apply<E: Engine>(self, engine: &mut E, held: bool) {
        match self {
            Control::TurnLeft => engine.set_turn_left(held),
            Control::TurnRight => engine.set_turn_right(held),
            Control::Boost => engine.set_boost(held),
            Control::Shoot => engine.set_shoot(held),
        }
    }
}

/// Held state of every control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlFlags {
    pub turn_left: bool,
    pub turn_right: bool,
    pub boost: bool,
    pub shoot: bool,
}

impl ControlFlags {
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::TurnLeft => self.turn_left,
            Control::TurnRight => self.turn_right,
            Control::Boost => self.boost,
            Control::Shoot => self.shoot,
        }
    }

    pub fn set(&mut self, control: Control, held: bool) {
        let flag = match control {
            Control::TurnLeft => &mut self.turn_left,
            Control::TurnRight => &mut self.turn_right,
            Control::Boost => &mut self.boost,
            Control::Shoot => &mut self.shoot,
        };
        *flag = held;
    }

    /// Apply a raw key event. Unrecognized keys change nothing and return `None`.
    pub fn on_key(&mut self, key: &str, down: bool) -> Option<Control> {
        let control = Control::from_key(key)?;
        self.set(control, down);
        Some(control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Control::from_key("ArrowLeft"), Some(Control::TurnLeft));
        assert_eq!(Control::from_key("ArrowRight"), Some(Control::TurnRight));
        assert_eq!(Control::from_key("ArrowUp"), Some(Control::Boost));
        assert_eq!(Control::from_key(" "), Some(Control::Shoot));
        assert_eq!(Control::from_key("ArrowDown"), None);
        assert_eq!(Control::from_key("Space"), None);
        assert_eq!(Control::from_key("arrowleft"), None);
    }

    #[test]
    fn test_repeated_down_is_idempotent() {
        let mut flags = ControlFlags::default();
        flags.on_key("ArrowUp", true);
        flags.on_key("ArrowUp", true);
        flags.on_key("ArrowUp", true);
        assert!(flags.boost);
        flags.on_key("ArrowUp", false);
        assert!(!flags.boost);
    }

    #[test]
    fn test_release_without_press() {
        let mut flags = ControlFlags::default();
        assert_eq!(flags.on_key(" ", false), Some(Control::Shoot));
        assert_eq!(flags, ControlFlags::default());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut flags = ControlFlags::default();
        flags.on_key("ArrowLeft", true);
        flags.on_key(" ", true);
        assert_eq!(
            flags,
            ControlFlags {
                turn_left: true,
                turn_right: false,
                boost: false,
                shoot: true,
            }
        );
    }

    fn known_key() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["ArrowLeft", "ArrowRight", "ArrowUp", " "])
    }

    proptest! {
        #[test]
        fn prop_last_event_wins(events in prop::collection::vec((known_key(), any::<bool>()), 0..64)) {
            let mut flags = ControlFlags::default();
            for (key, down) in &events {
                flags.on_key(key, *down);
            }
            for control in Control::ALL {
                let expected = events
                    .iter()
                    .rev()
                    .find(|(key, _)| Control::from_key(key) == Some(control))
                    .map(|(_, down)| *down)
                    .unwrap_or(false);
                prop_assert_eq!(flags.get(control), expected);
            }
        }

        #[test]
        fn prop_unknown_keys_ignored(key in "\\PC{0,12}", down in any::<bool>(), start in any::<[bool; 4]>()) {
            prop_assume!(Control::from_key(&key).is_none());
            let mut flags = ControlFlags {
                turn_left: start[0],
                turn_right: start[1],
                boost: start[2],
                shoot: start[3],
            };
            let before = flags;
            prop_assert_eq!(flags.on_key(&key, down), None);
            prop_assert_eq!(flags, before);
        }
    }
}
