use crate::shared::{ButtonState, CallKind};

/// Pending-call flags for every floor. Floors are 1-based throughout the
/// engine; the registry translates to its internal vector. An out-of-range
/// floor is a contract violation by the caller and panics.
pub struct ButtonRegistry {
    floors: Vec<ButtonState>,
}

impl ButtonRegistry {
    pub fn new(n_floors: u8) -> ButtonRegistry {
        ButtonRegistry {
            floors: vec![ButtonState::default(); n_floors as usize],
        }
    }

    fn slot(&mut self, floor: u8) -> &mut ButtonState {
        assert!(
            floor >= 1 && floor as usize <= self.floors.len(),
            "floor {} outside 1..={}",
            floor,
            self.floors.len()
        );
        &mut self.floors[floor as usize - 1]
    }

    pub fn at(&self, floor: u8) -> ButtonState {
        assert!(
            floor >= 1 && floor as usize <= self.floors.len(),
            "floor {} outside 1..={}",
            floor,
            self.floors.len()
        );
        self.floors[floor as usize - 1]
    }

    /// Set the flag for `kind` at `floor`. Setting an already set flag is a
    /// no-op, so repeated identical calls leave the registry unchanged.
    pub fn record(&mut self, floor: u8, kind: CallKind) {
        let state = self.slot(floor);
        match kind {
            CallKind::Up => state.up = true,
            CallKind::Down => state.down = true,
            CallKind::Internal => state.internal = true,
        }
    }

    pub fn clear(&mut self, floor: u8, kind: CallKind) {
        let state = self.slot(floor);
        match kind {
            CallKind::Up => state.up = false,
            CallKind::Down => state.down = false,
            CallKind::Internal => state.internal = false,
        }
    }

    pub fn clear_all(&mut self, floor: u8) {
        *self.slot(floor) = ButtonState::default();
    }

    fn any_set(state: &ButtonState) -> bool {
        state.up || state.down || state.internal
    }

    /// Any flag set at any floor strictly above `floor`.
    pub fn any_above(&self, floor: u8) -> bool {
        self.floors[floor as usize..].iter().any(Self::any_set)
    }

    /// Any flag set at any floor strictly below `floor`.
    pub fn any_below(&self, floor: u8) -> bool {
        self.floors[..floor as usize - 1].iter().any(Self::any_set)
    }

    pub fn states(&self) -> &[ButtonState] {
        &self.floors
    }
}
