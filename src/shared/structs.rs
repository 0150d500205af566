/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    #[serde(rename = "standBy")]
    StandBy,
    #[serde(rename = "movingUp")]
    MovingUp,
    #[serde(rename = "movingDown")]
    MovingDown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Door {
    Open,
    Closed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Up,
    Down,
    Internal,
}

/// Pending-call flags for a single floor. The three flags are independent;
/// range legality (no up call on the top floor, no down call on the bottom
/// floor) is enforced by whoever produces the call, not here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub up: bool,
    pub down: bool,
    pub internal: bool,
}

/// Everything the engine can be asked to react to. Timeouts are produced by
/// the engine itself through the single delayed-timer slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Quit,
    UpCall(u8),
    DownCall(u8),
    InternalButton(u8),
    DoorsClosedTimeout,
    FloorReachedTimeout,
}

/// Read-only copy of the engine state, published after every dispatched
/// event. `buttons[0]` is floor 1.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub floor: u8,
    pub motion: Motion,
    pub door: Door,
    pub buttons: Vec<ButtonState>,
}

impl Snapshot {
    pub fn new(n_floors: u8) -> Snapshot {
        Snapshot {
            floor: 1,
            motion: Motion::StandBy,
            door: Door::Closed,
            buttons: vec![ButtonState::default(); n_floors as usize],
        }
    }
}
