pub mod macros;
pub mod structs;

pub use structs::ButtonState;
pub use structs::CallKind;
pub use structs::Door;
pub use structs::Event;
pub use structs::Motion;
pub use structs::Snapshot;
