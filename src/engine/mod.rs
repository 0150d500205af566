pub mod buttons;
pub mod channel;
pub mod fsm;

pub mod channel_tests;

pub use channel::channel;
pub use channel::EngineHandle;
pub use channel::EventChannel;
pub use fsm::Engine;
