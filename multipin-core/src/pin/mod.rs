//! Pin entity and mode state machine

pub(crate) mod driver;
pub mod mode;
pub mod state;

pub use mode::Mode;
pub use state::Pin;
