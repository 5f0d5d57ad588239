pub mod learned;
pub mod preview;
pub mod quiz;
pub mod state;
pub mod values;

pub use state::{Action, Mode, SessionState};
