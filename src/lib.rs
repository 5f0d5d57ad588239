// Library target: the catalog, the session reducer and configuration.
// The binary entry point (main.rs) owns the terminal and the widgets and
// drives everything here through `SessionState::apply`.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod session;
