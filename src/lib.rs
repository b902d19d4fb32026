// Library surface for headless/integration tests and reuse.
// Rendering and terminal setup stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod duration;
pub mod logging;
pub mod notify;
pub mod pomodoro;
pub mod runtime;
