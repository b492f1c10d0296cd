pub mod assessment;
pub mod config;
pub mod follow_up;
pub mod history;
pub mod logging;
pub mod output;
pub mod stderr_buffer;
pub mod tui;
