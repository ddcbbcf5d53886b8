pub mod config;
pub mod error;
pub mod recording_info;
pub mod state;
