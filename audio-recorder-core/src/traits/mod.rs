pub mod capture_engine;
pub mod recording_delegate;
pub mod storage;
