pub mod filesystem;
pub mod metadata;
