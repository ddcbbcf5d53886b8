use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::traits::storage::Storage;

/// `Storage` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn create_file(&self, location: &Path) -> io::Result<()> {
        if let Some(parent) = location.parent() {
            fs::create_dir_all(parent)?;
        }
        File::create(location)?;
        Ok(())
    }

    fn delete_file(&self, location: &Path) -> io::Result<()> {
        fs::remove_file(location)
    }

    fn exists(&self, location: &Path) -> bool {
        location.exists()
    }
}
