use std::io;
use std::path::Path;

/// Filesystem boundary for artifact files.
///
/// The session creates and deletes artifacts through this trait and
/// never touches the write path below it; the capture engine owns the
/// actual sample writes.
pub trait Storage: Send {
    /// Create an empty file at `location`, including parent directories.
    fn create_file(&self, location: &Path) -> io::Result<()>;

    /// Delete the file at `location`.
    fn delete_file(&self, location: &Path) -> io::Result<()>;

    /// Whether a file exists at `location`.
    fn exists(&self, location: &Path) -> bool;
}
