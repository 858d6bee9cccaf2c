use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns true when the current process runs as root (UID 0).
/// We use this to skip permission-sensitive tests in Docker/act.
#[inline]
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: libc call has no side effects; used for testing only.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// A throwaway base directory for building gallery trees in tests.
pub struct GalleryFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl GalleryFixture {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates an empty file (and its parents) at `relative_path`.
    pub fn file(&self, relative_path: &str) -> PathBuf {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, b"").expect("Failed to write file");
        path
    }

    pub fn dir(&self, relative_path: &str) -> PathBuf {
        let path = self.root.join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    #[cfg(unix)]
    pub fn set_mode(&self, path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .expect("Failed to change permissions");
    }
}
