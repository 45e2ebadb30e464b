// File: ./src/context.rs
/*! Where eventdeck keeps its files.

Everything that touches the filesystem receives an [`AppContext`] explicitly,
either `&dyn AppContext` or [`SharedContext`]. Two implementations exist:

- [`StandardContext`] resolves platform directories through
  `directories::ProjectDirs`, or lays them out under the `--root` directory.
- [`TestContext`] owns a throwaway directory under the OS temp dir and
  deletes it on drop.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CONFIG_FILENAME: &str = "config.toml";
pub const LOG_FILENAME: &str = "eventdeck.log";

/// The two directory roles the application uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// Local event/profile files and the log.
    Data,
    Config,
}

impl DirKind {
    fn subdir(&self) -> &'static str {
        match self {
            DirKind::Data => "data",
            DirKind::Config => "config",
        }
    }
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    if !path.is_dir() {
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {:?}", path))?;
    }
    Ok(path)
}

/// Object-safe so it can be shared as `Arc<dyn AppContext>`.
pub trait AppContext: Send + Sync + std::fmt::Debug {
    /// The directory for `kind`, created on first use.
    fn dir(&self, kind: DirKind) -> Result<PathBuf>;

    fn get_data_dir(&self) -> Result<PathBuf> {
        self.dir(DirKind::Data)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.dir(DirKind::Config)
    }

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILENAME))
    }

    /// `None` when the data directory cannot be resolved; logging then stays on stderr.
    fn get_log_file_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|p| p.join(LOG_FILENAME))
    }
}

// --- Production Implementation ---

#[derive(Clone, Debug, Default)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// With `Some(root)`, data and config live in `root/data` and `root/config`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    pub fn override_root(&self) -> Option<&Path> {
        self.override_root.as_deref()
    }
}

impl AppContext for StandardContext {
    fn dir(&self, kind: DirKind) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return ensure_dir(root.join(kind.subdir()));
        }
        let proj = ProjectDirs::from("org", "eventdeck", "eventdeck")
            .ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        let base = match kind {
            DirKind::Data => proj.data_dir(),
            DirKind::Config => proj.config_dir(),
        };
        ensure_dir(base.to_path_buf())
    }
}

// --- Test Implementation ---

#[derive(Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    /// Panics if the temp directory cannot be created; only meant for tests.
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("eventdeck_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn dir(&self, kind: DirKind) -> Result<PathBuf> {
        ensure_dir(self.root.join(kind.subdir()))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Best-effort cleanup; ignore errors.
        let _ = fs::remove_dir_all(&self.root);
    }
}

pub type SharedContext = Arc<dyn AppContext>;
