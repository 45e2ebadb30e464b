// Manages local JSON files for the offline event backend.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the Event or Profile serialization format require incrementing
// LOCAL_STORAGE_VERSION below so stale files are rejected instead of misread.
use crate::context::AppContext;
use crate::model::{Event, Profile};
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const EVENTS_FILENAME: &str = "events.json";
pub const PROFILES_FILENAME: &str = "profiles.json";

// Version history:
// - v1: events keyed by `_id`, favourites stored per profile with optional id
const LOCAL_STORAGE_VERSION: u32 = 1;

/// Wrapper struct for versioned local storage
#[derive(Serialize, Deserialize)]
struct LocalStorageData<C> {
    #[serde(default)]
    version: u32,
    items: C,
}

pub struct LocalStorage;

impl LocalStorage {
    pub fn events_path(ctx: &dyn AppContext) -> Result<PathBuf> {
        Ok(ctx.get_data_dir()?.join(EVENTS_FILENAME))
    }

    pub fn profiles_path(ctx: &dyn AppContext) -> Result<PathBuf> {
        Ok(ctx.get_data_dir()?.join(PROFILES_FILENAME))
    }

    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock next to `file_path`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    // Callers must already hold the lock.
    fn read_items<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        let json = fs::read_to_string(path)?;
        let data: LocalStorageData<Vec<T>> = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt local data file {:?}", path))?;
        if data.version != LOCAL_STORAGE_VERSION {
            anyhow::bail!(
                "Unsupported local data version {} in {:?} (expected {})",
                data.version,
                path,
                LOCAL_STORAGE_VERSION
            );
        }
        Ok(data.items)
    }

    fn write_items<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
        let data = LocalStorageData {
            version: LOCAL_STORAGE_VERSION,
            items,
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(path, json)
    }

    pub fn load_items<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        Self::with_lock(path, || Self::read_items(path))
    }

    pub fn save_items<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
        Self::with_lock(path, || Self::write_items(path, items))
    }

    /// Read-modify-write under a single lock, so concurrent writers never drop each other's changes.
    pub fn modify_items<T, F, R>(path: &Path, f: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        Self::with_lock(path, || {
            let mut items: Vec<T> = Self::read_items(path)?;
            let result = f(&mut items)?;
            Self::write_items(path, &items)?;
            Ok(result)
        })
    }

    pub fn load_events(ctx: &dyn AppContext) -> Result<Vec<Event>> {
        Self::load_items(&Self::events_path(ctx)?)
    }

    pub fn save_events(ctx: &dyn AppContext, events: &[Event]) -> Result<()> {
        Self::save_items(&Self::events_path(ctx)?, events)
    }

    pub fn load_profiles(ctx: &dyn AppContext) -> Result<Vec<Profile>> {
        Self::load_items(&Self::profiles_path(ctx)?)
    }
}
