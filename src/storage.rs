// Manages local file storage for calendar events.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to CalendarEvent or its nested types require incrementing
// EVENT_STORAGE_VERSION below so old files are migrated instead of misread.
use crate::context::AppContext;
use crate::model::CalendarEvent;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: Versioned wrapper around Vec<CalendarEvent>
const EVENT_STORAGE_VERSION: u32 = 1;

/// Wrapper struct for versioned local storage
#[derive(Serialize, Deserialize)]
struct EventStorageData {
    #[serde(default)]
    version: u32,
    events: Vec<CalendarEvent>,
}

pub struct LocalStorage;

impl LocalStorage {
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

    /// Runs `f` while holding an exclusive lock next to `file_path`.
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

    pub fn load_events(ctx: &dyn AppContext) -> Result<Vec<CalendarEvent>> {
        let path = ctx.get_events_path()?;
        Self::load_from_path(&path)
    }

    pub fn save_events(ctx: &dyn AppContext, events: &[CalendarEvent]) -> Result<()> {
        let path = ctx.get_events_path()?;
        Self::save_to_path(&path, events)
    }

    fn load_from_path(path: &Path) -> Result<Vec<CalendarEvent>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(path, || {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read events file '{}'", path.display()))?;

            if let Ok(data) = serde_json::from_str::<EventStorageData>(&json) {
                if data.version == EVENT_STORAGE_VERSION {
                    return Ok(data.events);
                }
                return Self::migrate_to_current(data.version, &json);
            }

            // No wrapper: a bare array written by hand or by an older build.
            log::info!(
                "Migrating {} from an unversioned file to v{}",
                path.display(),
                EVENT_STORAGE_VERSION
            );
            Self::migrate_to_current(0, &json)
        })
    }

    fn save_to_path(path: &Path, events: &[CalendarEvent]) -> Result<()> {
        Self::with_lock(path, || {
            let data = EventStorageData {
                version: EVENT_STORAGE_VERSION,
                events: events.to_vec(),
            };
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(path, json)?;
            log::debug!("Saved {} events to {}", events.len(), path.display());
            Ok(())
        })
    }

    fn migrate_to_current(old_version: u32, json: &str) -> Result<Vec<CalendarEvent>> {
        if old_version > EVENT_STORAGE_VERSION {
            return Err(anyhow::anyhow!(
                "Event storage version {} is newer than supported version {}. Please upgrade TechCal.",
                old_version,
                EVENT_STORAGE_VERSION
            ));
        }

        match old_version {
            0 => {
                let events: Vec<CalendarEvent> = serde_json::from_str(json)
                    .context("Events file is neither a versioned store nor an event list")?;
                Ok(events)
            }
            _ => Err(anyhow::anyhow!(
                "Unknown event storage version {}",
                old_version
            )),
        }
    }
}
