// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Write-once fixture directory shared between implementations.
//!
//! Every implementation writes its encodings into the same directory and
//! sweeps the files the others left behind. Files are created exclusively
//! and never rewritten. A write that fails part way removes what it
//! created, so a failed write leaves nothing behind.

use std::fs::{self, OpenOptions, ReadDir};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::core::{HarnessError, Result};

use super::naming::{derive_type_name, fixture_file_name, is_portable_type_name};
use super::sidecar::FixtureMeta;

/// Location of a fixture written by the store.
pub type FixturePath = PathBuf;

/// Upper bound on timestamp advances while looking for a free name.
const MAX_NAME_ATTEMPTS: i64 = 1000;

/// Default origin tag of fixtures written by this crate.
pub const DEFAULT_ORIGIN: &str = "rust";

/// Default fixture extension.
pub const DEFAULT_EXTENSION: &str = "json";

/// Fixture store over one output directory.
///
/// A store without a directory is disabled: writes are no-ops returning
/// `Ok(None)` and listings are empty.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    dir: Option<PathBuf>,
    origin: String,
    extension: String,
    write_sidecars: bool,
    create_dir: bool,
}

impl FixtureStore {
    /// Store over `dir`; `None` or an empty path disables persistence.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir: dir.filter(|d| !d.as_os_str().is_empty()),
            origin: DEFAULT_ORIGIN.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            write_sidecars: true,
            create_dir: true,
        }
    }

    /// Store with persistence disabled.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_sidecars(mut self, enabled: bool) -> Self {
        self.write_sidecars = enabled;
        self
    }

    pub fn with_create_dir(mut self, enabled: bool) -> Self {
        self.create_dir = enabled;
        self
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Persist a payload as a new fixture of `type_name`.
    ///
    /// Returns the path written, or `None` when the store is disabled.
    ///
    /// # Errors
    ///
    /// `IoWriteError` when the directory or file cannot be written.
    pub fn write(&self, type_name: &str, payload: &str) -> Result<Option<FixturePath>> {
        self.write_fixture(type_name, payload, None)
    }

    /// Like [`write`](Self::write), recording the fixture the payload was
    /// re-encoded from in the sidecar.
    pub fn write_derived(
        &self,
        type_name: &str,
        payload: &str,
        derived_from: &Path,
    ) -> Result<Option<FixturePath>> {
        self.write_fixture(type_name, payload, Some(derived_from))
    }

    fn write_fixture(
        &self,
        type_name: &str,
        payload: &str,
        derived_from: Option<&Path>,
    ) -> Result<Option<FixturePath>> {
        let Some(dir) = self.dir.as_deref() else {
            debug!(type_name, "fixture store disabled, skipping write");
            return Ok(None);
        };

        if !is_portable_type_name(type_name) {
            warn!(
                type_name,
                "type name cannot be recovered from a fixture file name"
            );
        }

        self.ensure_dir(dir)?;
        let path = self.create_exclusive(dir, type_name, payload)?;

        if self.write_sidecars {
            let mut meta = FixtureMeta::new(type_name, &self.origin);
            if let Some(source) = derived_from.and_then(Path::file_name) {
                meta = meta.with_derived_from(source.to_string_lossy());
            }
            if let Err(e) = meta.store_for(&path) {
                discard(&path);
                return Err(e);
            }
        }

        debug!(path = %path.display(), type_name, "wrote fixture");
        Ok(Some(path))
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        if !self.create_dir {
            return Err(HarnessError::io_write(
                dir.display().to_string(),
                "output directory does not exist",
            ));
        }
        fs::create_dir_all(dir)
            .map_err(|e| HarnessError::io_write(dir.display().to_string(), format!("{e}")))
    }

    fn create_exclusive(&self, dir: &Path, type_name: &str, payload: &str) -> Result<PathBuf> {
        let start = Utc::now().timestamp_millis();

        for millis in start..start + MAX_NAME_ATTEMPTS {
            let path = dir.join(fixture_file_name(
                type_name,
                &self.origin,
                millis,
                &self.extension,
            ));
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(HarnessError::io_write(
                        path.display().to_string(),
                        format!("{e}"),
                    ))
                }
            };
            if let Err(e) = file.write_all(payload.as_bytes()).and_then(|()| file.flush()) {
                drop(file);
                discard(&path);
                return Err(HarnessError::io_write(path.display().to_string(), format!("{e}")));
            }
            return Ok(path);
        }

        Err(HarnessError::io_write(
            dir.display().to_string(),
            format!("no free fixture name for '{type_name}' after {MAX_NAME_ATTEMPTS} attempts"),
        ))
    }

    /// Lazily list files in the directory whose name ends with `extension`
    /// (with or without its leading dot).
    ///
    /// A disabled store or a directory that does not exist yet lists
    /// nothing. Each call reads the directory afresh.
    pub fn list(&self, extension: &str) -> Result<FixtureIter> {
        let suffix = format!(".{}", extension.trim_start_matches('.'));
        let Some(dir) = self.dir.as_deref() else {
            return Ok(FixtureIter::empty(suffix));
        };

        match fs::read_dir(dir) {
            Ok(entries) => Ok(FixtureIter {
                entries: Some(entries),
                suffix,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "fixture directory does not exist yet");
                Ok(FixtureIter::empty(suffix))
            }
            Err(e) => Err(HarnessError::io_read(
                dir.display().to_string(),
                format!("{e}"),
            )),
        }
    }

    /// Read a fixture payload.
    pub fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .map_err(|e| HarnessError::io_read(path.display().to_string(), format!("{e}")))
    }

    /// Type name of a fixture: the sidecar's tag when present, else the
    /// name derived from the file name.
    ///
    /// # Errors
    ///
    /// `InvalidFixtureName` when neither source yields a name.
    pub fn type_name_of(&self, path: &Path) -> Result<String> {
        match FixtureMeta::load_for(path) {
            Ok(Some(meta)) if !meta.type_name.is_empty() => return Ok(meta.type_name),
            Ok(_) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "ignoring unreadable sidecar"),
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| HarnessError::invalid_fixture_name(path.display().to_string()))?;
        derive_type_name(file_name)
    }
}

/// Remove a fixture whose write did not complete, so no other
/// implementation ever sweeps it.
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "could not remove incomplete fixture");
    }
}

/// Iterator over fixture paths, see [`FixtureStore::list`].
///
/// Finite and single-pass; call `list` again for a fresh listing.
pub struct FixtureIter {
    entries: Option<ReadDir>,
    suffix: String,
}

impl FixtureIter {
    fn empty(suffix: String) -> Self {
        Self {
            entries: None,
            suffix,
        }
    }
}

impl Iterator for FixtureIter {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries.as_mut()?;
        for entry in entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(HarnessError::io_read("<directory entry>", format!("{e}")))),
            };
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&self.suffix));
            if matches && path.is_file() {
                return Some(Ok(path));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "cacheconf_store_{tag}_{}_{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn test_disabled_store() {
        let store = FixtureStore::disabled();
        assert!(!store.is_enabled());
        assert!(store.write("Value", "{}").unwrap().is_none());
        assert_eq!(store.list("json").unwrap().count(), 0);

        let empty = FixtureStore::new(Some(PathBuf::new()));
        assert!(!empty.is_enabled());
    }

    #[test]
    fn test_write_twice_distinct_paths() {
        let dir = temp_dir("distinct");
        let store = FixtureStore::new(Some(dir.clone()));

        let first = store.write("Value", "{}").unwrap().unwrap();
        let second = store.write("Value", "{}").unwrap().unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with(&dir));
        assert_eq!(store.read(&first).unwrap(), "{}");
        assert_eq!(store.read(&second).unwrap(), "{}");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_list_filters_extension_and_sidecars() {
        let dir = temp_dir("list");
        let store = FixtureStore::new(Some(dir.clone()));
        store.write("Value", "{}").unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();

        let listed: Vec<_> = store.list(".json").unwrap().map(|p| p.unwrap()).collect();
        assert_eq!(listed.len(), 1);
        assert!(FixtureMeta::path_for(&listed[0]).is_file());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let store = FixtureStore::new(Some(temp_dir("missing")));
        assert_eq!(store.list("json").unwrap().count(), 0);
    }

    #[test]
    fn test_no_create_dir() {
        let dir = temp_dir("nocreate");
        let store = FixtureStore::new(Some(dir.clone())).with_create_dir(false);
        let err = store.write("Value", "{}").unwrap_err();
        assert!(matches!(err, HarnessError::IoWriteError { .. }));
        assert!(!dir.exists());
    }

    #[test]
    fn test_type_name_prefers_sidecar() {
        let dir = temp_dir("sidecar");
        fs::create_dir_all(&dir).unwrap();
        let store = FixtureStore::new(Some(dir.clone()));

        let path = dir.join("CacheRuleV2_go17.json");
        fs::write(&path, "{}").unwrap();
        assert_eq!(store.type_name_of(&path).unwrap(), "CacheRuleV");

        FixtureMeta::new("CacheRuleV2", "go").store_for(&path).unwrap();
        assert_eq!(store.type_name_of(&path).unwrap(), "CacheRuleV2");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_sidecar_leaves_no_fixture() {
        let dir = temp_dir("failed_sidecar");
        fs::create_dir_all(&dir).unwrap();
        let store = FixtureStore::new(Some(dir.clone()));

        // A directory in place of every sidecar the write could pick.
        let start = Utc::now().timestamp_millis();
        for millis in start..start + 5_000 {
            let fixture = dir.join(fixture_file_name("Value", "rust", millis, "json"));
            fs::create_dir(FixtureMeta::path_for(&fixture)).unwrap();
        }

        let err = store.write("Value", "{}").unwrap_err();
        assert!(matches!(err, HarnessError::IoWriteError { .. }));
        assert_eq!(store.list("json").unwrap().count(), 0);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_origin_and_extension() {
        let dir = temp_dir("origin");
        let store = FixtureStore::new(Some(dir.clone()))
            .with_origin("java")
            .with_extension(".json")
            .with_sidecars(false);
        let path = store.write("Value", "{}").unwrap().unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Value_java"));
        assert!(name.ends_with(".json"));
        assert!(!FixtureMeta::path_for(&path).exists());

        fs::remove_dir_all(&dir).ok();
    }
}
