//! Flat-file snapshot of the last seen tournaments

use crate::error::Result;
use crate::models::Snapshot;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads and replaces the snapshot file.
///
/// The file is read once at the start of a cycle and replaced once at its
/// end; nothing else touches it.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the previous snapshot. Missing, unreadable or malformed files
    /// yield an empty snapshot.
    pub fn load(&self) -> Snapshot {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No state file at {:?}, starting empty", self.path);
                return Snapshot::new();
            }
            Err(e) => {
                warn!("Failed to read state file {:?}: {}; starting empty", self.path, e);
                return Snapshot::new();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(snapshot)) => snapshot,
            Ok(_) => {
                warn!("State file {:?} is not a JSON object; starting empty", self.path);
                Snapshot::new()
            }
            Err(e) => {
                warn!("State file {:?} is malformed: {}; starting empty", self.path, e);
                Snapshot::new()
            }
        }
    }

    /// Replace the snapshot. Written to a sibling temporary file and renamed
    /// over the target so a crash never leaves a truncated snapshot.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = self.write_file(&temp_path, snapshot) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path)?;
        debug!("Saved {} tracked tournaments to {:?}", snapshot.len(), self.path);

        Ok(())
    }

    fn write_file(&self, path: &Path, snapshot: &Snapshot) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        snapshot.serialize(&mut serializer)?;

        writer.flush()?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
