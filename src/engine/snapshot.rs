//! Engine output read from a file.
//!
//! Some engines write their sheet to disk (or a test harness dumps it there).
//! The file is re-read on every lookup. Resetting does not touch the file: it
//! records the current contents so that only output appended afterwards is
//! visible. A file that no longer starts with the recorded contents was
//! rewritten and is read in full.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{Serialized, StyleEngine};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
    /// Contents at the last reset.
    baseline: String,
}

impl Snapshot {
    /// Open a snapshot file. Fails if the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let snapshot = Self {
            path: path.as_ref().to_path_buf(),
            baseline: String::new(),
        };
        snapshot.verify()?;
        Ok(snapshot)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .map_err(|e| Error::EngineUnavailable(format!("{}: {e}", self.path.display())))
    }
}

impl StyleEngine for Snapshot {
    fn serialized(&self) -> Result<Serialized> {
        let text = self.read()?;
        let text = match text.strip_prefix(self.baseline.as_str()) {
            Some(appended) => appended.to_string(),
            None => {
                debug!("snapshot {} was rewritten since reset", self.path.display());
                text
            }
        };

        Ok(if text.contains("<style") {
            Serialized::StyleTags(text)
        } else {
            Serialized::Sheet(text)
        })
    }

    fn reset(&mut self) {
        self.baseline = fs::read_to_string(&self.path).unwrap_or_default();
        debug!(
            "snapshot {} reset at byte {}",
            self.path.display(),
            self.baseline.len()
        );
    }

    fn verify(&self) -> Result<()> {
        fs::metadata(&self.path).map_err(|e| {
            Error::EngineUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}
