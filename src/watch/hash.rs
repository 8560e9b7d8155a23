// src/watch/hash.rs

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use tracing::debug;

use crate::errors::{Result, StylepipeError};

/// Compute the blake3 hash of a single file.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file = File::open(path).map_err(|e| StylepipeError::io_at(path, e))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(|e| StylepipeError::io_at(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Last seen content hash per watched file, kept in memory.
///
/// Used to drop notifications that did not change any bytes (touches,
/// metadata updates, editors rewriting identical content).
#[derive(Debug, Default)]
pub struct ContentHashes {
    hashes: HashMap<PathBuf, String>,
}

impl ContentHashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache so the first notification for an unchanged file is
    /// recognised as such.
    pub fn prime<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            let path = path.as_ref();
            match compute_file_hash(path) {
                Ok(hash) => {
                    self.hashes.insert(path.to_path_buf(), hash);
                }
                Err(err) => debug!(?path, %err, "could not prime hash"),
            }
        }
        debug!(files = self.hashes.len(), "primed content hashes");
    }

    /// Record the current content of `path` and report whether it differs
    /// from what was seen before.
    ///
    /// Unreadable (e.g. deleted) files count as changed and are forgotten.
    pub fn observe(&mut self, path: &Path) -> bool {
        match compute_file_hash(path) {
            Ok(hash) => {
                let previous = self.hashes.insert(path.to_path_buf(), hash.clone());
                let changed = previous.as_deref() != Some(hash.as_str());
                debug!(?path, changed, "observed content hash");
                changed
            }
            Err(_) => {
                self.hashes.remove(path);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
