// src/watch/event_handler.rs

//! Turns raw `notify` events into the relative paths that warrant a run.

use std::path::{Path, PathBuf};

use notify::Event;
use tracing::{debug, warn};

use crate::watch::hash::ContentHashes;
use crate::watch::patterns::{collect_matching_files, relative_str, WatchProfile};

/// Filters notifications down to changes of watched source files.
///
/// A path passes when:
/// 1. the event is not an access-only notification,
/// 2. it lies under the root and matches the watch profile,
/// 3. (with hashing on) its content differs from the last observation.
#[derive(Debug)]
pub struct ChangeFilter {
    root: PathBuf,
    profile: WatchProfile,
    hashes: Option<ContentHashes>,
}

impl ChangeFilter {
    pub fn new(root: impl Into<PathBuf>, profile: WatchProfile, use_hash: bool) -> Self {
        let root = root.into();
        let hashes = use_hash.then(|| {
            let mut hashes = ContentHashes::new();
            match collect_matching_files(&root, &profile) {
                Ok(files) => hashes.prime(files),
                Err(err) => warn!(%err, "could not scan source tree to prime hashes"),
            }
            hashes
        });

        Self {
            root,
            profile,
            hashes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative paths of `event` that should trigger a run.
    pub fn accept(&mut self, event: &Event) -> Vec<String> {
        if event.kind.is_access() {
            return Vec::new();
        }

        event
            .paths
            .iter()
            .filter_map(|path| self.accept_path(path))
            .collect()
    }

    pub fn accept_path(&mut self, path: &Path) -> Option<String> {
        let Some(rel) = relative_str(&self.root, path) else {
            warn!(?path, root = ?self.root, "could not relativize event path");
            return None;
        };

        if !self.profile.matches(&rel) {
            return None;
        }

        if let Some(hashes) = self.hashes.as_mut() {
            if !hashes.observe(path) {
                debug!(path = %rel, "content unchanged; ignoring notification");
                return None;
            }
        }

        debug!(path = %rel, "watched file changed");
        Some(rel)
    }
}
