// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling the `watch` / `exclude` glob patterns.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Debouncing notification bursts and (optionally) ignoring
//!   notifications whose file content did not change.
//!
//! It does **not** know about stages; it only turns filesystem changes into
//! `RuntimeEvent::RunTriggered`.

pub mod event_handler;
pub mod hash;
pub mod patterns;
pub mod watcher;

pub use event_handler::ChangeFilter;
pub use hash::{compute_file_hash, ContentHashes};
pub use patterns::{collect_matching_files, relative_str, WatchProfile};
pub use watcher::{spawn_watcher, WatchSettings, WatcherHandle};
