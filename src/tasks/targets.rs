// src/tasks/targets.rs

//! Browser targets for the prefix and minify stages.
//!
//! Each entry is a browserslist query (`"Chrome 50"`, `"last 2 versions"`,
//! `"> 1%"`), resolved by `lightningcss`. The resulting [`Browsers`] holds
//! the oldest matching version per engine, which decides which prefixed
//! declarations get emitted.

use std::fmt;

use lightningcss::targets::Browsers;
use tracing::warn;

use crate::errors::{Result, StylepipeError};

/// Resolve a list of browserslist queries.
pub fn parse_browser_list<S: AsRef<str>>(targets: &[S]) -> Result<Browsers> {
    let mut queries = Vec::with_capacity(targets.len());
    for target in targets {
        let target = target.as_ref();
        if target.trim().is_empty() {
            return Err(StylepipeError::InvalidBrowserTarget {
                target: target.to_string(),
                reason: "empty query".to_string(),
            });
        }
        queries.push(desktop_trident(target));
    }

    match Browsers::from_browserslist(&queries) {
        Ok(Some(browsers)) => Ok(browsers),
        Ok(None) => {
            warn!(?queries, "browser targets match no engine with prefix data");
            Ok(Browsers::default())
        }
        Err(err) => Err(blame(targets, &queries, err)),
    }
}

/// `lightningcss` has no IE Mobile slot; it renders with desktop IE's engine.
fn desktop_trident(target: &str) -> String {
    let target = target.trim();
    match target.split_once(char::is_whitespace) {
        Some((name, rest))
            if name.eq_ignore_ascii_case("explorermobile") || name.eq_ignore_ascii_case("ie_mob") =>
        {
            format!("ie {}", rest.trim())
        }
        _ => target.to_string(),
    }
}

/// Pin a resolution failure on the first target that fails on its own.
fn blame<S: AsRef<str>>(targets: &[S], queries: &[String], err: impl fmt::Display) -> StylepipeError {
    for (target, query) in targets.iter().zip(queries) {
        if let Err(e) = Browsers::from_browserslist([query]) {
            return StylepipeError::InvalidBrowserTarget {
                target: target.as_ref().to_string(),
                reason: e.to_string(),
            };
        }
    }

    StylepipeError::InvalidBrowserTarget {
        target: queries.join(", "),
        reason: err.to_string(),
    }
}
