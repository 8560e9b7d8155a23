// tests/config_loading.rs

use stylepipe_test_utils::builders::ConfigFileBuilder;
use stylepipe_test_utils::init_tracing;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use stylepipe::config::{
    load_and_validate, load_from_path, load_or_default, ConfigFile, RawConfigFile,
};
use stylepipe::errors::StylepipeError;
use stylepipe::types::{CompileStyle, TriggerWhileRunningBehaviour};

type TestResult = Result<(), Box<dyn Error>>;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn empty_file_yields_stock_pipeline() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("Stylepipe.toml");
    fs::write(&path, "")?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(
        cfg.config.triggered_while_running_behaviour,
        TriggerWhileRunningBehaviour::Queue
    );
    assert_eq!(cfg.config.queue_length, 1);
    assert!(!cfg.config.run_on_start);
    assert_eq!(cfg.compile.entry, Path::new("sass/project/main.scss"));
    assert_eq!(cfg.compile.output, Path::new("css/main.css"));
    assert_eq!(cfg.compile.style, CompileStyle::Expanded);
    assert_eq!(cfg.prefix.browsers.len(), 11);
    assert!(cfg.minify.debug);
    assert_eq!(cfg.watch.patterns, vec!["sass/**/*.scss".to_string()]);
    assert_eq!(cfg.watch.debounce_ms, 50);
    assert!(!cfg.watch.use_hash);

    // Both in-place stages default to the compile output.
    assert_eq!(cfg.prefix_file(), Path::new("css/main.css"));
    assert_eq!(cfg.minify_file(), Path::new("css/main.css"));

    Ok(())
}

#[test]
fn basic_demo_config_loads() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo("basic/Stylepipe.toml"))?;

    assert!(cfg.config.run_on_start);
    assert_eq!(cfg.compile.load_paths, vec![PathBuf::from("sass/partials")]);
    assert_eq!(cfg.watch.exclude, vec!["sass/**/_scratch.scss".to_string()]);
    assert!(cfg.watch.use_hash);

    // Explorer 8 and ExplorerMobile 11 share IE; the oldest wins.
    let browsers = cfg.browsers();
    assert_eq!(browsers.ie, Some(8 << 16));
    assert_eq!(browsers.chrome, Some(50 << 16));

    Ok(())
}

#[test]
fn cancel_demo_config_loads() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo("cancel.toml"))?;

    assert_eq!(
        cfg.config.triggered_while_running_behaviour,
        TriggerWhileRunningBehaviour::Cancel
    );
    assert!(!cfg.minify.debug);
    assert_eq!(cfg.watch.debounce_ms, 100);
    assert_eq!(cfg.browsers().ie, None);
    assert_eq!(cfg.browsers().chrome, Some(90 << 16));

    Ok(())
}

#[test]
fn separate_prefix_and_minify_files_are_honoured() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Stylepipe.toml");
    fs::write(
        &path,
        r#"
[compile]
output = "build/site.css"

[minify]
file = "dist/site.min.css"
"#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.prefix_file(), Path::new("build/site.css"));
    assert_eq!(cfg.minify_file(), Path::new("dist/site.min.css"));

    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Stylepipe.toml");
    fs::write(&path, "[compile]\nentyr = \"main.scss\"\n")?;

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, StylepipeError::TomlError(_)), "got {err:?}");

    Ok(())
}

#[test]
fn unknown_overlap_behaviour_is_rejected() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Stylepipe.toml");
    fs::write(
        &path,
        "[config]\ntriggered_while_running_behaviour = \"restart\"\n",
    )?;

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, StylepipeError::TomlError(_)), "got {err:?}");

    Ok(())
}

#[test]
fn zero_queue_length_is_a_config_error() {
    let err = ConfigFileBuilder::new().queue_length(0).try_build().unwrap_err();
    assert!(matches!(err, StylepipeError::ConfigError(_)), "got {err:?}");
}

#[test]
fn empty_watch_patterns_are_a_config_error() {
    let err = ConfigFileBuilder::new().watch(&[]).try_build().unwrap_err();
    assert!(matches!(err, StylepipeError::ConfigError(_)), "got {err:?}");
}

#[test]
fn invalid_glob_is_a_config_error() {
    let err = ConfigFileBuilder::new()
        .watch(&["sass/[*.scss"])
        .try_build()
        .unwrap_err();
    assert!(matches!(err, StylepipeError::ConfigError(_)), "got {err:?}");

    let err = ConfigFileBuilder::new()
        .exclude("sass/{a,b")
        .try_build()
        .unwrap_err();
    assert!(matches!(err, StylepipeError::ConfigError(_)), "got {err:?}");
}

#[test]
fn empty_entry_is_a_config_error() {
    let err = ConfigFileBuilder::new().entry("").try_build().unwrap_err();
    assert!(matches!(err, StylepipeError::ConfigError(_)), "got {err:?}");
}

#[test]
fn bad_browser_target_is_reported_with_the_target() {
    let err = ConfigFileBuilder::new()
        .browsers(&["Chrome 50", "Netscape 4"])
        .try_build()
        .unwrap_err();

    match err {
        StylepipeError::InvalidBrowserTarget { target, .. } => assert_eq!(target, "Netscape 4"),
        other => panic!("expected InvalidBrowserTarget, got {other:?}"),
    }
}

#[test]
fn empty_browser_list_is_a_config_error() {
    let err = ConfigFileBuilder::new().browsers(&[]).try_build().unwrap_err();
    assert!(matches!(err, StylepipeError::ConfigError(_)), "got {err:?}");
}

#[test]
fn missing_default_config_falls_back_to_defaults() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Stylepipe.toml");

    let cfg = load_or_default(&path, false)?;
    assert_eq!(cfg.compile.output, Path::new("css/main.css"));

    Ok(())
}

#[test]
fn missing_explicit_config_is_an_io_error() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("nope.toml");

    let err = load_or_default(&path, true).unwrap_err();
    match err {
        StylepipeError::PathIo { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected PathIo, got {other:?}"),
    }

    Ok(())
}

#[test]
fn raw_default_validates() -> TestResult {
    let cfg = ConfigFile::try_from(RawConfigFile::default())?;
    assert_eq!(cfg.browsers().chrome, Some(50 << 16));
    Ok(())
}
