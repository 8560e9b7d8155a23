// tests/watch_trigger.rs

use stylepipe_test_utils::builders::ConfigFileBuilder;
use stylepipe_test_utils::init_tracing;
use stylepipe_test_utils::project::SassProject;

use std::error::Error;
use std::fs;
use std::time::Duration;

use tempfile::tempdir;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use stylepipe::engine::{RuntimeEvent, TriggerReason};
use stylepipe::pipeline::RunStats;
use stylepipe::watch::{spawn_watcher, ChangeFilter, WatchProfile, WatchSettings};

type TestResult = Result<(), Box<dyn Error>>;

fn sass_profile() -> WatchProfile {
    WatchProfile::new(&["./sass/**/*.scss".to_string()], &["sass/vendor/**".to_string()])
        .expect("valid globs")
}

/// Collect every `RunTriggered` that arrives within `window`.
async fn collect_triggers(
    rx: &mut mpsc::Receiver<RuntimeEvent>,
    window: Duration,
) -> Vec<Vec<String>> {
    let mut triggers = Vec::new();
    while let Ok(Some(event)) = timeout(window, rx.recv()).await {
        if let RuntimeEvent::RunTriggered { paths, reason } = event {
            assert_eq!(reason, TriggerReason::FileWatch);
            triggers.push(paths);
        }
    }
    triggers
}

#[test]
fn profile_matches_sass_sources_only() {
    let profile = sass_profile();

    assert!(profile.matches("sass/project/main.scss"));
    assert!(profile.matches("sass/a/b/c/_partial.scss"));
    assert!(!profile.matches("sass/project/main.css"));
    assert!(!profile.matches("css/main.css"));
    assert!(!profile.matches("sass/vendor/reset.scss"));
}

#[test]
fn change_filter_without_hashing_accepts_every_touch() -> TestResult {
    let dir = tempdir()?;
    let file = dir.path().join("sass/project/main.scss");
    fs::create_dir_all(file.parent().unwrap())?;
    fs::write(&file, "a { color: red; }")?;

    let mut filter = ChangeFilter::new(dir.path(), sass_profile(), false);

    assert_eq!(filter.accept_path(&file).as_deref(), Some("sass/project/main.scss"));
    assert_eq!(filter.accept_path(&file).as_deref(), Some("sass/project/main.scss"));
    assert_eq!(filter.accept_path(&dir.path().join("notes.txt")), None);

    Ok(())
}

#[test]
fn change_filter_with_hashing_ignores_identical_content() -> TestResult {
    let dir = tempdir()?;
    let file = dir.path().join("sass/project/main.scss");
    fs::create_dir_all(file.parent().unwrap())?;
    fs::write(&file, "a { color: red; }")?;

    // Primed at construction: the existing content counts as seen.
    let mut filter = ChangeFilter::new(dir.path(), sass_profile(), true);
    assert_eq!(filter.accept_path(&file), None);

    fs::write(&file, "a { color: blue; }")?;
    assert!(filter.accept_path(&file).is_some());
    assert_eq!(filter.accept_path(&file), None);

    // Deleted files always count as a change.
    fs::remove_file(&file)?;
    assert!(filter.accept_path(&file).is_some());

    Ok(())
}

#[tokio::test]
async fn modifying_a_partial_sends_one_trigger() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let root = dir.path().to_path_buf();
    fs::create_dir_all(root.join("sass/project"))?;

    let (tx, mut rx) = mpsc::channel::<RuntimeEvent>(32);
    let settings = WatchSettings {
        debounce: Duration::from_millis(300),
        use_hash: false,
    };
    let _watcher = spawn_watcher(&root, sass_profile(), settings, tx)?;

    // Give the OS watcher a brief moment to start.
    sleep(Duration::from_millis(100)).await;

    tokio::fs::write(root.join("sass/project/_vars.scss"), "$c: red;").await?;

    let triggers = collect_triggers(&mut rx, Duration::from_millis(1000)).await;
    assert_eq!(triggers.len(), 1, "got {triggers:?}");
    assert_eq!(triggers[0], vec!["sass/project/_vars.scss".to_string()]);

    Ok(())
}

#[tokio::test]
async fn non_matching_files_do_not_trigger() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let root = dir.path().to_path_buf();
    fs::create_dir_all(root.join("sass/vendor"))?;
    fs::create_dir_all(root.join("css"))?;

    let (tx, mut rx) = mpsc::channel::<RuntimeEvent>(32);
    let _watcher = spawn_watcher(&root, sass_profile(), WatchSettings::default(), tx)?;

    sleep(Duration::from_millis(100)).await;

    tokio::fs::write(root.join("notes.txt"), "hello").await?;
    tokio::fs::write(root.join("css/main.css"), "a{color:red}").await?;
    tokio::fs::write(root.join("sass/vendor/reset.scss"), "* { margin: 0; }").await?;

    let triggers = collect_triggers(&mut rx, Duration::from_millis(500)).await;
    assert!(triggers.is_empty(), "got {triggers:?}");

    Ok(())
}

#[tokio::test]
async fn watch_runs_the_pipeline_once_per_change() -> TestResult {
    init_tracing();

    let project = SassProject::new();
    let cfg = ConfigFileBuilder::new().debounce_ms(300).build();
    let orchestrator = project.orchestrator_with(cfg);

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    let watching = orchestrator.watch_with_channel(tx.clone(), rx);

    let driver = async {
        sleep(Duration::from_millis(100)).await;
        project.write_main("$c: red; p { color: $c; }");

        let built = timeout(Duration::from_secs(5), async {
            while project.read_css().as_deref() != Some("p{color:red}") {
                sleep(Duration::from_millis(20)).await;
            }
        })
        .await;

        // Let any stray notification surface before stopping.
        sleep(Duration::from_millis(500)).await;
        let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        built.is_ok()
    };

    let (stats, built) = tokio::join!(watching, driver);
    let stats: RunStats = stats?;

    assert!(built, "pipeline output never appeared");
    assert_eq!(stats.started, 1);
    assert_eq!(stats.completed, 1);

    Ok(())
}

#[tokio::test]
async fn run_on_start_builds_without_a_change() -> TestResult {
    init_tracing();

    let project = SassProject::with_main("a { color: red; }");
    let cfg = ConfigFileBuilder::new().run_on_start(true).build();
    let orchestrator = project.orchestrator_with(cfg);

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    let watching = orchestrator.watch_with_channel(tx.clone(), rx);

    let driver = async {
        let built = timeout(Duration::from_secs(5), async {
            while project.read_css().as_deref() != Some("a{color:red}") {
                sleep(Duration::from_millis(20)).await;
            }
        })
        .await;
        let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        built.is_ok()
    };

    let (stats, built) = tokio::join!(watching, driver);
    let stats = stats?;

    assert!(built, "run_on_start did not build");
    assert_eq!(stats.started, 1);

    Ok(())
}
