// tests/tasks.rs

use stylepipe_test_utils::init_tracing;
use stylepipe_test_utils::project::SassProject;

use std::error::Error;
use std::fs;
use std::sync::{Arc, Mutex};

use stylepipe::config::default_browsers;
use stylepipe::errors::StylepipeError;
use stylepipe::tasks::targets::parse_browser_list;
use stylepipe::tasks::{
    CompileTask, MinifyDetails, MinifyTask, PrefixTask, Task, TaskRegistry, COMPILE, MINIFY,
    PREFIX,
};
use stylepipe::types::CompileStyle;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn compile_resolves_variables_and_writes_output() -> TestResult {
    init_tracing();

    let project = SassProject::with_main("$c: blue; body { color: $c; }");
    let task = CompileTask::from_config(&project.config(), project.root());

    let report = task.run()?;

    assert_eq!(report.task, COMPILE);
    assert_eq!(report.output.as_deref(), Some(project.css_path().as_path()));
    let css = project.read_css().expect("compile should write css/main.css");
    assert!(css.contains("color: blue"), "got {css:?}");
    assert!(!css.contains('$'));

    Ok(())
}

#[test]
fn compile_syntax_error_completes_without_output() -> TestResult {
    init_tracing();

    let project = SassProject::with_main("body { color: red;");
    let task = CompileTask::from_config(&project.config(), project.root());

    let report = task.run()?;

    assert_eq!(report.output, None);
    assert!(project.read_css().is_none(), "no destination file on syntax error");

    Ok(())
}

#[test]
fn compile_undefined_variable_is_recovered() -> TestResult {
    let project = SassProject::with_main("body { color: $nope; }");
    let report = CompileTask::from_config(&project.config(), project.root()).run()?;

    assert_eq!(report.output, None);
    assert!(project.read_css().is_none());

    Ok(())
}

#[test]
fn compile_missing_entry_is_an_io_failure() {
    let project = SassProject::new();
    let err = CompileTask::from_config(&project.config(), project.root())
        .run()
        .unwrap_err();

    assert!(matches!(err, StylepipeError::PathIo { .. }), "got {err:?}");
}

#[test]
fn compile_resolves_imports_from_entry_dir_and_load_paths() -> TestResult {
    let project = SassProject::new();
    project.write("sass/project/_local.scss", "$pad: 4px;");
    project.write("sass/shared/_palette.scss", "$ink: red;");
    project.write_main(
        "@import \"local\";\n@import \"palette\";\np { padding: $pad; color: $ink; }",
    );

    let task = CompileTask::new(project.path("sass/project/main.scss"), project.css_path())
        .with_load_paths(vec![project.path("sass/shared")]);
    let report = task.run()?;

    assert!(report.output.is_some());
    let css = project.read_css().expect("css written");
    assert!(css.contains("padding: 4px"), "got {css:?}");
    assert!(css.contains("color: red"), "got {css:?}");

    Ok(())
}

#[test]
fn compressed_style_has_no_newlines_inside_rules() -> TestResult {
    let project = SassProject::with_main("a { b { color: red; } }");
    CompileTask::new(project.path("sass/project/main.scss"), project.css_path())
        .with_style(CompileStyle::Compressed)
        .run()?;

    let css = project.read_css().expect("css written");
    assert!(css.starts_with("a b{color:red}"), "got {css:?}");

    Ok(())
}

#[test]
fn prefix_adds_vendor_declarations_for_old_targets() -> TestResult {
    let project = SassProject::new();
    project.write("css/main.css", ".box { transform: rotate(10deg); }\n");

    let browsers = parse_browser_list(&default_browsers())?;
    let report = PrefixTask::new(project.css_path(), browsers).run()?;

    assert_eq!(report.task, PREFIX);
    let css = project.read_css().expect("css still present");
    assert!(css.contains("-webkit-transform"), "got {css:?}");
    assert!(css.contains("transform: rotate(10deg)"), "got {css:?}");
    // Readable output.
    assert!(css.contains('\n'));

    Ok(())
}

#[test]
fn prefix_is_idempotent() -> TestResult {
    let project = SassProject::new();
    project.write("css/main.css", ".box { transform: rotate(10deg); }\n");

    let browsers = parse_browser_list(&default_browsers())?;
    let task = PrefixTask::new(project.css_path(), browsers);

    task.run()?;
    task.run()?;

    let css = project.read_css().expect("css still present");
    assert_eq!(css.matches("-webkit-transform").count(), 1, "got {css:?}");

    Ok(())
}

#[test]
fn prefix_with_missing_input_is_skipped() -> TestResult {
    let project = SassProject::new();
    let browsers = parse_browser_list(&default_browsers())?;

    let report = PrefixTask::new(project.css_path(), browsers).run()?;

    assert_eq!(report.output, None);
    assert!(project.read_css().is_none());

    Ok(())
}

#[test]
fn minify_shrinks_and_reports_sizes() -> TestResult {
    let project = SassProject::new();
    let original = "body {\n  color: red;\n  margin: 0 0 0 0;\n}\n";
    project.write("css/main.css", original);

    let seen: Arc<Mutex<Vec<MinifyDetails>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let browsers = parse_browser_list(&default_browsers())?;
    let report = MinifyTask::new(project.css_path(), browsers)
        .with_reporter(move |details| sink.lock().unwrap().push(details.clone()))
        .run()?;

    assert_eq!(report.task, MINIFY);
    let css = project.read_css().expect("css still present");
    assert!(!css.contains('\n'), "got {css:?}");
    assert!(css.contains("color:red"), "got {css:?}");
    assert!(css.contains("margin:0"), "got {css:?}");
    assert!(css.len() < original.len());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].name, "main.css");
    assert_eq!(seen[0].original_size, original.len());
    assert_eq!(seen[0].minified_size, css.len());

    Ok(())
}

#[test]
fn minify_without_debug_does_not_report() -> TestResult {
    let project = SassProject::new();
    project.write("css/main.css", "a { color: red; }");

    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);

    let browsers = parse_browser_list(&["Chrome 90"])?;
    MinifyTask::new(project.css_path(), browsers)
        .with_debug(false)
        .with_reporter(move |_| *counter.lock().unwrap() += 1)
        .run()?;

    assert_eq!(*calls.lock().unwrap(), 0);
    assert_eq!(project.read_css().as_deref(), Some("a{color:red}"));

    Ok(())
}

#[tokio::test]
async fn registry_starts_named_tasks() -> TestResult {
    init_tracing();

    let project = SassProject::with_main("p { color: red; }");
    let registry = TaskRegistry::from_config(&project.config(), project.root());

    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec![COMPILE, MINIFY, PREFIX]);

    let report = registry.start(COMPILE)?.wait().await?;
    assert!(report.output.is_some());
    assert!(fs::metadata(project.css_path())?.len() > 0);

    Ok(())
}

#[tokio::test]
async fn registry_rejects_unknown_task() {
    let registry = TaskRegistry::new();
    let err = registry.start("watch").unwrap_err();
    assert!(matches!(err, StylepipeError::TaskNotFound(ref n) if n == "watch"));
}
