//! Scratch SASS project in a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use stylepipe::config::ConfigFile;
use stylepipe::orchestrator::Orchestrator;

use crate::builders::ConfigFileBuilder;

pub const MAIN_SCSS: &str = "sass/project/main.scss";
pub const MAIN_CSS: &str = "css/main.css";

/// A temp directory laid out like the stock project:
/// `sass/project/main.scss` in, `css/main.css` out.
pub struct SassProject {
    dir: TempDir,
}

impl SassProject {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp project dir");
        fs::create_dir_all(dir.path().join("sass/project")).expect("create sass dir");
        Self { dir }
    }

    /// Project with `main.scss` already written.
    pub fn with_main(contents: &str) -> Self {
        let project = Self::new();
        project.write_main(contents);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write project file");
        path
    }

    pub fn write_main(&self, contents: &str) -> PathBuf {
        self.write(MAIN_SCSS, contents)
    }

    pub fn css_path(&self) -> PathBuf {
        self.path(MAIN_CSS)
    }

    /// Contents of `css/main.css`, or `None` if it was never written.
    pub fn read_css(&self) -> Option<String> {
        fs::read_to_string(self.css_path()).ok()
    }

    pub fn config(&self) -> ConfigFile {
        ConfigFileBuilder::new().build()
    }

    pub fn orchestrator(&self) -> Orchestrator {
        self.orchestrator_with(self.config())
    }

    pub fn orchestrator_with(&self, cfg: ConfigFile) -> Orchestrator {
        Orchestrator::new(cfg, self.root())
    }
}

impl Default for SassProject {
    fn default() -> Self {
        Self::new()
    }
}
