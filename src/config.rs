use crate::error::{FormError, Result};
use crate::form::UpdateShape;
use crate::form::constraints::ConstraintOptions;
use crate::state::form_view::DEFAULT_TITLE;
use crate::terminal::RenderMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings read from a YAML file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub render_mode: RenderMode,
    pub update_shape: UpdateShape,
    /// Submissions are appended here as JSON lines.
    pub output: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub require_existing_resume: bool,
    pub title: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::default(),
            update_shape: UpdateShape::default(),
            output: None,
            log_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            require_existing_resume: true,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl FormConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| FormError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn constraint_options(&self) -> ConstraintOptions {
        ConstraintOptions {
            require_existing_resume: self.require_existing_resume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FormConfig;
    use crate::error::FormError;
    use crate::form::UpdateShape;
    use crate::terminal::RenderMode;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    #[test]
    fn empty_mapping_uses_defaults() {
        let config = FormConfig::parse("{}", Path::new("form.yaml")).expect("parse");
        assert_eq!(config, FormConfig::default());
        assert!(config.constraint_options().require_existing_resume);
    }

    #[test]
    fn reads_every_key() {
        let yaml = "\
render_mode: inline
update_shape: wrapped
output: submissions.jsonl
log_file: intake.log
log_level: debug
require_existing_resume: false
title: Job application
";
        let config = FormConfig::parse(yaml, Path::new("form.yaml")).expect("parse");
        assert_eq!(
            config,
            FormConfig {
                render_mode: RenderMode::Inline,
                update_shape: UpdateShape::Wrapped,
                output: Some(PathBuf::from("submissions.jsonl")),
                log_file: Some(PathBuf::from("intake.log")),
                log_level: "debug".to_string(),
                require_existing_resume: false,
                title: "Job application".to_string(),
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = FormConfig::parse("colour: blue\n", Path::new("form.yaml")).unwrap_err();
        assert!(matches!(err, FormError::Config { ref path, .. } if path == Path::new("form.yaml")));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "update_shape: wrapped").expect("write config");

        let config = FormConfig::load(file.path()).expect("load");
        assert_eq!(config.update_shape, UpdateShape::Wrapped);
        assert_eq!(config.render_mode, RenderMode::AltScreen);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FormConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, FormError::Io(_)));
    }
}
