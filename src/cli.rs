use crate::config::FormConfig;
use crate::error::Result;
use crate::form::UpdateShape;
use crate::terminal::RenderMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "intake", version, about = "Fill in an application form in the terminal")]
pub struct Cli {
    /// YAML settings file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Render below the prompt instead of on the alternate screen.
    #[arg(long)]
    pub inline: bool,

    /// Append each submission to this file as a JSON line.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Store edited values as one-element lists.
    #[arg(long)]
    pub wrapped_values: bool,

    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `intake_form=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Reads the config file, if any, and layers the flags on top.
    pub fn resolve_config(&self) -> Result<FormConfig> {
        let base = match &self.config {
            Some(path) => FormConfig::load(path)?,
            None => FormConfig::default(),
        };
        Ok(self.apply(base))
    }

    pub fn apply(&self, mut config: FormConfig) -> FormConfig {
        if self.inline {
            config.render_mode = RenderMode::Inline;
        }
        if self.wrapped_values {
            config.update_shape = UpdateShape::Wrapped;
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level.clone_from(level);
        }
        config
    }
}
