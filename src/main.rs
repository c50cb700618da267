use anyhow::Context;
use clap::Parser;
use intake_form::cli::Cli;
use intake_form::form::sink::{JsonLinesSink, SharedMemorySink, Sinks, TracingSink};
use intake_form::logging;
use intake_form::runtime::Runtime;
use intake_form::state::FormView;
use intake_form::terminal::Terminal;
use std::fs::OpenOptions;
use std::io::BufWriter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config().context("failed to load configuration")?;
    let _log_guard = logging::init(config.log_file.as_deref(), &config.log_level)
        .context("failed to initialize logging")?;

    let submissions = SharedMemorySink::new();
    let mut sinks = Sinks::new()
        .with(TracingSink)
        .with(submissions.clone());
    if let Some(path) = &config.output {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open output file {}", path.display()))?;
        sinks.push(Box::new(JsonLinesSink::new(BufWriter::new(file))));
    }

    let view = FormView::new(Box::new(sinks))
        .with_title(config.title.clone())
        .with_shape(config.update_shape)
        .with_constraints(config.constraint_options());
    let terminal = Terminal::new()
        .context("failed to open terminal")?
        .with_mode(config.render_mode);

    tracing::info!(mode = ?config.render_mode, shape = ?config.update_shape, "starting form");
    let mut runtime = Runtime::new(view, terminal);
    runtime.run().context("terminal session failed")?;

    if let Some(last) = submissions.last() {
        let json = serde_json::to_string_pretty(&last).context("failed to encode submission")?;
        println!("{json}");
    }
    Ok(())
}
