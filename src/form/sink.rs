use crate::error::{FormError, Result};
use crate::form::state::FormState;
use std::io::Write;

/// Receives a finalized form on submission.
pub trait ReportSink: Send {
    fn name(&self) -> &'static str;
    fn report(&mut self, state: &FormState) -> Result<()>;
}

/// Logs each submission as a JSON `tracing` event.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn report(&mut self, state: &FormState) -> Result<()> {
        let payload = serde_json::to_string(state)?;
        tracing::info!(target: "intake_form::submission", form = %payload, "form submitted");
        Ok(())
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ReportSink for JsonLinesSink<W> {
    fn name(&self) -> &'static str {
        "json-lines"
    }

    fn report(&mut self, state: &FormState) -> Result<()> {
        serde_json::to_writer(&mut self.writer, state)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    submissions: Vec<FormState>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[FormState] {
        &self.submissions
    }

    pub fn last(&self) -> Option<&FormState> {
        self.submissions.last()
    }
}

impl ReportSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn report(&mut self, state: &FormState) -> Result<()> {
        self.submissions.push(state.clone());
        Ok(())
    }
}

/// Fans a submission out to every sink. All sinks run; the first failure is
/// returned.
#[derive(Default)]
pub struct Sinks {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Sinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn ReportSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ReportSink for Sinks {
    fn name(&self) -> &'static str {
        "fanout"
    }

    fn report(&mut self, state: &FormState) -> Result<()> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(err) = sink.report(state) {
                tracing::warn!(sink = sink.name(), error = %err, "reporting sink failed");
                first_err.get_or_insert(FormError::Sink {
                    sink: sink.name(),
                    message: err.to_string(),
                });
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// A sink that appends to a shared in-memory log; the CLI reads it back after
/// the terminal is restored.
#[derive(Debug, Default, Clone)]
pub struct SharedMemorySink {
    inner: std::sync::Arc<std::sync::Mutex<MemorySink>>,
}

impl SharedMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<FormState> {
        self.inner
            .lock()
            .ok()
            .and_then(|sink| sink.last().cloned())
    }

    pub fn count(&self) -> usize {
        self.inner.lock().map(|sink| sink.submissions().len()).unwrap_or(0)
    }
}

impl ReportSink for SharedMemorySink {
    fn name(&self) -> &'static str {
        "shared-memory"
    }

    fn report(&mut self, state: &FormState) -> Result<()> {
        let mut sink = self.inner.lock().map_err(|_| FormError::Sink {
            sink: "shared-memory",
            message: "lock poisoned".to_string(),
        })?;
        sink.report(state)
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonLinesSink, MemorySink, ReportSink, SharedMemorySink, Sinks};
    use crate::core::value::Value;
    use crate::error::{FormError, Result};
    use crate::form::field::FieldName;
    use crate::form::state::{FormState, UpdateShape};

    struct FailingSink;

    impl ReportSink for FailingSink {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn report(&mut self, _state: &FormState) -> Result<()> {
            Err(FormError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn json_lines_writes_one_object_per_submission() {
        let state = FormState::new().updated(FieldName::FirstName, Value::text("Ada"), UpdateShape::Scalar);
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.report(&state).expect("report");
        sink.report(&state).expect("report");

        let out = String::from_utf8(sink.into_inner()).expect("utf8");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
        assert_eq!(parsed["firstname"], "Ada");
        assert_eq!(parsed["resume"], serde_json::Value::Null);
    }

    #[test]
    fn fanout_runs_every_sink_and_reports_first_failure() {
        let shared = SharedMemorySink::new();
        let mut sinks = Sinks::new().with(FailingSink).with(shared.clone());

        let err = sinks.report(&FormState::new()).expect_err("failure surfaces");
        assert!(matches!(err, FormError::Sink { sink: "failing", .. }));
        assert_eq!(shared.count(), 1);
    }

    #[test]
    fn memory_sink_keeps_submissions_in_order() {
        let mut sink = MemorySink::new();
        let first = FormState::new();
        let second = first.updated(FieldName::Gender, Value::text("other"), UpdateShape::Scalar);
        sink.report(&first).expect("report");
        sink.report(&second).expect("report");
        assert_eq!(sink.submissions(), &[first, second.clone()]);
        assert_eq!(sink.last(), Some(&second));
    }
}
