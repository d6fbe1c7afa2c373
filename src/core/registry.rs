//! Active sink set and fan-out

use super::error::WriteError;
use super::record::LogRecord;
use super::sink::Sink;

/// The set of active sinks.
///
/// The owner wraps the registry in one `parking_lot::Mutex`; holding that
/// lock across [`SinkRegistry::replace_all`] and [`SinkRegistry::fan_out`]
/// is what guarantees no record is ever fanned out to a half-replaced set.
#[derive(Default)]
pub struct SinkRegistry {
    sinks: Vec<Box<dyn Sink>>,
}

impl SinkRegistry {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Deliver one record to every sink.
    ///
    /// One sink's failure must not suppress delivery to the others; errors
    /// are collected and returned for the caller to report.
    pub fn fan_out(&mut self, record: &LogRecord) -> Vec<(&'static str, WriteError)> {
        let mut errors = Vec::new();
        for sink in &mut self.sinks {
            if let Err(e) = sink.handle(record) {
                errors.push((sink.name(), e));
            }
        }
        errors
    }

    pub fn flush_all(&mut self) -> Vec<(&'static str, WriteError)> {
        let mut errors = Vec::new();
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush() {
                errors.push((sink.name(), e));
            }
        }
        errors
    }

    pub fn close_all(&mut self) -> Vec<(&'static str, WriteError)> {
        let mut errors = Vec::new();
        for sink in &mut self.sinks {
            if let Err(e) = sink.close() {
                errors.push((sink.name(), e));
            }
        }
        errors
    }

    /// Close every old sink and install the new set.
    ///
    /// Close errors on outgoing sinks are reported, not propagated; the
    /// replacement always completes.
    pub fn replace_all(&mut self, new_sinks: Vec<Box<dyn Sink>>) {
        for (name, e) in self.close_all() {
            eprintln!("[fanlog] failed to close sink '{}' during reconfigure: {}", name, e);
        }
        self.sinks = new_sinks;
    }
}
