//! The writer loop
//!
//! One worker thread drains the record queue and fans each record out to the
//! registry. A separate control channel carries flush and shutdown signals;
//! the loop blocks on both at once, no polling. Control signals drain every
//! record already queued before acting, so nothing enqueued ahead of a
//! shutdown is lost.

use super::metrics::LogMetrics;
use super::record::LogRecord;
use super::registry::SinkRegistry;
use crossbeam_channel::{select, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

/// Out-of-band signals for the dispatcher.
///
/// Each carries an ack channel so the caller can wait for the signal to take
/// effect.
pub enum Control {
    Flush(Sender<()>),
    Shutdown(Sender<()>),
}

/// Loop body for the dispatcher thread. Returns only on shutdown or when
/// every channel end has been dropped.
pub fn run(
    records: Receiver<LogRecord>,
    control: Receiver<Control>,
    registry: Arc<Mutex<SinkRegistry>>,
    metrics: Arc<LogMetrics>,
) {
    loop {
        select! {
            recv(records) -> msg => match msg {
                Ok(record) => deliver(&registry, &metrics, &record),
                Err(_) => {
                    // All senders dropped: the handle is gone, wind down.
                    report(registry.lock().flush_all());
                    report(registry.lock().close_all());
                    break;
                }
            },
            recv(control) -> msg => match msg {
                Ok(Control::Flush(ack)) => {
                    drain(&records, &registry, &metrics);
                    report(registry.lock().flush_all());
                    let _ = ack.send(());
                }
                Ok(Control::Shutdown(ack)) => {
                    drain(&records, &registry, &metrics);
                    let mut reg = registry.lock();
                    report(reg.flush_all());
                    report(reg.close_all());
                    drop(reg);
                    let _ = ack.send(());
                    break;
                }
                Err(_) => {
                    drain(&records, &registry, &metrics);
                    report(registry.lock().flush_all());
                    report(registry.lock().close_all());
                    break;
                }
            },
        }
    }
}

/// Deliver everything currently sitting in the queue.
fn drain(records: &Receiver<LogRecord>, registry: &Arc<Mutex<SinkRegistry>>, metrics: &Arc<LogMetrics>) {
    while let Ok(record) = records.try_recv() {
        deliver(registry, metrics, &record);
    }
}

fn deliver(registry: &Arc<Mutex<SinkRegistry>>, metrics: &Arc<LogMetrics>, record: &LogRecord) {
    let errors = registry.lock().fan_out(record);
    if errors.is_empty() {
        metrics.record_delivered();
    } else {
        metrics.record_dropped();
        report(errors);
    }
}

/// Sink errors never reach the emitting caller; stderr is the diagnostic
/// channel of last resort.
fn report(errors: Vec<(&'static str, super::error::WriteError)>) {
    for (name, e) in errors {
        eprintln!("[fanlog] sink '{}' failed: {}", name, e);
    }
}
