//! The contract shared by everything that produces [`TelemetryRecord`]s, and
//! the single-threaded loop that moves records from a source into a sink.

use crate::display_sink::DisplaySink;
use crate::record_output::OutputError;
use crate::telemetry_record::TelemetryRecord;

use log::info;
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

/// `TelemetrySource`
///
/// Something that can be asked, once per tick, whether it has a new record.
/// Asking must never block for longer than it takes to check. The serial
/// [`Acquisition`](crate::acquisition::Acquisition) loop and the demo
/// [`RandomWalk`](crate::random_walk::RandomWalk) both implement it, so sinks
/// never need to know where their records come from.
pub trait TelemetrySource {
    /// Advances the source by one tick and returns a record if one is ready.
    fn next_record(&mut self) -> Option<TelemetryRecord>;

    /// Whether later ticks can still produce records.
    fn is_active(&self) -> bool;

    /// The most recent human-readable status message, if any.
    fn status(&self) -> Option<&str>;

    /// Asks the source to start over after a failure. Returns `true` if it
    /// is producing again.
    fn reconnect(&mut self) -> bool {
        false
    }

    /// Releases whatever the source holds. No records are produced afterwards.
    fn stop(&mut self);
}

impl<S: TelemetrySource + ?Sized> TelemetrySource for Box<S> {
    fn next_record(&mut self) -> Option<TelemetryRecord> {
        (**self).next_record()
    }
    fn is_active(&self) -> bool {
        (**self).is_active()
    }
    fn status(&self) -> Option<&str> {
        (**self).status()
    }
    fn reconnect(&mut self) -> bool {
        (**self).reconnect()
    }
    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Runs `source` into `sink` once every `interval` until `stop` is raised or
/// the source goes inactive. The source is stopped on the way out, whatever
/// the reason for leaving.
///
/// The stop flag is only looked at between ticks.
pub fn pump<S, D>(
    source: &mut S,
    sink: &mut D,
    interval: Duration,
    stop: &AtomicBool,
) -> Result<(), OutputError>
where
    S: TelemetrySource + ?Sized,
    D: DisplaySink + ?Sized,
{
    let mut result = Ok(());

    while !stop.load(Ordering::SeqCst) && source.is_active() {
        if let Some(record) = source.next_record() {
            if let Err(e) = sink.update(&record) {
                result = Err(e);
                break;
            }
        }
        spin_sleep::sleep(interval);
    }

    source.stop();
    info!("Telemetry pump stopped");
    result
}
