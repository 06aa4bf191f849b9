//! TeleBox reads the telemetry an embedded sensor board prints over a serial
//! link, one line at a time, such as
//!
//! ```text
//! Eventid: 128, Spo2: 96.30, Heart: 89, Pres: 123.80, Temp: 37.30, Audio: 84, Xval: 0.20, Yval: 3.00, Zval: -4.60
//! ```
//!
//! Every `name: number` pair on a line becomes a field of a
//! [`TelemetryRecord`](telemetry_record::TelemetryRecord). Records are then
//! printed, captured to a file, or shown on a terminal dashboard next to a
//! box whose position follows `Xval`/`Yval` and whose size follows `Zval`.
//!
//! There are two binaries:
//!
//! - `telebox` lists ports and prints records from one of them until Ctrl-C.
//! - `monitor` shows the dashboard, fed by a serial port or by a random walk
//!   when no hardware is around.
//!
//! Everything runs on one thread. A [`TelemetrySource`](telemetry_source::TelemetrySource)
//! is polled on a fixed interval and whatever it produces goes to a
//! [`DisplaySink`](display_sink::DisplaySink).

#![warn(missing_docs)]
pub mod acquisition;
#[allow(missing_docs)]
pub mod args;
pub mod display_sink;
#[allow(missing_docs)]
pub mod gui;
pub mod interrupt;
pub mod ports;
pub mod random_walk;
pub mod record_output;
pub mod telemetry_line_parser;
pub mod telemetry_record;
pub mod telemetry_source;
