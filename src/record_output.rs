//! Text renderings of a [`TelemetryRecord`], a sink that prints them, and a
//! sink that captures them to a file, one record per line.

use crate::display_sink::DisplaySink;
use crate::telemetry_record::TelemetryRecord;

use clap::ValueEnum;
use ron::ser::PrettyConfig;
use serde::Serialize;
use std::{
    borrow::Cow,
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// How records are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON object, pretty-printed with a four space indent
    #[default]
    Json,
    /// RON map
    Ron,
    /// `name: value` pairs on one line, like the wire format
    Line,
}

/// Returned when a record can't be rendered or written.
#[derive(Debug)]
pub enum OutputError {
    /// Writing to the terminal or capture file failed
    IoError(io::Error),
    /// JSON serialization failed
    JsonError(serde_json::Error),
    /// RON serialization failed
    RonError(ron::Error),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use OutputError as OE;
        let msg = match self {
            OE::IoError(error) => Cow::from(format!("io error: {}", error)),
            OE::JsonError(error) => Cow::from(format!("json error: {}", error)),
            OE::RonError(error) => Cow::from(format!("ron error: {}", error)),
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for OutputError {}

impl From<io::Error> for OutputError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}

impl From<serde_json::Error> for OutputError {
    fn from(value: serde_json::Error) -> Self {
        Self::JsonError(value)
    }
}

impl From<ron::Error> for OutputError {
    fn from(value: ron::Error) -> Self {
        Self::RonError(value)
    }
}

/// Renders `record` for a person to read, possibly over several lines.
pub fn render_pretty(record: &TelemetryRecord, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            record.serialize(&mut ser)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
        OutputFormat::Ron => Ok(ron::ser::to_string_pretty(record, PrettyConfig::default())?),
        OutputFormat::Line => Ok(record.to_string()),
    }
}

/// Renders `record` on a single line.
pub fn render_compact(record: &TelemetryRecord, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Ron => Ok(ron::to_string(record)?),
        OutputFormat::Line => Ok(record.to_string()),
    }
}

/// Writes every record it is given to `writer` using [`render_pretty`].
#[derive(Debug)]
pub struct PrintSink<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> PrintSink<W> {
    /// Prints to `writer` in `format`.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Gives back the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for PrintSink<W> {
    fn update(&mut self, record: &TelemetryRecord) -> Result<(), OutputError> {
        let text = render_pretty(record, self.format)?;
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Appends every record it is given to a file, one [`render_compact`] line
/// each. Lines are flushed as they are written so an interrupted session
/// keeps everything it received.
#[derive(Debug)]
pub struct CaptureFile {
    writer: BufWriter<File>,
    format: OutputFormat,
}

impl CaptureFile {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>, format: OutputFormat) -> Result<Self, OutputError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            format,
        })
    }
}

impl DisplaySink for CaptureFile {
    fn update(&mut self, record: &TelemetryRecord) -> Result<(), OutputError> {
        let line = render_compact(record, self.format)?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}
