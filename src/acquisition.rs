//! The serial acquisition loop.
//!
//! An [`Acquisition`] owns one connection and its [`ConnectionState`]. Every
//! call to [`Acquisition::poll`] drains whatever bytes the device has already
//! sent, without waiting for more, and hands back at most one parsed line.
//! Anything that goes wrong while reading closes the connection for good;
//! only an explicit [`Acquisition::connect`] opens it again.

use crate::telemetry_line_parser::parse;
use crate::telemetry_record::TelemetryRecord;
use crate::telemetry_source::TelemetrySource;

use log::{debug, error, info, warn};
use serial2::SerialPort;
use std::{
    error::Error,
    fmt, io,
    time::{Duration, Instant},
};

/// How often the port is checked for new lines.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long a line without a terminating newline is waited on before it is
/// taken as it is.
pub const DEFAULT_LINE_TIMEOUT: Duration = Duration::from_secs(1);

// Unread input is capped so a device that talks faster than we listen can't
// grow the buffer forever.
const MAX_PENDING: usize = 64 * 1024;
const READ_CHUNK: usize = 1024;

/// Where the connection stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected, closed on request, or the last open failed
    Disconnected,
    /// Open and being polled
    Connected,
    /// A read failed; the port has been closed
    Errored,
}

/// Knobs for the acquisition loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionConfig {
    /// Time between polls
    pub poll_interval: Duration,
    /// How long a partial line may sit before it is taken anyway
    pub line_timeout: Duration,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            line_timeout: DEFAULT_LINE_TIMEOUT,
        }
    }
}

/// A byte stream that can say "nothing yet" instead of blocking.
pub trait Transport {
    /// Reads whatever is already waiting into `buf`. Returns `Ok(0)` when
    /// nothing is waiting.
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl Transport for SerialPort {
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match SerialPort::read(self, buf) {
            // With a zero read timeout, an empty read after the port reported
            // itself readable means the device went away.
            Ok(0) if !buf.is_empty() => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "device reports readiness to read but returned no data",
            )),
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }
}

/// Opens [`Transport`]s by device name.
pub trait Connector {
    /// The transport this connector hands out
    type Port: Transport;

    /// Opens `port_id` at `baud_rate`.
    fn open(&mut self, port_id: &str, baud_rate: u32) -> io::Result<Self::Port>;
}

/// Opens real serial devices.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialConnector;

impl Connector for SerialConnector {
    type Port = SerialPort;

    fn open(&mut self, port_id: &str, baud_rate: u32) -> io::Result<SerialPort> {
        let mut port = SerialPort::open(port_id, baud_rate)?;
        // A zero timeout turns every read into a check of what is waiting.
        port.set_read_timeout(Duration::ZERO)?;
        Ok(port)
    }
}

/// Why [`Acquisition::connect`] didn't connect.
#[derive(Debug)]
pub enum ConnectionError {
    /// No device name was given
    EmptyPortId,
    /// The baud rate was zero
    InvalidBaudRate(u32),
    /// The device refused to open
    OpenError {
        /// The device we tried
        port: String,
        /// What the OS said
        source: io::Error,
    },
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::EmptyPortId => write!(f, "no serial port selected"),
            ConnectionError::InvalidBaudRate(baud) => write!(f, "invalid baud rate {}", baud),
            ConnectionError::OpenError { port, source } => write!(f, "{}: {}", port, source),
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConnectionError::OpenError { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A read failed on an open connection.
#[derive(Debug)]
pub struct ReadError {
    /// The device that failed
    pub port: String,
    /// What the OS said
    pub source: io::Error,
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read from {} failed: {}", self.port, self.source)
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Bytes that have arrived but haven't been handed out as a line yet.
#[derive(Debug, Default)]
struct LineBuffer {
    pending: Vec<u8>,
    // When the oldest pending byte arrived
    since: Option<Instant>,
}

impl LineBuffer {
    fn extend(&mut self, bytes: &[u8], now: Instant) {
        if bytes.is_empty() {
            return;
        }
        if self.pending.is_empty() {
            self.since = Some(now);
        }
        self.pending.extend_from_slice(bytes);

        if self.pending.len() > MAX_PENDING {
            let excess = self.pending.len() - MAX_PENDING;
            warn!("Input is arriving faster than it is read, dropping {} bytes", excess);
            self.pending.drain(..excess);
        }
    }

    /// The oldest complete line, newline included. A partial line counts as
    /// complete once it has waited `line_timeout`.
    fn next_line(&mut self, now: Instant, line_timeout: Duration) -> Option<Vec<u8>> {
        let end = match self.pending.iter().position(|&b| b == b'\n') {
            Some(i) => i + 1,
            None => {
                let since = self.since?;
                if self.pending.is_empty() || now.duration_since(since) < line_timeout {
                    return None;
                }
                self.pending.len()
            }
        };

        let line = self.pending.drain(..end).collect();
        self.since = if self.pending.is_empty() { None } else { Some(now) };
        Some(line)
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.since = None;
    }
}

/// Polls one serial connection and turns its lines into records.
#[derive(Debug)]
pub struct Acquisition<C: Connector> {
    connector: C,
    config: AcquisitionConfig,
    port: Option<C::Port>,
    target: Option<(String, u32)>,
    state: ConnectionState,
    lines: LineBuffer,
    status: Option<String>,
}

impl Acquisition<SerialConnector> {
    /// An acquisition loop over real serial devices.
    pub fn serial(config: AcquisitionConfig) -> Self {
        Self::new(SerialConnector, config)
    }
}

impl<C: Connector> Acquisition<C> {
    /// A disconnected loop that will open ports through `connector`.
    pub fn new(connector: C, config: AcquisitionConfig) -> Self {
        Self {
            connector,
            config,
            port: None,
            target: None,
            state: ConnectionState::Disconnected,
            lines: LineBuffer::default(),
            status: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The last status message, for showing to the operator.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// The device of the last connection attempt.
    pub fn port_id(&self) -> Option<&str> {
        self.target.as_ref().map(|(port, _)| port.as_str())
    }

    /// Opens `port_id` at `baud_rate` and starts polling it. An open
    /// connection is closed first.
    ///
    /// On failure the loop stays [`ConnectionState::Disconnected`] and the
    /// status says why.
    pub fn connect(&mut self, port_id: &str, baud_rate: u32) -> Result<(), ConnectionError> {
        self.close();
        self.state = ConnectionState::Disconnected;

        let port_id = port_id.trim();
        let attempt = if port_id.is_empty() {
            Err(ConnectionError::EmptyPortId)
        } else if baud_rate == 0 {
            Err(ConnectionError::InvalidBaudRate(baud_rate))
        } else {
            self.target = Some((port_id.to_owned(), baud_rate));
            self.connector
                .open(port_id, baud_rate)
                .map_err(|source| ConnectionError::OpenError {
                    port: port_id.to_owned(),
                    source,
                })
        };

        match attempt {
            Ok(port) => {
                self.port = Some(port);
                self.lines.clear();
                self.state = ConnectionState::Connected;
                let msg = format!("Listening on port {} at baud rate {}...", port_id, baud_rate);
                info!("{}", msg);
                self.status = Some(msg);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to open serial port: {}", e);
                self.status = Some(format!("Error opening serial port: {}", e));
                Err(e)
            }
        }
    }

    /// Connects again to the port and baud rate of the last attempt.
    pub fn reconnect(&mut self) -> Result<(), ConnectionError> {
        match self.target.clone() {
            Some((port_id, baud_rate)) => self.connect(&port_id, baud_rate),
            None => Err(ConnectionError::EmptyPortId),
        }
    }

    /// Releases the port if one is open. An errored loop stays errored.
    pub fn close(&mut self) {
        if self.port.take().is_some() {
            info!("Serial port closed");
        }
        self.lines.clear();
        if self.state == ConnectionState::Connected {
            self.state = ConnectionState::Disconnected;
        }
    }

    /// One tick of the loop.
    ///
    /// Returns a record when a complete line with at least one field is
    /// ready. Lines that are blank, have no fields, or carry a malformed
    /// number are dropped here. A failed read closes the connection and is
    /// returned; every later poll is a no-op until the next
    /// [`connect`](Self::connect).
    pub fn poll(&mut self, now: Instant) -> Result<Option<TelemetryRecord>, ReadError> {
        let drained = match self.port.as_mut() {
            Some(port) => drain(port, &mut self.lines, now),
            None => return Ok(None),
        };
        if let Err(source) = drained {
            return Err(self.fail(source));
        }

        let Some(raw) = self.lines.next_line(now, self.config.line_timeout) else {
            return Ok(None);
        };
        let text = String::from_utf8_lossy(&raw);
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        match parse(text) {
            Ok(record) if record.is_empty() => {
                debug!("No fields in {:?}", text);
                Ok(None)
            }
            Ok(record) => {
                debug!("Received {}", record);
                Ok(Some(record))
            }
            Err(e) => {
                warn!("Was unable to parse telemetry line {:?}: {}", text, e);
                self.status = Some(format!("Dropped line: {}", e));
                Ok(None)
            }
        }
    }

    fn fail(&mut self, source: io::Error) -> ReadError {
        self.port = None;
        self.lines.clear();
        self.state = ConnectionState::Errored;
        self.status = Some(format!("Serial error: {}", source));

        let port = self.port_id().unwrap_or_default().to_owned();
        error!("Serial error on {}: {}", port, source);
        ReadError { port, source }
    }
}

/// Moves everything `port` has waiting into `lines`.
fn drain<T: Transport>(port: &mut T, lines: &mut LineBuffer, now: Instant) -> io::Result<()> {
    let mut buffer = [0; READ_CHUNK];
    loop {
        let read_len = port.read_available(&mut buffer)?;
        lines.extend(&buffer[..read_len], now);
        if read_len < buffer.len() {
            return Ok(());
        }
    }
}

impl<C: Connector> TelemetrySource for Acquisition<C> {
    fn next_record(&mut self) -> Option<TelemetryRecord> {
        // Failures are already logged and kept in the status.
        self.poll(Instant::now()).ok().flatten()
    }

    fn is_active(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    fn status(&self) -> Option<&str> {
        Acquisition::status(self)
    }

    fn reconnect(&mut self) -> bool {
        Acquisition::reconnect(self).is_ok()
    }

    fn stop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_sink::{BoxProjection, DisplaySink};
    use crate::record_output::OutputError;
    use crate::telemetry_record::Value;
    use crate::telemetry_source::pump;

    use std::{
        cell::RefCell,
        collections::VecDeque,
        rc::Rc,
        sync::atomic::{AtomicBool, Ordering},
    };

    /// What the fake device will do, shared between the test and the port.
    #[derive(Default)]
    struct Script {
        reads: VecDeque<io::Result<Vec<u8>>>,
        read_calls: usize,
    }

    type SharedScript = Rc<RefCell<Script>>;

    fn send(script: &SharedScript, bytes: &[u8]) {
        script.borrow_mut().reads.push_back(Ok(bytes.to_vec()));
    }

    fn break_link(script: &SharedScript) {
        script
            .borrow_mut()
            .reads
            .push_back(Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged")));
    }

    struct MockPort {
        script: SharedScript,
    }

    impl Transport for MockPort {
        fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let mut script = self.script.borrow_mut();
            script.read_calls += 1;
            match script.reads.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(mut bytes)) => {
                    let n = bytes.len().min(buf.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    if n < bytes.len() {
                        script.reads.push_front(Ok(bytes.split_off(n)));
                    }
                    Ok(n)
                }
            }
        }
    }

    struct MockConnector {
        script: SharedScript,
        refuse: bool,
        opened: Vec<(String, u32)>,
    }

    impl Connector for MockConnector {
        type Port = MockPort;

        fn open(&mut self, port_id: &str, baud_rate: u32) -> io::Result<MockPort> {
            if self.refuse {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "busy"));
            }
            self.opened.push((port_id.to_owned(), baud_rate));
            Ok(MockPort {
                script: self.script.clone(),
            })
        }
    }

    fn setup() -> (Acquisition<MockConnector>, SharedScript) {
        let script = SharedScript::default();
        let connector = MockConnector {
            script: script.clone(),
            refuse: false,
            opened: Vec::new(),
        };
        (Acquisition::new(connector, AcquisitionConfig::default()), script)
    }

    fn connected() -> (Acquisition<MockConnector>, SharedScript) {
        let (mut acq, script) = setup();
        acq.connect("/dev/ttyUSB0", 9600).unwrap();
        (acq, script)
    }

    #[test]
    fn connect_sets_state_and_status() {
        let (mut acq, _) = setup();
        assert_eq!(acq.state(), ConnectionState::Disconnected);

        acq.connect("/dev/ttyUSB0", 115200).unwrap();

        assert_eq!(acq.state(), ConnectionState::Connected);
        assert_eq!(
            acq.status(),
            Some("Listening on port /dev/ttyUSB0 at baud rate 115200...")
        );
        assert_eq!(acq.connector.opened, vec![("/dev/ttyUSB0".to_owned(), 115200)]);
    }

    #[test]
    fn open_failure_stays_disconnected() {
        let (mut acq, _) = setup();
        acq.connector.refuse = true;

        let err = acq.connect("/dev/ttyUSB0", 9600).unwrap_err();

        assert!(matches!(err, ConnectionError::OpenError { .. }));
        assert_eq!(acq.state(), ConnectionState::Disconnected);
        assert!(acq.status().unwrap().starts_with("Error opening serial port"));
        assert_eq!(acq.poll(Instant::now()).unwrap(), None);
    }

    #[test]
    fn rejects_bad_parameters() {
        let (mut acq, _) = setup();
        assert!(matches!(acq.connect("  ", 9600), Err(ConnectionError::EmptyPortId)));
        assert!(matches!(
            acq.connect("/dev/ttyUSB0", 0),
            Err(ConnectionError::InvalidBaudRate(0))
        ));
        assert!(acq.connector.opened.is_empty());
        assert_eq!(acq.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn nothing_waiting_is_not_an_error() {
        let (mut acq, _) = connected();
        assert_eq!(acq.poll(Instant::now()).unwrap(), None);
        assert_eq!(acq.state(), ConnectionState::Connected);
    }

    #[test]
    fn end_to_end_line_reaches_the_projection() {
        let (mut acq, script) = connected();
        send(
            &script,
            b"Eventid: 128, Spo2: 96.30, Heart: 89, Xval: 0.20, Yval: 3.00, Zval: -4.60\r\n",
        );

        let record = acq.poll(Instant::now()).unwrap().unwrap();

        let expected: TelemetryRecord = [
            ("Eventid", Value::Integer(128)),
            ("Spo2", Value::Float(96.3)),
            ("Heart", Value::Integer(89)),
            ("Xval", Value::Float(0.2)),
            ("Yval", Value::Float(3.0)),
            ("Zval", Value::Float(-4.6)),
        ]
        .into_iter()
        .collect();
        assert_eq!(record, expected);

        let mut projection = BoxProjection::default();
        projection.update(&record).unwrap();
        let glyph = projection.glyph();
        assert!((glyph.x - 200.2).abs() < 1e-9);
        assert!((glyph.y - 197.0).abs() < 1e-9);
        assert!((glyph.size - 54.6).abs() < 1e-9);
    }

    #[test]
    fn one_line_per_tick() {
        let (mut acq, script) = connected();
        send(&script, b"A: 1\nA: 2\n");

        let now = Instant::now();
        assert_eq!(acq.poll(now).unwrap().unwrap().get("A"), Some(Value::Integer(1)));
        assert_eq!(acq.poll(now).unwrap().unwrap().get("A"), Some(Value::Integer(2)));
        assert_eq!(acq.poll(now).unwrap(), None);
    }

    #[test]
    fn line_split_across_reads() {
        let (mut acq, script) = connected();
        let now = Instant::now();

        send(&script, b"Heart: 8");
        assert_eq!(acq.poll(now).unwrap(), None);

        send(&script, b"9, Temp: 37.30\n");
        let record = acq.poll(now).unwrap().unwrap();
        assert_eq!(record.get("Heart"), Some(Value::Integer(89)));
        assert_eq!(record.get("Temp"), Some(Value::Float(37.3)));
    }

    #[test]
    fn partial_line_is_taken_after_timeout() {
        let (mut acq, script) = connected();
        let start = Instant::now();

        send(&script, b"Audio: 84");
        assert_eq!(acq.poll(start).unwrap(), None);
        assert_eq!(acq.poll(start + Duration::from_millis(500)).unwrap(), None);

        let record = acq.poll(start + DEFAULT_LINE_TIMEOUT).unwrap().unwrap();
        assert_eq!(record.get("Audio"), Some(Value::Integer(84)));
    }

    #[test]
    fn long_input_is_read_in_chunks() {
        let (mut acq, script) = connected();
        let mut input = Vec::new();
        for i in 0..200 {
            input.extend_from_slice(format!("Eventid: {}, Spo2: 96.30\n", i).as_bytes());
        }
        send(&script, &input);

        let now = Instant::now();
        for i in 0..200 {
            let record = acq.poll(now).unwrap().unwrap();
            assert_eq!(record.get("Eventid"), Some(Value::Integer(i)));
        }
        assert_eq!(acq.poll(now).unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let (mut acq, script) = connected();
        send(&script, b"\xff\xfeHeart: 72, Te\xffmp: 1\n");

        let record = acq.poll(Instant::now()).unwrap().unwrap();
        assert_eq!(record.get("Heart"), Some(Value::Integer(72)));
        assert_eq!(record.get("mp"), Some(Value::Integer(1)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn blank_and_fieldless_lines_are_dropped() {
        let (mut acq, script) = connected();
        send(&script, b"\n   \r\nbooting...\nHeart: 1\n");

        let now = Instant::now();
        let received: Vec<TelemetryRecord> =
            (0..4).filter_map(|_| acq.poll(now).unwrap()).collect();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].get("Heart"), Some(Value::Integer(1)));
    }

    #[test]
    fn malformed_number_drops_the_line_only() {
        let (mut acq, script) = connected();
        send(&script, b"Pres: 1.2.3\nPres: 1.2\n");

        let now = Instant::now();
        assert_eq!(acq.poll(now).unwrap(), None);
        assert!(acq.status().unwrap().starts_with("Dropped line"));
        assert_eq!(acq.state(), ConnectionState::Connected);
        assert_eq!(acq.poll(now).unwrap().unwrap().get("Pres"), Some(Value::Float(1.2)));
    }

    #[test]
    fn read_failure_closes_until_reconnect() {
        let (mut acq, script) = connected();
        let now = Instant::now();
        break_link(&script);

        let err = acq.poll(now).unwrap_err();
        assert_eq!(err.port, "/dev/ttyUSB0");
        assert_eq!(acq.state(), ConnectionState::Errored);
        assert_eq!(acq.status(), Some("Serial error: unplugged"));
        assert!(acq.port.is_none());

        // Nothing is read, so nothing is parsed or displayed.
        send(&script, b"Heart: 1\n");
        let calls = script.borrow().read_calls;
        assert_eq!(acq.poll(now).unwrap(), None);
        assert_eq!(acq.poll(now).unwrap(), None);
        assert_eq!(script.borrow().read_calls, calls);
        assert_eq!(acq.state(), ConnectionState::Errored);

        acq.reconnect().unwrap();
        assert_eq!(acq.state(), ConnectionState::Connected);
        assert_eq!(acq.poll(now).unwrap().unwrap().get("Heart"), Some(Value::Integer(1)));
    }

    #[test]
    fn close_releases_the_port() {
        let (mut acq, _) = connected();
        acq.close();
        assert!(acq.port.is_none());
        assert_eq!(acq.state(), ConnectionState::Disconnected);
    }

    /// Collects records and raises the stop flag after `limit` of them.
    struct Collect<'a> {
        stop: &'a AtomicBool,
        limit: usize,
        seen: Vec<TelemetryRecord>,
    }

    impl DisplaySink for Collect<'_> {
        fn update(&mut self, record: &TelemetryRecord) -> Result<(), OutputError> {
            self.seen.push(record.clone());
            if self.seen.len() >= self.limit {
                self.stop.store(true, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    #[test]
    fn pump_forwards_only_records_with_fields() {
        let (mut acq, script) = connected();
        send(&script, b"garbage\n\nHeart: 1\nno fields here\nHeart: 2\n");

        let stop = AtomicBool::new(false);
        let mut sink = Collect {
            stop: &stop,
            limit: 2,
            seen: Vec::new(),
        };
        pump(&mut acq, &mut sink, Duration::ZERO, &stop).unwrap();

        let hearts: Vec<Option<Value>> = sink.seen.iter().map(|r| r.get("Heart")).collect();
        assert_eq!(hearts, vec![Some(Value::Integer(1)), Some(Value::Integer(2))]);
        assert_eq!(acq.state(), ConnectionState::Disconnected);
        assert!(acq.port.is_none());
    }

    #[test]
    fn pump_stops_on_read_failure() {
        let (mut acq, script) = connected();
        send(&script, b"Heart: 1\n");
        break_link(&script);

        let stop = AtomicBool::new(false);
        let mut sink = Collect {
            stop: &stop,
            limit: usize::MAX,
            seen: Vec::new(),
        };
        pump(&mut acq, &mut sink, Duration::ZERO, &stop).unwrap();

        assert_eq!(sink.seen.len(), 1);
        assert_eq!(acq.state(), ConnectionState::Errored);
    }

    #[test]
    fn pump_does_not_read_once_stopped() {
        let (mut acq, script) = connected();
        send(&script, b"Heart: 1\n");

        let stop = AtomicBool::new(true);
        let mut sink = Collect {
            stop: &stop,
            limit: 1,
            seen: Vec::new(),
        };
        pump(&mut acq, &mut sink, Duration::ZERO, &stop).unwrap();

        assert!(sink.seen.is_empty());
        assert_eq!(script.borrow().read_calls, 0);
        assert!(acq.port.is_none());
    }

    #[test]
    fn line_buffer_caps_pending_input() {
        let mut lines = LineBuffer::default();
        let now = Instant::now();
        lines.extend(&vec![b'x'; MAX_PENDING + 10], now);
        assert_eq!(lines.pending.len(), MAX_PENDING);
    }
}
