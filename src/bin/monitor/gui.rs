use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};

use telebox::display_sink::{BoxProjection, Readout};
use telebox::gui::{draw_dashboard, MonitorError};
use telebox::telemetry_source::TelemetrySource;

struct App {
    source: Box<dyn TelemetrySource>,
    readout: Readout,
    projection: BoxProjection,
}

impl App {
    fn new(source: Box<dyn TelemetrySource>) -> App {
        App {
            source,
            readout: Readout::new(),
            projection: BoxProjection::default(),
        }
    }

    fn on_tick(&mut self) {
        if let Some(record) = self.source.next_record() {
            self.readout.apply(&record);
            self.projection.apply(&record);
        }
    }

    fn status(&self) -> &str {
        self.source.status().unwrap_or("Waiting for data...")
    }
}

pub fn engage_gui(
    source: Box<dyn TelemetrySource>,
    tick_rate: Duration,
) -> Result<(), MonitorError> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let mut app = App::new(source);
    let res = run_app(&mut terminal, &mut app, tick_rate);
    app.source.stop();

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.map_err(MonitorError::from)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw_dashboard(f, &app.readout, &app.projection, app.status()))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('r') => {
                            app.source.reconnect();
                        }
                        _ => {}
                    }
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}
