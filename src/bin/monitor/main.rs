mod gui;

use std::{process::ExitCode, time::Duration};

use clap::Parser;
use log::warn;
use telebox::acquisition::Acquisition;
use telebox::args::{MonitorArgs, MonitorSource};
use telebox::gui::{device_selector, MonitorError};
use telebox::ports::list_ports;
use telebox::random_walk::RandomWalk;
use telebox::telemetry_source::TelemetrySource;
use gui::engage_gui;

fn main() -> ExitCode {
    env_logger::init();
    let args = MonitorArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: MonitorArgs) -> Result<(), MonitorError> {
    let (source, tick_rate): (Box<dyn TelemetrySource>, Duration) = match args.source {
        MonitorSource::Serial(cmd) => {
            let port = match cmd.port {
                Some(port) => port,
                None => match device_selector(list_ports())? {
                    Some(port) => port.to_string_lossy().into_owned(),
                    None => {
                        println!("No serial port selected.");
                        return Ok(());
                    }
                },
            };

            let config = cmd.link.acquisition_config();
            let tick_rate = config.poll_interval;
            let mut acquisition = Acquisition::serial(config);
            // The dashboard still opens on failure so the status is visible
            // and <R> can retry.
            if let Err(e) = acquisition.connect(&port, cmd.link.baud_rate) {
                warn!("Could not connect to {}: {}", port, e);
            }
            (Box::new(acquisition), tick_rate)
        }
        MonitorSource::Demo(cmd) => {
            let mut builder =
                RandomWalk::builder().period(Duration::from_millis(cmd.period_ms));
            if let Some(seed) = cmd.seed {
                builder = builder.seed(seed);
            }
            (Box::new(builder.build()), Duration::from_millis(cmd.interval_ms))
        }
    };

    engage_gui(source, tick_rate)
}
