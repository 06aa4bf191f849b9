//! Headless reader: pick a serial port, print every record it sends until
//! Ctrl-C, then close the port and exit.

use clap::Parser;
use telebox::{
    acquisition::{Acquisition, ConnectionState},
    args::{CommandTask, ReadCommand, TeleboxArgs},
    display_sink::Tee,
    interrupt::stop_on_interrupt,
    ports::{list_ports, select_port},
    record_output::{CaptureFile, PrintSink},
    telemetry_source::pump,
};

use log::{error, info};
use std::{
    io::{self, Write},
    process::ExitCode,
};

// Example:
// cargo run --bin telebox -- read
//                            --baud    115200
//                            --format  json
//                            --out     session.jsonl

fn main() -> ExitCode {
    env_logger::init();
    let args = TeleboxArgs::parse();

    match args.command {
        CommandTask::Ports => {
            print_ports();
            ExitCode::SUCCESS
        }
        CommandTask::Read(cmd) => read(cmd),
    }
}

fn print_ports() {
    let ports = list_ports();
    if ports.is_empty() {
        println!("No serial ports found.");
    }
    for (i, port) in ports.iter().enumerate() {
        println!("{}: {}", i, port.display());
    }
}

/// Lists the ports and asks the operator for one. `None` means the choice
/// was invalid and has already been reported.
fn prompt_for_port() -> io::Result<Option<String>> {
    println!("Available serial ports:");
    let ports = list_ports();
    for (i, port) in ports.iter().enumerate() {
        println!("{}: {}", i, port.display());
    }

    print!("Select a port number: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    match select_port(&ports, &input) {
        Ok(port) => Ok(Some(port.to_string_lossy().into_owned())),
        Err(e) => {
            println!("Invalid selection ({}). Exiting.", e);
            Ok(None)
        }
    }
}

fn read(cmd: ReadCommand) -> ExitCode {
    let port = match cmd.port.clone() {
        Some(port) => port,
        None => match prompt_for_port() {
            Ok(Some(port)) => port,
            Ok(None) => return ExitCode::SUCCESS,
            Err(e) => {
                error!("Failed to read the port selection: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let mut acquisition = Acquisition::serial(cmd.link.acquisition_config());
    let connected = acquisition.connect(&port, cmd.link.baud_rate);
    if let Some(status) = acquisition.status() {
        println!("{}", status);
    }
    if connected.is_err() {
        return ExitCode::FAILURE;
    }

    // Installed only now so Ctrl-C at the prompt still just quits.
    let stop = stop_on_interrupt();
    let interval = acquisition.config().poll_interval;
    let mut printer = PrintSink::new(io::stdout(), cmd.format);

    let result = match &cmd.outfile {
        Some(path) => match CaptureFile::create(path, cmd.format) {
            Ok(capture) => {
                info!("Capturing records to {}", path.display());
                pump(&mut acquisition, &mut Tee(printer, capture), interval, stop)
            }
            Err(e) => {
                acquisition.close();
                eprintln!("Could not create {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => pump(&mut acquisition, &mut printer, interval, stop),
    };
    println!("Serial port closed.");

    if let Err(e) = result {
        eprintln!("Failed to write record: {}", e);
        return ExitCode::FAILURE;
    }
    if acquisition.state() == ConnectionState::Errored {
        if let Some(status) = acquisition.status() {
            eprintln!("{}", status);
        }
        return ExitCode::FAILURE;
    }

    println!("Exiting program");
    ExitCode::SUCCESS
}
