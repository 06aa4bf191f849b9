// Commandline argument parsers using clap for the telebox and monitor binaries

use crate::acquisition::AcquisitionConfig;
use crate::record_output::OutputFormat;

use clap::{Args, Parser, Subcommand};
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Parser, Clone)]
#[clap(version, about)]
pub struct TeleboxArgs {
    #[command(subcommand)]
    /// Which task to perform
    pub command: CommandTask,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CommandTask {
    /// List the serial ports attached to this machine
    Ports,

    /// Print telemetry records from a serial port until interrupted
    Read(ReadCommand),
}

#[derive(Debug, Args, Clone)]
pub struct ReadCommand {
    /// Serial device to read from; prompts with a list when left out
    #[arg(short = 'p', long = "port")]
    pub port: Option<String>,

    #[command(flatten)]
    pub link: LinkArgs,

    /// How records are printed
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Also append every record, one per line, to this file
    #[arg(short = 'o', long = "out")]
    pub outfile: Option<PathBuf>,
}

/// Connection settings shared by everything that opens a serial port.
#[derive(Debug, Args, Clone)]
pub struct LinkArgs {
    /// Baud rate of the serial link, usually 9600 or 115200
    #[arg(short = 'b', long = "baud", default_value_t = 9600)]
    pub baud_rate: u32,

    /// Time between polls of the port, in milliseconds
    #[arg(short = 'i', long = "interval", default_value_t = 100)]
    pub interval_ms: u64,

    /// How long to wait for the end of an unterminated line, in milliseconds
    #[arg(short = 't', long = "line-timeout", default_value_t = 1000)]
    pub line_timeout_ms: u64,
}

impl LinkArgs {
    pub fn acquisition_config(&self) -> AcquisitionConfig {
        AcquisitionConfig {
            poll_interval: Duration::from_millis(self.interval_ms),
            line_timeout: Duration::from_millis(self.line_timeout_ms),
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[clap(version, about)]
pub struct MonitorArgs {
    #[command(subcommand)]
    /// Where the records come from
    pub source: MonitorSource,
}

#[derive(Debug, Subcommand, Clone)]
pub enum MonitorSource {
    /// Watch a serial port
    Serial(SerialCommand),

    /// Watch a randomly wandering box, no hardware needed
    Demo(DemoCommand),
}

#[derive(Debug, Args, Clone)]
pub struct SerialCommand {
    /// Serial device to read from; shows a device selector when left out
    #[arg(short = 'p', long = "port")]
    pub port: Option<String>,

    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DemoCommand {
    /// Seed for a repeatable walk
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Time between moves, in milliseconds
    #[arg(long = "period", default_value_t = 500)]
    pub period_ms: u64,

    /// Screen refresh interval, in milliseconds
    #[arg(short = 'i', long = "interval", default_value_t = 100)]
    pub interval_ms: u64,
}
