//! Sdp3x command-line utility
//!
//! Copyright 2019 Ryan Kurte

extern crate embedded_hal;
extern crate linux_embedded_hal;
use linux_embedded_hal::I2cdev;

extern crate structopt;
use structopt::StructOpt;

extern crate humantime;
use humantime::{Duration as HumanDuration};

#[macro_use] extern crate log;
extern crate simplelog;
use simplelog::{TermLogger, LevelFilter};

extern crate sensor_sdp3x;
use sensor_sdp3x::{Sdp3x, Config, MeasurementType, DEFAULT_ADDRESS};

#[derive(StructOpt)]
#[structopt(name = "sdp3x-util")]
/// A Command Line Interface (CLI) for interacting with a local Sdp3x differential pressure sensor over I2C
pub struct Options {

    /// Specify the i2c interface to use to connect to the sdp3x device
    #[structopt(short="d", long = "i2c", default_value = "/dev/i2c-1", env = "SDP3X_I2C")]
    i2c: String,

    /// Sensor I2C address (0x21, 0x22 or 0x23 depending on jumpers)
    #[structopt(short = "a", long = "address", default_value = "33", env = "SDP3X_ADDRESS")]
    address: u8,

    /// Measure raw differential pressure rather than temperature compensated mass flow
    #[structopt(long = "diff-pressure")]
    diff_pressure: bool,

    /// Use single triggered measurements instead of continuous mode
    #[structopt(long = "triggered")]
    triggered: bool,

    /// Average samples between reads (continuous mode only)
    #[structopt(long = "averaging")]
    averaging: bool,

    /// Use clock stretching for triggered measurements
    #[structopt(long = "stretching")]
    stretching: bool,

    /// Fixed pressure scale factor, overrides the value reported by the sensor
    #[structopt(long = "scale-factor")]
    scale_factor: Option<i16>,

    /// Specify period for taking measurements
    #[structopt(short = "p", long = "sample-period", default_value="1s")]
    pub period: HumanDuration,

    /// Delay between triggering a measurement and reading it
    #[structopt(long = "settle-delay", default_value="50ms")]
    pub settle_delay: HumanDuration,

    /// Number of allowed I2C errors (consecutive) prior to exiting
    #[structopt(long = "allowed-errors", default_value="3")]
    pub allowed_errors: usize,

    /// Enable verbose logging
    #[structopt(long = "log-level", default_value = "info")]
    level: LevelFilter,
}

fn main() {
    // Load options
    let opts = Options::from_args();

    // Setup logging
    if let Err(e) = TermLogger::init(opts.level, simplelog::Config::default()) {
        eprintln!("Error initialising logger: {:?}", e);
    }

    debug!("Connecting to I2C device");
    let i2c = match I2cdev::new(&opts.i2c) {
        Ok(v) => v,
        Err(e) => {
            error!("Error opening I2C device '{}': {:?}", &opts.i2c, e);
            std::process::exit(-1);
        }
    };

    if opts.address != DEFAULT_ADDRESS {
        debug!("Using non-default address: {:#04x}", opts.address);
    }

    let mut config = Config::new(opts.address);
    if let Some(s) = opts.scale_factor {
        config = config.scale_factor(s);
    }

    debug!("Connecting to SDP3x");
    let mut sensor = Sdp3x::new(i2c, config);
    match sensor.initialize() {
        Ok(v) => info!("Connected to {:?}", v),
        Err(e) => {
            error!("Error connecting to SDP3x: {:?}", e);
            std::process::exit(-2);
        }
    };

    let kind = match opts.diff_pressure {
        true => MeasurementType::DiffPressure,
        false => MeasurementType::MassFlow,
    };

    if !opts.triggered {
        debug!("Starting continuous measurement");
        if let Err(e) = sensor.start_continuous(kind, opts.averaging) {
            error!("Error starting continuous mode: {:?}", e);
            std::process::exit(-3);
        }

        debug!("Waiting for sensor to initialise");
        std::thread::sleep(*opts.settle_delay);
    }

    let mut errors = 0;

    loop {
        debug!("Starting sensor read cycle");

        if opts.triggered {
            if let Err(e) = sensor.trigger_measurement(kind, opts.stretching) {
                warn!("Error triggering measurement: {:?}", e);
                errors += 1;
            }

            if !opts.stretching {
                std::thread::sleep(*opts.settle_delay);
            }
        }

        match sensor.read_measurement() {
            Ok(m) => {
                info!("Pressure: {:.3} Pa, Temperature: {:.2} C", m.pressure, m.temperature);
                errors = 0;
            },
            Err(e) => {
                warn!("Error reading sensor data: {:?}", e);
                errors += 1;
            },
        }

        if errors > opts.allowed_errors {
            error!("Exceeded maximum allowed I2C errors");
            let _ = sensor.stop_continuous();
            std::process::exit(-4);
        }

        // Wait for the next sample
        std::thread::sleep(*opts.period);
    }
}
