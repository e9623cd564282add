// src/main.rs
//! pigps - read GGA fixes from a serial GPS receiver

use anyhow::Context;
use clap::Parser;
use pigps::{
    display::{json::JsonDisplay, terminal::TerminalDisplay},
    ingest, transport, Coordinate, GpsConfig, Sinks,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pigps", version, about = "Read and log GPS fixes from a serial NMEA receiver")]
struct Args {
    /// Serial device the receiver is attached to
    #[arg(short, long)]
    device: Option<String>,

    /// Serial baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Append every fix to a CSV log
    #[arg(short, long)]
    log: bool,

    /// Log file (default: gpsLog-<UTC timestamp>.csv)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print debug information
    #[arg(long)]
    debug: bool,

    /// Target latitude for distance display
    #[arg(long, requires = "target_lon", allow_hyphen_values = true)]
    target_lat: Option<f64>,

    /// Target longitude for distance display
    #[arg(long, requires = "target_lat", allow_hyphen_values = true)]
    target_lon: Option<f64>,

    /// Report distances only with more satellites than this
    #[arg(long)]
    min_satellites: Option<u32>,

    /// Print one JSON fix per second instead of the terminal display
    #[arg(long)]
    json: bool,

    /// Save the effective settings as the new defaults
    #[arg(long)]
    save_config: bool,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

impl Args {
    fn apply(&self, config: &mut GpsConfig) {
        if let Some(ref device) = self.device {
            config.device = device.clone();
        }
        if let Some(baud) = self.baud {
            config.baud_rate = baud;
        }
        if self.log || self.log_file.is_some() {
            config.enable_logging(self.log_file.clone());
        }
        if self.debug {
            config.debug = true;
        }
        if let (Some(lat), Some(lon)) = (self.target_lat, self.target_lon) {
            config.target = Some(Coordinate::new(lat, lon));
        }
        if let Some(min) = self.min_satellites {
            config.distance_min_satellites = min;
        }
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let (mut config, load_error) = match GpsConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (GpsConfig::default(), Some(e)),
    };
    args.apply(&mut config);
    init_logging(config.debug);

    if let Some(e) = load_error {
        log::warn!("Using default configuration: {}", e);
    }
    log::debug!("Configuration: {:?}", config);

    if args.list_ports {
        transport::list_serial_ports().context("listing serial ports")?;
        return Ok(());
    }

    if args.save_config {
        let path = config.save().context("saving configuration")?;
        log::info!("Saved configuration to {}", path.display());
    }

    let serial = transport::open_serial(&config)
        .with_context(|| format!("opening GPS receiver on {}", config.device))?;
    let sinks = Sinks::from_config(&config).context("opening log files")?;

    let handle = ingest::start(serial, &config, sinks);

    if args.json {
        JsonDisplay::new().run(&handle).await?;
    } else {
        TerminalDisplay::new(config.target, config.distance_min_satellites)
            .run(&handle)
            .await?;
    }

    handle.stop();
    handle.join().await.context("GPS ingest stopped")?;
    Ok(())
}
