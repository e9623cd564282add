// src/transport.rs
//! Serial transport for the GPS receiver

use crate::{config::GpsConfig, error::Result};
use tokio::io::BufReader;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Open the configured serial device as a line-readable stream
pub fn open_serial(config: &GpsConfig) -> Result<BufReader<SerialStream>> {
    log::info!("Connecting to GPS on {} at {} baud...", config.device, config.baud_rate);

    let serial = tokio_serial::new(&config.device, config.baud_rate)
        .timeout(config.read_timeout())
        .open_native_async()?;

    log::info!("Connected to {}", config.device);
    Ok(BufReader::new(serial))
}

/// List available serial ports
pub fn list_serial_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()?;

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}
