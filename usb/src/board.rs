use crate::commands::Command;
use crate::device::base::{DevicePath, SltTransport};
use crate::error::SltError;
use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};
use slt_types::SensorReading;
use std::time::Duration;

pub const REPORT_SIZE: usize = 64;

// Fixed point resolution of the board's temperature and light fields.
pub const CELSIUS_PER_BIT: f64 = 0.0625;
pub const LUX_PER_BIT: f64 = 1.2;

// status, temperature (2 bytes), light (2 bytes)
const READING_LENGTH: usize = 5;

/// An open SLT board. Dropping it closes the HID handle.
pub struct SltBoard {
    transport: Box<dyn SltTransport>,
    path: DevicePath,
    read_timeout: Option<Duration>,
}

impl SltBoard {
    pub fn new(
        transport: Box<dyn SltTransport>,
        path: DevicePath,
        read_timeout: Option<Duration>,
    ) -> Self {
        Self {
            transport,
            path,
            read_timeout,
        }
    }

    pub fn path(&self) -> &DevicePath {
        &self.path
    }

    /// Writes a single command report without waiting for a reply.
    pub fn send(&mut self, command: Command) -> Result<(), SltError> {
        let mut report = [0; REPORT_SIZE];
        report[0] = command.opcode();

        debug!("Sending {} ({:#04x}) to {}", command, command.opcode(), self.path);
        self.transport.write(&report)?;
        Ok(())
    }

    /// Writes a command and returns whatever the board sent back.
    pub fn request(&mut self, command: Command) -> Result<Vec<u8>, SltError> {
        let (response, length) = self.exchange(command)?;
        let mut response = response.to_vec();
        response.truncate(length);
        Ok(response)
    }

    pub fn read_temperature_light_humidity(&mut self) -> Result<SensorReading, SltError> {
        let (response, length) = self.exchange(Command::TemperatureLightHumidity)?;
        if length < READING_LENGTH {
            // Nothing guards the layout on the wire, decode the zero filled remainder anyway.
            warn!(
                "Short response from {}, Expected: {}, Received: {}",
                self.path, READING_LENGTH, length
            );
        }
        Ok(decode_reading(&response))
    }

    fn exchange(&mut self, command: Command) -> Result<([u8; REPORT_SIZE], usize), SltError> {
        self.send(command)?;

        let mut response = [0; REPORT_SIZE];
        let length = self.transport.read(&mut response, self.read_timeout)?;
        if length == 0 {
            if let Some(timeout) = self.read_timeout {
                return Err(SltError::Timeout(timeout));
            }
        }

        debug!("{:x?}", &response[..length]);
        Ok((response, length))
    }
}

pub fn decode_reading(response: &[u8; REPORT_SIZE]) -> SensorReading {
    let raw_celsius = LittleEndian::read_u16(&response[1..3]);
    let raw_lux = LittleEndian::read_u16(&response[3..5]);

    SensorReading {
        celsius: f64::from(raw_celsius) * CELSIUS_PER_BIT,
        lux: f64::from(raw_lux) * LUX_PER_BIT,
    }
}
