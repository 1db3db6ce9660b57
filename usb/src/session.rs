use crate::board::SltBoard;
use crate::commands::Command;
use crate::device::base::{DeviceDescriptor, SltBackend};
use crate::devices::{locate, matching_devices, SLT_IDS};
use crate::error::SltError;
use log::{debug, info};
use slt_types::{SensorReading, UsbIds};
use std::time::Duration;

/// Owns the backend and, once a board has been found, the single open handle to it.
///
/// The handle is opened lazily by [`SltSession::acquire`] and kept for later calls. Any error
/// raised while talking to the board closes it again, so the next call starts over with a
/// fresh enumeration.
pub struct SltSession<B: SltBackend> {
    backend: B,
    ids: UsbIds,
    read_timeout: Option<Duration>,
    board: Option<SltBoard>,
}

impl<B: SltBackend> SltSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ids: SLT_IDS,
            read_timeout: None,
            board: None,
        }
    }

    pub fn with_ids(mut self, ids: UsbIds) -> Self {
        self.ids = ids;
        self
    }

    /// Without a timeout, reads block until the board answers.
    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn ids(&self) -> UsbIds {
        self.ids
    }

    pub fn is_connected(&self) -> bool {
        self.board.is_some()
    }

    pub fn acquire(&mut self) -> Result<&mut SltBoard, SltError> {
        if self.board.is_none() {
            let board = self.connect()?;
            self.board = Some(board);
        }
        self.board.as_mut().ok_or(SltError::DeviceUnavailable)
    }

    fn connect(&mut self) -> Result<SltBoard, SltError> {
        let devices = self.backend.devices()?;
        let path = locate(&devices, self.ids)?;

        debug!("Opening SLT board at {}", path);
        let transport = self.backend.open(&path)?;
        info!("Connected to SLT board ({}) at {}", self.ids, path);

        Ok(SltBoard::new(transport, path, self.read_timeout))
    }

    /// Closes the cached handle, if any.
    pub fn teardown(&mut self) {
        if let Some(board) = self.board.take() {
            info!("Disconnecting SLT board at {}", board.path());
        }
    }

    pub fn read_temperature_light_humidity(&mut self) -> Result<SensorReading, SltError> {
        let result = self.acquire()?.read_temperature_light_humidity();
        self.settle(result)
    }

    pub fn send(&mut self, command: Command) -> Result<(), SltError> {
        let result = self.acquire()?.send(command);
        self.settle(result)
    }

    pub fn request(&mut self, command: Command) -> Result<Vec<u8>, SltError> {
        let result = self.acquire()?.request(command);
        self.settle(result)
    }

    /// Lists every attached board matching this session's ids.
    pub fn devices(&mut self) -> Result<Vec<DeviceDescriptor>, SltError> {
        Ok(matching_devices(self.backend.devices()?, self.ids))
    }

    fn settle<T>(&mut self, result: Result<T, SltError>) -> Result<T, SltError> {
        if let Err(error) = &result {
            debug!("Error talking to SLT board: {}", error);
            self.teardown();
        }
        result
    }
}
