//! A scripted, in-memory HID backend. Replies are queued up front and handed out one per read,
//! while every enumeration, open, close and written report is recorded for inspection.
use crate::board::REPORT_SIZE;
use crate::device::base::{DeviceDescriptor, DevicePath, SltBackend, SltTransport};
use crate::devices::{PID_SLT, VID_SLT};
use crate::error::SltError;
use hidapi::HidError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const MOCK_PATH: &str = "mock-slt-0";

#[derive(Debug, Clone)]
pub enum MockReply {
    /// Bytes copied into the caller's buffer.
    Data(Vec<u8>),
    /// The board stays quiet, a read reports zero bytes.
    Silence,
    /// The read fails with the given message.
    Fault(String),
}

#[derive(Debug, Default)]
pub struct MockState {
    pub devices: Vec<DeviceDescriptor>,
    pub replies: VecDeque<MockReply>,
    pub written: Vec<Vec<u8>>,
    pub enumerations: usize,
    pub opens: usize,
    pub closes: usize,
    pub reads: usize,
    pub fail_next_write: bool,
    pub fail_next_open: bool,
}

/// Clones share their state, so a test can keep one handle while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new(devices: Vec<DeviceDescriptor>) -> Self {
        let backend = Self::default();
        backend.state().devices = devices;
        backend
    }

    /// A backend with a single SLT board attached at [`MOCK_PATH`].
    pub fn with_board() -> Self {
        Self::new(vec![DeviceDescriptor {
            vendor_id: VID_SLT,
            product_id: PID_SLT,
            path: DevicePath::from(MOCK_PATH),
        }])
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread poisons the lock, the data is still fine to look at.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push_reply(&self, reply: MockReply) {
        self.state().replies.push_back(reply);
    }

    pub fn fail_next_write(&self) {
        self.state().fail_next_write = true;
    }

    pub fn fail_next_open(&self) {
        self.state().fail_next_open = true;
    }

    pub fn unplug(&self) {
        self.state().devices.clear();
    }
}

impl SltBackend for MockBackend {
    fn devices(&mut self) -> Result<Vec<DeviceDescriptor>, SltError> {
        let mut state = self.state();
        state.enumerations += 1;
        Ok(state.devices.clone())
    }

    fn open(&mut self, path: &DevicePath) -> Result<Box<dyn SltTransport>, SltError> {
        let mut state = self.state();
        if state.fail_next_open {
            state.fail_next_open = false;
            return Err(fault(&format!("unable to open {}", path)));
        }
        state.opens += 1;

        Ok(Box::new(MockTransport {
            state: self.state.clone(),
        }))
    }
}

struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SltTransport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, SltError> {
        let mut state = self.state();
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(fault("write failed"));
        }
        state.written.push(data.to_vec());
        Ok(data.len())
    }

    fn read(&mut self, buffer: &mut [u8], _timeout: Option<Duration>) -> Result<usize, SltError> {
        let mut state = self.state();
        state.reads += 1;

        match state.replies.pop_front() {
            Some(MockReply::Data(data)) => {
                let length = data.len().min(buffer.len());
                buffer[..length].copy_from_slice(&data[..length]);
                Ok(length)
            }
            Some(MockReply::Fault(message)) => Err(fault(&message)),
            Some(MockReply::Silence) | None => Ok(0),
        }
    }
}

impl Drop for MockTransport {
    fn drop(&mut self) {
        self.state().closes += 1;
    }
}

fn fault(message: &str) -> SltError {
    SltError::Transport(HidError::HidApiError {
        message: message.to_string(),
    })
}

/// Builds a full input report carrying the given raw temperature and light values.
pub fn reading_response(raw_celsius: u16, raw_lux: u16) -> Vec<u8> {
    let mut response = vec![0; REPORT_SIZE];
    response[1..3].copy_from_slice(&raw_celsius.to_le_bytes());
    response[3..5].copy_from_slice(&raw_lux.to_le_bytes());
    response
}
