use crate::error::SltError;
use std::fmt::Formatter;
use std::time::Duration;

// The two seams between the board logic and the OS. Anything that can enumerate HID devices and
// hand back an open channel to one of them can drive an SLT board.
pub trait SltBackend {
    fn devices(&mut self) -> Result<Vec<DeviceDescriptor>, SltError>;
    fn open(&mut self, path: &DevicePath) -> Result<Box<dyn SltTransport>, SltError>;
}

pub trait SltTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, SltError>;

    /// Reads one input report into `buffer`. With no timeout this blocks until the device
    /// replies. With a timeout, `Ok(0)` means nothing arrived in time.
    fn read(&mut self, buffer: &mut [u8], timeout: Option<Duration>) -> Result<usize, SltError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DevicePath(String);

impl DevicePath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DevicePath {
    fn from(value: &str) -> Self {
        DevicePath(value.to_string())
    }
}

impl From<String> for DevicePath {
    fn from(value: String) -> Self {
        DevicePath(value)
    }
}

impl std::fmt::Display for DevicePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub vendor_id: u16,
    pub product_id: u16,
    pub path: DevicePath,
}
