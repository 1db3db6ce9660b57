use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum SltError {
    #[error("No SLT board available")]
    DeviceUnavailable,

    #[error("HID error: {0}")]
    Transport(#[from] hidapi::HidError),

    #[error("SLT board did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Invalid HID device path: {0}")]
    InvalidPath(String),
}
