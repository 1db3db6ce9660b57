pub mod board;
pub mod commands;
pub mod device;
pub mod devices;
pub mod error;
pub mod session;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use crate::board::SltBoard;
pub use crate::device::base::{DeviceDescriptor, DevicePath, SltBackend, SltTransport};
pub use crate::device::{HidApiBackend, HidTransport};
pub use crate::error::SltError;
pub use crate::session::SltSession;
