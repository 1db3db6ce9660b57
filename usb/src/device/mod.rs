pub mod base;

// hidapi handles the platform split (hidraw / libusb, IOKit, the Windows HID stack) itself.
mod hid;

pub use crate::device::hid::device::{HidApiBackend, HidTransport};
