use std::fmt::Formatter;

/// One temperature / light sample taken from an SLT board.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SensorReading {
    pub celsius: f64,
    pub lux: f64,
}

/// The USB vendor / product pair used to pick a board out of the HID device list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UsbIds {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl UsbIds {
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }
}

impl std::fmt::Display for UsbIds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}
