use crate::device::base::{DeviceDescriptor, DevicePath};
use crate::error::SltError;
use slt_types::UsbIds;

// Microchip vendor id, and the product id the SLT firmware enumerates with.
pub const VID_SLT: u16 = 0x04d8;
pub const PID_SLT: u16 = 0x003f;

pub const SLT_IDS: UsbIds = UsbIds::new(VID_SLT, PID_SLT);

/// Picks the first device in enumeration order carrying the given ids. With several identical
/// boards attached, which one is chosen depends entirely on the order the OS reports them.
pub fn locate(devices: &[DeviceDescriptor], ids: UsbIds) -> Result<DevicePath, SltError> {
    devices
        .iter()
        .find(|device| ids.matches(device.vendor_id, device.product_id))
        .map(|device| device.path.clone())
        .ok_or(SltError::DeviceUnavailable)
}

pub fn matching_devices(devices: Vec<DeviceDescriptor>, ids: UsbIds) -> Vec<DeviceDescriptor> {
    devices
        .into_iter()
        .filter(|device| ids.matches(device.vendor_id, device.product_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(vendor_id: u16, product_id: u16, path: &str) -> DeviceDescriptor {
        DeviceDescriptor {
            vendor_id,
            product_id,
            path: DevicePath::from(path),
        }
    }

    #[test]
    fn test_ids_are_numeric() {
        assert_eq!(VID_SLT, 1240);
        assert_eq!(PID_SLT, 63);
    }

    #[test]
    fn test_locate_empty() {
        assert!(matches!(
            locate(&[], SLT_IDS),
            Err(SltError::DeviceUnavailable)
        ));
    }

    #[test]
    fn test_locate_no_match() {
        let devices = vec![
            descriptor(0x046d, 0xc52b, "/dev/hidraw0"),
            // Right vendor, wrong product.
            descriptor(VID_SLT, 0x0040, "/dev/hidraw1"),
            // Right product, wrong vendor.
            descriptor(0x04d9, PID_SLT, "/dev/hidraw2"),
        ];
        assert!(matches!(
            locate(&devices, SLT_IDS),
            Err(SltError::DeviceUnavailable)
        ));
    }

    #[test]
    fn test_locate_single_match() {
        let devices = vec![
            descriptor(0x046d, 0xc52b, "/dev/hidraw0"),
            descriptor(1240, 63, "/dev/hidraw3"),
            descriptor(0x1220, 0x8fe0, "/dev/hidraw4"),
        ];
        for _ in 0..3 {
            let path = locate(&devices, SLT_IDS).unwrap();
            assert_eq!(path.as_str(), "/dev/hidraw3");
        }
    }

    #[test]
    fn test_locate_first_in_enumeration_order() {
        let devices = vec![
            descriptor(VID_SLT, PID_SLT, "/dev/hidraw5"),
            descriptor(VID_SLT, PID_SLT, "/dev/hidraw2"),
        ];
        assert_eq!(locate(&devices, SLT_IDS).unwrap().as_str(), "/dev/hidraw5");
    }

    #[test]
    fn test_matching_devices() {
        let devices = vec![
            descriptor(VID_SLT, PID_SLT, "a"),
            descriptor(0x046d, 0xc52b, "b"),
            descriptor(VID_SLT, PID_SLT, "c"),
        ];
        let found = matching_devices(devices, SLT_IDS);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].path.as_str(), "a");
        assert_eq!(found[1].path.as_str(), "c");
    }
}
