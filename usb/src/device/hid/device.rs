use crate::device::base::{DeviceDescriptor, DevicePath, SltBackend, SltTransport};
use crate::error::SltError;
use hidapi::{HidApi, HidDevice};
use log::debug;
use std::ffi::CString;
use std::time::Duration;

/// Real hardware access through the system HID stack.
#[derive(Default)]
pub struct HidApiBackend {
    api: Option<HidApi>,
}

impl HidApiBackend {
    pub fn new() -> Self {
        Self { api: None }
    }

    // Created on first use, refreshed on every enumeration.
    fn refreshed_api(&mut self) -> Result<&HidApi, SltError> {
        let api = match self.api.take() {
            Some(mut api) => {
                api.refresh_devices()?;
                api
            }
            None => HidApi::new()?,
        };
        let api: &HidApi = self.api.insert(api);
        Ok(api)
    }

    fn api(&mut self) -> Result<&HidApi, SltError> {
        let api = match self.api.take() {
            Some(api) => api,
            None => HidApi::new()?,
        };
        let api: &HidApi = self.api.insert(api);
        Ok(api)
    }
}

impl SltBackend for HidApiBackend {
    fn devices(&mut self) -> Result<Vec<DeviceDescriptor>, SltError> {
        let api = self.refreshed_api()?;
        let devices: Vec<DeviceDescriptor> = api
            .device_list()
            .map(|info| DeviceDescriptor {
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
                path: DevicePath::from(info.path().to_string_lossy().into_owned()),
            })
            .collect();

        debug!("Enumerated {} HID devices", devices.len());
        Ok(devices)
    }

    fn open(&mut self, path: &DevicePath) -> Result<Box<dyn SltTransport>, SltError> {
        let c_path =
            CString::new(path.as_str()).map_err(|_| SltError::InvalidPath(path.to_string()))?;
        let device = self.api()?.open_path(&c_path)?;

        Ok(Box::new(HidTransport {
            device,
            path: path.clone(),
        }))
    }
}

pub struct HidTransport {
    device: HidDevice,
    path: DevicePath,
}

impl SltTransport for HidTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, SltError> {
        Ok(self.device.write(data)?)
    }

    fn read(&mut self, buffer: &mut [u8], timeout: Option<Duration>) -> Result<usize, SltError> {
        match timeout {
            None => Ok(self.device.read(buffer)?),
            Some(timeout) => {
                let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
                Ok(self.device.read_timeout(buffer, millis)?)
            }
        }
    }
}

impl Drop for HidTransport {
    fn drop(&mut self) {
        // hidapi closes the underlying handle when the HidDevice goes away.
        debug!("Releasing HID handle for {}", self.path);
    }
}
