use crate::error::NodeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use slt_types::UsbIds;
use slt_usb::devices::{PID_SLT, VID_SLT};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub name: Option<String>,
    pub vendor_id: u16,
    pub product_id: u16,

    /// How long to wait for the board to answer. Unset means wait forever.
    pub read_timeout_ms: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: None,
            vendor_id: VID_SLT,
            product_id: PID_SLT,
            read_timeout_ms: None,
        }
    }
}

impl NodeConfig {
    pub fn from_value(value: &Value) -> Result<Self, NodeError> {
        let config = match value {
            Value::Null => NodeConfig::default(),
            value => NodeConfig::deserialize(value)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NodeError> {
        if self.read_timeout_ms == Some(0) {
            return Err(NodeError::InvalidConfig(
                "read_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ids(&self) -> UsbIds {
        UsbIds::new(self.vendor_id, self.product_id)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}
