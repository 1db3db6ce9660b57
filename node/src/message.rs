use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message travelling through a flow. Only `payload` is interpreted, every other property
/// is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub payload: Value,

    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Message {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            properties: Map::new(),
        }
    }

    /// Objects are taken as a whole message, anything else becomes the payload of an
    /// otherwise empty one.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut properties) => {
                let payload = properties.remove("payload").unwrap_or(Value::Null);
                Self {
                    payload,
                    properties,
                }
            }
            payload => Self::new(payload),
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
