pub mod config;
pub mod error;
pub mod host;
pub mod message;
pub mod registry;
pub mod slt;

pub use crate::config::NodeConfig;
pub use crate::error::NodeError;
pub use crate::host::{FlowNode, NodeHost};
pub use crate::message::Message;
pub use crate::registry::NodeRegistry;
pub use crate::slt::{SltNode, SLT_NODE_TYPE};
