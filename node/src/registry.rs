use crate::error::NodeError;
use crate::host::FlowNode;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;

pub type NodeFactory = Box<dyn Fn(&Value) -> Result<Box<dyn FlowNode>, NodeError>>;

/// Maps node type names to constructors, the way a flow runtime looks up which code backs a
/// node it finds in a flow definition.
#[derive(Default)]
pub struct NodeRegistry {
    factories: HashMap<String, NodeFactory>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_type<F>(&mut self, type_name: &str, factory: F) -> Result<(), NodeError>
    where
        F: Fn(&Value) -> Result<Box<dyn FlowNode>, NodeError> + 'static,
    {
        if self.factories.contains_key(type_name) {
            return Err(NodeError::DuplicateType(type_name.to_string()));
        }

        debug!("Registering node type {}", type_name);
        self.factories
            .insert(type_name.to_string(), Box::new(factory));
        Ok(())
    }

    pub fn create(&self, type_name: &str, config: &Value) -> Result<Box<dyn FlowNode>, NodeError> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| NodeError::UnknownType(type_name.to_string()))?;
        factory(config)
    }

    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NodeHost;
    use crate::message::Message;

    struct Passthrough;

    impl FlowNode for Passthrough {
        fn type_name(&self) -> &'static str {
            "passthrough"
        }

        fn on_input(&mut self, message: Message, host: &mut dyn NodeHost) {
            host.send(message);
        }
    }

    #[test]
    fn test_register_and_create() {
        let mut registry = NodeRegistry::new();
        registry
            .register_type("passthrough", |_| Ok(Box::new(Passthrough)))
            .unwrap();

        let node = registry.create("passthrough", &Value::Null).unwrap();
        assert_eq!(node.type_name(), "passthrough");
        assert_eq!(registry.types(), vec!["passthrough"]);
    }

    #[test]
    fn test_duplicate_type() {
        let mut registry = NodeRegistry::new();
        registry
            .register_type("passthrough", |_| Ok(Box::new(Passthrough)))
            .unwrap();
        let result = registry.register_type("passthrough", |_| Ok(Box::new(Passthrough)));
        assert!(matches!(result, Err(NodeError::DuplicateType(_))));
    }

    #[test]
    fn test_unknown_type() {
        let registry = NodeRegistry::new();
        assert!(matches!(
            registry.create("slt", &Value::Null),
            Err(NodeError::UnknownType(_))
        ));
    }
}
