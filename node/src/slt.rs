use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::host::{FlowNode, NodeHost};
use crate::message::Message;
use crate::registry::NodeRegistry;
use log::debug;
use serde_json::json;
use slt_usb::{SltBackend, SltSession};

pub const SLT_NODE_TYPE: &str = "slt";

/// Reads the board every time a message arrives, and sends the message on with
/// `payload = {celsius, lux}`. Failures produce a warning and no output.
pub struct SltNode<B: SltBackend> {
    name: String,
    session: SltSession<B>,
}

impl<B: SltBackend> SltNode<B> {
    pub fn new(config: &NodeConfig, backend: B) -> Self {
        let session = SltSession::new(backend)
            .with_ids(config.ids())
            .with_read_timeout(config.read_timeout());

        Self {
            name: config
                .name
                .clone()
                .unwrap_or_else(|| SLT_NODE_TYPE.to_string()),
            session,
        }
    }

    pub fn session(&self) -> &SltSession<B> {
        &self.session
    }
}

impl<B: SltBackend> FlowNode for SltNode<B> {
    fn type_name(&self) -> &'static str {
        SLT_NODE_TYPE
    }

    fn on_input(&mut self, mut message: Message, host: &mut dyn NodeHost) {
        let reading = match self.session.read_temperature_light_humidity() {
            Ok(reading) => reading,
            Err(error) => {
                debug!("[{}] Reading failed: {}", self.name, error);
                host.warn(&error.to_string());
                self.session.teardown();
                return;
            }
        };

        debug!("[{}] {:?}", self.name, reading);
        message.payload = json!({
            "celsius": reading.celsius,
            "lux": reading.lux,
        });
        host.send(message);
    }

    fn on_close(&mut self) {
        self.session.teardown();
    }
}

/// Registers the `slt` node type. Every node created gets its own backend from `backend`.
pub fn register<B, F>(registry: &mut NodeRegistry, backend: F) -> Result<(), NodeError>
where
    B: SltBackend + 'static,
    F: Fn() -> B + 'static,
{
    registry.register_type(SLT_NODE_TYPE, move |config| {
        let config = NodeConfig::from_value(config)?;
        Ok(Box::new(SltNode::new(&config, backend())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use serde_json::Value;
    use slt_usb::mock::{reading_response, MockBackend, MockReply};

    fn node(backend: &MockBackend) -> SltNode<MockBackend> {
        SltNode::new(&NodeConfig::default(), backend.clone())
    }

    #[test]
    fn test_end_to_end_reading() {
        let backend = MockBackend::with_board();
        // 320 * 0.0625 = 20.0, 100 * 1.2 = 120.0
        backend.push_reply(MockReply::Data(reading_response(320, 100)));

        let mut node = node(&backend);
        let mut host = RecordingHost::default();
        node.on_input(Message::new(json!({})), &mut host);

        assert!(host.warnings.is_empty());
        assert_eq!(host.sent.len(), 1);
        assert_eq!(host.sent[0].payload, json!({"celsius": 20.0, "lux": 120.0}));
        assert!(node.session().is_connected());
        assert_eq!(backend.state().closes, 0);
    }

    #[test]
    fn test_reference_response() {
        let backend = MockBackend::with_board();
        backend.push_reply(MockReply::Data(reading_response(0x0100, 0x0200)));

        let mut node = node(&backend);
        let mut host = RecordingHost::default();
        node.on_input(Message::default(), &mut host);

        assert_eq!(host.sent[0].payload, json!({"celsius": 16.0, "lux": 614.4}));
    }

    #[test]
    fn test_message_properties_pass_through() {
        let backend = MockBackend::with_board();
        backend.push_reply(MockReply::Data(reading_response(320, 100)));

        let mut node = node(&backend);
        let mut host = RecordingHost::default();
        let inbound = Message::from_value(json!({
            "_msgid": "4f2c",
            "topic": "greenhouse/slt",
            "payload": "go"
        }));
        node.on_input(inbound, &mut host);

        let outbound = &host.sent[0];
        assert_eq!(outbound.property("_msgid"), Some(&json!("4f2c")));
        assert_eq!(outbound.property("topic"), Some(&json!("greenhouse/slt")));
        assert_eq!(outbound.payload, json!({"celsius": 20.0, "lux": 120.0}));
    }

    #[test]
    fn test_no_board_warns_and_sends_nothing() {
        let backend = MockBackend::new(vec![]);

        let mut node = node(&backend);
        let mut host = RecordingHost::default();
        node.on_input(Message::default(), &mut host);

        assert!(host.sent.is_empty());
        assert_eq!(host.warnings, vec!["No SLT board available".to_string()]);
    }

    #[test]
    fn test_failure_resets_connection() {
        let backend = MockBackend::with_board();
        backend.push_reply(MockReply::Fault("device disconnected".to_string()));
        backend.push_reply(MockReply::Data(reading_response(320, 100)));

        let mut node = node(&backend);
        let mut host = RecordingHost::default();

        node.on_input(Message::default(), &mut host);
        assert!(host.sent.is_empty());
        assert_eq!(host.warnings.len(), 1);
        assert!(!node.session().is_connected());

        node.on_input(Message::default(), &mut host);
        assert_eq!(host.sent.len(), 1);

        let state = backend.state();
        assert_eq!(state.enumerations, 2);
        assert_eq!(state.opens, 2);
        assert_eq!(state.closes, 1);
    }

    #[test]
    fn test_consecutive_messages_share_handle() {
        let backend = MockBackend::with_board();
        backend.push_reply(MockReply::Data(reading_response(320, 100)));
        backend.push_reply(MockReply::Data(reading_response(336, 50)));

        let mut node = node(&backend);
        let mut host = RecordingHost::default();
        node.on_input(Message::default(), &mut host);
        node.on_input(Message::default(), &mut host);

        assert_eq!(host.sent.len(), 2);
        assert_eq!(host.sent[1].payload, json!({"celsius": 21.0, "lux": 60.0}));
        assert_eq!(backend.state().enumerations, 1);
    }

    #[test]
    fn test_timeout_warns() {
        let backend = MockBackend::with_board();
        backend.push_reply(MockReply::Silence);

        let config = NodeConfig {
            read_timeout_ms: Some(100),
            ..NodeConfig::default()
        };
        let mut node = SltNode::new(&config, backend.clone());
        let mut host = RecordingHost::default();
        node.on_input(Message::default(), &mut host);

        assert!(host.sent.is_empty());
        assert_eq!(
            host.warnings,
            vec!["SLT board did not respond within 100ms".to_string()]
        );
        assert!(!node.session().is_connected());
    }

    #[test]
    fn test_close_releases_board() {
        let backend = MockBackend::with_board();
        backend.push_reply(MockReply::Data(reading_response(320, 100)));

        let mut node = node(&backend);
        let mut host = RecordingHost::default();
        node.on_input(Message::default(), &mut host);
        assert!(node.session().is_connected());

        node.on_close();
        assert!(!node.session().is_connected());
        assert_eq!(backend.state().closes, 1);
    }

    #[test]
    fn test_registered_type() {
        let backend = MockBackend::with_board();
        backend.push_reply(MockReply::Data(reading_response(320, 100)));

        let mut registry = NodeRegistry::new();
        let shared = backend.clone();
        register(&mut registry, move || shared.clone()).unwrap();

        let mut node = registry
            .create(SLT_NODE_TYPE, &json!({"name": "bench"}))
            .unwrap();
        assert_eq!(node.type_name(), "slt");

        let mut host = RecordingHost::default();
        node.on_input(Message::new(Value::Null), &mut host);
        assert_eq!(host.sent.len(), 1);
    }

    #[test]
    fn test_registered_type_rejects_bad_config() {
        let mut registry = NodeRegistry::new();
        register(&mut registry, MockBackend::with_board).unwrap();

        let result = registry.create(SLT_NODE_TYPE, &json!({"read_timeout_ms": 0}));
        assert!(matches!(result, Err(NodeError::InvalidConfig(_))));
    }
}
