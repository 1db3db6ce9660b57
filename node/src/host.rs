use crate::message::Message;

/// What a node may ask of the runtime hosting it.
pub trait NodeHost {
    /// Forwards a message to whatever is wired to the node's output.
    fn send(&mut self, message: Message);

    fn warn(&mut self, warning: &str);
}

pub trait FlowNode {
    fn type_name(&self) -> &'static str;

    fn on_input(&mut self, message: Message, host: &mut dyn NodeHost);

    fn on_close(&mut self) {}
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub sent: Vec<Message>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
impl NodeHost for RecordingHost {
    fn send(&mut self, message: Message) {
        self.sent.push(message);
    }

    fn warn(&mut self, warning: &str) {
        self.warnings.push(warning.to_string());
    }
}
