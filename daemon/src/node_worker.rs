use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use serde_json::Value;
use slt_node::{Message, NodeError, NodeHost, NodeRegistry, SLT_NODE_TYPE};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc::{Receiver, Sender};

// The node blocks while the board is read, so it lives on its own OS thread rather than on
// the runtime. Messages arrive on `input` and whatever the node sends goes out on `output`.
pub fn spawn_node_worker<F>(
    build_registry: F,
    config: Value,
    input: Receiver<Message>,
    output: Sender<Message>,
) -> Result<JoinHandle<()>>
where
    F: FnOnce() -> Result<NodeRegistry, NodeError> + Send + 'static,
{
    thread::Builder::new()
        .name("slt-node".to_string())
        .spawn(move || run_node(build_registry, config, input, output))
        .context("Could not start the node worker thread")
}

fn run_node<F>(
    build_registry: F,
    config: Value,
    mut input: Receiver<Message>,
    output: Sender<Message>,
) where
    F: FnOnce() -> Result<NodeRegistry, NodeError>,
{
    let registry = match build_registry() {
        Ok(registry) => registry,
        Err(error) => {
            error!("Unable to register node types: {}", error);
            return;
        }
    };

    let mut node = match registry.create(SLT_NODE_TYPE, &config) {
        Ok(node) => node,
        Err(error) => {
            error!("Unable to create {} node: {}", SLT_NODE_TYPE, error);
            return;
        }
    };

    info!("{} node ready", node.type_name());
    let mut host = ChannelHost { output };
    while let Some(message) = input.blocking_recv() {
        node.on_input(message, &mut host);
    }

    debug!("Input closed, shutting down {} node", node.type_name());
    node.on_close();
}

struct ChannelHost {
    output: Sender<Message>,
}

impl NodeHost for ChannelHost {
    fn send(&mut self, message: Message) {
        if self.output.blocking_send(message).is_err() {
            warn!("Output closed, dropping message");
        }
    }

    fn warn(&mut self, warning: &str) {
        warn!("{}", warning);
    }
}
