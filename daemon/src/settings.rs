use anyhow::{Context, Result};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use slt_node::NodeConfig;
use std::fs::{create_dir_all, File};
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub node: NodeConfig,
}

impl Settings {
    /// Reads the settings, then writes them straight back so a fresh install ends up with a
    /// file listing every available key.
    pub fn load(path: &Path) -> Result<Settings> {
        let settings = Settings::read(path)?;
        if let Err(e) = settings.write(path) {
            error!("Couldn't save settings to {}: {:#}", path.to_string_lossy(), e);
        }
        Ok(settings)
    }

    pub fn read(path: &Path) -> Result<Settings> {
        match File::open(path) {
            Ok(reader) => serde_json::from_reader(reader).context(format!(
                "Could not parse daemon settings file at {}",
                path.to_string_lossy()
            )),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(error) => Err(error).context(format!(
                "Could not open daemon settings file for reading at {}",
                path.to_string_lossy()
            )),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if let Err(e) = create_dir_all(parent) {
                if e.kind() != ErrorKind::AlreadyExists {
                    return Err(e).context(format!(
                        "Could not create settings directory at {}",
                        parent.to_string_lossy()
                    ));
                }
            }
        }
        let writer = File::create(path).context(format!(
            "Could not open daemon settings file for writing at {}",
            path.to_string_lossy()
        ))?;
        serde_json::to_writer_pretty(writer, self).context(format!(
            "Could not write to daemon settings file at {}",
            path.to_string_lossy()
        ))?;
        Ok(())
    }

    /// The node configuration with any command line overrides applied.
    pub fn node_config(&self, read_timeout_ms: Option<u64>) -> Result<(NodeConfig, Value)> {
        let mut config = self.node.clone();
        if read_timeout_ms.is_some() {
            config.read_timeout_ms = read_timeout_ms;
        }
        config.validate()?;

        let value = serde_json::to_value(&config).context("Could not encode node configuration")?;
        Ok((config, value))
    }
}
