use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

use modelsync_core::ModelHost;
use serde_json::Value;
use tracing::info;

/// Default host for standalone runs: announces loads via the log and writes
/// each decoded document under the output directory.
pub struct FileHost {
    out_dir: PathBuf,
}

impl FileHost {
    pub fn new(out_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir)?;
        Ok(Self { out_dir })
    }
}

impl ModelHost for FileHost {
    fn show_transient_message(&self, text: &str) {
        info!("{text}");
    }

    fn load_model(&self, document: Value, format: &str, name: &str) -> Result<(), String> {
        // Keep remote-supplied names inside out_dir.
        let file_name = name.replace(['/', '\\'], "_");
        let path = self.out_dir.join(format!("{file_name}.json"));
        let bytes = serde_json::to_vec_pretty(&document).map_err(|e| e.to_string())?;
        std::fs::write(&path, bytes).map_err(|e| e.to_string())?;
        info!("Wrote {} model '{}' to {}", format, name, path.display());
        Ok(())
    }
}

/// Test double that records every host call in arrival order.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
    reject_loads: bool,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Message(String),
    Load {
        document: Value,
        format: String,
        name: String,
    },
}

#[cfg(test)]
impl RecordingHost {
    /// A host that turns every load away.
    pub fn rejecting() -> Self {
        Self {
            reject_loads: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the models loaded so far, in call order.
    pub fn loaded_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Load { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl ModelHost for RecordingHost {
    fn show_transient_message(&self, text: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Message(text.to_string()));
    }

    fn load_model(&self, document: Value, format: &str, name: &str) -> Result<(), String> {
        self.calls.lock().unwrap().push(HostCall::Load {
            document,
            format: format.to_string(),
            name: name.to_string(),
        });
        if self.reject_loads {
            Err("load rejected".to_string())
        } else {
            Ok(())
        }
    }
}
