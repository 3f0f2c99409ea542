pub mod adu;
pub mod buffer;
pub mod link;
pub mod order;
pub mod profiles;
pub mod sample;
pub mod show;
pub mod validate;
pub mod where_used;

use anyhow::Context;
use ddoptim_core::Network;
use ddoptim_core::config::{PROJECT_CONFIG_FILE, ProjectConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output::{CliError, OutputMode, render_error, render_network_error};

/// Where commands find their network document.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
    /// `--file` override; wins over `[network] path`.
    pub file: Option<PathBuf>,
}

impl Project {
    /// The network file to operate on, if one was named anywhere.
    pub fn network_path(&self) -> Option<PathBuf> {
        self.file
            .as_ref()
            .map(|file| self.root.join(file))
            .or_else(|| self.config.network_path(&self.root))
    }

    /// Resolve the network path or report a missing one.
    pub fn require_network_path(&self, output: OutputMode) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.network_path() {
            return Ok(path);
        }
        render_error(
            output,
            &CliError::with_details(
                "no network file given",
                format!("pass --file or set [network] path in {PROJECT_CONFIG_FILE}"),
                "no_network",
            ),
        )?;
        anyhow::bail!("no network file given")
    }

    /// Read and deserialize the network document.
    pub fn load(&self, output: OutputMode) -> anyhow::Result<(PathBuf, Network)> {
        let path = self.require_network_path(output)?;
        let network = load_network(&path, output)?;
        Ok((path, network))
    }
}

/// Read a network document; network-level failures are rendered first.
pub fn load_network(path: &Path, output: OutputMode) -> anyhow::Result<Network> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            render_error(
                output,
                &CliError::with_details(
                    format!("cannot read {}: {err}", path.display()),
                    "create one with `ddoptim sample --out network.json`",
                    "io_error",
                ),
            )?;
            return Err(err).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    match Network::from_json(&json) {
        Ok(network) => {
            debug!(path = %path.display(), nodes = network.len(), "network loaded");
            Ok(network)
        }
        Err(err) => {
            render_network_error(output, &err)?;
            Err(err).with_context(|| format!("Failed to load {}", path.display()))
        }
    }
}

/// Serialize the network back to `path`.
pub fn save_network(network: &Network, path: &Path) -> anyhow::Result<()> {
    let json = network.to_json_pretty()?;
    fs::write(path, json + "\n").with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "network saved");
    Ok(())
}

/// Report a failed node lookup the same way for every command.
pub fn unknown_node(output: OutputMode, node_id: &str) -> anyhow::Result<()> {
    let err = ddoptim_core::NetworkError::UnknownNode(node_id.to_string());
    render_network_error(output, &err)?;
    Err(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddoptim_core::sample::bicycle_network;

    fn project(root: &Path, file: Option<&str>) -> Project {
        Project {
            root: root.to_path_buf(),
            config: ProjectConfig::default(),
            file: file.map(PathBuf::from),
        }
    }

    #[test]
    fn file_flag_beats_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut p = project(dir.path(), Some("a.json"));
        p.config.network.path = Some("b.json".into());
        assert_eq!(p.network_path(), Some(dir.path().join("a.json")));

        p.file = None;
        assert_eq!(p.network_path(), Some(dir.path().join("b.json")));
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let p = project(dir.path(), None);
        assert!(p.require_network_path(OutputMode::Json).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("net.json");
        let net = bicycle_network().expect("sample");
        save_network(&net, &path).expect("save");
        let back = load_network(&path, OutputMode::Json).expect("load");
        assert_eq!(back, net);
    }

    #[test]
    fn corrupt_document_fails_to_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("net.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(load_network(&path, OutputMode::Json).is_err());
    }
}
