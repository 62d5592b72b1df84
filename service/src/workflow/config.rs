use crate::generator::dataset::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use spectrumcore::prelude::DISPLAY_PADDING_MHZ;
use spectrumcore::store::ColumnMapping;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Dataset file (`.json` rows or `.csv`).
    pub dataset: Option<PathBuf>,
    /// Serve rows from `generator` instead of a dataset file. Off unless
    /// asked for; a missing dataset is an error otherwise.
    pub synthetic: bool,
    pub bind: SocketAddr,
    pub display_padding_mhz: f64,
    pub columns: ColumnMapping,
    pub generator: GeneratorConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            synthetic: false,
            bind: SocketAddr::from(([127, 0, 0, 1], 8050)),
            display_padding_mhz: DISPLAY_PADDING_MHZ,
            columns: ColumnMapping::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading service config {}", path_ref.display()))?;
        let config: ServiceConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing service config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        dataset: Option<PathBuf>,
        generate: Option<usize>,
        bind: Option<SocketAddr>,
    ) -> Self {
        let mut config = Self::default();
        config.apply_overrides(dataset, generate, bind);
        config
    }

    /// Command-line values win over whatever the config file said.
    pub fn apply_overrides(
        &mut self,
        dataset: Option<PathBuf>,
        generate: Option<usize>,
        bind: Option<SocketAddr>,
    ) {
        if let Some(path) = dataset {
            self.dataset = Some(path);
            self.synthetic = false;
        }
        if let Some(rows) = generate {
            self.dataset = None;
            self.synthetic = true;
            self.generator.rows = rows;
        }
        if let Some(addr) = bind {
            self.bind = addr;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_overrides_defaults() {
        let cfg = ServiceConfig::from_args(
            Some(PathBuf::from("licences.csv")),
            None,
            Some("0.0.0.0:9000".parse().unwrap()),
        );
        assert_eq!(cfg.dataset, Some(PathBuf::from("licences.csv")));
        assert!(!cfg.synthetic);
        assert_eq!(cfg.bind.port(), 9000);
        assert_eq!(cfg.display_padding_mhz, 10.0);
    }

    #[test]
    fn generate_flag_replaces_the_dataset() {
        let mut cfg = ServiceConfig {
            dataset: Some(PathBuf::from("licences.json")),
            ..Default::default()
        };
        cfg.apply_overrides(None, Some(25), None);
        assert_eq!(cfg.dataset, None);
        assert!(cfg.synthetic);
        assert_eq!(cfg.generator.rows, 25);
    }

    #[test]
    fn defaults_do_not_enable_synthetic_rows() {
        let cfg = ServiceConfig::from_args(None, None, None);
        assert_eq!(cfg.dataset, None);
        assert!(!cfg.synthetic);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"dataset: data/licences.csv\nbind: 127.0.0.1:8080\ndisplay_padding_mhz: 5.0\ncolumns:\n  frequency: Freq_MHz\ngenerator:\n  seed: 7\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = ServiceConfig::load(&path).unwrap();
        assert_eq!(cfg.dataset, Some(PathBuf::from("data/licences.csv")));
        assert_eq!(cfg.bind.port(), 8080);
        assert_eq!(cfg.display_padding_mhz, 5.0);
        assert_eq!(cfg.columns.frequency, "Freq_MHz");
        assert_eq!(cfg.columns.latitude, "Latitude");
        assert_eq!(cfg.generator.seed, 7);
    }

    #[test]
    fn config_load_reports_the_path_on_failure() {
        let err = ServiceConfig::load("/nonexistent/service.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/service.yaml"));
    }
}
