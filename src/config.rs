//! Batch configuration: which device logs to process and where tables go.
//!
//! JSON shape:
//! {
//!   "output_dir": "data",              // optional, default "data"
//!   "repeated_phases": "overwrite",    // or "per-interval"
//!   "devices": [
//!     { "name": "fritzbox", "path": "saved_tests/fritzbox_7530.csv" }
//!   ]
//! }
//!
//! Relative paths are taken relative to the config file's directory.

use crate::Result;
use crate::model::RepeatedPhases;

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "data";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSpec {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub repeated_phases: RepeatedPhases,

    #[serde(default)]
    pub devices: Vec<DeviceSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSpec {
    pub name: String,
    pub path: PathBuf,
}

/// Validated batch, ready for the driver.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub output_dir: PathBuf,
    pub repeated_phases: RepeatedPhases,
    pub devices: Vec<DeviceSpec>,
}

impl BatchSpec {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let mut spec: BatchSpec = serde_json::from_str(&text)
            .with_context(|| format!("parse config file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        spec.output_dir = spec.output_dir.map(|d| base.join(d));
        for dev in &mut spec.devices {
            dev.path = base.join(&dev.path);
        }
        Ok(spec)
    }

    /// Check device entries and fill in defaults:
    /// - at least one device
    /// - names non-empty, unique, and usable as a file name prefix
    pub fn validate_and_build(self) -> Result<BatchConfig> {
        if self.devices.is_empty() {
            bail!("no devices configured");
        }

        let mut seen = BTreeSet::new();
        for dev in &self.devices {
            let name = dev.name.trim();
            if name.is_empty() {
                bail!("device with path {} has an empty name", dev.path.display());
            }
            if name != dev.name {
                bail!("device name {:?} has surrounding whitespace", dev.name);
            }
            if name.contains(['/', '\\']) {
                bail!("device name {:?} must not contain path separators", dev.name);
            }
            if !seen.insert(name) {
                bail!("duplicate device name: {}", name);
            }
        }

        Ok(BatchConfig {
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            repeated_phases: self.repeated_phases,
            devices: self.devices,
        })
    }
}

/// Parse a `NAME=PATH` command-line device entry.
pub fn parse_device_arg(s: &str) -> Result<DeviceSpec> {
    let Some((name, path)) = s.split_once('=') else {
        bail!("device must be given as NAME=PATH, got {:?}", s);
    };
    if path.trim().is_empty() {
        bail!("device {:?} has an empty path", name);
    }
    Ok(DeviceSpec {
        name: name.trim().to_string(),
        path: PathBuf::from(path.trim()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dev(name: &str, path: &str) -> DeviceSpec {
        DeviceSpec {
            name: name.into(),
            path: path.into(),
        }
    }

    #[test]
    fn json_defaults() {
        let spec: BatchSpec =
            serde_json::from_str(r#"{"devices": [{"name": "asus", "path": "a.csv"}]}"#).unwrap();
        let cfg = spec.validate_and_build().unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("data"));
        assert_eq!(cfg.repeated_phases, RepeatedPhases::Overwrite);
        assert_eq!(cfg.devices, vec![dev("asus", "a.csv")]);
    }

    #[test]
    fn json_per_interval_mode() {
        let spec: BatchSpec = serde_json::from_str(
            r#"{"repeated_phases": "per-interval", "devices": [{"name": "a", "path": "a.csv"}]}"#,
        )
        .unwrap();
        assert_eq!(spec.repeated_phases, RepeatedPhases::PerInterval);
    }

    #[test]
    fn device_order_is_kept() {
        let spec = BatchSpec {
            devices: vec![dev("huawei", "h.csv"), dev("alcatel", "a.csv")],
            ..Default::default()
        };
        let names: Vec<String> = spec
            .validate_and_build()
            .unwrap()
            .devices
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["huawei", "alcatel"]);
    }

    #[test]
    fn rejects_bad_device_names() {
        for devices in [
            vec![],
            vec![dev("", "a.csv")],
            vec![dev("a/b", "a.csv")],
            vec![dev("a", "a.csv"), dev("a", "b.csv")],
        ] {
            let spec = BatchSpec {
                devices,
                ..Default::default()
            };
            assert!(spec.validate_and_build().is_err());
        }
    }

    #[test]
    fn relative_paths_follow_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("devices.json");
        fs::write(
            &cfg_path,
            r#"{"output_dir": "out", "devices": [{"name": "asus", "path": "logs/asus.csv"}]}"#,
        )
        .unwrap();

        let spec = BatchSpec::from_file(&cfg_path).unwrap();
        assert_eq!(spec.output_dir, Some(dir.path().join("out")));
        assert_eq!(spec.devices[0].path, dir.path().join("logs/asus.csv"));
    }

    #[test]
    fn device_arg() {
        assert_eq!(parse_device_arg("asus=logs/a.csv").unwrap(), dev("asus", "logs/a.csv"));
        assert!(parse_device_arg("asus").is_err());
        assert!(parse_device_arg("asus=").is_err());
    }
}
