use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = "./label-audit.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowSize,
    pub extensions: Vec<String>,
    /// Longest edge of the preview thumbnail, in pixels.
    pub preview_size: u32,
    pub log_file: PathBuf,
    pub last_image_dir: Option<PathBuf>,
    pub last_labels_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowSize {
                width: 1100.0,
                height: 750.0,
            },
            extensions: vec!["jpg".into(), "png".into()],
            preview_size: 600,
            log_file: PathBuf::from("label-audit.log"),
            last_image_dir: None,
            last_labels_file: None,
        }
    }
}

pub fn read_config(path: impl AsRef<Path>) -> Option<Config> {
    let file = File::open(path.as_ref()).ok()?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).ok()
}

pub fn write_config(path: impl AsRef<Path>, config: &Config) -> anyhow::Result<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    Ok(serde_json::to_writer_pretty(writer, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_jpg_and_png() {
        let config = Config::default();
        assert_eq!(config.extensions, vec!["jpg", "png"]);
        assert_eq!(config.preview_size, 600);
    }

    #[test]
    fn written_config_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.last_image_dir = Some(PathBuf::from("/data/cars"));
        write_config(&path, &config).unwrap();
        assert_eq!(read_config(&path), Some(config));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "preview_size": 300 }"#).unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.preview_size, 300);
        assert_eq!(config.extensions, Config::default().extensions);
    }

    #[test]
    fn malformed_or_missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(read_config(&path).is_none());
        std::fs::write(&path, "{ not json").unwrap();
        assert!(read_config(&path).is_none());
    }
}
