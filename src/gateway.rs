use crate::error::{AuditError, Result};
use glob::{MatchOptions, Pattern};
use image::DynamicImage;
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Everything the controller needs from the disk.
pub trait FileGateway {
    /// File names in `dir` whose extension is in `extensions`, in the order
    /// the directory listing yields them.
    fn list_images(&self, dir: &Path, extensions: &[String]) -> Result<Vec<String>>;
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;
    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()>;
    fn delete_file(&self, path: &Path) -> Result<()>;
    fn open_image(&self, path: &Path) -> Result<DynamicImage>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFs;

fn extension_patterns(extensions: &[String]) -> Vec<Pattern> {
    extensions
        .iter()
        .filter_map(|ext| Pattern::new(&format!("*.{}", Pattern::escape(ext))).ok())
        .collect()
}

impl FileGateway for LocalFs {
    fn list_images(&self, dir: &Path, extensions: &[String]) -> Result<Vec<String>> {
        let patterns = extension_patterns(extensions);
        let mut names = vec![];
        for entry in fs::read_dir(dir).map_err(|e| AuditError::io(dir, e))? {
            let entry = entry.map_err(|e| AuditError::io(dir, e))?;
            if !entry.path().is_file() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("skipping non UTF-8 file name: {:?}", raw);
                    continue;
                }
            };
            if patterns.iter().any(|p| p.matches_with(&name, MATCH_OPTIONS)) {
                names.push(name);
            }
        }
        debug!("{} image(s) in {}", names.len(), dir.display());
        Ok(names)
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path).map_err(|e| AuditError::io(path, e))?;
        BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| AuditError::io(path, e))
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        let write = || -> std::io::Result<()> {
            let mut file = BufWriter::new(File::create(path)?);
            for line in lines {
                writeln!(file, "{}", line)?;
            }
            file.flush()
        };
        write().map_err(|e| AuditError::io(path, e))
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| AuditError::io(path, e))
    }

    fn open_image(&self, path: &Path) -> Result<DynamicImage> {
        image::io::Reader::open(path)
            .map_err(|e| AuditError::io(path, e))?
            .with_guessed_format()
            .map_err(|e| AuditError::io(path, e))?
            .decode()
            .map_err(|e| AuditError::decode(path, e))
    }
}
