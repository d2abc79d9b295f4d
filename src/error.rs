use image::error::ImageError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode {}: {source}", .path.display())]
    Decode { path: PathBuf, source: ImageError },
}

impl AuditError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn decode(path: impl AsRef<Path>, source: ImageError) -> Self {
        match source {
            ImageError::IoError(e) => Self::io(path, e),
            e => Self::Decode {
                path: path.as_ref().to_path_buf(),
                source: e,
            },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let e = AuditError::io(
            "/no/such/dir",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let msg = e.to_string();
        assert!(msg.starts_with("/no/such/dir"));
        assert!(msg.contains("not found"));
        assert!(!e.is_validation());
    }

    #[test]
    fn decode_io_failures_become_io_errors() {
        let src = ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(
            AuditError::decode("x.png", src),
            AuditError::Io { .. }
        ));
    }
}
