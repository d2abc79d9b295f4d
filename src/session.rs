use crate::error::{AuditError, Result};
use crate::gateway::FileGateway;
use crate::notify::{Level, Notifier};
use image::DynamicImage;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// In-memory state of one loaded directory and vocabulary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub image_dir: PathBuf,
    pub labels_file: Option<PathBuf>,
    /// Directory listing order.
    pub image_files: Vec<String>,
    /// Read only between loads; duplicates and blanks are kept.
    pub labels: Vec<String>,
    /// `Some` only while it indexes into `image_files`.
    pub current: Option<usize>,
    /// Not tied to any image and never persisted.
    pub selected_label: Option<String>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.image_files.is_empty()
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.image_files.get(i))
            .map(String::as_str)
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.current_file().map(|f| self.image_dir.join(f))
    }
}

pub struct Controller<G, N> {
    session: Session,
    gateway: G,
    notifier: N,
    extensions: Vec<String>,
}

impl<G: FileGateway, N: Notifier> Controller<G, N> {
    pub fn new(gateway: G, notifier: N, extensions: Vec<String>) -> Self {
        Self {
            session: Session::default(),
            gateway,
            notifier,
            extensions,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn report<T>(&mut self, title: &str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_validation() {
                warn!("{}: {}", title, e);
            } else {
                error!("{}: {}", title, e);
            }
            self.notifier.notify(Level::Error, title, &e.to_string());
        }
        result
    }

    /// Replaces the image list and vocabulary in one step. Nothing changes
    /// unless both the directory and the label file can be read.
    pub fn load(&mut self, image_dir: &Path, labels_file: &Path) -> Result<()> {
        let result = self.try_load(image_dir, labels_file);
        self.report("Load failed", result)
    }

    fn try_load(&mut self, image_dir: &Path, labels_file: &Path) -> Result<()> {
        if image_dir.as_os_str().is_empty() || labels_file.as_os_str().is_empty() {
            return Err(AuditError::Validation(
                "Select image directory and labels file.",
            ));
        }
        let image_files = self.gateway.list_images(image_dir, &self.extensions)?;
        let labels = self
            .gateway
            .read_lines(labels_file)?
            .iter()
            .map(|line| line.trim().to_owned())
            .collect::<Vec<_>>();
        info!(
            "loaded {} image(s) and {} label(s) from {}",
            image_files.len(),
            labels.len(),
            image_dir.display()
        );
        self.session = Session {
            image_dir: image_dir.to_path_buf(),
            labels_file: Some(labels_file.to_path_buf()),
            image_files,
            labels,
            current: None,
            selected_label: None,
        };
        Ok(())
    }

    /// Returns false and leaves the cursor alone when `i` is out of range.
    pub fn select_index(&mut self, i: usize) -> bool {
        if i >= self.session.image_files.len() {
            return false;
        }
        self.session.current = Some(i);
        true
    }

    /// Narrower than a plain setter on purpose: a name outside the loaded
    /// vocabulary is rejected and `selected_label` keeps its old value.
    pub fn select_label(&mut self, name: &str) -> bool {
        if !self.session.labels.iter().any(|l| l == name) {
            return false;
        }
        info!("selected class: {}", name);
        self.session.selected_label = Some(name.to_owned());
        true
    }

    pub fn next(&mut self) -> bool {
        match self.session.current {
            Some(i) => self.select_index(i + 1),
            None => self.select_index(0),
        }
    }

    pub fn prev(&mut self) -> bool {
        match self.session.current {
            Some(0) => false,
            Some(i) => self.select_index(i - 1),
            None => self.select_index(0),
        }
    }

    /// Removes the previewed file from disk and then from the list. Returns
    /// the deleted name, or `None` when nothing is selected.
    pub fn delete_current(&mut self) -> Result<Option<String>> {
        let result = self.try_delete_current();
        self.report("Delete failed", result)
    }

    fn try_delete_current(&mut self) -> Result<Option<String>> {
        let (index, path) = match (self.session.current, self.session.current_path()) {
            (Some(i), Some(p)) => (i, p),
            _ => return Ok(None),
        };
        self.gateway.delete_file(&path)?;
        info!("deleted image: {}", path.display());
        let removed = self.session.image_files.remove(index);
        let len = self.session.image_files.len();
        self.session.current = match len {
            0 => None,
            _ if index >= len => Some(index - 1),
            _ => Some(index),
        };
        Ok(Some(removed))
    }

    pub fn save_labels(&mut self) -> Result<()> {
        let result = self.try_save_labels();
        if result.is_ok() {
            self.notifier
                .notify(Level::Info, "Saved", "Labels saved successfully.");
        }
        self.report("Save failed", result)
    }

    fn try_save_labels(&mut self) -> Result<()> {
        let path = match &self.session.labels_file {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => return Err(AuditError::Validation("No labels file to save.")),
        };
        self.gateway.write_lines(path, &self.session.labels)?;
        info!("labels saved to {}", path.display());
        Ok(())
    }

    /// Decodes the image under the cursor. A decode failure is reported but
    /// does not move the cursor.
    pub fn open_current(&mut self) -> Result<Option<DynamicImage>> {
        let result = match self.session.current_path() {
            Some(path) => self.gateway.open_image(&path).map(Some),
            None => Ok(None),
        };
        self.report("Cannot display image", result)
    }
}
