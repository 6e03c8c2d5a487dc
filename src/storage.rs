use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::todo::TodoData;

/// TOML file holding the whole to-do data set
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load data, or empty data when the file does not exist yet
    pub fn load(&self) -> Result<TodoData> {
        if !self.file_path.exists() {
            info!(path = %self.file_path.display(), "data file missing, starting empty");
            return Ok(TodoData::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let data: TodoData = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        debug!(
            path = %self.file_path.display(),
            tasks = data.tasks().len(),
            categories = data.categories().len(),
            priorities = data.priorities().len(),
            "loaded data file"
        );
        Ok(data)
    }

    pub fn save(&self, data: &TodoData) -> Result<()> {
        let content = toml::to_string_pretty(data).context("Failed to serialize data")?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        debug!(path = %self.file_path.display(), "saved data file");
        Ok(())
    }
}
