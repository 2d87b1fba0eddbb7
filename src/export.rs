//! Summary exports written to disk

use crate::state::record::FormRecord;
use crate::state::summary::{project, render_csv, render_text};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Text => "application-form.txt",
            Self::Csv => "application-form.csv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text summary",
            Self::Csv => "CSV",
        }
    }

    pub fn render(&self, record: &FormRecord) -> String {
        let rows = project(record);
        match self {
            Self::Text => render_text(&rows),
            Self::Csv => render_csv(&rows),
        }
    }
}

/// Write the summary of `record` into `dir`, replacing any earlier export
pub fn export(record: &FormRecord, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(format.file_name());
    fs::write(&path, format.render(record))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Exported {} to {}", format.label(), path.display());
    Ok(path)
}
