//! Policy document loading.
//!
//! The knowledge base source is a single text blob, or a directory of
//! blobs concatenated in sorted path order so the chunk sequence stays
//! deterministic.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use wayfinder_core::{AppError, AppResult};

/// Load the policy document from a file or directory.
pub fn load_policy_document(path: &Path) -> AppResult<String> {
    if path.is_dir() {
        load_directory(path)
    } else {
        let text = read_blob(path)?;
        if text.trim().is_empty() {
            return Err(AppError::Data(format!(
                "Policy document {:?} is empty",
                path
            )));
        }
        Ok(text)
    }
}

fn load_directory(dir: &Path) -> AppResult<String> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    let mut blobs = Vec::with_capacity(files.len());
    for file in &files {
        let text = read_blob(file)?;
        if !text.trim().is_empty() {
            blobs.push(text);
        }
    }

    if blobs.is_empty() {
        return Err(AppError::Data(format!(
            "No policy documents found under {:?}",
            dir
        )));
    }

    tracing::info!("Loaded {} policy documents from {:?}", blobs.len(), dir);
    Ok(blobs.join("\n\n"))
}

fn read_blob(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::Data(format!("Failed to read policy document {:?}: {}", path, e)))
}
