//! Filesystem-backed workspace of patto notes.

use super::render::{count_backlinks, extract_tasks, render_content};
use super::resource::{DisplayNote, FileSummary, NoteRef, RenderedNote, SortOrder, TaskGroups};
use super::{
    note_file_name, renamed_path, validate_note_path, validate_payload, NoteStore, StoreError,
    NOTE_EXTENSION,
};
use async_trait::async_trait;
use chrono::Local;
use log::*;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reads and writes notes under a workspace root directory.
///
#[derive(Clone, Debug)]
pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsWorkspace { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run blocking directory work off the async executor.
    ///
    async fn blocking<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(PathBuf) -> Result<T, StoreError> + Send + 'static,
    {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || work(root))
            .await
            .map_err(|e| StoreError::Io {
                path: self.root.clone(),
                source: std::io::Error::new(ErrorKind::Other, e.to_string()),
            })?
    }
}

/// Return workspace-relative paths of every non-hidden note below `root`.
///
fn collect_note_paths(root: &Path) -> Result<Vec<String>, StoreError> {
    let mut paths = Vec::new();
    if root.is_dir() {
        collect_recursive(root, root, &mut paths)?;
    }
    Ok(paths)
}

fn collect_recursive(root: &Path, dir: &Path, paths: &mut Vec<String>) -> Result<(), StoreError> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::from_io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| StoreError::from_io(dir, e))?.path();
        let hidden = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(false);
        if hidden {
            continue;
        }
        if path.is_dir() {
            collect_recursive(root, &path, paths)?;
        } else if path.extension().map(|e| e == NOTE_EXTENSION).unwrap_or(false) {
            let relative = path
                .strip_prefix(root)
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|_| path.to_string_lossy().to_string());
            paths.push(relative);
        }
    }
    Ok(())
}

fn epoch_seconds(time: std::io::Result<SystemTime>) -> u64 {
    time.ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn backlink_counts(root: &Path, paths: &[String]) -> HashMap<String, u32> {
    let mut contents = Vec::with_capacity(paths.len());
    for path in paths {
        // Unreadable notes still list, they just contribute no links.
        let content = fs::read_to_string(root.join(path)).unwrap_or_default();
        contents.push(content);
    }
    count_backlinks(
        paths
            .iter()
            .map(String::as_str)
            .zip(contents.iter().map(String::as_str)),
    )
}

fn describe(
    root: &Path,
    path: &str,
    backlinks: &HashMap<String, u32>,
) -> Result<FileSummary, StoreError> {
    let full_path = root.join(path);
    let metadata = fs::metadata(&full_path).map_err(|e| StoreError::from_io(&full_path, e))?;
    let note = NoteRef::from_path(path);
    Ok(FileSummary {
        backlink_count: backlinks.get(&note.name).copied().unwrap_or(0),
        modified_time: epoch_seconds(metadata.modified()),
        created_time: epoch_seconds(metadata.created()),
        size_bytes: metadata.len(),
        name: note.name,
        path: path.to_string(),
    })
}

fn summarize(root: &Path, sort: SortOrder) -> Result<Vec<FileSummary>, StoreError> {
    let paths = collect_note_paths(root)?;
    let backlinks = backlink_counts(root, &paths);
    let mut entries = Vec::with_capacity(paths.len());
    for path in &paths {
        entries.push(describe(root, path, &backlinks)?);
    }
    sort.sort(&mut entries);
    Ok(entries)
}

fn summarize_one(root: &Path, path: &str) -> Result<FileSummary, StoreError> {
    let paths = collect_note_paths(root)?;
    describe(root, path, &backlink_counts(root, &paths))
}

fn create(root: &Path, path: &str) -> Result<FileSummary, StoreError> {
    let full_path = root.join(path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::from_io(parent, e))?;
    }
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&full_path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StoreError::AlreadyExists {
                path: path.to_string(),
            },
            _ => StoreError::from_io(&full_path, e),
        })?;
    info!("Created note '{}'.", path);
    summarize_one(root, path)
}

fn rename(root: &Path, from: &str, to: &str) -> Result<FileSummary, StoreError> {
    let old_path = root.join(from);
    let new_path = root.join(to);
    if !old_path.is_file() {
        return Err(StoreError::NotFound {
            path: from.to_string(),
        });
    }
    if new_path.exists() {
        return Err(StoreError::AlreadyExists {
            path: to.to_string(),
        });
    }
    fs::rename(&old_path, &new_path).map_err(|e| StoreError::from_io(&old_path, e))?;
    info!("Renamed note '{}' to '{}'.", from, to);
    summarize_one(root, to)
}

fn gather_tasks(root: &Path) -> Result<TaskGroups, StoreError> {
    let mut tasks = Vec::new();
    for path in collect_note_paths(root)? {
        match fs::read_to_string(root.join(&path)) {
            Ok(content) => tasks.extend(extract_tasks(&content, &path)),
            Err(e) => warn!("Skipping unreadable note '{}' while gathering tasks: {}", path, e),
        }
    }
    Ok(TaskGroups::categorize(tasks, Local::now().date_naive()))
}

#[async_trait]
impl NoteStore for FsWorkspace {
    async fn fetch_note_for_display(&self, path: &str) -> Result<DisplayNote, StoreError> {
        debug!("Reading note '{}'...", path);
        validate_note_path(path)?;
        let full_path = self.root.join(path);
        let raw_content = tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound {
                    path: path.to_string(),
                },
                _ => StoreError::Io {
                    path: full_path.clone(),
                    source: e,
                },
            })?;
        let rendered = render_content(&raw_content);
        Ok(DisplayNote {
            note: NoteRef::from_path(path),
            raw_content,
            rendered,
        })
    }

    async fn persist_editable_content(
        &self,
        path: &str,
        content: &str,
    ) -> Result<RenderedNote, StoreError> {
        validate_payload(path, content)?;
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        tokio::fs::write(&full_path, content)
            .await
            .map_err(|e| StoreError::Io {
                path: full_path.clone(),
                source: e,
            })?;
        info!("Saved note '{}' ({} bytes).", path, content.len());
        Ok(render_content(content))
    }

    async fn list_files(&self, sort: SortOrder) -> Result<Vec<FileSummary>, StoreError> {
        debug!("Listing notes under {:?} by {}...", self.root, sort.label());
        self.blocking(move |root| summarize(&root, sort)).await
    }

    async fn list_tasks(&self) -> Result<TaskGroups, StoreError> {
        debug!("Gathering tasks under {:?}...", self.root);
        self.blocking(|root| gather_tasks(&root)).await
    }

    async fn create_note(&self, name: &str) -> Result<FileSummary, StoreError> {
        let path = note_file_name(name);
        validate_note_path(&path)?;
        self.blocking(move |root| create(&root, &path)).await
    }

    async fn delete_note(&self, path: &str) -> Result<(), StoreError> {
        validate_note_path(path)?;
        let full_path = self.root.join(path);
        tokio::fs::remove_file(&full_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound {
                    path: path.to_string(),
                },
                _ => StoreError::Io {
                    path: full_path.clone(),
                    source: e,
                },
            })?;
        info!("Deleted note '{}'.", path);
        Ok(())
    }

    async fn rename_note(&self, path: &str, new_name: &str) -> Result<FileSummary, StoreError> {
        let from = path.to_string();
        let to = renamed_path(path, new_name)?;
        self.blocking(move |root| rename(&root, &from, &to)).await
    }
}
