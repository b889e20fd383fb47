//! In-memory workspace.
//!
//! Keeps notes in a map and records every persist call, which makes the
//! navigation engine observable without touching the disk.

use super::render::{count_backlinks, extract_tasks, render_content};
use super::resource::{DisplayNote, FileSummary, NoteRef, RenderedNote, SortOrder, TaskGroups};
use super::{
    note_file_name, renamed_path, validate_note_path, validate_payload, NoteStore, StoreError,
};
use async_trait::async_trait;
use chrono::Local;
use log::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    notes: Mutex<BTreeMap<String, String>>,
    persisted: Mutex<Vec<(String, String)>>,
    fail_persist: AtomicBool,
    persist_delay: Option<Duration>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        MemoryWorkspace::default()
    }

    /// Add a note to the workspace.
    ///
    pub fn with_note(self, path: &str, content: &str) -> Self {
        if let Ok(mut notes) = self.notes.lock() {
            notes.insert(path.to_owned(), content.to_owned());
        }
        self
    }

    /// Make every persist call wait before completing.
    ///
    pub fn with_persist_delay(mut self, delay: Duration) -> Self {
        self.persist_delay = Some(delay);
        self
    }

    /// Make persist calls fail with an I/O error until switched back.
    ///
    pub fn fail_persists(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }

    /// Return every `(path, content)` pair passed to a persist call, in
    /// call order, including failed ones.
    ///
    pub fn persist_calls(&self) -> Vec<(String, String)> {
        self.persisted
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.notes
            .lock()
            .ok()
            .and_then(|notes| notes.get(path).cloned())
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.notes
            .lock()
            .map(|notes| notes.clone())
            .unwrap_or_default()
    }

    fn summarize(&self) -> Vec<FileSummary> {
        let notes = self.snapshot();
        let backlinks = count_backlinks(notes.iter().map(|(p, c)| (p.as_str(), c.as_str())));
        notes
            .iter()
            .map(|(path, content)| {
                let note = NoteRef::from_path(path);
                FileSummary {
                    backlink_count: backlinks.get(&note.name).copied().unwrap_or(0),
                    modified_time: 0,
                    created_time: 0,
                    size_bytes: content.len() as u64,
                    name: note.name,
                    path: path.clone(),
                }
            })
            .collect()
    }

    fn summary_of(&self, path: &str) -> Result<FileSummary, StoreError> {
        self.summarize()
            .into_iter()
            .find(|f| f.path == path)
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_owned(),
            })
    }

    fn locked_error(path: &str) -> StoreError {
        StoreError::Io {
            path: path.into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "workspace lock poisoned"),
        }
    }
}

#[async_trait]
impl NoteStore for MemoryWorkspace {
    async fn fetch_note_for_display(&self, path: &str) -> Result<DisplayNote, StoreError> {
        validate_note_path(path)?;
        let raw_content = self.content(path).ok_or_else(|| StoreError::NotFound {
            path: path.to_owned(),
        })?;
        Ok(DisplayNote {
            note: NoteRef::from_path(path),
            rendered: render_content(&raw_content),
            raw_content,
        })
    }

    async fn persist_editable_content(
        &self,
        path: &str,
        content: &str,
    ) -> Result<RenderedNote, StoreError> {
        if let Ok(mut calls) = self.persisted.lock() {
            calls.push((path.to_owned(), content.to_owned()));
        }
        if let Some(delay) = self.persist_delay {
            tokio::time::sleep(delay).await;
        }
        validate_payload(path, content)?;
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: path.into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "write refused"),
            });
        }
        if let Ok(mut notes) = self.notes.lock() {
            notes.insert(path.to_owned(), content.to_owned());
        }
        debug!("Stored note '{}' in memory.", path);
        Ok(render_content(content))
    }

    async fn list_files(&self, sort: SortOrder) -> Result<Vec<FileSummary>, StoreError> {
        let mut entries = self.summarize();
        sort.sort(&mut entries);
        Ok(entries)
    }

    async fn list_tasks(&self) -> Result<TaskGroups, StoreError> {
        let tasks = self
            .snapshot()
            .iter()
            .flat_map(|(path, content)| extract_tasks(content, path))
            .collect();
        Ok(TaskGroups::categorize(tasks, Local::now().date_naive()))
    }

    async fn create_note(&self, name: &str) -> Result<FileSummary, StoreError> {
        let path = note_file_name(name);
        validate_note_path(&path)?;
        {
            let mut notes = self.notes.lock().map_err(|_| Self::locked_error(&path))?;
            if notes.contains_key(&path) {
                return Err(StoreError::AlreadyExists { path });
            }
            notes.insert(path.clone(), String::new());
        }
        debug!("Created note '{}' in memory.", path);
        self.summary_of(&path)
    }

    async fn delete_note(&self, path: &str) -> Result<(), StoreError> {
        validate_note_path(path)?;
        let mut notes = self.notes.lock().map_err(|_| Self::locked_error(path))?;
        notes.remove(path).ok_or_else(|| StoreError::NotFound {
            path: path.to_owned(),
        })?;
        debug!("Deleted note '{}' from memory.", path);
        Ok(())
    }

    async fn rename_note(&self, path: &str, new_name: &str) -> Result<FileSummary, StoreError> {
        let renamed = renamed_path(path, new_name)?;
        {
            let mut notes = self.notes.lock().map_err(|_| Self::locked_error(path))?;
            if notes.contains_key(&renamed) {
                return Err(StoreError::AlreadyExists { path: renamed });
            }
            let content = notes.remove(path).ok_or_else(|| StoreError::NotFound {
                path: path.to_owned(),
            })?;
            notes.insert(renamed.clone(), content);
        }
        debug!("Renamed note '{}' to '{}' in memory.", path, renamed);
        self.summary_of(&renamed)
    }
}
