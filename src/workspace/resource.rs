use chrono::{DateTime, NaiveDate};
use fake::Dummy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defines the sort options for the file list.
///
#[derive(Clone, Copy, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    LastModified,
    LastCreated,
    MostLinked,
    Alphabetical,
}

impl SortOrder {
    /// Return the next sort order in cycle order.
    ///
    pub fn next(self) -> SortOrder {
        match self {
            SortOrder::LastModified => SortOrder::LastCreated,
            SortOrder::LastCreated => SortOrder::MostLinked,
            SortOrder::MostLinked => SortOrder::Alphabetical,
            SortOrder::Alphabetical => SortOrder::LastModified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::LastModified => "last modified",
            SortOrder::LastCreated => "last created",
            SortOrder::MostLinked => "most linked",
            SortOrder::Alphabetical => "alphabetical",
        }
    }

    /// Sort file summaries in place. Time and link orders are descending,
    /// names ascend case-insensitively.
    ///
    pub fn sort(self, entries: &mut [FileSummary]) {
        match self {
            SortOrder::LastModified => {
                entries.sort_by(|a, b| b.modified_time.cmp(&a.modified_time))
            }
            SortOrder::LastCreated => entries.sort_by(|a, b| b.created_time.cmp(&a.created_time)),
            SortOrder::MostLinked => {
                entries.sort_by(|a, b| b.backlink_count.cmp(&a.backlink_count))
            }
            SortOrder::Alphabetical => {
                entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
    }
}

/// Defines file summary data structure for the file list.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub path: String,
    pub name: String,
    pub modified_time: u64,
    pub created_time: u64,
    pub backlink_count: u32,
    pub size_bytes: u64,
}

/// Identity of a note: its workspace-relative path plus display name.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    pub path: String,
    pub name: String,
}

impl NoteRef {
    /// Build a reference from a relative path, naming it after the file stem.
    ///
    pub fn from_path(path: &str) -> NoteRef {
        let name = Path::new(path)
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        NoteRef {
            path: path.to_owned(),
            name,
        }
    }
}

/// Defines link data extracted from note content.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfo {
    pub target: String,
    pub anchor: Option<String>,
    pub is_external: bool,
    pub display_text: Option<String>,
}

impl LinkInfo {
    /// Workspace path of the note an internal link points at.
    ///
    pub fn note_path(&self) -> Option<String> {
        if self.is_external {
            None
        } else if self.target.ends_with(".pn") {
            Some(self.target.clone())
        } else {
            Some(format!("{}.pn", self.target))
        }
    }
}

/// Rendered representation of a note, ready for display.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedNote {
    pub lines: Vec<String>,
    pub links: Vec<LinkInfo>,
}

/// A note as fetched for the note view.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct DisplayNote {
    pub note: NoteRef,
    pub raw_content: String,
    pub rendered: RenderedNote,
}

/// Defines task status values.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn parse(value: &str) -> Option<TaskStatus> {
        match value {
            "todo" => Some(TaskStatus::Todo),
            "doing" => Some(TaskStatus::Doing),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    pub fn checkbox(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "[ ]",
            TaskStatus::Doing => "[~]",
            TaskStatus::Done => "[x]",
        }
    }
}

/// Defines a task found in a note.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub file_path: String,
    pub file_name: String,
    pub line_number: usize,
    pub content: String,
    pub status: TaskStatus,
    pub due_date: Option<String>,
    pub due_timestamp: Option<i64>,
}

/// Tasks grouped by deadline.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroups {
    pub overdue: Vec<TaskItem>,
    pub today: Vec<TaskItem>,
    pub this_week: Vec<TaskItem>,
    pub later: Vec<TaskItem>,
    pub no_deadline: Vec<TaskItem>,
    pub done: Vec<TaskItem>,
}

/// Task counts per group.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub overdue: usize,
    pub today: usize,
    pub this_week: usize,
    pub later: usize,
    pub no_deadline: usize,
    pub done: usize,
}

impl TaskGroups {
    /// Distribute tasks into deadline groups relative to `today`. Done tasks
    /// go to their own group regardless of deadline; a task whose due date
    /// cannot be interpreted has no timestamp and lands in `no_deadline`.
    ///
    pub fn categorize(tasks: Vec<TaskItem>, today: NaiveDate) -> TaskGroups {
        let week_end = today + chrono::Duration::days(7);
        let mut groups = TaskGroups::default();
        for task in tasks {
            if task.status == TaskStatus::Done {
                groups.done.push(task);
                continue;
            }
            let due = task
                .due_timestamp
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .map(|dt| dt.date_naive());
            match due {
                Some(date) if date < today => groups.overdue.push(task),
                Some(date) if date == today => groups.today.push(task),
                Some(date) if date <= week_end => groups.this_week.push(task),
                Some(_) => groups.later.push(task),
                None => groups.no_deadline.push(task),
            }
        }
        for group in [
            &mut groups.overdue,
            &mut groups.today,
            &mut groups.this_week,
            &mut groups.later,
        ] {
            group.sort_by(|a, b| a.due_timestamp.cmp(&b.due_timestamp));
        }
        groups
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            total: self.overdue.len()
                + self.today.len()
                + self.this_week.len()
                + self.later.len()
                + self.no_deadline.len(),
            overdue: self.overdue.len(),
            today: self.today.len(),
            this_week: self.this_week.len(),
            later: self.later.len(),
            no_deadline: self.no_deadline.len(),
            done: self.done.len(),
        }
    }

    /// Return labelled groups in display order.
    ///
    pub fn sections(&self) -> [(&'static str, &[TaskItem]); 6] {
        [
            ("Overdue", &self.overdue),
            ("Today", &self.today),
            ("This week", &self.this_week),
            ("Later", &self.later),
            ("No deadline", &self.no_deadline),
            ("Done", &self.done),
        ]
    }

    /// Flatten groups in display order, as the task list selects over them.
    ///
    pub fn flatten(&self) -> Vec<&TaskItem> {
        self.sections()
            .into_iter()
            .flat_map(|(_, tasks)| tasks.iter())
            .collect()
    }
}
