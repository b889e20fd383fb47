//! Text rendering and extraction over patto note content.
//!
//! Notes are line-oriented: leading tabs give the nesting depth, `{@task ...}`
//! properties mark tasks and square brackets hold links.

use super::resource::{LinkInfo, RenderedNote, TaskItem, TaskStatus};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

const INDENT: &str = "  ";

fn task_regex() -> &'static Regex {
    static TASK: OnceLock<Regex> = OnceLock::new();
    TASK.get_or_init(|| Regex::new(r"\{@task(?P<props>[^}]*)\}").expect("valid task regex"))
}

fn link_regex() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"\[(?P<body>[^\[\]]+)\]").expect("valid link regex"))
}

/// Property of a task marker on a single line.
///
#[derive(Debug, PartialEq, Eq)]
struct TaskMarker {
    status: TaskStatus,
    due: Option<String>,
}

fn parse_task_marker(line: &str) -> Option<(TaskMarker, String)> {
    let captures = task_regex().captures(line)?;
    let mut status = TaskStatus::Todo;
    let mut due = None;
    for prop in captures["props"].split_whitespace() {
        match prop.split_once('=') {
            Some(("status", value)) => status = TaskStatus::parse(value).unwrap_or(status),
            Some(("due", value)) => due = Some(value.to_string()),
            _ => {}
        }
    }
    let remainder = task_regex().replace(line, "").trim().to_string();
    Some((TaskMarker { status, due }, remainder))
}

/// Interpret a deadline as a display string plus a UTC timestamp. A bare
/// date counts as the last second of that day; anything unparseable keeps
/// its text but has no timestamp.
///
pub fn parse_deadline(value: &str) -> (String, Option<i64>) {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return (
            dt.format("%Y-%m-%d %H:%M").to_string(),
            Some(dt.and_utc().timestamp()),
        );
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return (
            date.format("%Y-%m-%d").to_string(),
            date.and_hms_opt(23, 59, 59)
                .map(|dt| dt.and_utc().timestamp()),
        );
    }
    (value.to_string(), None)
}

/// Render note content into display lines plus the links it contains.
///
pub fn render_content(content: &str) -> RenderedNote {
    let lines = content
        .lines()
        .map(|line| {
            let depth = line.chars().take_while(|c| *c == '\t').count();
            let body = &line[depth..];
            let body = match parse_task_marker(body) {
                Some((marker, rest)) => match marker.due {
                    Some(due) => format!("{} {} (due {})", marker.status.checkbox(), rest, due),
                    None => format!("{} {}", marker.status.checkbox(), rest),
                },
                None => body.trim_end().to_string(),
            };
            format!("{}{}", INDENT.repeat(depth), body)
        })
        .collect();
    RenderedNote {
        lines,
        links: extract_links(content),
    }
}

/// Extract internal (`[note]`, `[note#anchor]`) and external
/// (`[https://..]`, `[title https://..]`) links. Bracket commands and
/// decorations such as `[@img ..]` or `[* bold]` are skipped.
///
pub fn extract_links(content: &str) -> Vec<LinkInfo> {
    link_regex()
        .captures_iter(content)
        .filter_map(|captures| parse_link(captures["body"].trim()))
        .collect()
}

fn parse_link(body: &str) -> Option<LinkInfo> {
    let first = body.chars().next()?;
    if matches!(first, '@' | '*' | '/' | '-' | '_' | '`' | '$') {
        return None;
    }
    let last = body.split_whitespace().last()?;
    if last.contains("://") {
        let title = body[..body.len() - last.len()].trim();
        return Some(LinkInfo {
            target: last.to_string(),
            anchor: None,
            is_external: true,
            display_text: (!title.is_empty()).then(|| title.to_string()),
        });
    }
    let (target, anchor) = match body.split_once('#') {
        Some((target, anchor)) => (target, Some(anchor.to_string())),
        None => (body, None),
    };
    Some(LinkInfo {
        target: target.to_string(),
        anchor,
        is_external: false,
        display_text: None,
    })
}

/// Extract every task marker from a note's content.
///
pub fn extract_tasks(content: &str, file_path: &str) -> Vec<TaskItem> {
    let file_name = Path::new(file_path)
        .file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    content
        .lines()
        .enumerate()
        .filter_map(|(row, line)| {
            let (marker, rest) = parse_task_marker(line)?;
            let (due_date, due_timestamp) = match marker.due {
                Some(due) => {
                    let (display, timestamp) = parse_deadline(&due);
                    (Some(display), timestamp)
                }
                None => (None, None),
            };
            Some(TaskItem {
                file_path: file_path.to_string(),
                file_name: file_name.clone(),
                line_number: row,
                content: rest,
                status: marker.status,
                due_date,
                due_timestamp,
            })
        })
        .collect()
}

/// Count incoming internal links per note name across the given
/// `(path, content)` pairs. A note does not count links to itself.
///
pub fn count_backlinks<'a>(notes: impl IntoIterator<Item = (&'a str, &'a str)>) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for (path, content) in notes {
        let source = Path::new(path)
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        for link in extract_links(content) {
            if link.is_external || link.target == source {
                continue;
            }
            let target = link.target.trim_end_matches(".pn").to_string();
            *counts.entry(target).or_insert(0) += 1;
        }
    }
    counts
}
