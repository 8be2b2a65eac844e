use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use crate::calendar::events::CalendarEvent;
use crate::config::CalendarConfig;

const PRODID: &str = "-//startgg-calendar//Tournament Feeds//EN";

// RFC 5545 folds content lines longer than 75 octets
const FOLD_WIDTH: usize = 75;

/// Serialize a calendar feed. Output depends only on the inputs, so
/// regenerating from unchanged data reproduces identical bytes.
pub fn render_calendar(meta: &CalendarConfig, events: &[CalendarEvent]) -> String {
    let mut lines = Vec::new();

    lines.push("BEGIN:VCALENDAR".to_string());
    lines.push("VERSION:2.0".to_string());
    lines.push(format!("PRODID:{PRODID}"));
    lines.push(format!("X-WR-CALNAME:{}", escape_text(&meta.title)));
    lines.push(format!("X-WR-CALDESC:{}", escape_text(&meta.description)));
    lines.push(format!("X-WR-TIMEZONE:{}", escape_text(&meta.timezone)));

    for event in events {
        push_event(&mut lines, event);
    }

    lines.push("END:VCALENDAR".to_string());

    let mut output = String::new();
    for line in lines {
        output.push_str(&fold_line(&line));
        output.push_str("\r\n");
    }
    output
}

/// Write a rendered feed, creating parent directories as needed
pub fn write_calendar(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, contents)
        .with_context(|| format!("Failed to write calendar file: {}", path.display()))
}

fn push_event(lines: &mut Vec<String>, event: &CalendarEvent) {
    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}", escape_text(&event.uid)));
    lines.push(format!("SUMMARY:{}", escape_text(&event.summary)));
    lines.push(format!("DESCRIPTION:{}", escape_text(&event.description)));
    lines.push(format!("LOCATION:{}", escape_text(&event.location)));
    lines.push(format!("URL:{}", event.url));

    if let Some(start) = event.start {
        lines.push(format!("DTSTART:{}", format_utc(start)));
    }
    if let Some(end) = event.end {
        lines.push(format!("DTEND:{}", format_utc(end)));
    }

    lines.push("END:VEVENT".to_string());
}

fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape TEXT property values per RFC 5545 section 3.3.11
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fold a content line at 75 octets, breaking on character boundaries.
/// Continuation lines start with a single space.
fn fold_line(line: &str) -> String {
    if line.len() <= FOLD_WIDTH {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / FOLD_WIDTH * 3);
    let mut budget = FOLD_WIDTH;

    for c in line.chars() {
        let width = c.len_utf8();
        if width > budget {
            folded.push_str("\r\n ");
            // one octet of the fold width goes to the leading space
            budget = FOLD_WIDTH - 1;
        }
        folded.push(c);
        budget -= width;
    }
    folded
}
