//! iCalendar export for events.

use chrono::{DateTime, Days, NaiveDate, Utc};
use tvk_common::{AppError, AppResult};
use tvk_db::entities::{Event, EventType};

/// Date formats admins enter, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y"];

/// Content lines longer than this many octets are folded.
const MAX_LINE_OCTETS: usize = 75;

/// Parse an event date as entered in the admin console.
pub fn parse_event_date(date: &str) -> AppResult<NaiveDate> {
    let date = date.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
        .ok_or_else(|| AppError::BadRequest(format!("Unrecognised event date: {date}")))
}

/// Render `event` as a single-event `VCALENDAR` with CRLF line endings.
///
/// Events are all-day: `DTSTART` is the event date and `DTEND` the day
/// after, both as `VALUE=DATE`.
pub fn event_to_ics(event: &Event, now: DateTime<Utc>) -> AppResult<String> {
    let start = parse_event_date(&event.date)?;
    let end = start
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::BadRequest(format!("Event date out of range: {}", event.date)))?;

    let category = match event.event_type {
        EventType::Rally => "RALLY",
        EventType::Meeting => "MEETING",
        EventType::Conference => "CONFERENCE",
    };

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//TVK//Party Events//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@tvk.org", escape_text(&event.id)),
        format!("DTSTAMP:{}", now.format("%Y%m%dT%H%M%SZ")),
        format!("DTSTART;VALUE=DATE:{}", start.format("%Y%m%d")),
        format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")),
        format!("SUMMARY:{}", escape_text(&event.title)),
        format!("LOCATION:{}", escape_text(&event.location)),
        format!("CATEGORIES:{category}"),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    Ok(out)
}

/// Download filename for an event's calendar file.
#[must_use]
pub fn ics_filename(event: &Event) -> String {
    let slug: String = event
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        format!("{}.ics", event.id)
    } else {
        format!("{slug}.ics")
    }
}

/// Escape a TEXT value (RFC 5545 section 3.3.11).
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Fold a content line at 75 octets without splitting a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // Continuation lines start with one space, which counts.
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out
}
