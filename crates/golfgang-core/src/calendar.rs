//! Calendar export and share text.
//!
//! Produces the ICS file for Apple Calendar / Outlook, the Google Calendar
//! template URL, and the clipboard share message. Times are written as
//! floating local time, matching how tee times are entered.

use chrono::{Duration, NaiveDateTime};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::event::Event;

/// A round blocks out 4.5 hours from tee-off.
pub const ROUND_DURATION_MINUTES: i64 = 270;

/// ICS file content for an event.
pub fn event_ics(event: &Event, event_url: Option<&str>) -> String {
    let uid = format!("{}@golfgang.app", uuid::Uuid::new_v4());
    render_ics(event, event_url, chrono::Local::now().naive_local(), &uid)
}

fn render_ics(
    event: &Event,
    event_url: Option<&str>,
    dtstamp: NaiveDateTime,
    uid: &str,
) -> String {
    let start = event.tee_datetime();
    let end = start + Duration::minutes(ROUND_DURATION_MINUTES);

    let title = format!(
        "⛳ {} - {}",
        event.tee_time.as_deref().filter(|t| !t.is_empty()).unwrap_or("Golf"),
        event.course_name.as_deref().filter(|c| !c.is_empty()).unwrap_or("Golf Round"),
    );
    let location = event
        .course_address
        .as_deref()
        .or(event.course_name.as_deref())
        .unwrap_or("");

    let mut description_parts: Vec<String> = Vec::new();
    if let Some(notes) = event.notes.as_deref() {
        if !notes.is_empty() {
            description_parts.push(notes.to_string());
        }
    }
    if let Some(url) = event_url {
        description_parts.push(format!("Event link: {url}"));
    }
    let description = description_parts.join("\n\n");

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//GolfGang//Event//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTAMP:{}", format_local(dtstamp)),
        format!("DTSTART:{}", format_local(start)),
        format!("DTEND:{}", format_local(end)),
        format!("SUMMARY:{}", escape_text(&title)),
    ];

    if !location.is_empty() {
        lines.push(format!("LOCATION:{}", escape_text(location)));
    }
    if !description.is_empty() {
        lines.push(format!("DESCRIPTION:{}", escape_text(&description)));
    }
    if let Some(url) = event_url {
        lines.push(format!("URL:{url}"));
    }

    lines.push("BEGIN:VALARM".to_string());
    lines.push("TRIGGER:-PT1H".to_string());
    lines.push("ACTION:DISPLAY".to_string());
    lines.push(format!("DESCRIPTION:{} starts in 1 hour", escape_text(&title)));
    lines.push("END:VALARM".to_string());
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    lines.join("\r\n")
}

/// Render the ICS and write it into `dir`, named after the course.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_ics(event: &Event, event_url: Option<&str>, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(ics_filename(event));
    std::fs::write(&path, event_ics(event, event_url))?;
    Ok(path)
}

/// Download filename for an event's ICS file.
pub fn ics_filename(event: &Event) -> String {
    let base = event
        .course_name
        .as_deref()
        .or(event.title.as_deref())
        .unwrap_or("golf-event");
    format!("{}.ics", sanitize_filename(base))
}

/// Google Calendar "add event" URL.
///
/// Title format: `⛳ 2:22pm - North Turramurra Golf Course`, dropping the
/// parts that are not set.
pub fn google_calendar_url(event: &Event, event_url: &str) -> String {
    let date_str = event.date.format("%Y%m%d").to_string();

    let mut title = String::from("⛳");
    let tee_12h = event.tee_time.as_deref().and_then(format_tee_12h);
    if let Some(t) = &tee_12h {
        title.push(' ');
        title.push_str(t);
    }
    if let Some(course) = event.course_name.as_deref() {
        title.push_str(if tee_12h.is_some() { " - " } else { " " });
        title.push_str(course);
    }

    let details = format!(
        "{}\n\nEvent details: {}",
        event.notes.as_deref().unwrap_or(""),
        event_url
    );

    format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}/{}&location={}&details={}",
        urlencoding::encode(&title),
        date_str,
        date_str,
        urlencoding::encode(event.course_name.as_deref().unwrap_or("")),
        urlencoding::encode(&details),
    )
}

/// Clipboard share message for an event.
///
/// `player_names` is the confirmed roster in queue order, already resolved
/// to display names.
pub fn share_message(event: &Event, player_names: &[String], event_url: &str) -> String {
    let mut msg = format!(
        "⛳ Golf - {}!\n",
        if event.booked { "Booked" } else { "Proposed" }
    );
    msg.push_str(&format!("📅 {}\n", event.display_title()));
    if let Some(tee) = event.tee_time.as_deref() {
        msg.push_str(&format!("🕐 {tee}\n"));
    }
    if let Some(course) = event.course_name.as_deref() {
        msg.push_str(&format!("📍 {course}\n"));
    }
    if !player_names.is_empty() {
        msg.push_str(&format!("🏌️ {}\n", player_names.join(", ")));
    }
    if let Some(notes) = event.notes.as_deref() {
        msg.push_str(&format!("\n📝 {notes}\n"));
    }
    msg.push_str(&format!("\n🔗 {event_url}"));

    if event.booked {
        msg.push_str(&format!(
            "\n\n📅 Add to Calendar:\n{}",
            google_calendar_url(event, event_url)
        ));
    }

    msg
}

/// "14:22" -> "2:22pm". Minutes are carried through untouched.
pub fn format_tee_12h(tee: &str) -> Option<String> {
    let (hours, minutes) = tee.split_once(':')?;
    let hour: u32 = hours.trim().parse().ok()?;
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    let ampm = if hour >= 12 { "pm" } else { "am" };
    Some(format!("{display}:{minutes}{ampm}"))
}

/// ICS local datetime: `YYYYMMDDTHHMMSS`, no zone suffix.
fn format_local(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Escape `\`, `;`, `,` and newlines for ICS text fields. Backslash must
/// go first.
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Lowercase, collapse anything non-alphanumeric to single dashes, trim,
/// cap at 50 chars.
fn sanitize_filename(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::new();
    let mut last_dash = false;
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed: String = out.trim_matches('-').chars().take(50).collect();
    if trimmed.is_empty() {
        "golf-event".to_string()
    } else {
        trimmed
    }
}
