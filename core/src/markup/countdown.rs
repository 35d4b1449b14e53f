//! Countdown line rendering
//!
//! A line containing `{t:MM:SS}` is rendered as a countdown: before combat it
//! shows the full target time, during combat it shows the target minus the
//! time elapsed since combat start, clamped at zero. Minutes take one or two
//! digits (0-99), seconds take one or two digits and must be 0-59.
//! Seconds are capped because the directive is read as `mm:ss` clock
//! notation, so `{t:1:75}` is malformed rather than `02:15`.
//!
//! [`render`] holds no state and does no I/O. It is meant to be called every
//! frame with the current time since both `now` and the combat start move
//! independently of the note body.

use chrono::{NaiveDateTime, TimeDelta};
use zonenotes_types::formatting::format_mm_ss;

use super::MarkupError;

/// Text shown in place of a line whose directive could not be parsed.
pub const INVALID_TIMESTAMP_LABEL: &str = "Invalid Timestamp";

const DIRECTIVE_OPEN: &str = "{t:";
const MAX_SECONDS: u32 = 59;

/// Whether a countdown has reached zero. Drives the display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Pending,
    Expired,
}

/// One rendered line of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayLine {
    Plain(String),
    Countdown {
        remaining: TimeDelta,
        state: CountdownState,
        /// Line text with the directive removed
        text: String,
    },
    Error(String),
}

impl DisplayLine {
    /// Remaining time as `MM:SS`, for countdown lines only.
    pub fn remaining_label(&self) -> Option<String> {
        match self {
            DisplayLine::Countdown { remaining, .. } => {
                Some(format_mm_ss(remaining.num_seconds().max(0) as u64))
            }
            _ => None,
        }
    }
}

/// A directive located in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Exact directive text, braces included
    pub raw: &'a str,
    pub target: TimeDelta,
}

/// Find the first timestamp directive in `line`.
///
/// Returns `None` when the line has no directive at all, and an error when a
/// `{t:` opener is present but no well-formed directive follows it, or when
/// the first well-formed one has seconds above 59.
pub fn parse_directive(line: &str) -> Option<Result<Directive<'_>, MarkupError>> {
    let mut first_malformed: Option<&str> = None;

    for (start, _) in line.match_indices(DIRECTIVE_OPEN) {
        let body_start = start + DIRECTIVE_OPEN.len();
        match match_shape(&line[body_start..]) {
            Some((minutes, seconds, len)) => {
                let raw = &line[start..body_start + len];
                if seconds > MAX_SECONDS {
                    return Some(Err(malformed(raw)));
                }
                let target = TimeDelta::seconds(i64::from(minutes * 60 + seconds));
                return Some(Ok(Directive { raw, target }));
            }
            None => {
                if first_malformed.is_none() {
                    first_malformed = Some(raw_until_close(line, start));
                }
            }
        }
    }

    first_malformed.map(|raw| Err(malformed(raw)))
}

/// Render a note body into display lines.
pub fn render(
    body: &str,
    combat_start: Option<NaiveDateTime>,
    now: NaiveDateTime,
    hide_lines_past_zero: bool,
) -> Vec<DisplayLine> {
    let mut lines = Vec::new();

    for line in body.split('\n') {
        let directive = match parse_directive(line) {
            None => {
                lines.push(DisplayLine::Plain(line.to_string()));
                continue;
            }
            Some(Err(e)) => {
                // Reported once per body change by the session; this runs every frame
                tracing::trace!(error = %e, "Skipping countdown");
                lines.push(DisplayLine::Error(INVALID_TIMESTAMP_LABEL.to_string()));
                continue;
            }
            Some(Ok(directive)) => directive,
        };

        let remaining = remaining_time(directive.target, combat_start, now);
        let state = if remaining <= TimeDelta::zero() {
            CountdownState::Expired
        } else {
            CountdownState::Pending
        };

        if state == CountdownState::Expired && hide_lines_past_zero {
            continue;
        }

        lines.push(DisplayLine::Countdown {
            remaining,
            state,
            text: line.replace(directive.raw, ""),
        });
    }

    lines
}

/// Collect malformed directives with their 1-based line numbers.
pub fn validate(body: &str) -> Vec<(usize, MarkupError)> {
    body.split('\n')
        .enumerate()
        .filter_map(|(i, line)| match parse_directive(line) {
            Some(Err(e)) => Some((i + 1, e)),
            _ => None,
        })
        .collect()
}

fn remaining_time(
    target: TimeDelta,
    combat_start: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> TimeDelta {
    let Some(start) = combat_start else {
        return target;
    };
    let elapsed = (now - start).max(TimeDelta::zero());
    (target - elapsed).max(TimeDelta::zero())
}

/// Match `M:S}` with 1-2 digits on each side.
/// Returns (minutes, seconds, matched length including the closing brace).
fn match_shape(rest: &str) -> Option<(u32, u32, usize)> {
    let bytes = rest.as_bytes();
    let (minutes, colon) = take_digits(bytes, 0)?;
    if bytes.get(colon) != Some(&b':') {
        return None;
    }
    let (seconds, close) = take_digits(bytes, colon + 1)?;
    if bytes.get(close) != Some(&b'}') {
        return None;
    }
    Some((minutes, seconds, close + 1))
}

fn take_digits(bytes: &[u8], start: usize) -> Option<(u32, usize)> {
    let mut value = 0u32;
    let mut pos = start;
    while pos < bytes.len() && pos - start < 2 && bytes[pos].is_ascii_digit() {
        value = value * 10 + u32::from(bytes[pos] - b'0');
        pos += 1;
    }
    (pos > start).then_some((value, pos))
}

fn raw_until_close(line: &str, start: usize) -> &str {
    match line[start..].find('}') {
        Some(end) => &line[start..start + end + 1],
        None => &line[start..],
    }
}

fn malformed(raw: &str) -> MarkupError {
    MarkupError::MalformedTimestamp {
        directive: raw.to_string(),
    }
}
