use std::io::Write;
use std::time::Duration;

use chrono::Local;
use zonenotes_core::{CountdownState, DisplayLine, HostSignal, SignalHandler};

use crate::context::CliContext;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Toggle-able settings exposed by the settings surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Setting {
    /// Master switch for note display
    Enabled,
    /// Lock the note window to enabled zones
    Locked,
    /// Hide notes while out of combat
    HideOutsideCombat,
    /// Drop countdown lines that reached zero
    HideExpired,
}

fn now() -> chrono::NaiveDateTime {
    Local::now().naive_local()
}

// ─────────────────────────────────────────────────────────────────────────────
// Host lifecycle
// ─────────────────────────────────────────────────────────────────────────────

pub fn login(ctx: &mut CliContext, zone_id: u32) {
    ctx.session.handle_signal(&HostSignal::Login { zone_id });
    show_status(ctx);
}

pub fn logout(ctx: &mut CliContext) {
    ctx.session.handle_signal(&HostSignal::Logout);
    show_status(ctx);
}

pub fn change_zone(ctx: &mut CliContext, zone_id: u32) {
    ctx.session
        .handle_signal(&HostSignal::ZoneChanged { zone_id });
    show_status(ctx);
}

pub fn set_combat(ctx: &mut CliContext, in_combat: bool) {
    ctx.session.handle_signal(&HostSignal::CombatChanged {
        in_combat,
        timestamp: now(),
    });
    show_status(ctx);
}

pub fn toggle_editor(ctx: &mut CliContext) {
    ctx.session.handle_signal(&HostSignal::Command);
    if ctx.session.editor().open {
        println!("Note editor opened");
        show_editor(ctx);
    } else {
        println!("Note editor closed");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings surface
// ─────────────────────────────────────────────────────────────────────────────

pub fn set_setting(ctx: &mut CliContext, setting: Setting, value: bool) {
    match setting {
        Setting::Enabled => ctx.session.set_global_enable(value),
        Setting::Locked => ctx.session.set_window_locked(value),
        Setting::HideOutsideCombat => ctx.session.set_hidden_outside_combat(value),
        Setting::HideExpired => ctx.session.set_lines_hidden_past_time(value),
    }
    show_settings(ctx);
}

pub fn show_settings(ctx: &CliContext) {
    let config = ctx.session.config();
    match ctx.session.persistence().path() {
        Ok(path) => println!("Config file:          {}", path.display()),
        Err(e) => println!("Config file:          unavailable ({})", e),
    }
    println!("Enabled:              {}", on_off(config.global_enable));
    println!("Locked:               {}", on_off(config.note_window_locked));
    println!("Hide outside combat:  {}", on_off(config.hidden_outside_combat));
    println!("Hide expired lines:   {}", on_off(config.lines_hidden_past_time));
    println!("Configured zones:     {}", config.zones.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Editing surface
// ─────────────────────────────────────────────────────────────────────────────

/// List catalog zones. A given filter replaces the editor's zone filter.
pub fn list_zones(ctx: &mut CliContext, filter: Option<&str>) {
    if let Some(query) = filter {
        ctx.session.set_zone_filter(query);
    }
    let session = &ctx.session;
    let mut shown = 0;
    for zone in session.filtered_zones() {
        let enabled = session.config().zones.get(&zone.id).is_some_and(|z| z.enabled);
        if enabled {
            println!("{}{}{}", GREEN, zone, RESET);
        } else {
            println!("{}", zone);
        }
        shown += 1;
    }
    if shown == 0 {
        println!("No zones match");
    }
}

pub fn select_zone(ctx: &mut CliContext, zone_id: u32) -> Result<(), String> {
    ctx.session.select_zone(zone_id).map_err(|e| e.to_string())?;
    show_editor(ctx);
    Ok(())
}

pub fn new_note(ctx: &mut CliContext) -> Result<(), String> {
    let index = ctx.session.new_note().map_err(|e| e.to_string())?;
    println!("Created note {}", index);
    Ok(())
}

pub fn select_note(ctx: &mut CliContext, index: usize) -> Result<(), String> {
    ctx.session.select_note(index).map_err(|e| e.to_string())?;
    show_editor(ctx);
    Ok(())
}

pub fn delete_note(ctx: &mut CliContext) -> Result<(), String> {
    ctx.session
        .delete_selected_note()
        .map_err(|e| e.to_string())?;
    if ctx.session.editor().selected_zone.is_some() {
        show_editor(ctx);
    } else {
        println!("Zone has no notes left and was removed");
    }
    Ok(())
}

pub fn enable_zone(ctx: &mut CliContext, enabled: bool) -> Result<(), String> {
    ctx.session
        .set_zone_enabled(enabled)
        .map_err(|e| e.to_string())?;
    show_editor(ctx);
    Ok(())
}

pub fn set_title(ctx: &mut CliContext, title: &str) -> Result<(), String> {
    ctx.session.set_note_title(title).map_err(|e| e.to_string())
}

pub fn set_body(ctx: &mut CliContext, body: &str) -> Result<(), String> {
    ctx.session
        .set_note_body(unescape(body))
        .map_err(|e| e.to_string())
}

/// Append one line to the selected note's body.
pub fn append_line(ctx: &mut CliContext, line: &str) -> Result<(), String> {
    let current = ctx
        .session
        .editing_settings()
        .and_then(|z| z.active_note())
        .map(|n| n.body.clone())
        .ok_or("no zone selected")?;
    let body = if current.is_empty() {
        line.to_string()
    } else {
        format!("{}\n{}", current, line)
    };
    ctx.session.set_note_body(body).map_err(|e| e.to_string())
}

pub fn show_editor(ctx: &CliContext) {
    let session = &ctx.session;
    let Some(zone_id) = session.editor().selected_zone else {
        println!("Select a zone");
        return;
    };
    let Some(settings) = session.editing_settings() else {
        println!("Select a zone");
        return;
    };

    let label = session
        .catalog()
        .find(zone_id)
        .map(|z| z.to_string())
        .unwrap_or_else(|| zone_id.to_string());
    println!("{} ({})", label, settings);

    for (i, note) in settings.notes.iter().enumerate() {
        let marker = if i == settings.selected_note { "*" } else { " " };
        println!("{} {} - {}", marker, i, note);
    }
    if let Some(note) = settings.active_note() {
        println!("{}", "-".repeat(40));
        println!("{}", note.body);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Render surface
// ─────────────────────────────────────────────────────────────────────────────

pub fn show_status(ctx: &CliContext) {
    let session = &ctx.session;
    let host = session.host();
    println!(
        "logged_in={} zone={} in_combat={} note_window={}",
        host.logged_in,
        host.current_zone,
        host.in_combat(),
        if session.visibility().shown { "shown" } else { "hidden" }
    );
}

pub fn render(ctx: &CliContext) {
    if !ctx.session.visibility().shown {
        println!("(note window hidden)");
        return;
    }
    for line in &ctx.session.render_lines(now()) {
        println!("{}", format_line(line));
    }
}

/// Re-render once per second for `secs` seconds.
pub async fn watch(ctx: &CliContext, secs: u64) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    for _ in 0..secs.max(1) {
        interval.tick().await;
        println!("{}", "=".repeat(40));
        render(ctx);
        let _ = std::io::stdout().flush();
    }
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

/// Terminal rendering of a display line. Expired countdowns are red, pending green.
pub fn format_line(line: &DisplayLine) -> String {
    match line {
        DisplayLine::Plain(text) => text.clone(),
        DisplayLine::Error(text) => text.clone(),
        DisplayLine::Countdown { state, text, .. } => {
            let color = match state {
                CountdownState::Expired => RED,
                CountdownState::Pending => GREEN,
            };
            let label = line.remaining_label().unwrap_or_default();
            format!("{}{}{} {}", color, label, RESET, text)
        }
    }
}

/// Parse `on`/`off` style switches.
pub fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("expected on/off, got '{}'", other)),
    }
}

/// Turn literal `\n` sequences typed at the prompt into newlines.
pub fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(&DisplayLine::Plain("stack".to_string())), "stack");
        assert_eq!(
            format_line(&DisplayLine::Error("Invalid Timestamp".to_string())),
            "Invalid Timestamp"
        );

        let pending = DisplayLine::Countdown {
            remaining: TimeDelta::seconds(330),
            state: CountdownState::Pending,
            text: " adds".to_string(),
        };
        assert_eq!(format_line(&pending), "\x1b[32m05:30\x1b[0m  adds");

        let expired = DisplayLine::Countdown {
            remaining: TimeDelta::zero(),
            state: CountdownState::Expired,
            text: "enrage".to_string(),
        };
        assert_eq!(format_line(&expired), "\x1b[31m00:00\x1b[0m enrage");
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("on"), Ok(true));
        assert_eq!(parse_switch("OFF"), Ok(false));
        assert!(parse_switch("maybe").is_err());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("{t:00:30} a\\nb"), "{t:00:30} a\nb");
    }
}
