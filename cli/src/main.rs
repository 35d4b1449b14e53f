use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zonenotes_cli::commands::{self, Setting, parse_switch};
use zonenotes_cli::{CliContext, logging, readline};

/// Startup options
#[derive(Parser)]
#[command(version, about = "Zone notes host simulator")]
struct Args {
    /// TOML zone catalog (`[[zones]] id = .. name = ..`)
    #[arg(short, long)]
    zones: Option<PathBuf>,

    /// confy config name under the zonenotes app directory
    #[arg(long, default_value = zonenotes_core::context::CONFIG_NAME)]
    config_name: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let args = Args::parse();
    let mut ctx = CliContext::new(args.zones.as_deref(), &args.config_name);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(no_binary_name = true, about = "zone notes commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in while standing in a zone
    Login { zone: u32 },
    Logout,
    /// Move to another zone
    Zone { id: u32 },
    /// Enter or leave combat (on/off)
    Combat {
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        state: bool,
    },
    /// Show or hide the note editor
    Toggle,
    /// List zones in relevance order, optionally setting the zone filter
    Zones { filter: Option<String> },
    /// Open a zone in the editor
    Select { zone: u32 },
    NewNote,
    /// Make a note of the edited zone active
    Note { index: usize },
    /// Delete the active note
    Delete,
    /// Enable or disable notes for the edited zone (on/off)
    Enable {
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        state: bool,
    },
    Title { text: String },
    /// Replace the active note body (`\n` for line breaks)
    Body { text: String },
    /// Append a line to the active note body
    Append { text: String },
    /// Change a global setting (on/off)
    Set {
        #[arg(value_enum)]
        setting: Setting,
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        state: bool,
    },
    Config,
    Editor,
    Status,
    /// Print the note window once
    Render,
    /// Re-render every second
    Watch {
        #[arg(default_value_t = 10)]
        secs: u64,
    },
    Exit,
}

async fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let args = shlex::split(line).ok_or("error: Invalid quoting")?;
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Login { zone }) => commands::login(ctx, *zone),
        Some(Commands::Logout) => commands::logout(ctx),
        Some(Commands::Zone { id }) => commands::change_zone(ctx, *id),
        Some(Commands::Combat { state }) => commands::set_combat(ctx, *state),
        Some(Commands::Toggle) => commands::toggle_editor(ctx),
        Some(Commands::Zones { filter }) => commands::list_zones(ctx, filter.as_deref()),
        Some(Commands::Select { zone }) => commands::select_zone(ctx, *zone)?,
        Some(Commands::NewNote) => commands::new_note(ctx)?,
        Some(Commands::Note { index }) => commands::select_note(ctx, *index)?,
        Some(Commands::Delete) => commands::delete_note(ctx)?,
        Some(Commands::Enable { state }) => commands::enable_zone(ctx, *state)?,
        Some(Commands::Title { text }) => commands::set_title(ctx, text)?,
        Some(Commands::Body { text }) => commands::set_body(ctx, text)?,
        Some(Commands::Append { text }) => commands::append_line(ctx, text)?,
        Some(Commands::Set { setting, state }) => commands::set_setting(ctx, *setting, *state),
        Some(Commands::Config) => commands::show_settings(ctx),
        Some(Commands::Editor) => commands::show_editor(ctx),
        Some(Commands::Status) => commands::show_status(ctx),
        Some(Commands::Render) => commands::render(ctx),
        Some(Commands::Watch { secs }) => commands::watch(ctx, *secs).await,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
