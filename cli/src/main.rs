use clap::{Parser, Subcommand};
use outpost_cli::CliContext;
use outpost_cli::commands;
use outpost_cli::logging;
use outpost_cli::readline;
use outpost_core::context::{AppConfig, AppConfigExt, PhaseFilter};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let ctx = CliContext::start(AppConfig::load());

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
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

    ctx.shutdown().await;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Contested resource cycle timers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a timer from the time left in its current cycle
    Add {
        project: String,
        alliance: String,
        #[arg(short, long, default_value_t = 0)]
        days: u32,
        #[arg(long, default_value_t = 0)]
        hours: u32,
        #[arg(short, long, default_value_t = 0)]
        minutes: u32,
        /// Quick pick: 1h, 6h, 12h, 1d or 3d
        #[arg(short, long)]
        preset: Option<String>,
    },
    /// Show timer cards and phase totals
    List {
        #[arg(short, long)]
        filter: Option<PhaseFilter>,
    },
    Delete {
        id: u64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all timers
    Reset {
        #[arg(short, long)]
        yes: bool,
    },
    /// Follow live updates from the scheduler
    Watch {
        #[arg(short, long, default_value_t = 5)]
        ticks: usize,
    },
    Presets,
    /// Show or change settings
    Config {
        #[arg(long)]
        tick_ms: Option<u64>,
        #[arg(long)]
        confirm: Option<bool>,
        #[arg(long)]
        filter: Option<PhaseFilter>,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "outpost".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Add {
            project,
            alliance,
            days,
            hours,
            minutes,
            preset,
        }) => {
            commands::add_timer(
                ctx,
                project,
                alliance,
                *days,
                *hours,
                *minutes,
                preset.as_deref(),
            )
            .await?
        }
        Some(Commands::List { filter }) => commands::list_timers(ctx, *filter).await?,
        Some(Commands::Delete { id, yes }) => commands::delete_timer(ctx, *id, *yes).await?,
        Some(Commands::Reset { yes }) => commands::reset_timers(ctx, *yes).await?,
        Some(Commands::Watch { ticks }) => commands::watch(ctx, *ticks).await?,
        Some(Commands::Presets) => commands::show_presets()?,
        Some(Commands::Config {
            tick_ms,
            confirm,
            filter,
        }) => {
            if tick_ms.is_some() || confirm.is_some() || filter.is_some() {
                update_settings(ctx, *tick_ms, *confirm, *filter).await?;
            }
            commands::show_settings(ctx).await?
        }
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

async fn update_settings(
    ctx: &CliContext,
    tick_ms: Option<u64>,
    confirm: Option<bool>,
    filter: Option<PhaseFilter>,
) -> Result<(), String> {
    let mut config = ctx.config.write().await;
    if let Some(ms) = tick_ms {
        config.tick_interval_ms = ms;
        println!("Tick interval takes effect on next start");
    }
    if let Some(confirm) = confirm {
        config.confirm_destructive = confirm;
    }
    if let Some(filter) = filter {
        config.default_filter = filter;
    }
    config.save().map_err(|e| e.to_string())
}
