use chrono::Utc;
use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlog::{cli, config, error, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Sync recent plays into the local database
    Sync,

    /// Show listening stats for a window
    Stats(StatsOptions),

    /// List recent tracks in a window
    Recent(RecentOptions),

    /// Remove stored credentials
    Logout,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct WindowOptions {
    /// Yesterday only
    #[clap(long, conflicts_with_all = ["last_week", "last_month"])]
    pub yesterday: bool,

    /// The last 7 days (default)
    #[clap(long, conflicts_with = "last_month")]
    pub last_week: bool,

    /// The last 30 days
    #[clap(long)]
    pub last_month: bool,

    /// Window start date (YYYY-MM-DD); overrides the presets
    #[clap(long)]
    pub from: Option<String>,

    /// Window end date (YYYY-MM-DD); defaults to today
    #[clap(long)]
    pub to: Option<String>,
}

impl WindowOptions {
    fn to_window(&self) -> utils::Window {
        let now = Utc::now();

        if self.from.is_some() || self.to.is_some() {
            let start = utils::get_date_from_string(self.from.clone());
            let end = utils::get_date_from_string(self.to.clone());
            return utils::Window::between(start, end);
        }
        if self.yesterday {
            return utils::Window::yesterday(now);
        }
        if self.last_month {
            return utils::Window::last_days(now, 30);
        }
        utils::Window::last_days(now, 7)
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    #[command(flatten)]
    pub window: WindowOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct RecentOptions {
    #[command(flatten)]
    pub window: WindowOptions,

    /// Maximum number of tracks to list
    #[clap(long, default_value_t = 50)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Sync => cli::sync().await,
        Command::Stats(opt) => cli::stats(opt.window.to_window()).await,
        Command::Recent(opt) => cli::recent(opt.window.to_window(), opt.limit).await,
        Command::Logout => cli::logout().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
