use clap::{Parser, Subcommand};
use dota_stats::analysis::aggregator::StatsAggregator;
use dota_stats::analysis::player_stats::PlayerId;
use dota_stats::analysis::ranking::{DEFAULT_MIN_GAMES, DEFAULT_TOP_N};
use dota_stats::api::client::StatsApiClient;
use dota_stats::api::transport::{HttpTransport, Transport};
use dota_stats::config::Config;
use dota_stats::display::output::{
    display_error, display_hero_detail, display_info, display_profile_summary,
    display_stats_error, display_top_heroes, spinner,
};
use dota_stats::error::{AppError, StatsError};
use dota_stats::session::{Command, Session, SessionAction, HELP_TEXT};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dota_stats")]
#[command(about = "Dota 2 player statistics from OpenDota", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Overall stats: rank, MMR estimate, wins, losses, win rate
    Profile {
        /// OpenDota account ID
        player_id: PlayerId,
    },

    /// Best heroes by win rate
    Top {
        /// OpenDota account ID
        player_id: PlayerId,

        /// Minimum games on a hero for it to be ranked
        #[arg(short, long, default_value_t = DEFAULT_MIN_GAMES)]
        min_games: u32,

        /// Number of heroes to show
        #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },

    /// Stats of a player on one hero
    Hero {
        /// OpenDota account ID
        player_id: PlayerId,

        /// Hero name (any case) or hero ID
        #[arg(required = true, num_args = 1..)]
        hero: Vec<String>,
    },

    /// Read commands from stdin until `quit`
    Interactive,
}

impl CliCommand {
    /// One-shot lookup, or `None` for the interactive session.
    fn into_command(self) -> Option<Command> {
        match self {
            CliCommand::Profile { player_id } => Some(Command::Profile(player_id)),
            CliCommand::Top {
                player_id,
                min_games,
                top_n,
            } => Some(Command::Top {
                player: player_id,
                min_games,
                top_n,
            }),
            CliCommand::Hero { player_id, hero } => Some(Command::Hero {
                player: player_id,
                hero: hero.join(" "),
            }),
            CliCommand::Interactive => None,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        match &e {
            AppError::Stats(err) => display_stats_error(err),
            other => display_error(&other.to_string()),
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dota_stats=debug" } else { "dota_stats=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = Config::from_env()?;
    debug!(base_url = %config.base_url, keyed = config.api_key.is_some(), "configuration loaded");

    let transport = HttpTransport::new(&config)?;
    let aggregator = StatsAggregator::new(StatsApiClient::new(transport));

    match args.command.into_command() {
        Some(command) => Ok(execute(&aggregator, command).await?),
        None => interactive(&aggregator).await,
    }
}

async fn execute<T: Transport>(
    aggregator: &StatsAggregator<T>,
    command: Command,
) -> Result<(), StatsError> {
    match command {
        Command::Profile(player) => {
            let pb = spinner(&format!("Loading stats for player {}...", player));
            let result = aggregator.build_profile_summary(player).await;
            pb.finish_and_clear();
            display_profile_summary(&result?);
        }
        Command::Top {
            player,
            min_games,
            top_n,
        } => {
            let pb = spinner(&format!("Loading top heroes for player {}...", player));
            let result = aggregator.build_top_heroes(player, min_games, top_n).await;
            pb.finish_and_clear();
            display_top_heroes(&result?);
        }
        Command::Hero { player, hero } => {
            let pb = spinner(&format!("Loading stats for player {} on {}...", player, hero));
            let result = aggregator.build_hero_detail(player, &hero).await;
            pb.finish_and_clear();
            display_hero_detail(&result?);
        }
    }
    Ok(())
}

async fn interactive<T: Transport>(aggregator: &StatsAggregator<T>) -> Result<(), AppError> {
    info!("interactive session started");
    display_info("Dota 2 stats. Type 'help' for commands, 'quit' to leave.");

    let mut session = Session::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session.handle(&line) {
            SessionAction::Prompt(message) if message.is_empty() => {}
            SessionAction::Prompt(message) => display_info(&message),
            SessionAction::Help => println!("{}", HELP_TEXT),
            SessionAction::Quit => break,
            SessionAction::Dispatch(command) => {
                // A failed lookup only affects this command.
                if let Err(err) = execute(aggregator, command).await {
                    display_stats_error(&err);
                }
            }
        }
    }

    info!("interactive session ended");
    Ok(())
}
