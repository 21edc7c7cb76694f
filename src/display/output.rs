use crate::analysis::aggregator::{AggregatedProfileView, HeroDetailView, RankedHeroView};
use crate::error::StatsError;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct HeroRow {
    #[tabled(rename = "#")]
    rank: String,
    hero: String,
    games: String,
    wins: String,
    losses: String,
    win_rate: String,
}

pub fn format_win_rate(win_rate: f64) -> String {
    format!("{:.2}%", win_rate)
}

pub fn render_profile_summary(view: &AggregatedProfileView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("👤 Player stats: {}", view.display_name).bold().cyan()
    ));
    out.push_str(&format!("{}\n", "=".repeat(60).cyan()));
    out.push_str(&format!("Player ID:      {}\n", view.player_id));
    out.push_str(&format!("Steam ID:       {}\n", view.account_ref));
    out.push_str(&format!("Estimated MMR:  {}\n", view.rating));
    out.push_str(&format!("Rank:           {}\n", view.rank));
    out.push_str(&format!("Total matches:  {}\n", view.total_matches));
    out.push_str(&format!(
        "Wins / Losses:  {} / {}\n",
        view.wins.to_string().green(),
        view.losses.to_string().red()
    ));
    out.push_str(&format!("Win rate:       {}\n", format_win_rate(view.win_rate)));
    out
}

pub fn render_top_heroes(view: &RankedHeroView) -> String {
    let mut out = format!(
        "{}\n{}\n",
        format!("🏆 Top heroes for player {} (min. {} games)", view.player_id, view.min_games)
            .bold()
            .cyan(),
        "=".repeat(60).cyan()
    );

    if view.heroes.is_empty() {
        out.push_str(&format!("{}\n", "Nothing to show".yellow()));
        return out;
    }

    let rows: Vec<HeroRow> = view
        .heroes
        .iter()
        .map(|hero| HeroRow {
            rank: format!("#{}", hero.position),
            hero: hero.hero_name.clone(),
            games: hero.games.to_string(),
            wins: hero.wins.to_string(),
            losses: hero.losses.to_string(),
            win_rate: format_win_rate(hero.win_rate),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    out.push_str(&format!("{}\n", table));
    out
}

pub fn render_hero_detail(view: &HeroDetailView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("🦸 Player {} on {}", view.player_id, view.hero_name)
            .bold()
            .cyan()
    ));
    out.push_str(&format!("{}\n", "=".repeat(60).cyan()));
    out.push_str(&format!("Games:          {}\n", view.games));
    out.push_str(&format!(
        "Wins / Losses:  {} / {}\n",
        view.wins.to_string().green(),
        view.losses.to_string().red()
    ));
    out.push_str(&format!("Win rate:       {}\n", format_win_rate(view.win_rate)));
    out
}

/// User-facing explanation of a failed lookup.
pub fn describe_error(err: &StatsError) -> String {
    match err {
        StatsError::NotFound => {
            "Player not found on OpenDota. Check the player ID.".to_string()
        }
        StatsError::Hidden => {
            "This player's profile is hidden. They need to enable \"Expose Public Match Data\" in the Dota 2 client.".to_string()
        }
        StatsError::UpstreamError(status) => {
            format!("OpenDota API error (HTTP {}). Please try again later.", status)
        }
        StatsError::NetworkError(_) => {
            "Could not reach the OpenDota API. Check your connection.".to_string()
        }
        StatsError::Decode(_) => {
            "OpenDota returned data that could not be read. Please try again later.".to_string()
        }
        StatsError::HeroNotRecognized(hero) => {
            format!("Hero '{}' not recognized. Use the full hero name or its ID.", hero)
        }
        StatsError::NoRecordForHero(hero_id) => {
            format!("No games recorded on hero {} for this player (or the data is hidden).", hero_id)
        }
        StatsError::NoQualifyingHeroes { min_games } => {
            format!("No heroes with at least {} games for this player.", min_games)
        }
    }
}

pub fn display_profile_summary(view: &AggregatedProfileView) {
    println!("\n{}", render_profile_summary(view));
}

pub fn display_top_heroes(view: &RankedHeroView) {
    println!("\n{}", render_top_heroes(view));
}

pub fn display_hero_detail(view: &HeroDetailView) {
    println!("\n{}", render_hero_detail(view));
}

pub fn display_stats_error(err: &StatsError) {
    display_error(&describe_error(err));
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

/// Stderr spinner shown while fetches are in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
