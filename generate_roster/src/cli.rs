use std::env;

use chrono::Local;
use roster_core::calendar::following_month;
use roster_core::domain::RosterConfig;

fn flag_value<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter()
        .find(|a| a.starts_with(prefix))
        .and_then(|a| a.strip_prefix(prefix))
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Parses command-line arguments into a roster configuration.
///
/// Without `--year=`/`--month=` the target is the month after the current
/// one. Every hard-constraint toggle and soft-term toggle is independent:
/// `--no-cap`, `--rest-weekend`, `--no-weekend-reward`,
/// `--no-alternation-penalty`, `--no-block-penalty`,
/// `--no-weekend-balance`, `--no-repeat-penalty`.
pub fn parse_config_from_args() -> RosterConfig {
    let args: Vec<String> = env::args().collect();

    let (default_year, default_month) = following_month(Local::now().date_naive());
    let mut config = RosterConfig::for_month(default_year, default_month);

    if let Some(v) = flag_value(&args, "--year=") {
        if let Ok(year) = v.parse() {
            config.year = year;
        }
    }
    if let Some(v) = flag_value(&args, "--month=") {
        if let Ok(month) = v.parse() {
            config.month = month;
        }
    }
    if let Some(v) = flag_value(&args, "--cap=") {
        if let Ok(cap) = v.parse() {
            config.duty_cap = cap;
        }
    }
    if let Some(v) = flag_value(&args, "--blocks=") {
        if let Ok(blocks) = v.parse() {
            config.blocks = blocks;
        }
    }
    if let Some(v) = flag_value(&args, "--slack-day=") {
        if let Ok(weekday) = v.parse() {
            config.slack_weekday = weekday;
        }
    }
    if let Some(v) = flag_value(&args, "--time-limit=") {
        if let Ok(secs) = v.parse() {
            config.solver.time_limit_secs = secs;
        }
    }
    if let Some(v) = flag_value(&args, "--workers=") {
        if let Ok(workers) = v.parse() {
            config.solver.num_workers = workers;
        }
    }

    let weights = &mut config.objective.weights;
    if let Some(v) = flag_value(&args, "--weekend-reward-weight=") {
        if let Ok(w) = v.parse() {
            weights.full_weekend_off = w;
        }
    }
    if let Some(v) = flag_value(&args, "--alternation-weight=") {
        if let Ok(w) = v.parse() {
            weights.alternation = w;
        }
    }
    if let Some(v) = flag_value(&args, "--block-weight=") {
        if let Ok(w) = v.parse() {
            weights.block_deviation = w;
        }
    }
    if let Some(v) = flag_value(&args, "--weekend-balance-weight=") {
        if let Ok(w) = v.parse() {
            weights.weekend_off_balance = w;
        }
    }
    if let Some(v) = flag_value(&args, "--repeat-weight=") {
        if let Ok(w) = v.parse() {
            weights.weekend_repeat = w;
        }
    }

    if has_flag(&args, "--no-cap") {
        config.enforce_duty_cap = false;
    }
    if has_flag(&args, "--rest-weekend") {
        config.require_rest_weekend = true;
    }
    if has_flag(&args, "--no-weekend-reward") {
        config.objective.reward_full_weekends_off = false;
    }
    if has_flag(&args, "--no-alternation-penalty") {
        config.objective.penalize_alternation = false;
    }
    if has_flag(&args, "--no-block-penalty") {
        config.objective.penalize_block_deviation = false;
    }
    if has_flag(&args, "--no-weekend-balance") {
        config.objective.balance_full_weekends_off = false;
    }
    if has_flag(&args, "--no-repeat-penalty") {
        config.objective.penalize_weekend_repeats = false;
    }

    config
}
