mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use virality_engine::{
    format_float, format_number, format_percent, AuthorProfile, CountEstimate, EngineConfig,
    Insight, InsightKind, MediaOptions, Niche, PostFrequency, ViralityEngine,
};

#[derive(Parser)]
#[command(name = "virality-engine", about = "Heuristic post virality predictor")]
struct Cli {
    /// Engine config TOML (defaults to $VIRALITY_CONFIG_PATH or config/engine.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Serve(ServeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    video: bool,
    #[arg(long)]
    image: bool,
    #[arg(long)]
    thread_length: Option<usize>,
    #[arg(long, default_value_t = 5000)]
    followers: u64,
    #[arg(long, default_value_t = 500)]
    following: u64,
    #[arg(long, default_value_t = 2.5)]
    engagement_rate: f64,
    #[arg(long, default_value_t = 365)]
    account_age_days: u32,
    #[arg(long)]
    verified: bool,
    #[arg(long, default_value = "tech")]
    niche: String,
    #[arg(long, default_value = "medium")]
    post_frequency: String,
    #[arg(long)]
    details: bool,
    #[arg(long)]
    json: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            text: None,
            video: false,
            image: false,
            thread_length: None,
            followers: 5000,
            following: 500,
            engagement_rate: 2.5,
            account_age_days: 365,
            verified: false,
            niche: "tech".to_string(),
            post_frequency: "medium".to_string(),
            details: false,
            json: false,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long)]
    web_root: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/engine.toml")]
    path: PathBuf,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Analyze(AnalyzeArgs::default()));

    let default_level = match command {
        Command::Serve(_) => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    match command {
        Command::Analyze(args) => run_analyze(args, build_engine(cli.config)?),
        Command::Serve(args) => server::serve(args, build_engine(cli.config)?).await,
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn build_engine(config_path: Option<PathBuf>) -> Result<ViralityEngine, String> {
    let (config, _) = EngineConfig::load(config_path).map_err(|err| err.to_string())?;
    ViralityEngine::from_config(&config).map_err(|err| err.to_string())
}

fn run_analyze(args: AnalyzeArgs, engine: ViralityEngine) -> Result<(), String> {
    let profile = AuthorProfile {
        followers: args.followers,
        following: args.following,
        avg_engagement_rate: validate_rate(args.engagement_rate)?,
        account_age_days: args.account_age_days.max(1),
        is_verified: args.verified,
        niche: Niche::from_label(&args.niche)
            .ok_or_else(|| format!("invalid niche: {}", args.niche))?,
        post_frequency: PostFrequency::from_label(&args.post_frequency)
            .ok_or_else(|| format!("invalid post frequency: {}", args.post_frequency))?,
    };

    let mut options = MediaOptions {
        has_video: args.video,
        has_image: args.image,
        ..MediaOptions::default()
    };
    if let Some(length) = args.thread_length.filter(|length| *length > 1) {
        options = options.thread(length);
    }

    let text = read_text(args.text)?;
    let analysis = engine.analyze(&text, &options, &profile);

    if args.json {
        let payload = serde_json::to_string_pretty(&analysis)
            .map_err(|err| format!("failed to serialize analysis: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    let prediction = &analysis.prediction;
    let level = analysis.level();
    println!(
        "Virality score: {}/100 ({})",
        prediction.virality_score,
        level.label()
    );
    println!("  {}", level.description());
    println!(
        "Weighted score: {} | quality {} | base probability {}",
        format_float(prediction.weighted_score, 2),
        format_float(prediction.quality_score, 3),
        format_percent(prediction.base_probability)
    );

    let counts = &prediction.counts;
    println!("Predicted views: {}", range(&counts.views));
    println!(
        "Likes {} | reposts {} | replies {} | bookmarks {}",
        range(&counts.likes),
        range(&counts.reposts),
        range(&counts.replies),
        range(&counts.bookmarks)
    );

    if args.details {
        let actions = &prediction.actions;
        let risks = &prediction.risks;
        println!("\nAction probabilities:");
        println!("  favorite: {}", format_percent(actions.favorite));
        println!("  reply: {}", format_percent(actions.reply));
        println!("  repost: {}", format_percent(actions.repost));
        println!("  quote: {}", format_percent(actions.quote));
        println!("  click: {}", format_percent(actions.click));
        println!("  profile_click: {}", format_percent(actions.profile_click));
        println!("  share: {}", format_percent(actions.share));
        println!("  bookmark: {}", format_percent(actions.bookmark));
        println!("  dwell: {}", format_percent(actions.dwell));
        println!("  follow_author: {}", format_percent(actions.follow_author));
        println!("  not_interested: {}", format_percent(risks.not_interested));
        println!("  block: {}", format_percent(risks.block));
        println!("  mute: {}", format_percent(risks.mute));
        println!("  report: {}", format_percent(risks.report));
    }

    print_insights("Working for you", &analysis.insights, |kind| {
        kind == InsightKind::Positive
    });
    print_insights("Watch out", &analysis.insights, |kind| {
        matches!(kind, InsightKind::Negative | InsightKind::Warning)
    });
    print_insights("Suggestions", &analysis.insights, |kind| {
        kind == InsightKind::Neutral
    });

    Ok(())
}

fn print_insights(heading: &str, insights: &[Insight], include: impl Fn(InsightKind) -> bool) {
    let selected: Vec<&Insight> = insights.iter().filter(|insight| include(insight.kind)).collect();
    if selected.is_empty() {
        return;
    }

    println!("\n{}:", heading);
    for insight in selected {
        println!("- [{}] {}: {}", insight.impact.label(), insight.title, insight.description);
        if let Some(reference) = &insight.algorithm_reference {
            println!("    ({})", reference);
        }
    }
}

fn range(estimate: &CountEstimate) -> String {
    format!(
        "{} ({}-{})",
        format_number(estimate.expected),
        format_number(estimate.min),
        format_number(estimate.max)
    )
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    if args.path.exists() && !args.force {
        return Err(format!(
            "{} already exists; pass --force to overwrite",
            args.path.display()
        ));
    }
    EngineConfig::default()
        .write(&args.path)
        .map_err(|err| err.to_string())?;
    println!("Wrote default config to {}", args.path.display());
    Ok(())
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    stdin_text(buffer)
}

// Only the final line ending is dropped; leading whitespace decides hooks.
fn stdin_text(mut buffer: String) -> Result<String, String> {
    if buffer.trim().is_empty() {
        return Err("missing post text: pass --text or pipe stdin".to_string());
    }
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

fn validate_rate(value: f64) -> Result<f64, String> {
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("invalid engagement rate (0-100): {}", value));
    }
    Ok(value)
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdin_keeps_leading_whitespace() {
        let text = stdin_text("  Stop writing getters\n".to_string()).unwrap();
        assert_eq!(text, "  Stop writing getters");
    }

    #[test]
    fn stdin_drops_only_the_final_line_ending() {
        let text = stdin_text("first line\nsecond line\r\n".to_string()).unwrap();
        assert_eq!(text, "first line\nsecond line");
    }

    #[test]
    fn blank_stdin_is_rejected() {
        assert!(stdin_text(" \n\t\n".to_string()).is_err());
    }
}
