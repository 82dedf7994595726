// Binary entry point for the command-line application.
use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;
use techcal::cli::print_help;
use techcal::config::Config;
use techcal::context::{AppContext, StandardContext};
use techcal::feed::{EventFilters, FeedEventType, FeedService};
use techcal::model::{EventSource, parse_event_input_at};
use techcal::notifications::NotificationService;
use techcal::recommend::{self, DEFAULT_LIMIT};
use techcal::store::EventStore;
use techcal::system::{NotificationCommand, spawn_notification_actor};
use tokio::sync::mpsc;

const BINARY: &str = "techcal";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help(BINARY);
        return Ok(());
    }

    let mut override_root: Option<PathBuf> = None;
    let mut verbose = false;
    let mut rest: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--root" | "-r" => {
                if i + 1 < args.len() {
                    override_root = Some(args[i + 1].clone().into());
                    i += 1; // Also consumed the value
                }
            }
            "--verbose" | "-v" => verbose = true,
            _ => rest.push(args[i].clone()),
        }
        i += 1;
    }

    let ctx = StandardContext::new(override_root);
    let config = Config::load_or_default(&ctx)?;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        config.log_level_filter()
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let Some((command, command_args)) = rest.split_first() else {
        print_help(BINARY);
        return Ok(());
    };
    let today = Local::now().date_naive();

    match command.as_str() {
        "parse" => cmd_parse(&config, &command_args.join(" "), today),
        "add" => cmd_add(&ctx, &config, &command_args.join(" "), today),
        "list" => cmd_list(&ctx, command_args.first().map(String::as_str)),
        "remove" => cmd_remove(&ctx, command_args.first().map(String::as_str)),
        "feed" => cmd_feed(&ctx, command_args),
        "trending" => {
            let feed = FeedService::with_mock_feed()?;
            print_json(&feed.trending())
        }
        "recommend" => cmd_recommend(&config, command_args.first().map(String::as_str)),
        "reminders" => cmd_reminders(&ctx, &config),
        "watch" => cmd_watch(&ctx, &config).await,
        other => anyhow::bail!("Unknown command '{}'. See '{} --help'.", other, BINARY),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn warn_if_uncertain(config: &Config, confidence: f64) {
    if confidence < config.low_confidence_threshold {
        eprintln!(
            "Warning: low confidence ({:.0}%). Please review the extracted details.",
            confidence * 100.0
        );
    }
}

fn cmd_parse(config: &Config, input: &str, today: NaiveDate) -> Result<()> {
    let parsed = parse_event_input_at(input, today);
    warn_if_uncertain(config, parsed.confidence);
    print_json(&parsed)
}

fn cmd_add(ctx: &dyn AppContext, config: &Config, input: &str, today: NaiveDate) -> Result<()> {
    let mut store = EventStore::load(ctx)?;
    let event = store.add_from_input(input, EventSource::QuickInput, today)?;
    store.save(ctx)?;
    warn_if_uncertain(config, event.confidence.unwrap_or(0.0));
    print_json(&event)
}

fn cmd_list(ctx: &dyn AppContext, month: Option<&str>) -> Result<()> {
    let store = EventStore::load(ctx)?;
    match month {
        Some(ym) => {
            let first = NaiveDate::parse_from_str(&format!("{}-01", ym), "%Y-%m-%d")
                .with_context(|| format!("Expected a month like 2024-08, got '{}'", ym))?;
            print_json(&store.events_in_month(first.year(), first.month()))
        }
        None => print_json(&store.events),
    }
}

fn cmd_remove(ctx: &dyn AppContext, uid: Option<&str>) -> Result<()> {
    let uid = uid.context("Usage: techcal remove <uid>")?;
    let mut store = EventStore::load(ctx)?;
    match store.remove(uid) {
        Some(event) => {
            store.save(ctx)?;
            println!("Removed '{}'", event.title);
            Ok(())
        }
        None => anyhow::bail!("No event with uid {}", uid),
    }
}

fn cmd_feed(ctx: &dyn AppContext, args: &[String]) -> Result<()> {
    let feed = FeedService::with_mock_feed()?;

    if args.first().map(String::as_str) == Some("add") {
        let id = args.get(1).context("Usage: techcal feed add <id>")?;
        let feed_event = feed
            .by_id(id)
            .with_context(|| format!("No feed event with id {}", id))?;
        let mut store = EventStore::load(ctx)?;
        let event = store.add_from_feed(feed_event);
        store.save(ctx)?;
        return print_json(&event);
    }

    let mut filters = EventFilters::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--type" => {
                if let Some(v) = args.get(i + 1) {
                    let t: FeedEventType = v
                        .parse()
                        .with_context(|| format!("Unknown event type '{}'", v))?;
                    filters.types.push(t);
                    i += 1;
                }
            }
            "--tag" => {
                if let Some(v) = args.get(i + 1) {
                    filters.tags.push(v.clone());
                    i += 1;
                }
            }
            "--location" => {
                if let Some(v) = args.get(i + 1) {
                    filters.location = Some(v.clone());
                    i += 1;
                }
            }
            "--online" => filters.is_online = Some(true),
            "--in-person" => filters.is_online = Some(false),
            "--free" => filters.is_free = Some(true),
            other => log::warn!("Ignoring unknown feed option '{}'", other),
        }
        i += 1;
    }

    print_json(&feed.event_feed(&filters))
}

fn cmd_recommend(config: &Config, limit: Option<&str>) -> Result<()> {
    let limit = match limit {
        Some(l) => l
            .parse()
            .with_context(|| format!("Limit must be a number, got '{}'", l))?,
        None => DEFAULT_LIMIT,
    };
    let feed = FeedService::with_mock_feed()?;
    let mut profile = recommend::default_profile("local");
    if !config.interests.is_empty() {
        profile.interests = config.interests.clone();
    }

    for (event, rec) in recommend::personalized(feed.events(), &profile, limit) {
        println!(
            "{:>3}%  {}  [{}]",
            (rec.score * 100.0).round(),
            event.title,
            event.id
        );
        for reason in &rec.reasons {
            println!("        - {}", reason);
        }
    }
    Ok(())
}

fn cmd_reminders(ctx: &dyn AppContext, config: &Config) -> Result<()> {
    let store = EventStore::load(ctx)?;
    let mut service = NotificationService::new(config.notifications.clone());
    let now = Local::now().naive_local();
    for event in &store.events {
        service.schedule_event_notifications(event, now);
    }

    let mut pending = service.notifications(false);
    pending.sort_by_key(|n| n.scheduled_for);
    for n in pending {
        println!(
            "{}  {}  {}",
            n.scheduled_for.format("%Y-%m-%d %H:%M"),
            techcal::color_utils::notification_icon(n.kind),
            n.message
        );
    }
    Ok(())
}

async fn cmd_watch(ctx: &dyn AppContext, config: &Config) -> Result<()> {
    let store = EventStore::load(ctx)?;
    let (ui_tx, mut ui_rx) = mpsc::channel(10);
    let actor = spawn_notification_actor(
        NotificationService::new(config.notifications.clone()),
        Some(ui_tx),
    );
    actor
        .send(NotificationCommand::Schedule(store.events.clone()))
        .await
        .context("Notification actor stopped unexpectedly")?;

    eprintln!("Watching {} events. Press Ctrl+C to stop.", store.events.len());
    loop {
        tokio::select! {
            Some(n) = ui_rx.recv() => {
                println!(
                    "{} {}: {}",
                    techcal::color_utils::notification_icon(n.kind),
                    n.title,
                    n.message
                );
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
