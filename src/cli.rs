use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::card::CardOptions;
use crate::commands::view::View;
use crate::commands::{self, CommandReport, Workspace};
use crate::logging;
use crate::vault::daily::CourseInput;
use crate::vault::document::{CardType, parse_date};

#[derive(Parser)]
#[command(name = "compass")]
#[command(about = "Daily knowledge-vault assistant for an Obsidian vault", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file (default: $COMPASS_CONFIG_PATH or ~/.compass/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the full command report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show today's documents and first-use hints
    Status,
    /// Create the vault folders, default templates and a starter course
    Init,
    /// Draft today's sounding from the latest course
    Navigation,
    /// Create a knowledge card, or append to today's card with the same title
    Card(CardArgs),
    /// Write today's course with the day's summary and next actions
    Course(CourseArgs),
    /// Print today's context snapshot
    Context,
    /// Print a read-only view of the vault as JSON
    View {
        #[command(subcommand)]
        view: ViewCommand,
    },
}

#[derive(Args)]
struct CardArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    content: String,
    #[arg(long = "type", value_enum, default_value_t = CardType::Insight)]
    card_type: CardType,
    /// Repeatable; a leading '#' is optional
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Args)]
struct CourseArgs {
    #[arg(long)]
    summary: String,
    #[arg(long)]
    next: String,
    /// Defaults to links to today's sounding and map
    #[arg(long)]
    reference: Option<String>,
}

#[derive(Subcommand)]
enum ViewCommand {
    Today,
    Cards {
        /// YYYY-MM-DD, default today
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "type", value_enum)]
        card_type: Option<CardType>,
    },
    #[command(name = "card-dates")]
    CardDates,
    Charts,
    Chart {
        date: String,
    },
    Courses,
    Course {
        date: String,
    },
    Harbor,
    #[command(name = "harbor-file")]
    HarborFile {
        category: String,
        filename: String,
    },
    Templates,
    Map {
        #[arg(long)]
        date: Option<String>,
    },
    User,
}

fn optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    Ok(raw.map(parse_date).transpose()?)
}

impl ViewCommand {
    fn into_view(self) -> Result<View> {
        Ok(match self {
            Self::Today => View::Today,
            Self::Cards { date, card_type } => View::Cards {
                date: optional_date(date.as_deref())?,
                card_type,
            },
            Self::CardDates => View::CardDates,
            Self::Charts => View::Charts,
            Self::Chart { date } => View::Chart {
                date: parse_date(&date)?,
            },
            Self::Courses => View::Courses,
            Self::Course { date } => View::Course {
                date: parse_date(&date)?,
            },
            Self::Harbor => View::Harbor,
            Self::HarborFile { category, filename } => View::HarborFile { category, filename },
            Self::Templates => View::Templates,
            Self::Map { date } => View::Map {
                date: optional_date(date.as_deref())?,
            },
            Self::User => View::User,
        })
    }
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    if let Some(data) = &report.data
        && report.details.is_empty()
    {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    println!("{}: {}", report.command, if report.ok { "ok" } else { "failed" });
    for detail in &report.details {
        println!("  {detail}");
    }
    for issue in &report.issues {
        println!("  issue: {issue}");
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let ws = Workspace::open(cli.config.as_deref())?;
    let report = match cli.command {
        Command::Status => commands::status::run(&ws)?,
        Command::Init => commands::init::run(&ws)?,
        Command::Navigation => commands::navigation::run(&ws)?,
        Command::Card(args) => commands::card::run(
            &ws,
            &CardOptions {
                title: args.title,
                content: args.content,
                card_type: args.card_type,
                tags: args.tags,
            },
        )?,
        Command::Course(args) => commands::course::run(
            &ws,
            &CourseInput {
                summary: args.summary,
                next_actions: args.next,
                reference: args.reference,
            },
        )?,
        Command::Context => commands::context::run(&ws)?,
        Command::View { view } => commands::view::run(&ws, &view.into_view()?)?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!("{} reported issues", report.command);
    }
    Ok(())
}
