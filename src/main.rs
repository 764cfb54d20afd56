use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use wikisnap::areas::clock::Clock;
use wikisnap::areas::logging;
use wikisnap::areas::session::Session;
use wikisnap::artifacts::convert::wikipedia::WikipediaConverter;
use wikisnap::artifacts::diff::change_filter::ChangeFilter;
use wikisnap::artifacts::fetch::http_fetcher::{DEFAULT_TIMEOUT_SECS, HttpFetcher};
use wikisnap::errors::ExitStatus;

#[derive(Parser)]
#[command(
    name = "wikisnap",
    version,
    author = "Sami Barbut-Dica",
    about = "Archive Wikipedia articles as Markdown and track how they change",
    long_about = "wikisnap fetches a list of Wikipedia articles, converts each one to Markdown \
    and stores them together in a timestamped tar.gz archive. \
    Comparing today's archive with an older one reports which articles changed, \
    appeared or disappeared.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Log more details to stderr (-v for progress, -vv for debugging)"
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "snapshot",
        about = "Fetch the listed articles and write a new archive",
        long_about = "This command reads the article list, fetches every article whose requested \
        date is not in the future, converts it to Markdown and writes all of them into one \
        archive named after the current local time."
    )]
    Snapshot {
        #[arg(short, long, help = "The article list (title | url | YYYY-MM-DD per line)")]
        input: PathBuf,
        #[arg(short, long, env = "WIKISNAP_OUTPUT_DIR", help = "The directory holding archives")]
        output_dir: PathBuf,
        #[arg(
            long,
            default_value_t = DEFAULT_TIMEOUT_SECS,
            help = "Per-request timeout in seconds"
        )]
        timeout: u64,
    },
    #[command(
        name = "diffcheck",
        about = "Report articles that changed over the last N days",
        long_about = "This command compares today's latest archive with the latest archive from \
        N days ago and lists the articles that changed, were added or were removed."
    )]
    Diffcheck {
        #[arg(short = 'n', long, help = "How many days back the older archive was taken")]
        days: u32,
        #[arg(short, long, env = "WIKISNAP_OUTPUT_DIR", help = "The directory holding archives")]
        output_dir: PathBuf,
        #[arg(
            long = "diff-filter",
            value_parser = ChangeFilter::try_parse,
            default_value = "MAD",
            help = "Report only (M)odified, (A)dded or (D)eleted articles"
        )]
        diff_filter: ChangeFilter,
    },
    #[command(name = "list", about = "List the archives of the output directory")]
    List {
        #[arg(short, long, env = "WIKISNAP_OUTPUT_DIR", help = "The directory holding archives")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitStatus::from_usage_error(&e).into();
        }
    };

    logging::init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitStatus::Success.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitStatus::from_error(&e).into()
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let clock = Clock::load_from_env()?;

    match cli.command {
        Commands::Snapshot {
            input,
            output_dir,
            timeout,
        } => {
            let session = Session::new(&output_dir, Box::new(std::io::stdout()), clock);
            let fetcher = HttpFetcher::new(Duration::from_secs(timeout))?;

            session
                .snapshot(&input, &fetcher, &WikipediaConverter)
                .await?;
        }
        Commands::Diffcheck {
            days,
            output_dir,
            diff_filter,
        } => {
            let session = Session::new(&output_dir, Box::new(std::io::stdout()), clock);

            session.diffcheck(days, diff_filter)?;
        }
        Commands::List { output_dir } => {
            let session = Session::new(&output_dir, Box::new(std::io::stdout()), clock);

            session.list()?;
        }
    }

    Ok(())
}
