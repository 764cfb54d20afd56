//! `diffcheck --days N --output-dir DIR`
//!
//! Standalone form of `wikisnap diffcheck`, for scripts written against the two-binary
//! layout. Arguments, output and exit statuses are the same.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use wikisnap::areas::clock::Clock;
use wikisnap::areas::logging;
use wikisnap::areas::session::Session;
use wikisnap::artifacts::diff::change_filter::ChangeFilter;
use wikisnap::errors::ExitStatus;

#[derive(Parser)]
#[command(
    name = "diffcheck",
    version,
    author = "Sami Barbut-Dica",
    about = "Report Wikipedia articles that changed over the last N days",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
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
    #[arg(short, long, action = ArgAction::Count, help = "Log more details to stderr")]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitStatus::from_usage_error(&e).into();
        }
    };

    logging::init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitStatus::Success.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitStatus::from_error(&e).into()
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let session = Session::new(
        &cli.output_dir,
        Box::new(std::io::stdout()),
        Clock::load_from_env()?,
    );

    session.diffcheck(cli.days, cli.diff_filter)?;

    Ok(())
}
