use std::{fs::File, num::NonZeroUsize, path::PathBuf, sync::Mutex, time::Instant};

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, Level};
use wordtrie::{corpus, ParallelBuilder, Trie};

mod present;
mod repl;
mod search;
mod suggest;

use repl::{execute_repl, ReplArgs};
use search::{execute_search, SearchArgs};
use suggest::{execute_suggest, SuggestArgs};

/// Prefix search over a word corpus.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Builds a trie over a word corpus on several threads and answers prefix queries."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// More log output, repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the words starting with a prefix.
    Suggest(SuggestArgs),
    /// Check whether words are in the corpus.
    Search(SearchArgs),
    /// Read queries from stdin, one per line.
    Repl(ReplArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// File with one word per line. Defaults to every word of --word-length
    /// letters.
    #[arg(short, long)]
    corpus: Option<PathBuf>,
    #[arg(short = 'l', long, default_value_t = 4)]
    word_length: usize,
    /// Build threads. Defaults to the available parallelism.
    #[arg(short, long)]
    workers: Option<NonZeroUsize>,
}

impl CorpusArgs {
    pub async fn build_trie(&self) -> anyhow::Result<Trie> {
        let words = match &self.corpus {
            Some(path) => corpus::load(path).await?,
            None => corpus::exhaustive(self.word_length)?,
        };
        let builder = match self.workers {
            Some(workers) => ParallelBuilder::new(workers),
            None => ParallelBuilder::from_available_parallelism(),
        };
        debug!("Building trie with up to {} workers", builder.workers());

        let start = Instant::now();
        let trie = tokio::task::spawn_blocking(move || builder.build(&words)).await??;
        info!(
            "Trie data structure built in: {:.5} milliseconds",
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(trie)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init(),
    }

    debug!("{:?}", cli);

    match cli.command {
        Command::Suggest(args) => execute_suggest(args).await,
        Command::Search(args) => execute_search(args).await,
        Command::Repl(args) => execute_repl(args).await,
    }
}
