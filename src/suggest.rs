use clap::Args;
use tracing::info;
use wordtrie::{QueryReport, ResultSink, SuggestionEngine};

use crate::{
    present::{JsonSink, TerminalSink},
    CorpusArgs,
};

#[derive(Args, Debug)]
pub struct SuggestArgs {
    #[command(flatten)]
    corpus: CorpusArgs,
    /// Show at most this many words. With --json the full match count is
    /// still reported.
    #[arg(long)]
    limit: Option<usize>,
    /// Print the results as JSON.
    #[arg(long)]
    json: bool,
    /// Leave empty to list the whole corpus.
    #[arg(name = "PREFIX")]
    prefix: Option<String>,
}

pub async fn execute_suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let trie = args.corpus.build_trie().await?;
    let prefix = args.prefix.unwrap_or_default();

    let report = if args.json {
        query(
            SuggestionEngine::new(trie, JsonSink::stdout(args.limit)),
            &prefix,
        )
        .await?
    } else {
        let report = query(
            SuggestionEngine::new(trie, TerminalSink::stdout(args.limit)),
            &prefix,
        )
        .await?;
        eprintln!("Search Time: {:.5} milliseconds", report.search_duration_ms);
        eprintln!("Update List Time: {:.5} milliseconds", report.update_duration_ms);
        report
    };

    info!("{} words match {:?}", report.results.len(), report.query);
    Ok(())
}

async fn query<S: ResultSink>(
    engine: SuggestionEngine<S>,
    prefix: &str,
) -> anyhow::Result<QueryReport> {
    Ok(engine.on_query_changed(prefix).await?)
}
