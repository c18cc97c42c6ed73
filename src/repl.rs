use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info};
use wordtrie::{ResultSink, SuggestionEngine};

use crate::{present::TerminalSink, CorpusArgs};

#[derive(Args, Debug)]
pub struct ReplArgs {
    #[command(flatten)]
    corpus: CorpusArgs,
    /// Show at most this many words per query.
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

pub async fn execute_repl(args: ReplArgs) -> anyhow::Result<()> {
    let trie = args.corpus.build_trie().await?;
    info!("Ready, {} words loaded", trie.len());

    let engine = SuggestionEngine::new(trie, TerminalSink::stdout(Some(args.limit)));
    let queries = run_queries(
        &engine,
        BufReader::new(tokio::io::stdin()),
        &mut tokio::io::stdout(),
    )
    .await?;
    info!("Answered {} queries", queries);
    Ok(())
}

/// Every line read from `input` is treated as the new query text. An empty
/// line lists the whole corpus. Timings go to `out` after each query.
async fn run_queries<S, R, W>(
    engine: &SuggestionEngine<S>,
    input: R,
    out: &mut W,
) -> anyhow::Result<usize>
where
    S: ResultSink,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut queries = 0;
    while let Some(line) = lines.next_line().await? {
        let report = match engine.on_query_changed(line.trim()).await {
            Ok(report) => report,
            Err(err) => {
                error!("Could not show results: {}", err);
                return Err(err.into());
            }
        };
        let timings = format!(
            "Search Time: {:.5} milliseconds\nUpdate List Time: {:.5} milliseconds\n",
            report.search_duration_ms, report.update_duration_ms
        );
        out.write_all(timings.as_bytes()).await?;
        out.flush().await?;
        queries += 1;
    }
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use wordtrie::ParallelBuilder;

    use super::*;

    #[tokio::test]
    async fn test_each_line_is_a_query() {
        let _ = tracing_subscriber::fmt::try_init();

        let trie = ParallelBuilder::new(NonZeroUsize::MIN)
            .build(&["CAT", "CATALOG", "CAR", "DOG"])
            .unwrap();
        let engine = SuggestionEngine::new(trie, TerminalSink::new(Vec::new(), Some(2)));

        let mut timings = Vec::new();
        let queries = run_queries(&engine, &b"CA\n\n  DO \nQ\n"[..], &mut timings)
            .await
            .unwrap();
        assert_eq!(queries, 4);

        let (_, sink) = engine.into_parts();
        let shown = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            shown,
            "CAR\nCAT\n... and 1 more\n\
             CAR\nCAT\n... and 2 more\n\
             DOG\n\
             No words with prefix: Q\n"
        );

        let timings = String::from_utf8(timings).unwrap();
        assert_eq!(timings.matches("Search Time: ").count(), 4);
        assert_eq!(timings.matches("Update List Time: ").count(), 4);
        for line in timings.lines() {
            let ms = line.split(' ').rev().nth(1).unwrap();
            assert_eq!(ms.split('.').nth(1).map(str::len), Some(5), "{}", line);
        }
    }

    #[tokio::test]
    async fn test_no_input_means_no_queries() {
        let engine = SuggestionEngine::new(
            ParallelBuilder::new(NonZeroUsize::MIN).build(&["DOG"]).unwrap(),
            TerminalSink::new(Vec::new(), None),
        );
        let mut timings = Vec::new();
        assert_eq!(run_queries(&engine, &b""[..], &mut timings).await.unwrap(), 0);
        assert!(timings.is_empty());
    }
}
