use serde::Serialize;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt, Stdout},
    sync::Mutex,
};
use wordtrie::{PresentError, ResultSink};

/// Writes results one per line.
#[derive(Debug)]
pub struct TerminalSink<W> {
    out: Mutex<W>,
    /// Print at most this many results.
    limit: Option<usize>,
}

impl TerminalSink<Stdout> {
    pub fn stdout(limit: Option<usize>) -> Self {
        Self::new(tokio::io::stdout(), limit)
    }
}

impl<W> TerminalSink<W> {
    pub fn new(out: W, limit: Option<usize>) -> Self {
        Self {
            out: Mutex::new(out),
            limit,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait::async_trait]
impl<W: AsyncWrite + Unpin + Send> ResultSink for TerminalSink<W> {
    async fn present(&self, query: &str, results: &[String]) -> Result<(), PresentError> {
        let shown = shown(self.limit, results);

        let mut buf = String::with_capacity(shown.len() * (query.len() + 8));
        for word in shown {
            buf.push_str(word);
            buf.push('\n');
        }
        if shown.len() < results.len() {
            buf.push_str(&format!("... and {} more\n", results.len() - shown.len()));
        }
        if results.is_empty() {
            buf.push_str(&format!("No words with prefix: {}\n", query));
        }

        let mut out = self.out.lock().await;
        out.write_all(buf.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct Presented<'a> {
    query: &'a str,
    results: &'a [String],
    /// Matches before the limit was applied.
    total: usize,
}

/// Writes each result list as one line of JSON.
#[derive(Debug)]
pub struct JsonSink<W> {
    out: Mutex<W>,
    limit: Option<usize>,
}

impl JsonSink<Stdout> {
    pub fn stdout(limit: Option<usize>) -> Self {
        Self::new(tokio::io::stdout(), limit)
    }
}

impl<W> JsonSink<W> {
    pub fn new(out: W, limit: Option<usize>) -> Self {
        Self {
            out: Mutex::new(out),
            limit,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait::async_trait]
impl<W: AsyncWrite + Unpin + Send> ResultSink for JsonSink<W> {
    async fn present(&self, query: &str, results: &[String]) -> Result<(), PresentError> {
        let mut line = serde_json::to_vec(&Presented {
            query,
            results: shown(self.limit, results),
            total: results.len(),
        })?;
        line.push(b'\n');

        let mut out = self.out.lock().await;
        out.write_all(&line).await?;
        out.flush().await?;
        Ok(())
    }
}

fn shown(limit: Option<usize>, results: &[String]) -> &[String] {
    let end = limit.unwrap_or(results.len()).min(results.len());
    &results[..end]
}
