use std::{
    any::Any,
    num::NonZeroUsize,
    ops::Range,
    thread,
    time::Instant,
};

use tracing::{debug, info, warn};

use crate::{BuildError, Symbol, Trie, TrieNode, Word, ALPHABET_SIZE};

/// Below this many words per worker, extra threads cost more than they save.
pub const MIN_WORDS_PER_WORKER: usize = 1024;

/// Builds a [`Trie`] from a corpus using several OS threads.
///
/// Words are grouped by their first symbol, and every group becomes a shard
/// owning one subtree directly below the root. Each worker receives exclusive
/// access to a contiguous run of shards, so no node is ever reachable from two
/// workers and insertion needs no locking.
#[derive(Debug, Clone)]
pub struct ParallelBuilder {
    workers: NonZeroUsize,
}

/// One first-level subtree and the word suffixes that belong below it.
struct Shard<'a> {
    node: &'a mut TrieNode,
    suffixes: Vec<&'a [Symbol]>,
}

impl ParallelBuilder {
    pub fn new(workers: NonZeroUsize) -> Self {
        Self { workers }
    }

    pub fn from_available_parallelism() -> Self {
        let workers = thread::available_parallelism().unwrap_or_else(|err| {
            warn!("Could not query available parallelism, using one worker: {}", err);
            NonZeroUsize::MIN
        });
        Self { workers }
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Validates and inserts every word. Either every word is stored or an
    /// error is returned and nothing is.
    pub fn build<S: AsRef<str>>(&self, words: &[S]) -> Result<Trie, BuildError> {
        let start = Instant::now();

        let words = words
            .iter()
            .enumerate()
            .map(|(index, word)| {
                let word = word.as_ref();
                Word::parse(word).map_err(|source| BuildError::InvalidWord {
                    index,
                    word: word.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut trie = Trie::new();
        let mut groups: Vec<Vec<&[Symbol]>> = vec![Vec::new(); ALPHABET_SIZE];
        for word in &words {
            match word.symbols().split_first() {
                Some((first, rest)) => groups[first.index()].push(rest),
                None => trie.len += usize::from(trie.root.insert(&[])),
            }
        }

        let groups: Vec<(Symbol, Vec<&[Symbol]>)> = Symbol::all()
            .zip(groups)
            .filter(|(_, suffixes)| !suffixes.is_empty())
            .collect();
        let sizes: Vec<usize> = groups.iter().map(|(_, suffixes)| suffixes.len()).collect();
        let ranges = partition(&sizes, self.effective_workers(words.len(), groups.len()));

        // The root is still childless here, so its children line up with the
        // groups one to one.
        trie.root.children = groups
            .iter()
            .map(|(symbol, _)| (*symbol, TrieNode::default()))
            .collect();
        let shards = trie
            .root
            .children
            .iter_mut()
            .zip(groups)
            .map(|((_, node), (_, suffixes))| Shard { node, suffixes })
            .collect();

        let added = dispatch(shards, &ranges, insert_shards, worker_thread)?;
        trie.len += added;

        info!(
            "Trie built from {} words ({} distinct) by {} workers in {:.3} ms",
            words.len(),
            trie.len(),
            ranges.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(trie)
    }

    fn effective_workers(&self, words: usize, shards: usize) -> usize {
        let by_volume = words.div_ceil(MIN_WORDS_PER_WORKER);
        self.workers.get().min(shards).min(by_volume).max(1)
    }
}

impl Default for ParallelBuilder {
    fn default() -> Self {
        Self::from_available_parallelism()
    }
}

fn insert_shards(worker: usize, shards: Vec<Shard<'_>>) -> usize {
    let start = Instant::now();
    let mut added = 0;
    let mut words = 0;
    for shard in shards {
        words += shard.suffixes.len();
        for suffix in shard.suffixes {
            added += usize::from(shard.node.insert(suffix));
        }
    }
    debug!(
        "Worker {} inserted {} words in {} ms",
        worker,
        words,
        start.elapsed().as_millis()
    );
    added
}

fn worker_thread(worker: usize) -> thread::Builder {
    thread::Builder::new().name(format!("trie-build-{}", worker))
}

/// Runs `work` once per range on its own thread and waits for all of them.
/// Returns the sum of what the workers report.
///
/// Every thread that was started is joined before returning, even when a
/// later one could not be spawned.
fn dispatch<'a, F, T>(
    shards: Vec<Shard<'a>>,
    ranges: &[Range<usize>],
    work: F,
    thread_for: T,
) -> Result<usize, BuildError>
where
    F: Fn(usize, Vec<Shard<'a>>) -> usize + Sync,
    T: Fn(usize) -> thread::Builder,
{
    let work = &work;
    let mut shards = shards.into_iter();

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(ranges.len());
        let mut spawn_error = None;
        for (worker, range) in ranges.iter().enumerate() {
            let assigned: Vec<Shard<'a>> = shards.by_ref().take(range.len()).collect();
            match thread_for(worker).spawn_scoped(scope, move || work(worker, assigned)) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    warn!("Could not start build worker {}: {}", worker, err);
                    spawn_error = Some((worker, err));
                    break;
                }
            }
        }

        let mut total = 0;
        let mut failures = Vec::new();
        for (worker, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(added) => total += added,
                Err(payload) => failures.push(format!("worker {}: {}", worker, panic_message(&*payload))),
            }
        }

        match spawn_error {
            None if failures.is_empty() => Ok(total),
            Some((_, err)) if failures.is_empty() => Err(BuildError::Spawn(err)),
            spawn_error => {
                if let Some((worker, err)) = spawn_error {
                    failures.push(format!("worker {}: could not start: {}", worker, err));
                }
                Err(BuildError::Workers {
                    failed: failures.len(),
                    workers: ranges.len(),
                    summary: failures.join("; "),
                })
            }
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Splits `sizes` into at most `parts` contiguous, non-empty ranges whose sums
/// are as even as whole entries allow. The last range takes the remainder.
pub(crate) fn partition(sizes: &[usize], parts: usize) -> Vec<Range<usize>> {
    let parts = parts.min(sizes.len());
    if parts == 0 {
        return Vec::new();
    }

    let total: usize = sizes.iter().sum();
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    let mut sum = 0;
    for part in 1..parts {
        let target = total * part / parts;
        // Leave at least one entry for each remaining part.
        let limit = sizes.len() - (parts - part);
        let mut end = start + 1;
        sum += sizes[start];
        while end < limit && sum < target {
            sum += sizes[end];
            end += 1;
        }
        ranges.push(start..end);
        start = end;
    }
    ranges.push(start..sizes.len());
    ranges
}
