use clap::Args;
use tracing::warn;

use crate::CorpusArgs;

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    corpus: CorpusArgs,
    #[arg(name = "WORD", required = true)]
    words: Vec<String>,
}

pub async fn execute_search(args: SearchArgs) -> anyhow::Result<()> {
    let trie = args.corpus.build_trie().await?;

    for word in &args.words {
        match trie.search(word) {
            Ok(found) => println!("{}: {}", word, if found { "found" } else { "not found" }),
            Err(err) => {
                warn!("Rejected search for {:?}", word);
                println!("{}: {}", word, err);
            }
        }
    }
    Ok(())
}
