use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use triedex::core::builder::IndexBuilder;
use triedex::core::config::IndexConfig;
use triedex::storage::layout::IndexPaths;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: indexer corpus_path index_prefix");
        return ExitCode::FAILURE;
    }
    let corpus = Path::new(&args[1]);
    let paths = IndexPaths::new(PathBuf::from(&args[2]));

    let mut builder = IndexBuilder::new(IndexConfig::default());
    if let Err(err) = builder.build_from_dir(corpus) {
        eprintln!("indexing failed: {}", err);
        return ExitCode::FAILURE;
    }
    match builder.commit(&paths) {
        Ok(summary) => {
            println!(
                "indexed {} documents into {} trie nodes ({} data bytes)",
                summary.documents, summary.nodes, summary.data_bytes
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to write index: {}", err);
            ExitCode::FAILURE
        }
    }
}
