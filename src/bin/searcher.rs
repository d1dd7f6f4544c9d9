use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use triedex::search::searcher::Searcher;
use triedex::storage::layout::IndexPaths;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: searcher index_prefix query_prefix");
        return ExitCode::FAILURE;
    }
    let paths = IndexPaths::new(PathBuf::from(&args[1]));
    let query = &args[2];

    let mut searcher = match Searcher::open(&paths) {
        Ok(searcher) => searcher,
        Err(err) => {
            eprintln!("failed to open index: {}", err);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(query = %query, "searching");
    match searcher.files_with_prefix(query) {
        Ok(files) => {
            for file in files {
                println!("{}", file.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("search failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
