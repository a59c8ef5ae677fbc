use std::io::Write;
use std::process;

use compsearch::{write_table, CompoundSearch};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.len() > 2 {
        eprintln!("Usage: compsearch-cli <target-formula> [lit-file]");
        process::exit(2);
    }

    let repo = match args.get(1) {
        Some(path) => match CompoundSearch::from_path(path) {
            Ok(repo) => repo,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => CompoundSearch::new(),
    };

    let hits = match repo.search(&args[0]) {
        Ok(hits) => hits,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_table(&mut out, &hits) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    if let Err(e) = out.flush() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
