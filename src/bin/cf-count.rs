//! Step 1: Count animal, color and color-animal phrases
//!
//! Reads the corpus one line at a time, so it can be as large as you like (or
//! piped in on stdin as "-"). Every animal, color and color-animal pair from the
//! word table ends up in the counts file, even the ones that never appear.
//!
//! Set RUST_LOG=info for progress, or RUST_LOG=debug to see every line that
//! had both an animal and a color in it.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate chromafauna;

use std::path::PathBuf;
use clap::Arg;

use chromafauna::errors::*;
use chromafauna::lexicon::Lexicon;
use chromafauna::scanner::Scanner;
use chromafauna::tables;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    inner_main().expect("Could not recover. Exiting.");
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg_from_usage("<corpus> 'text corpus to search, one sentence per line (- for stdin)'")
        .arg(Arg::from_usage("--words=[FILE] 'tab separated table with animal and color columns'")
            .default_value("animals_colors.tsv"))
        .arg_from_usage("--output=[FILE] 'where to write the counts (default: <corpus>.counts.tsv)'")
        .get_matches();
    let corpus = args.value_of("corpus").unwrap();
    let output = args.value_of("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| tables::counts_path_for(corpus));

    let lexicon = Lexicon::from_path(args.value_of("words").unwrap())?;
    info!("Counting phrases in {}, results go to {}", corpus, output.display());
    let (counts, summary) = Scanner::new(&lexicon).scan_path(corpus)?;
    tables::write_counts_path(&output, &counts)?;

    println!("{} lines read, {} with both an animal and a color, {} keys written to {}",
        summary.lines, summary.gated, counts.len(), output.display());
    Ok(())
}
