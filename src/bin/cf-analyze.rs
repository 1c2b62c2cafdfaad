//! Step 2: Transitional probabilities from a counts file
//!
//! Takes the counts written by cf-count and, for every animal, color and
//! color-animal pair, works out forward and backward transitional
//! probabilities and how the canonical color of each animal compares with the
//! most common other color.

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
use chromafauna::analysis::{self, CanonicalColors};
use chromafauna::tables;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    inner_main().expect("Could not recover. Exiting.");
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg_from_usage("<counts> 'tab separated file of counts, from cf-count'")
        .arg(Arg::from_usage("--words=[FILE] 'tab separated table with animal and color columns'")
            .default_value("animals_colors.tsv"))
        .arg(Arg::from_usage("--canonical=[FILE] 'tab separated table with animal and canonical color columns'")
            .default_value("canonical_colors.tsv"))
        .arg_from_usage("--output=[FILE] 'where to write the results (default: <counts> with .results.tsv)'")
        .get_matches();
    let counts_name = args.value_of("counts").unwrap();
    let output = args.value_of("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| tables::results_path_for(counts_name));

    // Load everything before writing anything
    let lexicon = Lexicon::from_path(args.value_of("words").unwrap())?;
    let canonical = CanonicalColors::from_path(args.value_of("canonical").unwrap())?;
    let counts = tables::read_counts_path(counts_name)?;
    info!("Analyzing {}, results go to {}", counts_name, output.display());

    let records = analysis::analyze(&counts, &lexicon, &canonical);
    tables::write_results_path(&output, &records)?;

    println!("{} of {} entries analyzed, written to {}",
        records.len(), counts.len(), output.display());
    Ok(())
}
