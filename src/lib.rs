//! Color and animal phrase statistics for large text corpora
//!
//! The pipeline is three steps: build every "color animal" phrase a word list
//! allows (`lexicon`), count them in one pass over a corpus (`scanner`), then
//! turn the counts into transitional probabilities (`analysis`). The counts
//! and results are kept as tab separated tables (`tables`) between steps, and
//! the two binaries in `src/bin` drive each half.

#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;
extern crate serde;
extern crate csv;
extern crate farmhash;
pub mod errors;
pub mod farm;
pub mod lexicon;
pub mod scanner;
pub mod analysis;
pub mod tables;
