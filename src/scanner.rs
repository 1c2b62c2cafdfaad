//! Line-by-line phrase counting over a corpus
//!
//! Everything is matched as a plain substring of a padded line. Padding puts a
//! single space around the line and around every pattern, so " cat " can only
//! match a whole word and never the start of "category".
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;
use errors::*;
use farm::FarmMap;
use lexicon::{Lexicon, plural};
use tables::open_input;

const PROGRESS_EVERY: usize = 1_000_000;

/// Lowercase, drop the newline, turn underscores into spaces, spell gray the
/// American way, and put exactly one space on each side.
pub fn pad(text: &str) -> String {
    let body = text.trim_end_matches(|c: char| c == '\n' || c == '\r')
        .to_lowercase()
        .replace('_', " ")
        .replace("grey", "gray");
    format!(" {} ", body.trim_matches(' '))
}

/// Counts keyed by phrase, in the order the keys were first seen
///
/// Keys are never removed, so a zero means "looked for, never found" rather
/// than "never looked for".
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    entries: Vec<(String, u64)>,
    index: FarmMap<String, usize>,
}

impl CountTable {
    pub fn new() -> Self { Default::default() }

    /// Add a key at zero if it isn't already there, and return its slot.
    pub fn ensure(&mut self, key: &str) -> usize {
        if let Some(&slot) = self.index.get(key) {
            return slot;
        }
        let slot = self.entries.len();
        self.entries.push((key.to_string(), 0));
        self.index.insert(key.to_string(), slot);
        slot
    }

    /// Set a key's count to the larger of the old and new values
    pub fn insert_max(&mut self, key: &str, count: u64) {
        let slot = self.ensure(key);
        let old = &mut self.entries[slot].1;
        *old = ::std::cmp::max(*old, count);
    }

    pub fn increment(&mut self, key: &str) {
        let slot = self.ensure(key);
        self.bump(slot);
    }

    #[inline]
    fn bump(&mut self, slot: usize) {
        self.entries[slot].1 += 1;
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Keys and counts in table order
    pub fn iter<'t>(&'t self) -> impl Iterator<Item=(&'t str, u64)> + 't {
        self.entries.iter().map(|&(ref k, c)| (k.as_str(), c))
    }

    /// Largest count first; equal counts keep table order
    pub fn sorted_desc(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}

/// What a scan saw, for the logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub lines: usize,
    pub gated: usize,
}

struct AnimalPattern { slot: usize, singular: String, plural: String }
struct ColorPattern { slot: usize, padded: String }
struct ComboPattern { slot: usize, templates: Vec<String> }

/// Owns the count table for the length of one pass over the corpus
pub struct Scanner {
    counts: CountTable,
    animals: Vec<AnimalPattern>,
    colors: Vec<ColorPattern>,
    combos: Vec<ComboPattern>,
    summary: ScanSummary,
}

impl Scanner {
    /// Pad every pattern once and put every key in the table at zero.
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut counts = CountTable::new();
        let combos: Vec<ComboPattern> = lexicon.candidates().iter()
            .map(|cand| ComboPattern {
                slot: counts.ensure(&cand.key()),
                templates: cand.templates.iter().map(|t| pad(t)).collect(),
            })
            .collect();
        let animals: Vec<AnimalPattern> = lexicon.animals().iter()
            .map(|a| AnimalPattern {
                slot: counts.ensure(a),
                singular: pad(a),
                plural: pad(&plural(a)),
            })
            .collect();
        let colors: Vec<ColorPattern> = lexicon.colors().iter()
            .map(|c| ColorPattern { slot: counts.ensure(c), padded: pad(c) })
            .collect();
        Scanner { counts, animals, colors, combos, summary: ScanSummary::default() }
    }

    /// Count one line. Each key goes up by at most one, however often it appears.
    pub fn scan_line(&mut self, line: &str) {
        let line = pad(line);
        self.summary.lines += 1;

        let mut has_noun = false;
        for animal in &self.animals {
            if line.contains(&animal.singular) || line.contains(&animal.plural) {
                has_noun = true;
                self.counts.bump(animal.slot);
            }
        }
        let mut has_color = false;
        for color in &self.colors {
            if line.contains(&color.padded) {
                has_color = true;
                self.counts.bump(color.slot);
            }
        }

        // The phrase check is the expensive part, and most lines have nothing for it
        if !(has_noun && has_color) {
            return;
        }
        self.summary.gated += 1;
        debug!("{}", line.trim());
        for combo in &self.combos {
            if combo.templates.iter().any(|t| line.contains(t.as_str())) {
                self.counts.bump(combo.slot);
            }
        }
    }

    /// Count every line of a stream, front to back, exactly once.
    ///
    /// Bytes that aren't UTF-8 are replaced rather than ending the scan.
    pub fn scan<R: BufRead>(mut self, mut reader: R) -> Result<(CountTable, ScanSummary)> {
        let started = Instant::now();
        let mut buf = vec![];
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            self.scan_line(&String::from_utf8_lossy(&buf));
            if self.summary.lines % PROGRESS_EVERY == 0 {
                info!("Finished {} lines, {} with both an animal and a color",
                    self.summary.lines, self.summary.gated);
            }
        }
        info!("Scanned {} lines ({} with both an animal and a color) in {:?}",
            self.summary.lines, self.summary.gated, started.elapsed());
        Ok((self.counts, self.summary))
    }

    /// Count a corpus file, or stdin if the path is "-"
    pub fn scan_path<P: AsRef<Path>>(self, path: P) -> Result<(CountTable, ScanSummary)> {
        if path.as_ref() == Path::new("-") {
            let stdin = io::stdin();
            let lock = stdin.lock();
            return self.scan(lock);
        }
        let file = open_input("corpus", path.as_ref())?;
        self.scan(BufReader::new(file))
    }

    /// Count a corpus from anything readable
    pub fn scan_reader<R: Read>(self, reader: R) -> Result<(CountTable, ScanSummary)> {
        self.scan(BufReader::new(reader))
    }
}
