//! Animal and color word lists, and the phrases built from them
//!
//! Every (color, animal) pair gets the same twelve surface forms, so the
//! scanner never has to build phrases while it reads the corpus.
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use csv;
use errors::*;
use farm::{FarmMap, FarmSet, new_farm, new_farm_set};
use tables::{column_index, tsv_reader, cell, open_input};

/// How many surface forms each (color, animal) pair has
pub const TEMPLATES_PER_PAIR: usize = 12;

/// Plural of an animal: grizzly -> grizzlies, fox -> foxs
///
/// Only the one suffix rule; anything irregular is simply not found.
pub fn plural(animal: &str) -> String {
    if animal.ends_with('y') {
        format!("{}ies", &animal[..animal.len() - 1])
    } else {
        format!("{}s", animal)
    }
}

/// Trimmed, non-empty words in first-seen order, each only once
fn distinct_words<W>(kind: &str, words: W) -> (Vec<String>, FarmSet<String>)
    where W: IntoIterator, W::Item: Into<String> {
    let mut list = vec![];
    let mut seen: FarmSet<String> = new_farm_set();
    for word in words {
        let word = Into::<String>::into(word).trim().to_string();
        if word.is_empty() {
            continue;
        }
        if seen.insert(word.clone()) {
            list.push(word);
        } else {
            warn!("Word table repeats the {} '{}', keeping one", kind, word);
        }
    }
    (list, seen)
}

/// The two word lists, loaded once and never changed
#[derive(Debug, Clone)]
pub struct Lexicon {
    animals: Vec<String>,
    colors: Vec<String>,
    animal_set: FarmSet<String>,
    color_set: FarmSet<String>,
}

impl Lexicon {
    /// Build from lists. Blank entries are dropped, and so are repeats after the first.
    pub fn new<A, C>(animals: A, colors: C) -> Self
        where A: IntoIterator, A::Item: Into<String>,
              C: IntoIterator, C::Item: Into<String> {
        let (animals, animal_set) = distinct_words("animal", animals);
        let (colors, color_set) = distinct_words("color", colors);
        Lexicon { animals, colors, animal_set, color_set }
    }

    /// Read a tab separated table with `animal` and `color` columns.
    ///
    /// The columns are independent: a row with only an animal still adds that animal.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = tsv_reader(reader);
        let headers = rdr.headers()?.clone();
        let animal_col = column_index(&headers, "word table", "animal")?;
        let color_col = column_index(&headers, "word table", "color")?;
        let mut animals = vec![];
        let mut colors = vec![];
        for row in rdr.records() {
            let row: csv::StringRecord = row?;
            if let Some(animal) = cell(&row, animal_col) { animals.push(animal); }
            if let Some(color) = cell(&row, color_col) { colors.push(color); }
        }
        Ok(Lexicon::new(animals, colors))
    }

    /// Open and read the word table. Not finding it is fatal.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let lexicon = Lexicon::from_reader(open_input("word table", path.as_ref())?)?;
        info!("Loaded {} animals and {} colors from {}",
            lexicon.animals.len(), lexicon.colors.len(), path.as_ref().display());
        Ok(lexicon)
    }

    pub fn animals(&self) -> &[String] { &self.animals }
    pub fn colors(&self) -> &[String] { &self.colors }

    pub fn is_animal(&self, word: &str) -> bool { self.animal_set.contains(word) }
    pub fn is_color(&self, word: &str) -> bool { self.color_set.contains(word) }

    /// All phrase candidates, animals in the outer loop and colors in the inner
    pub fn candidates(&self) -> PhraseCandidates {
        let started = Instant::now();
        let mut entries = Vec::with_capacity(self.animals.len() * self.colors.len());
        for animal in &self.animals {
            let plural = plural(animal);
            for color in &self.colors {
                entries.push(PhraseCandidate::new(color, animal, &plural));
            }
        }
        let candidates = PhraseCandidates::from_entries(entries);
        info!("Built {} phrase candidates ({} surface forms) in {:?}",
            candidates.len(), candidates.len() * TEMPLATES_PER_PAIR, started.elapsed());
        candidates
    }
}

/// One color and one animal, and the twelve ways the corpus may phrase them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCandidate {
    pub color: String,
    pub animal: String,
    pub templates: [String; TEMPLATES_PER_PAIR],
}

impl PhraseCandidate {
    fn new(color: &str, animal: &str, plural: &str) -> Self {
        let (c, a, p) = (color, animal, plural);
        PhraseCandidate {
            color: color.to_string(),
            animal: animal.to_string(),
            templates: [
                format!("{} {}", c, a),
                format!("{} {}", a, c),
                format!("{} s {}", a, c), // possessive after the apostrophe is dropped
                format!("{} has {}", a, c),
                format!("{} is {}", a, c),
                format!("{} have {}", a, c),
                format!("{} are {}", a, c),
                format!("{} {}", c, p),
                format!("{} is {}", p, c),
                format!("{} has {}", p, c),
                format!("{} are {}", p, c),
                format!("{} have {}", p, c),
            ],
        }
    }

    /// The count table key, "color animal"
    pub fn key(&self) -> String {
        format!("{} {}", self.color, self.animal)
    }
}

/// Phrase candidates in build order, indexed by (color, animal)
#[derive(Debug, Clone)]
pub struct PhraseCandidates {
    entries: Vec<PhraseCandidate>,
    index: FarmMap<(String, String), usize>,
}

impl PhraseCandidates {
    fn from_entries(entries: Vec<PhraseCandidate>) -> Self {
        let mut index: FarmMap<(String, String), usize> = new_farm();
        for (i, cand) in entries.iter().enumerate() {
            index.entry((cand.color.clone(), cand.animal.clone())).or_insert(i);
        }
        PhraseCandidates { entries, index }
    }

    pub fn get(&self, color: &str, animal: &str) -> Option<&PhraseCandidate> {
        self.index.get(&(color.to_string(), animal.to_string()))
            .map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> ::std::slice::Iter<PhraseCandidate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
