//! Transitional probabilities from a counts table
//!
//! Each relevant key becomes a `ComboRecord`. Most of a record's fields come
//! from looking up *other* keys in the same table: the bare adjective and
//! animal counts, the animal's canonical color combo, and its most common
//! other color combo. Those lookups all go through one key -> record index
//! built right after classification.
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use errors::*;
use farm::{FarmMap, new_farm};
use lexicon::Lexicon;
use scanner::CountTable;
use tables::{column_index, tsv_reader, cell, open_input};

/// The typical color of each animal
#[derive(Debug, Clone, Default)]
pub struct CanonicalColors {
    colors: FarmMap<String, String>,
}

impl CanonicalColors {
    pub fn new<I, A, C>(pairs: I) -> Self
        where I: IntoIterator<Item=(A, C)>, A: Into<String>, C: Into<String> {
        let mut colors: FarmMap<String, String> = new_farm();
        for (animal, color) in pairs {
            colors.entry(animal.into()).or_insert_with(|| color.into());
        }
        CanonicalColors { colors }
    }

    /// Read `animal` and `canonical color` columns. The first color given for an animal wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = tsv_reader(reader);
        let headers = rdr.headers()?.clone();
        let animal_col = column_index(&headers, "canonical color table", "animal")?;
        let color_col = column_index(&headers, "canonical color table", "canonical color")?;
        let mut colors: FarmMap<String, String> = new_farm();
        for row in rdr.records() {
            let row = row?;
            if let (Some(animal), Some(color)) = (cell(&row, animal_col), cell(&row, color_col)) {
                if colors.contains_key(&animal) {
                    warn!("Canonical color table repeats '{}', keeping the first color", animal);
                    continue;
                }
                colors.insert(animal, color);
            }
        }
        Ok(CanonicalColors { colors })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let canonical = CanonicalColors::from_reader(open_input("canonical color table", path.as_ref())?)?;
        info!("Loaded canonical colors for {} animals from {}",
            canonical.len(), path.as_ref().display());
        Ok(canonical)
    }

    pub fn get(&self, animal: &str) -> Option<&str> {
        self.colors.get(animal).map(|c| c.as_str())
    }

    /// "red fox" for a fox whose canonical color is red
    pub fn combo_for(&self, animal: &str) -> Option<String> {
        self.get(animal).map(|color| format!("{} {}", color, animal))
    }

    pub fn len(&self) -> usize { self.colors.len() }
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }
}

/// What kind of key this is. The flags are independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub is_combo: bool,
    pub is_color_combo: bool,
    pub is_animal: bool,
    pub is_color: bool,
    pub is_adjective: bool,
}

impl Classification {
    /// Adjectives, animals and color combos are kept; anything else is noise.
    pub fn is_relevant(&self) -> bool {
        self.is_adjective || self.is_animal || self.is_color_combo
    }
}

pub fn classify(key: &str, lexicon: &Lexicon) -> Classification {
    let tokens: Vec<&str> = key.split(' ').collect();
    let is_combo = tokens.len() == 2;
    // Colors are the only adjectives we look for, so the two flags are one test
    let is_color = lexicon.is_color(key);
    Classification {
        is_combo,
        is_color_combo: is_combo && lexicon.is_color(tokens[0]),
        is_animal: lexicon.is_animal(key),
        is_color,
        is_adjective: is_color,
    }
}

/// One analyzed row of the results table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboRecord {
    pub combo: String,
    pub count: u64,
    #[serde(rename = "is combo")]
    pub is_combo: bool,
    #[serde(rename = "is color combo")]
    pub is_color_combo: bool,
    #[serde(rename = "is animal")]
    pub is_animal: bool,
    #[serde(rename = "is color")]
    pub is_color: bool,
    #[serde(rename = "is adjective")]
    pub is_adjective: bool,
    pub adjective: Option<String>,
    pub animal: Option<String>,
    #[serde(rename = "adjective count")]
    pub adjective_count: Option<u64>,
    #[serde(rename = "animal count")]
    pub animal_count: Option<u64>,
    /// P(animal | adjective)
    #[serde(rename = "forward tp")]
    pub forward_tp: Option<f64>,
    /// P(adjective | animal)
    #[serde(rename = "backward tp")]
    pub backward_tp: Option<f64>,
    #[serde(rename = "canonical color")]
    pub canonical_color: Option<String>,
    #[serde(rename = "canonical color count")]
    pub canonical_color_count: Option<u64>,
    #[serde(rename = "most common non-canonical color")]
    pub most_common_non_canonical: Option<String>,
    #[serde(rename = "most common non-canonical color count")]
    pub most_common_non_canonical_count: Option<u64>,
}

impl ComboRecord {
    /// A record with its own fields filled in and every looked-up field empty
    fn classified(key: &str, count: u64, class: Classification) -> Self {
        let first = key.split(' ').next().map(|t| t.to_string());
        let last = key.split(' ').last().map(|t| t.to_string());
        ComboRecord {
            combo: key.to_string(),
            count,
            is_combo: class.is_combo,
            is_color_combo: class.is_color_combo,
            is_animal: class.is_animal,
            is_color: class.is_color,
            is_adjective: class.is_adjective,
            adjective: if class.is_animal { None } else { first },
            animal: if class.is_adjective { None } else { last },
            adjective_count: None,
            animal_count: None,
            forward_tp: None,
            backward_tp: None,
            canonical_color: None,
            canonical_color_count: None,
            most_common_non_canonical: None,
            most_common_non_canonical_count: None,
        }
    }
}

/// Fields that come from other records
struct Derived {
    adjective_count: Option<u64>,
    animal_count: Option<u64>,
    canonical_color: Option<String>,
    canonical_color_count: Option<u64>,
    most_common: Option<(String, u64)>,
}

/// Undefined when the denominator is missing or zero
fn ratio(count: u64, of: Option<u64>) -> Option<f64> {
    match of {
        Some(total) if total > 0 => Some(count as f64 / total as f64),
        _ => None,
    }
}

/// Classify, filter and fill in every relevant key of the table, in table order.
pub fn analyze(counts: &CountTable, lexicon: &Lexicon, canonical: &CanonicalColors)
    -> Vec<ComboRecord> {
    let started = Instant::now();
    let mut records = vec![];
    let mut discarded = 0;
    for (key, count) in counts.iter() {
        let class = classify(key, lexicon);
        if class.is_relevant() {
            records.push(ComboRecord::classified(key, count, class));
        } else {
            trace!("Discarding '{}'", key);
            discarded += 1;
        }
    }

    let derived: Vec<Derived> = {
        let mut index: FarmMap<&str, usize> = new_farm();
        // Color combos of each animal, in table order
        let mut by_animal: FarmMap<&str, Vec<usize>> = new_farm();
        for (i, record) in records.iter().enumerate() {
            index.entry(record.combo.as_str()).or_insert(i);
            if let (true, Some(animal)) = (record.is_color_combo, record.animal.as_ref()) {
                by_animal.entry(animal.as_str()).or_insert_with(Vec::new).push(i);
            }
        }
        let count_of = |key: &str| index.get(key).map(|&i| records[i].count);

        records.iter().map(|record| {
            let canonical_color = record.animal.as_ref().and_then(|a| canonical.combo_for(a));
            let most_common = record.animal.as_ref()
                .and_then(|a| by_animal.get(a.as_str()))
                .and_then(|members| {
                    // Strictly greater, so the first of several equal counts stays
                    let mut best: Option<usize> = None;
                    for &i in members {
                        if Some(&records[i].combo) == canonical_color.as_ref() {
                            continue;
                        }
                        if best.map_or(true, |b| records[i].count > records[b].count) {
                            best = Some(i);
                        }
                    }
                    best
                })
                .map(|i| (records[i].combo.clone(), records[i].count));
            Derived {
                adjective_count: record.adjective.as_ref().and_then(|a| count_of(a.as_str())),
                animal_count: record.animal.as_ref().and_then(|a| count_of(a.as_str())),
                canonical_color_count: canonical_color.as_ref().and_then(|c| count_of(c.as_str())),
                canonical_color,
                most_common,
            }
        }).collect()
    };

    for (record, d) in records.iter_mut().zip(derived) {
        record.forward_tp = ratio(record.count, d.adjective_count);
        record.backward_tp = ratio(record.count, d.animal_count);
        record.adjective_count = d.adjective_count;
        record.animal_count = d.animal_count;
        record.canonical_color = d.canonical_color;
        record.canonical_color_count = d.canonical_color_count;
        if let Some((combo, count)) = d.most_common {
            record.most_common_non_canonical = Some(combo);
            record.most_common_non_canonical_count = Some(count);
        }
    }
    info!("Analyzed {} entries ({} discarded as unrelated) in {:?}",
        records.len(), discarded, started.elapsed());
    records
}
