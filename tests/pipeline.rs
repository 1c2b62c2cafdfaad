extern crate chromafauna;
extern crate tempfile;

use std::fs::{self, File};
use std::io::Write;

use chromafauna::analysis::{self, CanonicalColors};
use chromafauna::errors::Error;
use chromafauna::lexicon::Lexicon;
use chromafauna::scanner::Scanner;
use chromafauna::tables;

const WORDS: &str = "animal\tcolor\nfox\tred\nowl\tgray\ngrizzly\tbrown\npolar_bear\twhite\n\tblack\n";
const CANONICAL: &str = "animal\tcanonical color\nfox\tred\nowl\tgray\ngrizzly\tbrown\npolar_bear\twhite\n";
const CORPUS: &str = "\
The red fox ran across the field.
a Grey owl sat on the branch
the fox is red and the fox is fast
grizzlies are brown
Two brown grizzlies and a black fox
A white polar_bear swam
the sky was grey
nothing to see in this category
";

fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    File::create(&path).unwrap().write_all(text.as_bytes()).unwrap();
    path
}

#[test]
fn count_then_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let words = write(&dir, "animals_colors.tsv", WORDS);
    let canonical = write(&dir, "canonical_colors.tsv", CANONICAL);
    let corpus = write(&dir, "sample.txt", CORPUS);
    let counts_path = dir.path().join("sample.counts.tsv");
    let results_path = dir.path().join("sample.results.tsv");

    let lexicon = Lexicon::from_path(&words).unwrap();
    let (counts, summary) = Scanner::new(&lexicon).scan_path(&corpus).unwrap();
    assert_eq!(summary.lines, 8);
    tables::write_counts_path(&counts_path, &counts).unwrap();

    // 4 animals x 5 colors, plus the words themselves
    let reloaded = tables::read_counts_path(&counts_path).unwrap();
    assert_eq!(reloaded.len(), 4 * 5 + 4 + 5);
    for (key, count) in counts.iter() {
        assert_eq!(reloaded.get(key), Some(count), "{} changed on the way through", key);
    }
    assert_eq!(reloaded.get("fox"), Some(3));
    assert_eq!(reloaded.get("red"), Some(2));
    assert_eq!(reloaded.get("red fox"), Some(2));
    assert_eq!(reloaded.get("gray"), Some(2));
    assert_eq!(reloaded.get("gray owl"), Some(1));
    assert_eq!(reloaded.get("brown grizzly"), Some(2));
    assert_eq!(reloaded.get("black fox"), Some(1));
    assert_eq!(reloaded.get("white polar_bear"), Some(1));
    assert_eq!(reloaded.get("gray fox"), Some(0));

    let canonical = CanonicalColors::from_path(&canonical).unwrap();
    let records = analysis::analyze(&reloaded, &lexicon, &canonical);
    tables::write_results_path(&results_path, &records).unwrap();
    let results = tables::read_results(File::open(&results_path).unwrap()).unwrap();
    assert_eq!(results.len(), reloaded.len());

    let fox = results.iter().find(|r| r.combo == "fox").unwrap();
    assert!(fox.is_animal && !fox.is_combo);
    assert_eq!(fox.canonical_color.as_ref().map(|s| s.as_str()), Some("red fox"));
    assert_eq!(fox.canonical_color_count, Some(2));
    assert_eq!(fox.most_common_non_canonical.as_ref().map(|s| s.as_str()), Some("black fox"));
    assert_eq!(fox.most_common_non_canonical_count, Some(1));

    let red_fox = results.iter().find(|r| r.combo == "red fox").unwrap();
    assert!((red_fox.forward_tp.unwrap() - 1.0).abs() < 1e-9);
    assert!((red_fox.backward_tp.unwrap() - 2.0 / 3.0).abs() < 1e-9);

    // the first line of the counts file is the biggest count
    let text = fs::read_to_string(&counts_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("combo\tcount"));
    assert_eq!(lines.next(), Some("fox\t3"));
}

#[test]
fn missing_corpus_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let words = write(&dir, "animals_colors.tsv", WORDS);
    let lexicon = Lexicon::from_path(&words).unwrap();
    match Scanner::new(&lexicon).scan_path(dir.path().join("absent.txt")) {
        Err(Error::MissingFile("corpus", _, _)) => {}
        Err(other) => panic!("wrong error: {}", other),
        Ok(_) => panic!("scanned a corpus that isn't there"),
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
