//! Tab separated tables: reading, writing, and naming output files
//!
//! Columns are always looked up by header name, so files with extra columns
//! (like an unnamed leading index column) load unchanged.
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use csv;
use errors::*;
use scanner::CountTable;
use analysis::ComboRecord;

/// A csv reader configured for our tables
pub fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader)
}

/// A csv writer configured for our tables
pub fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer)
}

/// Where a named column lives in the header row
pub fn column_index(headers: &csv::StringRecord, table: &'static str, column: &'static str)
    -> Result<usize> {
    headers.iter()
        .position(|h| h.trim() == column)
        .ok_or(Error::MissingColumn(table, column))
}

/// A trimmed, non-empty cell (short rows just have nothing there)
pub fn cell(row: &csv::StringRecord, idx: usize) -> Option<String> {
    row.get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Open a named input, turning failure into a MissingFile error
pub fn open_input<P: AsRef<Path>>(what: &'static str, path: P) -> Result<File> {
    File::open(path.as_ref())
        .map_err(|e| Error::MissingFile(what, path.as_ref().to_path_buf(), Some(e)))
}

//
// Counts table
//

/// Read `combo` and `count` columns. A repeated key keeps its largest count.
///
/// A blank count is an error, not a zero: zero means the key was looked for.
pub fn read_counts<R: Read>(reader: R) -> Result<CountTable> {
    let mut rdr = tsv_reader(reader);
    let headers = rdr.headers()?.clone();
    let combo_col = column_index(&headers, "counts table", "combo")?;
    let count_col = column_index(&headers, "counts table", "count")?;
    let mut table = CountTable::new();
    for row in rdr.records() {
        let row = row?;
        let key = match row.get(combo_col) {
            Some(k) if !k.is_empty() => k,
            _ => continue,
        };
        let count: u64 = match cell(&row, count_col) {
            Some(c) => c.parse()?,
            None => return Err(Error::MissingValue("counts table", "count", key.to_string())),
        };
        if table.get(key).is_some() {
            warn!("Counts table repeats '{}', keeping the larger count", key);
        }
        table.insert_max(key, count);
    }
    Ok(table)
}

pub fn read_counts_path<P: AsRef<Path>>(path: P) -> Result<CountTable> {
    let table = read_counts(open_input("counts table", path.as_ref())?)?;
    info!("Loaded {} counts from {}", table.len(), path.as_ref().display());
    Ok(table)
}

/// Write the counts, largest first
pub fn write_counts<W: Write>(writer: W, table: &CountTable) -> Result<()> {
    let mut wtr = tsv_writer(writer);
    wtr.write_record(&["combo", "count"])?;
    for (key, count) in table.sorted_desc() {
        wtr.write_record(&[key, count.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_counts_path<P: AsRef<Path>>(path: P, table: &CountTable) -> Result<()> {
    write_counts(File::create(path.as_ref())?, table)?;
    info!("Wrote {} counts to {}", table.len(), path.as_ref().display());
    Ok(())
}

//
// Results table
//

pub fn write_results<W: Write>(writer: W, records: &[ComboRecord]) -> Result<()> {
    let mut wtr = tsv_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_results_path<P: AsRef<Path>>(path: P, records: &[ComboRecord]) -> Result<()> {
    write_results(File::create(path.as_ref())?, records)?;
    info!("Wrote {} results to {}", records.len(), path.as_ref().display());
    Ok(())
}

pub fn read_results<R: Read>(reader: R) -> Result<Vec<ComboRecord>> {
    let mut rdr = tsv_reader(reader);
    let mut records = vec![];
    for record in rdr.deserialize::<ComboRecord>() {
        records.push(record?);
    }
    Ok(records)
}

//
// Output names
//

/// corpora/wiki.txt -> wiki.counts.tsv, in the working directory
pub fn counts_path_for(corpus: &str) -> PathBuf {
    if corpus == "-" {
        return PathBuf::from("stdin.counts.tsv");
    }
    let name = Path::new(corpus).file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| corpus.to_string());
    if name.contains(".txt") {
        PathBuf::from(name.replace(".txt", ".counts.tsv"))
    } else {
        PathBuf::from(format!("{}.counts.tsv", name))
    }
}

/// wiki.counts.tsv -> wiki.results.tsv, next to the counts
pub fn results_path_for(counts: &str) -> PathBuf {
    if counts.contains(".counts.tsv") {
        PathBuf::from(counts.replace(".counts.tsv", ".results.tsv"))
    } else {
        PathBuf::from(format!("{}.results.tsv", counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_survive_a_round_trip() {
        let mut table = CountTable::new();
        table.insert_max("red fox", 12);
        table.insert_max("fox", 20);
        table.insert_max("red", 10);
        table.insert_max("gray fox", 0);
        let mut buf: Vec<u8> = vec![];
        write_counts(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert_eq!(text, "combo\tcount\nfox\t20\nred fox\t12\nred\t10\ngray fox\t0\n");
        let back = read_counts(&buf[..]).unwrap();
        assert_eq!(back.len(), 4);
        for (key, count) in table.iter() {
            assert_eq!(back.get(key), Some(count));
        }
    }

    #[test]
    fn counts_with_an_index_column_load() {
        let text = "\tcombo\tcount\n0\tfox\t7\n1\tred fox\t3\n";
        let table = read_counts(text.as_bytes()).unwrap();
        assert_eq!(table.get("fox"), Some(7));
        assert_eq!(table.get("red fox"), Some(3));
    }

    #[test]
    fn repeated_keys_keep_the_maximum() {
        let text = "combo\tcount\nred fox\t3\nred fox\t9\nred fox\t4\n";
        let table = read_counts(text.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("red fox"), Some(9));
    }

    #[test]
    fn bad_counts_are_errors() {
        match read_counts("combo\tcount\nfox\tmany\n".as_bytes()) {
            Err(Error::ParseIntError(_)) => {}
            other => panic!("expected a parse error, got {:?}", other.map(|t| t.len())),
        }
        match read_counts("combo\tcount\nfox\t\nowl\t2\n".as_bytes()) {
            Err(Error::MissingValue("counts table", "count", ref key)) if key == "fox" => {}
            other => panic!("expected a missing count, got {:?}", other.map(|t| t.len())),
        }
        match read_counts("combo\tcount\nred fox\n".as_bytes()) {
            Err(Error::MissingValue("counts table", "count", _)) => {}
            other => panic!("expected a missing count, got {:?}", other.map(|t| t.len())),
        }
        match read_counts("word\tcount\nfox\t1\n".as_bytes()) {
            Err(Error::MissingColumn("counts table", "combo")) => {}
            other => panic!("expected a missing column, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn output_names_follow_the_input() {
        assert_eq!(counts_path_for("corpora/wiki.txt"), PathBuf::from("wiki.counts.tsv"));
        assert_eq!(counts_path_for("wiki"), PathBuf::from("wiki.counts.tsv"));
        assert_eq!(counts_path_for("/data/corpora/news.txt"), PathBuf::from("news.counts.tsv"));
        assert_eq!(counts_path_for(&Path::new("corpora").join("books.txt").to_string_lossy()),
            PathBuf::from("books.counts.tsv"));
        assert_eq!(counts_path_for("-"), PathBuf::from("stdin.counts.tsv"));
        assert_eq!(results_path_for("out/wiki.counts.tsv"), PathBuf::from("out/wiki.results.tsv"));
        assert_eq!(results_path_for("wiki.tsv"), PathBuf::from("wiki.tsv.results.tsv"));
    }
}
