//! Disk collaborators: chat-export CSVs for candidates, text files for the
//! target. Bad files are logged and skipped; only a missing directory is an
//! error.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{AttrResult, AttributionError};
use crate::pipeline::{CandidateCorpus, TargetDocument};

const AUTHOR_COLUMN: &str = "AuthorID";
const CONTENT_COLUMN: &str = "Content";

/// Files directly inside `dir` with extension `ext`, sorted by name.
fn list_files(dir: &Path, ext: &str) -> AttrResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// UTF-8 when valid, Latin-1 otherwise. Latin-1 maps every byte to the code
/// point of the same value, so the fallback cannot fail.
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// (author, content) rows of one export, in file order.
fn read_export(path: &Path) -> AttrResult<Vec<(String, String)>> {
    let content = decode_text(fs::read(path)?);
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = rdr.headers()?.clone();
    let author_idx = headers.iter().position(|h| h.trim() == AUTHOR_COLUMN);
    let content_idx = headers.iter().position(|h| h.trim() == CONTENT_COLUMN);
    let (Some(author_idx), Some(content_idx)) = (author_idx, content_idx) else {
        return Err(AttributionError::MalformedExport(format!(
            "{}: missing '{AUTHOR_COLUMN}' or '{CONTENT_COLUMN}' column",
            path.display()
        )));
    };

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let author = record.get(author_idx).unwrap_or("").trim();
        let message = record.get(content_idx).unwrap_or("");
        if author.is_empty() || message.is_empty() {
            continue;
        }
        rows.push((author.to_string(), message.to_string()));
    }
    Ok(rows)
}

/// Integer ids sort numerically and before any other id; the rest sort
/// lexicographically.
fn compare_author_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i128>(), b.parse::<i128>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Group every `*.csv` export in `dir` by author.
///
/// Messages of one author are joined with single spaces in row order, and
/// the message count is the number of kept rows. Authors come out sorted by
/// id; that order is what ranking ties fall back on.
pub fn load_channel_exports<P: AsRef<Path>>(dir: P) -> AttrResult<CandidateCorpus> {
    let dir = dir.as_ref();
    let files = list_files(dir, "csv")?;
    if files.is_empty() {
        warn!(dir = %dir.display(), "no CSV files found");
        return Ok(CandidateCorpus::new());
    }
    info!(count = files.len(), "found CSV files to process");

    let mut rows = Vec::new();
    for file in &files {
        match read_export(file) {
            Ok(file_rows) => {
                debug!(file = %file.display(), rows = file_rows.len(), "read export");
                rows.extend(file_rows);
            }
            Err(e) => warn!(file = %file.display(), error = %e, "skipping export"),
        }
    }

    // stable: each author's messages stay in row order
    rows.sort_by(|(a, _), (b, _)| compare_author_ids(a, b));

    let mut corpus = CandidateCorpus::new();
    for (author, message) in &rows {
        corpus.push_message(author, message);
    }
    info!(authors = corpus.len(), messages = rows.len(), "grouped messages by author");
    Ok(corpus)
}

/// Concatenate every `*.txt` file in `dir` into one target document, each
/// file followed by a newline.
pub fn load_target_documents<P: AsRef<Path>>(dir: P) -> AttrResult<TargetDocument> {
    let dir = dir.as_ref();
    let files = list_files(dir, "txt")?;
    if files.is_empty() {
        warn!(dir = %dir.display(), "no target text files found");
    } else {
        info!(count = files.len(), "found target text file(s)");
    }

    let mut target = TargetDocument::default();
    for file in &files {
        match fs::read_to_string(file) {
            Ok(text) => target.push_part(&text),
            Err(e) => warn!(file = %file.display(), error = %e, "skipping target file"),
        }
    }
    Ok(target)
}
