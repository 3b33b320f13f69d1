//! Output filenames for scraped pages, and collision-safe writes.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use url::Url;

const EXTENSION: &str = "txt";
const EMPTY_PATH_STEM: &str = "_index";
/// Longest stem kept, leaving room for a `-N.txt` suffix under the usual 255-byte name limit.
pub const MAX_STEM_LEN: usize = 200;

/// Derives a filename stem from a URL: host followed by the path with `/` → `_`.
///
/// `https://jobs.example.com/eng/rust-dev` → `jobs.example.com_eng_rust-dev`.
/// A bare host gets `_index`. Anything outside `[A-Za-z0-9._-]` becomes `_`, and the
/// result is cut to `MAX_STEM_LEN` characters.
pub fn filename_stem(url: &Url) -> String {
    let host = url.host_str().unwrap_or("unknown-host");
    let path = url.path();
    let path = if path.is_empty() || path == "/" {
        EMPTY_PATH_STEM.to_string()
    } else {
        path.replace('/', "_")
    };

    format!("{host}{path}")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STEM_LEN)
        .collect()
}

fn candidate_name(stem: &str, attempt: u32) -> String {
    if attempt <= 1 {
        format!("{stem}.{EXTENSION}")
    } else {
        format!("{stem}-{attempt}.{EXTENSION}")
    }
}

/// Writes `contents` under `dir` as `{stem}.txt`, or `{stem}-2.txt`, `{stem}-3.txt`, …
/// when the name is taken. Never replaces an existing file. Returns the name used.
pub fn write_unique(dir: &Path, stem: &str, contents: &str) -> io::Result<String> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;

    let mut attempt = 1;
    loop {
        let name = candidate_name(stem, attempt);
        match file.persist_noclobber(dir.join(&name)) {
            Ok(_) => return Ok(name),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                file = e.file;
                attempt += 1;
            }
            Err(e) => return Err(e.error),
        }
    }
}
