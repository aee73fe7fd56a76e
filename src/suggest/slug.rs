//! Content-slug suggester.
//!
//! Reads the head of the file and builds a slug from the first few
//! alphanumeric words. PDFs get a best-effort ASCII scrape of their leading
//! bytes instead of a lossy UTF-8 decode; that is enough to pick up title and
//! heading text without pulling in a PDF parser.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::errors::RenamerError;

use super::Suggester;

/// Stem used when a file yields no usable words at all.
pub const FALLBACK_STEM: &str = "file";

const PDF_SCRAPE_BYTES: usize = 4096;

#[derive(Debug, Clone)]
pub struct SlugSuggester {
    max_words: usize,
    max_read_bytes: usize,
}

impl SlugSuggester {
    pub fn new(max_words: usize, max_read_bytes: usize) -> Self {
        Self {
            max_words,
            max_read_bytes,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.slug_max_words, cfg.max_read_bytes)
    }

    fn read_head(&self, file: &Path) -> Result<String, RenamerError> {
        let is_pdf = file
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        let budget = if is_pdf {
            PDF_SCRAPE_BYTES
        } else {
            self.max_read_bytes
        };

        let mut handle = File::open(file).map_err(|e| map_open_error(file, e))?;
        let mut buf = vec![0u8; budget];
        let mut filled = 0usize;
        // Loop: a single read may return short on pipes/network filesystems.
        while filled < buf.len() {
            match handle.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(map_open_error(file, e)),
            }
        }
        buf.truncate(filled);

        if is_pdf {
            Ok(ascii_scrape(&buf))
        } else {
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
    }
}

impl Suggester for SlugSuggester {
    fn suggest(&self, file: &Path) -> Result<String, RenamerError> {
        let text = self.read_head(file)?;
        let slug = slugify(&text, self.max_words);
        debug!(file = %file.display(), slug = %slug, "content slug built");
        Ok(slug)
    }
}

fn map_open_error(file: &Path, e: std::io::Error) -> RenamerError {
    match e.kind() {
        std::io::ErrorKind::NotFound => RenamerError::SourceNotFound(file.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => RenamerError::PermissionDenied {
            path: file.to_path_buf(),
            context: e.to_string(),
        },
        _ => RenamerError::NotAFile(file.to_path_buf()),
    }
}

/// Keep printable ASCII, drop the rest. PDF streams are mostly binary; the
/// readable runs are what we slug.
fn ascii_scrape(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' || b == b'\n' {
                b as char
            } else {
                ' '
            }
        })
        .collect()
}

/// First `max_words` lowercase alphanumeric runs joined with '-'.
/// Empty input slugs to FALLBACK_STEM so a candidate always exists.
pub fn slugify(text: &str, max_words: usize) -> String {
    let mut words = Vec::with_capacity(max_words);
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
            if words.len() == max_words {
                break;
            }
        }
    }
    if !current.is_empty() && words.len() < max_words {
        words.push(current);
    }

    if words.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        words.join("-")
    }
}
