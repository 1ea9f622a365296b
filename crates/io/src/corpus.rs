//! Corpus loading.
//!
//! Collects training text from a directory of `.txt` files into the single
//! string the trainer consumes.

use pairwise_core::{PairwiseError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension of files picked up from a data directory.
pub const CORPUS_EXTENSION: &str = "txt";

/// Corpus loader - reads training text from disk.
pub struct CorpusLoader;

impl CorpusLoader {
    /// Read every `.txt` file in `dir`, in file name order, joined by
    /// newlines so words never run together across files.
    ///
    /// Files that are not valid UTF-8 are skipped with a warning.
    pub fn load_dir(dir: &Path) -> Result<String> {
        let mut corpus = String::new();
        for path in Self::corpus_files(dir)? {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    debug!(path = %path.display(), bytes = text.len(), "Read corpus file");
                    if !corpus.is_empty() {
                        corpus.push('\n');
                    }
                    corpus.push_str(&text);
                }
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    warn!(path = %path.display(), "Skipping file that is not valid UTF-8");
                }
                Err(e) => return Err(PairwiseError::io(path, e)),
            }
        }
        Ok(corpus)
    }

    /// Read a single corpus file.
    pub fn load_file(path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| PairwiseError::io(path, e))
    }

    /// The `.txt` files of a directory, sorted by file name.
    pub fn corpus_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| PairwiseError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| PairwiseError::io(dir, e))?.path();
            let is_corpus = path.is_file()
                && path
                    .extension()
                    .map_or(false, |ext| ext == CORPUS_EXTENSION);
            if is_corpus {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
