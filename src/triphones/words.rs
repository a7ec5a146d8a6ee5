use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::triphones::{Result, TriphoneError};

/// Loads a word list, one identifier per line, keeping first-seen order.
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path).map_err(|err| TriphoneError::io(path, err))?;
    let words = parse_word_list(&data);
    if words.is_empty() {
        return Err(TriphoneError::config(format!(
            "word list {} contains no words",
            path.display()
        )));
    }
    info!(source = %path.display(), words = words.len(), "loaded word list");
    Ok(words)
}

pub fn parse_word_list(data: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for word in data.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if seen.insert(word) {
            words.push(word.to_string());
        } else {
            warn!(word, "duplicate word in word list ignored");
        }
    }
    words
}
