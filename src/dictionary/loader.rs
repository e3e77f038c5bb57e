use super::{clean_word, Dictionary};
use crate::error::{CfResult, CipherForgeError};
use std::fs::File;
use std::io::Read;
use tracing::{debug, warn};

/// Loads a word list where each line holds one or more words separated by
/// `delimiter`.
pub fn load_from_file(path: &str, delimiter: u8) -> CfResult<Dictionary> {
    debug!("Loading dictionary from: {}", path);
    let file = File::open(path).map_err(|e| {
        CipherForgeError::Config(format!("Could not open dictionary at '{}': {}", path, e))
    })?;
    let dict = from_reader(file, delimiter)?;
    if dict.is_empty() {
        return Err(CipherForgeError::Validation(format!(
            "dictionary '{}' contains no words",
            path
        )));
    }
    Ok(dict)
}

pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> CfResult<Dictionary> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut dict = Dictionary::new();
    let mut skipped = 0;
    let mut row_idx = 0;

    for result in rdr.records() {
        row_idx += 1;
        match result {
            Ok(rec) => {
                for field in rec.iter() {
                    if clean_word(field).is_empty() {
                        if !field.trim().is_empty() {
                            skipped += 1;
                        }
                        continue;
                    }
                    dict.add_word(field);
                }
            }
            Err(e) => {
                warn!("[Row {}] Dictionary parse error: {}", row_idx, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} dictionary entries without letters.", skipped);
    }
    debug!(words = dict.len(), rows = row_idx, "Dictionary loaded");
    Ok(dict)
}
