use std::io::Read;

use log::debug;

use super::header::read_label_header;
use crate::record::Label;
use crate::{Error, Result};

// Parse a label file from a reader positioned at offset 0.
// Label bytes are returned verbatim, values outside 0-9 included.
pub fn read_labels<R: Read>(reader: &mut R) -> Result<Vec<Label>> {
    let header = read_label_header(reader)?;
    let mut labels = Vec::new();
    let read = reader
        .by_ref()
        .take(header.item_count as u64)
        .read_to_end(&mut labels)?;
    if read != header.item_count {
        return Err(Error::Truncated {
            what: format!("label {read} of {}", header.item_count),
        });
    }
    debug!("read {} labels", labels.len());
    Ok(labels)
}
