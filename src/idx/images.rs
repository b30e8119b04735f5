use std::io::Read;

use log::debug;

use super::header::read_image_header;
use crate::record::{Dimensions, RawRecord};
use crate::{Error, Result};

// Upper bound on records reserved up front, so a corrupt count can't force a huge allocation
const MAX_PREALLOCATED_RECORDS: usize = 1 << 16;

// Parse an image file from a reader positioned at offset 0.
// Returns exactly as many records as the header declares, or an error.
pub fn read_images<R: Read>(reader: &mut R) -> Result<(Dimensions, Vec<RawRecord>)> {
    let header = read_image_header(reader)?;
    let dims = header.dims;

    let mut records = Vec::with_capacity(header.item_count.min(MAX_PREALLOCATED_RECORDS));
    let area = dims.area();
    for index in 0..header.item_count {
        // Grow with the data actually present rather than trusting the header's size
        let mut pixels = Vec::new();
        reader.by_ref().take(area as u64).read_to_end(&mut pixels)?;
        let record = RawRecord::new(dims, pixels).ok_or_else(|| Error::Truncated {
            what: format!("image record {index}"),
        })?;
        records.push(record);
    }
    debug!("read {} image records", records.len());
    Ok((dims, records))
}
