use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;

use crate::record::Dimensions;
use crate::{Error, Result};

pub const IMAGE_MAGIC: u32 = 0x0000_0803;
pub const LABEL_MAGIC: u32 = 0x0000_0801;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    pub item_count: usize,
    pub dims: Dimensions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelHeader {
    pub item_count: usize,
}

fn read_u32<R: Read>(reader: &mut R, field: &str) -> Result<u32> {
    reader
        .read_u32::<BigEndian>()
        .map_err(|e| Error::from_read(e, || format!("header field {field}")))
}

fn check_magic_number<R: Read>(reader: &mut R, expected: u32) -> Result<()> {
    let found = read_u32(reader, "magic")?;
    if found != expected {
        return Err(Error::Format { expected, found });
    }
    Ok(())
}

// Reads magic, item count, rows and cols. Leaves the reader at the first record.
pub fn read_image_header<R: Read>(reader: &mut R) -> Result<ImageHeader> {
    check_magic_number(reader, IMAGE_MAGIC)?;
    let item_count = read_u32(reader, "item count")?;
    let rows = read_u32(reader, "rows")?;
    let cols = read_u32(reader, "cols")?;
    // A record must fit in one allocation
    let area = (rows as usize).checked_mul(cols as usize);
    if rows == 0 || cols == 0 || area.map_or(true, |a| a > isize::MAX as usize) {
        return Err(Error::InvalidDimensions { rows, cols });
    }
    debug!("image header: {item_count} items of {rows}x{cols}");
    Ok(ImageHeader {
        item_count: item_count as usize,
        dims: Dimensions::new(rows as usize, cols as usize),
    })
}

// Reads magic and item count. Leaves the reader at the first label.
pub fn read_label_header<R: Read>(reader: &mut R) -> Result<LabelHeader> {
    check_magic_number(reader, LABEL_MAGIC)?;
    let item_count = read_u32(reader, "item count")?;
    debug!("label header: {item_count} items");
    Ok(LabelHeader {
        item_count: item_count as usize,
    })
}
