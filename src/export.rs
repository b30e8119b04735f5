use std::io::Write;

use log::debug;

use crate::record::{Label, RawRecord};
use crate::Result;

// Write image/label pairs as CSV.
// The layout is:
// - No headers
// - One image per row
// - Each row starts with the label
// - The rest of the row is the rows*cols pixel values, row-major, 0-255
// Records and labels are paired by index; the shorter side ends the output.
pub fn write_csv<W: Write>(
    writer: W,
    records: &[RawRecord],
    labels: &[Label],
    limit: Option<usize>,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut written = 0;
    for (record, label) in records
        .iter()
        .zip(labels)
        .take(limit.unwrap_or(usize::MAX))
    {
        writer.write_record(
            std::iter::once(label.to_string())
                .chain(record.as_bytes().iter().map(|p| p.to_string())),
        )?;
        written += 1;
    }
    writer.flush()?;
    debug!("wrote {written} csv rows");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Dimensions;

    fn records() -> Vec<RawRecord> {
        let dims = Dimensions::new(2, 2);
        vec![
            RawRecord::new(dims, vec![0, 255, 3, 4]).unwrap(),
            RawRecord::new(dims, vec![9, 8, 7, 6]).unwrap(),
            RawRecord::new(dims, vec![1, 1, 1, 1]).unwrap(),
        ]
    }

    #[test]
    fn one_row_per_pair() {
        let mut out = Vec::new();
        let n = write_csv(&mut out, &records(), &[5, 0, 4], None).unwrap();
        assert_eq!(n, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "5,0,255,3,4\n0,9,8,7,6\n4,1,1,1,1\n"
        );
    }

    #[test]
    fn limit_and_short_labels() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&mut out, &records(), &[5, 0], None).unwrap(), 2);

        let mut out = Vec::new();
        assert_eq!(write_csv(&mut out, &records(), &[5, 0, 4], Some(1)).unwrap(), 1);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(out.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1 + 4);
    }
}
