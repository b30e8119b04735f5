use std::io;
use std::path::PathBuf;

// Every way a decode can fail. A decode either returns the full declared
// sequence or one of these, never a partial result.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot open {path}: {source}")]
    Resource { path: PathBuf, source: io::Error },

    #[error("incorrect magic number {found:#010x} != {expected:#010x}")]
    Format { expected: u32, found: u32 },

    #[error("invalid image dimensions {rows}x{cols}")]
    InvalidDimensions { rows: u32, cols: u32 },

    #[error("pad width {pad_width} is too large for {rows}x{cols} images")]
    Padding {
        pad_width: usize,
        rows: usize,
        cols: usize,
    },

    #[error("record {index} out of range, file has {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("input truncated while reading {what}")]
    Truncated { what: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl Error {
    // A short read surfaces as UnexpectedEof from read_exact / byteorder.
    // Turn that into a truncation error and let everything else through.
    pub(crate) fn from_read(err: io::Error, what: impl FnOnce() -> String) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated { what: what() }
        } else {
            Error::Io(err)
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. } | Error::InvalidDimensions { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_becomes_truncated() {
        let err = Error::from_read(io::ErrorKind::UnexpectedEof.into(), || "magic".to_string());
        assert!(err.is_truncated());
        assert_eq!(err.to_string(), "input truncated while reading magic");
    }

    #[test]
    fn other_io_errors_pass_through() {
        let err = Error::from_read(io::ErrorKind::PermissionDenied.into(), || unreachable!());
        assert!(matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn format_message_shows_both_magics() {
        let err = Error::Format {
            expected: 0x803,
            found: 0x801,
        };
        assert_eq!(
            err.to_string(),
            "incorrect magic number 0x00000801 != 0x00000803"
        );
    }
}
