use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use log::debug;

use crate::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

// Turns a resource name into a readable, already decompressed byte stream.
// Dropping the returned stream releases the resource.
pub trait StreamProvider {
    fn open(&self, name: &Path) -> Result<Box<dyn Read>>;
}

// Opens files from disk, gunzipping them when they start with the gzip magic bytes
#[derive(Clone, Copy, Debug, Default)]
pub struct FileStreamProvider;

impl StreamProvider for FileStreamProvider {
    fn open(&self, name: &Path) -> Result<Box<dyn Read>> {
        let resource_error = |source: io::Error| Error::Resource {
            path: name.to_path_buf(),
            source,
        };
        let file = File::open(name).map_err(resource_error)?;
        let mut reader = BufReader::new(file);
        // Peek without consuming; the buffer is handed on as is
        let compressed = reader.fill_buf().map_err(resource_error)?.starts_with(&GZIP_MAGIC);
        debug!("opened {} (gzip: {compressed})", name.display());
        if compressed {
            let decoder = GzDecoder::new(reader);
            // A broken gzip header means the stream can't be established
            if decoder.header().is_none() {
                return Err(resource_error(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "invalid gzip header",
                )));
            }
            Ok(Box::new(decoder))
        } else {
            Ok(Box::new(reader))
        }
    }
}
