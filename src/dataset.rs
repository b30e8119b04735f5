use std::path::Path;

use log::info;

use crate::idx;
use crate::record::{Dimensions, Label, RawRecord};
use crate::shape::{ShapeConfig, ShapedTensor};
use crate::stream::{FileStreamProvider, StreamProvider};
use crate::Result;

// A decoded image file: the per-file dimensions and one tensor per record, in file order
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSet {
    pub dims: Dimensions,
    pub tensors: Vec<ShapedTensor>,
}

impl ImageSet {
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }
}

// Ties a stream provider to the shaping configuration.
// Every decode is a fresh one-shot pass: open, parse, read all records, drop the stream.
#[derive(Clone, Debug, Default)]
pub struct Decoder<P = FileStreamProvider> {
    provider: P,
    shape: ShapeConfig,
}

impl<P: StreamProvider> Decoder<P> {
    pub fn new(provider: P) -> Self {
        Decoder {
            provider,
            shape: ShapeConfig::default(),
        }
    }

    pub fn with_shape(mut self, shape: ShapeConfig) -> Self {
        self.shape = shape;
        self
    }

    pub fn shape_config(&self) -> ShapeConfig {
        self.shape
    }

    // Raw records without tensor shaping, for pixel access or export
    pub fn decode_raw_images(&self, name: &Path) -> Result<(Dimensions, Vec<RawRecord>)> {
        let mut stream = self.provider.open(name)?;
        let (dims, records) = idx::read_images(&mut stream)?;
        info!(
            "decoded {} images ({}x{}) from {}",
            records.len(),
            dims.rows,
            dims.cols,
            name.display()
        );
        Ok((dims, records))
    }

    pub fn decode_images(&self, name: &Path) -> Result<ImageSet> {
        let (dims, records) = self.decode_raw_images(name)?;
        self.shape.check(dims)?;
        let tensors = records.iter().map(|r| self.shape.shape(r)).collect();
        Ok(ImageSet { dims, tensors })
    }

    // Labels are returned as stored. Nothing checks they fall in 0-9;
    // callers relying on that range must validate themselves.
    pub fn decode_labels(&self, name: &Path) -> Result<Vec<Label>> {
        let mut stream = self.provider.open(name)?;
        let labels = idx::read_labels(&mut stream)?;
        info!("decoded {} labels from {}", labels.len(), name.display());
        Ok(labels)
    }
}

// Decode an image file from disk (plain or gzip) with the default 2-cell padding
pub fn decode_images<T: AsRef<Path>>(name: T) -> Result<ImageSet> {
    Decoder::new(FileStreamProvider).decode_images(name.as_ref())
}

pub fn decode_raw_images<T: AsRef<Path>>(name: T) -> Result<(Dimensions, Vec<RawRecord>)> {
    Decoder::new(FileStreamProvider).decode_raw_images(name.as_ref())
}

// Decode a label file from disk. Values are not range-checked.
pub fn decode_labels<T: AsRef<Path>>(name: T) -> Result<Vec<Label>> {
    Decoder::new(FileStreamProvider).decode_labels(name.as_ref())
}
