pub mod dataset;
pub mod export;
pub mod idx;
pub mod record;
pub mod shape;
pub mod stream;

mod error;
pub use error::{Error, Result};

pub use dataset::{decode_images, decode_labels, decode_raw_images, Decoder, ImageSet};
pub use record::{Dimensions, Label, RawRecord};
pub use shape::{ShapeConfig, ShapedTensor};
