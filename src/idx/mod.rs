// Decoding of the IDX binary layout: a big-endian header followed by flat records

mod header;
pub use header::{read_image_header, read_label_header, ImageHeader, LabelHeader};
pub use header::{IMAGE_MAGIC, LABEL_MAGIC};

mod images;
pub use images::read_images;

mod labels;
pub use labels::read_labels;
