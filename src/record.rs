use image::{GrayImage, Luma};

// Labels are raw bytes, nominally 0-9. Nothing here checks that range.
pub type Label = u8;

// Per-axis size of every image in one file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Dimensions { rows, cols }
    }

    // Number of bytes in one record
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }
}

// One image's pixel intensities, row-major.
// 255 is foreground (black), 0 is background (white).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    dims: Dimensions,
    pixels: Vec<u8>,
}

impl RawRecord {
    // Returns None unless the buffer holds exactly rows * cols bytes
    pub fn new(dims: Dimensions, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == dims.area()).then_some(RawRecord { dims, pixels })
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    // (width, height) of the surface
    pub fn bounds(&self) -> (usize, usize) {
        (self.dims.cols, self.dims.rows)
    }

    // Intensity at column x, row y. The caller keeps x < cols and y < rows.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.dims.cols + x]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Luma<u8> {
        Luma([self.at(x, y)])
    }

    // Copy into an image buffer, e.g. to save as PNG
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.dims.cols as u32, self.dims.rows as u32, |x, y| {
            self.pixel(x as usize, y as usize)
        })
    }
}
