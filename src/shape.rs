use ndarray::{s, Array3, ArrayView3};

use crate::record::{Dimensions, RawRecord};
use crate::{Error, Result};

// A zero-padded rows+2p x cols+2p x 1 image, intensities cast to f32 (0-255, not rescaled)
pub type ShapedTensor = Array3<f32>;

// Controls how raw records are laid out as tensors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeConfig {
    // Zero cells added on every side. 2 turns 28x28 into the 32x32 LeNet input.
    pub pad_width: usize,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        ShapeConfig { pad_width: 2 }
    }
}

impl ShapeConfig {
    pub fn with_pad_width(pad_width: usize) -> Self {
        ShapeConfig { pad_width }
    }

    // Output shape for a given source size, None if it can't be allocated
    pub fn tensor_shape(&self, dims: Dimensions) -> Option<(usize, usize, usize)> {
        let pad = self.pad_width.checked_mul(2)?;
        let rows = dims.rows.checked_add(pad)?;
        let cols = dims.cols.checked_add(pad)?;
        let cells = rows.checked_mul(cols)?;
        (cells <= isize::MAX as usize).then_some((rows, cols, 1))
    }

    // As tensor_shape, but as an error for callers about to shape a whole file
    pub fn check(&self, dims: Dimensions) -> Result<(usize, usize, usize)> {
        self.tensor_shape(dims).ok_or(Error::Padding {
            pad_width: self.pad_width,
            rows: dims.rows,
            cols: dims.cols,
        })
    }

    // Reshape a record row-major and surround it with pad_width zeros.
    // The record's dimensions must pass check(); the decoder verifies that once per file.
    pub fn shape(&self, record: &RawRecord) -> ShapedTensor {
        let dims = record.dims();
        let p = self.pad_width;
        let pad = 2 * p;
        let mut tensor = Array3::zeros((dims.rows + pad, dims.cols + pad, 1));
        // Slice iteration is in logical (row-major) order, same as the record bytes
        tensor
            .slice_mut(s![p..p + dims.rows, p..p + dims.cols, 0])
            .iter_mut()
            .zip(record.as_bytes())
            .for_each(|(cell, &byte)| *cell = f32::from(byte));
        tensor
    }

    // The inverse of shape: drop the border and cast back to bytes.
    // Cells outside 0-255 saturate. None if the tensor is narrower than the border.
    pub fn interior(&self, tensor: ArrayView3<f32>) -> Option<Vec<u8>> {
        let p = self.pad_width;
        let (rows, cols, depth) = tensor.dim();
        let inner_rows = rows.checked_sub(p)?;
        let inner_cols = cols.checked_sub(p)?;
        if depth == 0 || inner_rows < p || inner_cols < p {
            return None;
        }
        Some(
            tensor
                .slice(s![p..inner_rows, p..inner_cols, 0])
                .iter()
                .map(|&v| v as u8)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn random_record(rows: usize, cols: usize, rng: &mut SmallRng) -> RawRecord {
        let dims = Dimensions::new(rows, cols);
        RawRecord::new(dims, (0..dims.area()).map(|_| rng.gen()).collect()).unwrap()
    }

    fn border_is_zero(tensor: &ShapedTensor, p: usize) -> bool {
        let (rows, cols, _) = tensor.dim();
        tensor.indexed_iter().all(|((r, c, _), &v)| {
            let inside = r >= p && r < rows - p && c >= p && c < cols - p;
            inside || v == 0.0
        })
    }

    #[test]
    fn mnist_sized_record_becomes_32x32() {
        let mut rng = SmallRng::seed_from_u64(1);
        let record = random_record(28, 28, &mut rng);
        let config = ShapeConfig::default();
        let tensor = config.shape(&record);
        assert_eq!(tensor.dim(), (32, 32, 1));
        assert!(border_is_zero(&tensor, 2));
        assert_eq!(tensor[[2, 2, 0]], record.at(0, 0) as f32);
        assert_eq!(tensor[[29, 29, 0]], record.at(27, 27) as f32);
        // Row 0, column 5 of the record
        assert_eq!(tensor[[2, 7, 0]], record.at(5, 0) as f32);
    }

    #[test]
    fn values_are_not_rescaled() {
        let record = RawRecord::new(Dimensions::new(1, 3), vec![0, 128, 255]).unwrap();
        let tensor = ShapeConfig::default().shape(&record);
        let interior: Vec<f32> = tensor.slice(s![2, 2..5, 0]).to_vec();
        assert_eq!(interior, vec![0.0, 128.0, 255.0]);
    }

    #[test]
    fn interior_round_trips() {
        let mut rng = SmallRng::seed_from_u64(2);
        let config = ShapeConfig::default();
        let record = random_record(28, 28, &mut rng);
        let tensor = config.shape(&record);
        assert_eq!(config.interior(tensor.view()).unwrap(), record.as_bytes());
    }

    #[test]
    fn pad_width_is_configurable() {
        let mut rng = SmallRng::seed_from_u64(3);
        // Non-square so rows and cols can't be mixed up
        let record = random_record(5, 9, &mut rng);
        for pad in [0, 1, 4] {
            let config = ShapeConfig::with_pad_width(pad);
            let tensor = config.shape(&record);
            assert_eq!(tensor.dim(), (5 + 2 * pad, 9 + 2 * pad, 1));
            assert!(border_is_zero(&tensor, pad));
            assert_eq!(config.interior(tensor.view()).unwrap(), record.as_bytes());
        }
    }

    #[test]
    fn oversized_padding_is_reported() {
        let dims = Dimensions::new(28, 28);
        let config = ShapeConfig::with_pad_width(usize::MAX / 2);
        assert_eq!(config.tensor_shape(dims), None);
        assert!(matches!(config.check(dims), Err(Error::Padding { .. })));
        assert_eq!(ShapeConfig::default().check(dims).unwrap(), (32, 32, 1));
    }

    #[test]
    fn interior_of_too_small_tensor() {
        let tensor = Array3::<f32>::zeros((3, 8, 1));
        assert_eq!(ShapeConfig::with_pad_width(2).interior(tensor.view()), None);
        // Exactly the border, nothing inside
        let tensor = Array3::<f32>::zeros((4, 4, 1));
        assert_eq!(ShapeConfig::with_pad_width(2).interior(tensor.view()), Some(vec![]));
    }
}
