use crate::graymap::GrayImage;

/// Summed-area table: `sum(r, c)` holds the sum of all dots in rows `0..=r`
/// and columns `0..=c`.
pub struct IntegralImage {
    width: usize,
    height: usize,
    sums: Vec<u64>,
}

impl IntegralImage {
    pub fn new(image: &GrayImage) -> Self {
        let width = image.width();
        let height = image.height();
        let mut sums = vec![0_u64; width * height];
        for row_index in 0..height {
            let mut row_sum = 0_u64;
            for (column_index, &dot) in image.row(row_index).iter().enumerate() {
                row_sum += u64::from(dot);
                let index = row_index * width + column_index;
                let above = if row_index > 0 { sums[index - width] } else { 0 };
                sums[index] = row_sum + above;
            }
        }
        Self {
            width,
            height,
            sums,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn sum(&self, row_index: usize, column_index: usize) -> u64 {
        self.sums[row_index * self.width + column_index]
    }

    /// Sum of the inclusive window `[top..=bottom] x [left..=right]`.
    /// Bounds must lie inside the image with `top <= bottom` and `left <= right`.
    pub fn window_sum(&self, top: usize, left: usize, bottom: usize, right: usize) -> u64 {
        let a = self.sum(bottom, right);
        let b = if top > 0 { self.sum(top - 1, right) } else { 0 };
        let c = if left > 0 { self.sum(bottom, left - 1) } else { 0 };
        let d = if top > 0 && left > 0 {
            self.sum(top - 1, left - 1)
        } else {
            0
        };
        a + d - b - c
    }
}
