use std::{ops::Range, sync::Arc};

use crate::{graymap::GrayImage, integral::IntegralImage, Error};

pub mod parallel;

pub use parallel::{threshold_parallel, ParallelLayout};

const FOREGROUND: u8 = 255;
const BACKGROUND: u8 = 0;

/// Parameters of adaptive mean thresholding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdParams {
    window_size: u32,
    offset: i32,
}

impl ThresholdParams {
    /// `window_size` must be odd and greater than 1. `offset` is subtracted
    /// from the local mean before comparison.
    pub fn new(window_size: u32, offset: i32) -> crate::Result<Self> {
        if window_size <= 1 || window_size % 2 == 0 {
            return Err(Error::InvalidWindowSize(window_size));
        }
        Ok(Self {
            window_size,
            offset,
        })
    }

    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    fn radius(&self) -> usize {
        (self.window_size / 2) as usize
    }
}

/// An image together with its integral image, shareable between workers.
pub struct ThresholdSource {
    image: Arc<GrayImage>,
    integral: Arc<IntegralImage>,
}

impl ThresholdSource {
    pub fn new(image: GrayImage) -> Self {
        let integral = IntegralImage::new(&image);
        Self {
            image: Arc::new(image),
            integral: Arc::new(integral),
        }
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }
}

/// Thresholds the given rows, returning them in row-major order.
fn threshold_rows(
    image: &GrayImage,
    integral: &IntegralImage,
    params: &ThresholdParams,
    rows: Range<usize>,
) -> Vec<u8> {
    let width = image.width();
    let last_row_index = image.height() - 1;
    let last_column_index = width - 1;
    let radius = params.radius();
    let offset = f64::from(params.offset);
    let mut dots = Vec::with_capacity(rows.len() * width);

    for row_index in rows {
        let top = row_index.saturating_sub(radius);
        let bottom = (row_index + radius).min(last_row_index);
        for (column_index, &dot) in image.row(row_index).iter().enumerate() {
            let left = column_index.saturating_sub(radius);
            let right = (column_index + radius).min(last_column_index);
            let area = (bottom - top + 1) * (right - left + 1);
            let sum = integral.window_sum(top, left, bottom, right);
            let mean = sum as f64 / area as f64;
            let value = if f64::from(dot) > mean - offset {
                FOREGROUND
            } else {
                BACKGROUND
            };
            dots.push(value);
        }
    }
    dots
}

pub fn threshold_serial(
    source: &ThresholdSource,
    params: &ThresholdParams,
) -> crate::Result<GrayImage> {
    let image = source.image();
    let dots = threshold_rows(image, &source.integral, params, 0..image.height());
    GrayImage::new(image.width(), image.height(), dots)
}
