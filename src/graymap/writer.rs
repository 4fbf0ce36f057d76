use std::io::Write;

use super::{GrayImage, ImageWriter};
use crate::Error;

const MAX_VALUE: u8 = 255;

/// Writes binary (P5) graymaps.
pub struct PGMImageWriter<T: Write> {
    writer: T,
}

impl<T: Write> PGMImageWriter<T> {
    pub fn new(writer: T) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, image: &GrayImage) -> std::io::Result<()> {
        write!(
            self.writer,
            "P5\n{} {}\n{}\n",
            image.width(),
            image.height(),
            MAX_VALUE
        )
    }
}

impl<T: Write> ImageWriter for PGMImageWriter<T> {
    fn write_image(&mut self, image: &GrayImage) -> crate::Result<()> {
        self.write_header(image)
            .and_then(|_| self.writer.write_all(image.dots()))
            .and_then(|_| self.writer.flush())
            .map_err(Error::FailedToWriteImageData)
    }
}
