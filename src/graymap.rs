use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::error::Error;

pub mod reader;
pub mod writer;

pub use reader::PGMImageReader;
pub use writer::PGMImageWriter;

/// Owned 8-bit single channel image in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    dots: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize, dots: Vec<u8>) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageDimensions(width, height));
        }
        let number_of_dots = width
            .checked_mul(height)
            .ok_or(Error::InvalidImageDimensions(width, height))?;
        if dots.len() != number_of_dots {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dots(&self) -> &[u8] {
        &self.dots
    }

    pub fn dot(&self, column_index: usize, row_index: usize) -> u8 {
        self.dots[row_index * self.width + column_index]
    }

    pub fn row(&self, row_index: usize) -> &[u8] {
        let start = row_index * self.width;
        &self.dots[start..start + self.width]
    }
}

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<GrayImage>;
}

pub trait ImageWriter {
    fn write_image(&mut self, image: &GrayImage) -> crate::Result<()>;
}

pub(crate) fn open_input_file(file_path: &Path) -> crate::Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

pub(crate) fn open_output_file(file_path: &Path) -> crate::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

pub fn read_pgm_file(file_path: &Path) -> crate::Result<GrayImage> {
    let input_file = open_input_file(file_path)?;
    let mut reader = PGMImageReader::new(BufReader::new(input_file));
    reader.read_image()
}

pub fn write_pgm_file(file_path: &Path, image: &GrayImage) -> crate::Result<()> {
    let output_file = open_output_file(file_path)?;
    let mut writer = PGMImageWriter::new(BufWriter::new(output_file));
    writer.write_image(image)
}
