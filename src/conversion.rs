//! Grayscale conversions between decodable images, JPEG and binary graymaps.
//!
//! Decoding and encoding is done by the `image` crate; this module only
//! forces the luma representation and picks the output container.
use std::{
    io::{self, BufWriter, Write},
    path::Path,
};

use image::{
    codecs::{
        jpeg::JpegEncoder,
        pnm::{PnmEncoder, PnmSubtype, SampleEncoding},
    },
    GrayImage, ImageError, ImageReader,
};

use crate::{graymap::open_output_file, Error};

pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Decodes any supported image and converts it to 8-bit grayscale. The
/// format is detected from the file content, the extension is only a fallback.
pub fn load_luma_image(input_file: &Path) -> crate::Result<GrayImage> {
    let to_open_error =
        |e: io::Error| Error::UnableToOpenInputFileForReading(input_file.display().to_string(), e);
    let image = ImageReader::open(input_file)
        .map_err(to_open_error)?
        .with_guessed_format()
        .map_err(to_open_error)?
        .decode()
        .map_err(|e| Error::ImageDecodingFailed(input_file.display().to_string(), e))?;
    log::debug!(
        "Decoded '{}' with color type {:?}",
        input_file.display(),
        image.color()
    );
    Ok(image.into_luma8())
}

pub fn convert_to_jpeg(input_file: &Path, output_file: &Path, quality: u8) -> crate::Result<()> {
    let image = load_luma_image(input_file)?;
    log::info!(
        "Encoding {}x{} JPEG with quality {}",
        image.width(),
        image.height(),
        quality
    );
    let mut writer = BufWriter::new(open_output_file(output_file)?);
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))
        .map_err(|e| to_encoding_error(output_file, e))?;
    writer.flush().map_err(Error::FailedToWriteImageData)
}

pub fn convert_to_pgm(input_file: &Path, output_file: &Path) -> crate::Result<()> {
    let image = load_luma_image(input_file)?;
    log::info!(
        "Encoding {}x{} binary graymap",
        image.width(),
        image.height()
    );
    let mut writer = BufWriter::new(open_output_file(output_file)?);
    let encoder =
        PnmEncoder::new(&mut writer).with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary));
    image
        .write_with_encoder(encoder)
        .map_err(|e| to_encoding_error(output_file, e))?;
    writer.flush().map_err(Error::FailedToWriteImageData)
}

fn to_encoding_error(output_file: &Path, error: ImageError) -> Error {
    Error::ImageEncodingFailed(output_file.display().to_string(), error)
}

#[cfg(test)]
mod test {
    use std::fs;

    use image::{ColorType, GrayImage, Luma, Rgb, RgbImage};

    use crate::{error::Error, graymap::read_pgm_file};

    use super::{convert_to_jpeg, convert_to_pgm, DEFAULT_JPEG_QUALITY};

    fn create_gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([((x * 4 + y * 2) % 256) as u8]))
    }

    #[test]
    fn pgm_output_is_binary_graymap() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("input.png");
        let output = directory.path().join("output.pgm");
        create_gradient(20, 10).save(&input).unwrap();
        convert_to_pgm(&input, &output).unwrap();
        let bytes = fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"P5"));
        let graymap = read_pgm_file(&output).unwrap();
        assert_eq!((graymap.width(), graymap.height()), (20, 10));
        assert_eq!(graymap.dots(), create_gradient(20, 10).as_raw().as_slice());
    }

    #[test]
    fn color_input_becomes_luma() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("color.png");
        let output = directory.path().join("color.jpg");
        RgbImage::from_pixel(9, 7, Rgb([200, 30, 90]))
            .save(&input)
            .unwrap();
        convert_to_jpeg(&input, &output, DEFAULT_JPEG_QUALITY).unwrap();
        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.color(), ColorType::L8);
        assert_eq!((decoded.width(), decoded.height()), (9, 7));
    }

    #[test]
    fn format_detected_from_content() {
        let directory = tempfile::tempdir().unwrap();
        let png = directory.path().join("photo.png");
        create_gradient(6, 5).save(&png).unwrap();
        let without_extension = directory.path().join("photo");
        let wrong_extension = directory.path().join("photo.jpg");
        fs::copy(&png, &without_extension).unwrap();
        fs::copy(&png, &wrong_extension).unwrap();
        for input in [&without_extension, &wrong_extension] {
            let output = input.with_extension("pgm");
            convert_to_pgm(input, &output).unwrap();
            let graymap = read_pgm_file(&output).unwrap();
            assert_eq!(graymap.dots(), create_gradient(6, 5).as_raw().as_slice());
        }
    }

    #[test]
    fn missing_input() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("missing.png");
        let output = directory.path().join("out.pgm");
        assert!(matches!(
            convert_to_pgm(&input, &output),
            Err(Error::UnableToOpenInputFileForReading(_, _))
        ));
    }

    #[test]
    fn undecodable_input() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("broken.jpg");
        let output = directory.path().join("out.pgm");
        fs::write(&input, b"definitely not a jpeg").unwrap();
        assert!(matches!(
            convert_to_pgm(&input, &output),
            Err(Error::ImageDecodingFailed(_, _))
        ));
        assert!(!output.exists());
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn full_device_reports_write_failure() {
        let full_device = std::path::Path::new("/dev/full");
        if !full_device.exists() {
            return;
        }
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("input.png");
        create_gradient(8, 8).save(&input).unwrap();
        assert!(matches!(
            convert_to_pgm(&input, full_device),
            Err(Error::FailedToWriteImageData(_))
        ));
        assert!(matches!(
            convert_to_jpeg(&input, full_device, DEFAULT_JPEG_QUALITY),
            Err(Error::FailedToWriteImageData(_))
        ));
    }

    #[test]
    fn unwritable_output() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("input.png");
        create_gradient(4, 4).save(&input).unwrap();
        let output = directory.path().join("no_such_dir").join("out.jpg");
        assert!(matches!(
            convert_to_jpeg(&input, &output, DEFAULT_JPEG_QUALITY),
            Err(Error::UnableToOpenOutputFileForWriting(_, _))
        ));
    }
}
