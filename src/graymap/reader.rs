use std::io::{self, Read};

use super::{GrayImage, ImageReader};
use crate::Error;

pub struct PGMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PGMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PGMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<GrayImage> {
        let tokenizer = PGMTokenizer::new(&mut self.reader);
        let mut parser = PGMParser::new(tokenizer);
        parser.parse_tokens()
    }
}

struct PGMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PGMTokenizer<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        PGMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Reads up to `limit` raw bytes following the last token. The single
    /// whitespace byte terminating that token has already been consumed.
    fn read_raw(&mut self, limit: usize) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        (&mut *self.reader)
            .take(limit as u64)
            .read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn skip_comment(&mut self) {
        let mut byte = [0; 1];
        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if byte[0] == b'\n' {
                return;
            }
        }
    }
}

impl<R: Read> Iterator for PGMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];

        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if byte[0] == b'#' {
                self.skip_comment();
                if !self.buffer.is_empty() {
                    break;
                }
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const MAGIC_NUMBER_TOKEN_NAME: &str = "Magic Number";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const GRAY_VALUE_TOKEN_NAME: &str = "Gray Value";

#[derive(Clone, Copy, Debug, PartialEq)]
enum SampleEncoding {
    /// P2
    Ascii,
    /// P5
    Binary,
}

impl SampleEncoding {
    fn from_magic_number(magic: &str) -> crate::Result<Self> {
        match magic {
            "P2" => Ok(Self::Ascii),
            "P5" => Ok(Self::Binary),
            _ => Err(Error::UnsupportedMagicNumber(magic.to_owned())),
        }
    }
}

struct PGMParser<'a, R: Read> {
    tokenizer: PGMTokenizer<'a, R>,
}

impl<'a, R: Read> PGMParser<'a, R> {
    fn new(tokenizer: PGMTokenizer<'a, R>) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<GrayImage> {
        let encoding = self.parse_magic_number()?;
        let width = self.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_max_value()?;
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageDimensions(width, height));
        }
        log::debug!(
            "PGM header: {:?}, {}x{}, max value {}",
            encoding,
            width,
            height,
            max_value
        );
        let number_of_dots = width
            .checked_mul(height)
            .ok_or(Error::InvalidImageDimensions(width, height))?;
        let dots = match encoding {
            SampleEncoding::Ascii => self.parse_all_ascii_dots(max_value, number_of_dots)?,
            SampleEncoding::Binary => self.read_all_binary_dots(number_of_dots)?,
        };
        GrayImage::new(width, height, dots)
    }

    fn next_token(&mut self, token_name: &'static str) -> crate::Result<String> {
        self.tokenizer
            .next()
            .ok_or(Error::PGMFileDoesNotContainRequiredToken(token_name))
    }

    fn parse_magic_number(&mut self) -> crate::Result<SampleEncoding> {
        let magic = self.next_token(MAGIC_NUMBER_TOKEN_NAME)?;
        SampleEncoding::from_magic_number(&magic)
    }

    fn parse_dimension(&mut self, token_name: &'static str) -> crate::Result<usize> {
        self.next_token(token_name)?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }

    fn parse_max_value(&mut self) -> crate::Result<u8> {
        let max_value: u32 = self
            .next_token(MAX_VALUE_HEADER_TOKEN_NAME)?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))?;
        match u8::try_from(max_value) {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(Error::UnsupportedMaxValue(max_value)),
        }
    }

    fn parse_all_ascii_dots(&mut self, max_value: u8, expected: usize) -> crate::Result<Vec<u8>> {
        let mut dots = Vec::new();
        for token in self.tokenizer.by_ref() {
            dots.push(Self::parse_gray_value(&token, max_value)?);
        }
        if dots.len() != expected {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(dots)
    }

    fn parse_gray_value(token: &str, max_value: u8) -> crate::Result<u8> {
        let value: i64 = token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(GRAY_VALUE_TOKEN_NAME))?;
        Ok(value.clamp(0, i64::from(max_value)) as u8)
    }

    fn read_all_binary_dots(&mut self, expected: usize) -> crate::Result<Vec<u8>> {
        let dots = self
            .tokenizer
            .read_raw(expected)
            .map_err(Error::FailedToReadImageData)?;
        if dots.len() != expected {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(dots)
    }
}
