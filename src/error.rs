use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    PGMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    UnsupportedMagicNumber(String),
    UnsupportedMaxValue(u32),
    InvalidImageDimensions(usize, usize),
    MismatchOfSizeBetweenHeaderAndValues,
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadImageData(std::io::Error),
    FailedToWriteImageData(std::io::Error),
    ImageDecodingFailed(String, image::ImageError),
    ImageEncodingFailed(String, image::ImageError),
    InvalidWindowSize(u32),
    InvalidParallelLayout(usize, usize),
    IncompleteParallelResult(usize, usize),
    TimingLogFailed(String, csv::Error),
    BenchmarkTableReadFailed(String, csv::Error),
    MissingBaselineRow,
    InvalidBenchmarkPath(String),
    ChartRenderingFailed(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PGMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PGM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnsupportedMagicNumber(magic) => {
                write!(
                    f,
                    "Unsupported PGM format '{}' (only P2 and P5 are allowed)",
                    magic
                )
            }
            Self::UnsupportedMaxValue(max_value) => {
                write!(
                    f,
                    "Unsupported max value {} (must be in range 1..=255)",
                    max_value
                )
            }
            Self::InvalidImageDimensions(width, height) => {
                write!(f, "Invalid image dimensions {}x{}", width, height)
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadImageData(error) => {
                write!(f, "Failed to read image data: {}", error)
            }
            Self::FailedToWriteImageData(error) => {
                write!(f, "Failed to write image data: {}", error)
            }
            Self::ImageDecodingFailed(path, error) => {
                write!(f, "Unable to decode image '{}': {}", path, error)
            }
            Self::ImageEncodingFailed(path, error) => {
                write!(f, "Unable to encode image '{}': {}", path, error)
            }
            Self::InvalidWindowSize(window_size) => {
                write!(
                    f,
                    "Window size must be odd and greater than 1, but was {}",
                    window_size
                )
            }
            Self::InvalidParallelLayout(processes, threads) => {
                write!(
                    f,
                    "Number of processes and threads must be at least 1, but was {} and {}",
                    processes, threads
                )
            }
            Self::IncompleteParallelResult(expected, received) => {
                write!(
                    f,
                    "Expected {} row bands from workers, but received {}",
                    expected, received
                )
            }
            Self::TimingLogFailed(path, error) => {
                write!(f, "Unable to append to timing log '{}': {}", path, error)
            }
            Self::BenchmarkTableReadFailed(path, error) => {
                write!(f, "Unable to read benchmark table '{}': {}", path, error)
            }
            Self::MissingBaselineRow => {
                write!(
                    f,
                    "Baseline row not found (mpi_processes=1 and omp_threads=1)"
                )
            }
            Self::InvalidBenchmarkPath(path) => {
                write!(
                    f,
                    "Unable to derive chart name from benchmark path '{}'",
                    path
                )
            }
            Self::ChartRenderingFailed(reason) => {
                write!(f, "Failed to render chart: {}", reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToReadImageData(error)
            | Self::FailedToWriteImageData(error) => Some(error),
            Self::ImageDecodingFailed(_, error) | Self::ImageEncodingFailed(_, error) => {
                Some(error)
            }
            Self::TimingLogFailed(_, error) | Self::BenchmarkTableReadFailed(_, error) => {
                Some(error)
            }
            _ => None,
        }
    }
}
