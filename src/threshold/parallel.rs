use std::{
    ops::Range,
    sync::{mpsc, Arc},
};

use threadpool::ThreadPool;

use super::{threshold_rows, ThresholdParams, ThresholdSource};
use crate::{graymap::GrayImage, Error};

const WORKER_THREAD_NAME: &str = "threshold-worker";

/// Splits the image rows into `processes` contiguous bands, each of which is
/// split again among `threads` workers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallelLayout {
    processes: usize,
    threads: usize,
}

impl ParallelLayout {
    /// Both counts must be at least one and their product must fit `usize`.
    pub fn new(processes: usize, threads: usize) -> crate::Result<Self> {
        match processes.checked_mul(threads) {
            Some(workers) if workers > 0 => Ok(Self { processes, threads }),
            _ => Err(Error::InvalidParallelLayout(processes, threads)),
        }
    }

    pub fn processes(&self) -> usize {
        self.processes
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn workers(&self) -> usize {
        self.processes * self.threads
    }

    /// Non-empty row ranges in ascending order, one per worker job.
    pub fn row_bands(&self, height: usize) -> Vec<Range<usize>> {
        partition_rows(0..height, self.processes)
            .flat_map(|band| partition_rows(band, self.threads))
            .filter(|rows| !rows.is_empty())
            .collect()
    }
}

/// Balanced split: the first `len % parts` ranges get one extra row.
fn partition_rows(rows: Range<usize>, parts: usize) -> impl Iterator<Item = Range<usize>> {
    let first_row = rows.start;
    let base = rows.len() / parts;
    let remainder = rows.len() % parts;
    (0..parts).map(move |part| {
        let start = first_row + base * part + part.min(remainder);
        let size = base + usize::from(part < remainder);
        start..start + size
    })
}

pub fn threshold_parallel(
    source: &ThresholdSource,
    params: &ThresholdParams,
    layout: &ParallelLayout,
) -> crate::Result<GrayImage> {
    let width = source.image.width();
    let height = source.image.height();
    let bands = layout.row_bands(height);
    log::debug!(
        "Thresholding {} rows in {} bands for {} workers",
        height,
        bands.len(),
        layout.workers()
    );

    // Empty bands are dropped, so a large layout may need fewer threads.
    let pool_size = layout.workers().min(bands.len());
    let threadpool = ThreadPool::with_name(WORKER_THREAD_NAME.to_owned(), pool_size);
    let (sender, receiver) = mpsc::channel();
    for band in bands.iter().cloned() {
        let sender = sender.clone();
        let image = Arc::clone(&source.image);
        let integral = Arc::clone(&source.integral);
        let params = *params;
        threadpool.execute(move || {
            let first_row = band.start;
            let dots = threshold_rows(&image, &integral, &params, band);
            let _ = sender.send((first_row, dots));
        });
    }
    drop(sender);

    let mut dots = vec![0; width * height];
    let mut received = 0;
    for (first_row, band_dots) in receiver.iter() {
        let offset = first_row * width;
        dots[offset..offset + band_dots.len()].copy_from_slice(&band_dots);
        received += 1;
    }
    if received != bands.len() {
        return Err(Error::IncompleteParallelResult(bands.len(), received));
    }
    GrayImage::new(width, height, dots)
}
