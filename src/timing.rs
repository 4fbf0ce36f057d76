use std::{
    fmt::Display,
    fs::{self, OpenOptions},
    path::Path,
    time::Duration,
};

use serde::Serialize;

use crate::{
    threshold::{ParallelLayout, ThresholdParams},
    Error,
};

/// Outcome of one timed thresholding pass.
#[derive(Clone, Debug)]
pub struct ThresholdReport {
    pub width: usize,
    pub height: usize,
    pub params: ThresholdParams,
    pub layout: Option<ParallelLayout>,
    pub elapsed: Duration,
}

impl Display for ThresholdReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seconds = self.elapsed.as_secs_f64();
        match self.layout {
            None => write!(f, "T_serial = {} s", seconds),
            Some(layout) => write!(
                f,
                "T_hybrid ({} procs, {} threads) = {} s",
                layout.processes(),
                layout.threads(),
                seconds
            ),
        }
    }
}

#[derive(Serialize)]
struct SerialTimingRecord {
    width: usize,
    height: usize,
    window_size: u32,
    #[serde(rename = "C")]
    offset: i32,
    time_seconds: f64,
}

#[derive(Serialize)]
struct ParallelTimingRecord {
    width: usize,
    height: usize,
    window_size: u32,
    #[serde(rename = "C")]
    offset: i32,
    mpi_processes: usize,
    omp_threads: usize,
    time_seconds: f64,
}

impl ThresholdReport {
    /// Appends one row to the CSV log at `path`. The header is written when
    /// the file is new or empty.
    pub fn append_to_log(&self, path: &Path) -> crate::Result<()> {
        let time_seconds = self.elapsed.as_secs_f64();
        match self.layout {
            None => append_record(
                path,
                &SerialTimingRecord {
                    width: self.width,
                    height: self.height,
                    window_size: self.params.window_size(),
                    offset: self.params.offset(),
                    time_seconds,
                },
            ),
            Some(layout) => append_record(
                path,
                &ParallelTimingRecord {
                    width: self.width,
                    height: self.height,
                    window_size: self.params.window_size(),
                    offset: self.params.offset(),
                    mpi_processes: layout.processes(),
                    omp_threads: layout.threads(),
                    time_seconds,
                },
            ),
        }
    }
}

fn is_missing_or_empty(path: &Path) -> bool {
    fs::metadata(path)
        .map(|metadata| metadata.len() == 0)
        .unwrap_or(true)
}

fn append_record<R: Serialize>(path: &Path, record: &R) -> crate::Result<()> {
    let to_log_error = |e: csv::Error| Error::TimingLogFailed(path.display().to_string(), e);
    let write_header = is_missing_or_empty(path);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| to_log_error(e.into()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    writer.serialize(record).map_err(to_log_error)?;
    writer.flush().map_err(|e| to_log_error(e.into()))
}

#[cfg(test)]
mod test {
    use std::{fs, time::Duration};

    use crate::threshold::{ParallelLayout, ThresholdParams};

    use super::ThresholdReport;

    fn create_report(layout: Option<ParallelLayout>, millis: u64) -> ThresholdReport {
        ThresholdReport {
            width: 640,
            height: 480,
            params: ThresholdParams::new(31, 10).unwrap(),
            layout,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn serial_log_has_single_header() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("serial_results.csv");
        create_report(None, 1500).append_to_log(&path).unwrap();
        create_report(None, 250).append_to_log(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "width,height,window_size,C,time_seconds\n640,480,31,10,1.5\n640,480,31,10,0.25\n"
        );
    }

    #[test]
    fn parallel_log_records_layout() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("timing_matrix_small.csv");
        let layout = ParallelLayout::new(2, 4).unwrap();
        create_report(Some(layout), 125).append_to_log(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "width,height,window_size,C,mpi_processes,omp_threads,time_seconds\n640,480,31,10,2,4,0.125\n"
        );
    }

    #[test]
    fn empty_existing_log_gets_header() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        create_report(None, 1000).append_to_log(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("width,height,window_size,C,time_seconds\n"));
    }

    #[test]
    fn display_matches_program_output() {
        assert_eq!(create_report(None, 500).to_string(), "T_serial = 0.5 s");
        let layout = ParallelLayout::new(4, 2).unwrap();
        assert_eq!(
            create_report(Some(layout), 2000).to_string(),
            "T_hybrid (4 procs, 2 threads) = 2 s"
        );
    }

    #[test]
    fn unwritable_log_is_reported() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("missing_dir").join("log.csv");
        assert!(create_report(None, 1).append_to_log(&path).is_err());
    }
}
