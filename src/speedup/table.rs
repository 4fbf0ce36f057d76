use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// One row of a timing log. Columns not listed here are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BenchmarkRecord {
    pub mpi_processes: u32,
    pub omp_threads: u32,
    pub time_seconds: f64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl BenchmarkRecord {
    fn is_baseline(&self) -> bool {
        self.mpi_processes == 1 && self.omp_threads == 1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedupRow {
    pub record: BenchmarkRecord,
    pub cores: u64,
    pub speedup: f64,
    pub label: String,
}

impl SpeedupRow {
    fn new(record: BenchmarkRecord, baseline_time: f64) -> Self {
        let cores = u64::from(record.mpi_processes) * u64::from(record.omp_threads);
        let speedup = baseline_time / record.time_seconds;
        let label = format!(
            "MPI={}, OMP={}, Cores={}",
            record.mpi_processes, record.omp_threads, cores
        );
        Self {
            record,
            cores,
            speedup,
            label,
        }
    }
}

/// Rows sorted by `(mpi_processes, omp_threads)` with speedups relative to the
/// first single process, single thread row of the input.
#[derive(Clone, Debug)]
pub struct SpeedupTable {
    rows: Vec<SpeedupRow>,
}

const TITLE: &str = "Speedup vs Configuration";

impl SpeedupTable {
    pub fn from_records(records: Vec<BenchmarkRecord>) -> crate::Result<Self> {
        let baseline_time = records
            .iter()
            .find(|record| record.is_baseline())
            .map(|record| record.time_seconds)
            .ok_or(Error::MissingBaselineRow)?;
        log::debug!("Baseline time T1 = {} s", baseline_time);
        let mut rows: Vec<SpeedupRow> = records
            .into_iter()
            .map(|record| SpeedupRow::new(record, baseline_time))
            .collect();
        rows.sort_by_key(|row| (row.record.mpi_processes, row.record.omp_threads));
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SpeedupRow] {
        &self.rows
    }

    /// The title carries the image size of the first row when both width and
    /// height are known.
    pub fn title(&self) -> String {
        match self.rows.first().map(|row| (row.record.width, row.record.height)) {
            Some((Some(width), Some(height))) => format!("{} ({}×{})", TITLE, width, height),
            _ => TITLE.to_owned(),
        }
    }

    pub fn max_speedup(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row.speedup)
            .filter(|speedup| speedup.is_finite())
            .fold(0.0, f64::max)
    }
}

pub fn read_benchmark_records(path: &Path) -> crate::Result<Vec<BenchmarkRecord>> {
    let to_table_error = |e: csv::Error| Error::BenchmarkTableReadFailed(path.display().to_string(), e);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(to_table_error)?;
    reader
        .deserialize()
        .collect::<Result<Vec<BenchmarkRecord>, csv::Error>>()
        .map_err(to_table_error)
}

#[cfg(test)]
mod test {
    use std::fs;

    use approx::assert_relative_eq;

    use crate::error::Error;

    use super::{read_benchmark_records, BenchmarkRecord, SpeedupTable};

    fn record(mpi_processes: u32, omp_threads: u32, time_seconds: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            mpi_processes,
            omp_threads,
            time_seconds,
            width: None,
            height: None,
        }
    }

    #[test]
    fn speedups_relative_to_baseline() {
        let table = SpeedupTable::from_records(vec![
            record(1, 1, 10.0),
            record(2, 1, 5.0),
            record(1, 2, 4.0),
        ])
        .unwrap();
        let speedups: Vec<(u32, u32, f64)> = table
            .rows()
            .iter()
            .map(|row| (row.record.mpi_processes, row.record.omp_threads, row.speedup))
            .collect();
        assert_eq!(speedups.len(), 3);
        assert_eq!((speedups[0].0, speedups[0].1), (1, 1));
        assert_relative_eq!(speedups[0].2, 1.0);
        assert_eq!((speedups[1].0, speedups[1].1), (1, 2));
        assert_relative_eq!(speedups[1].2, 2.5);
        assert_eq!((speedups[2].0, speedups[2].1), (2, 1));
        assert_relative_eq!(speedups[2].2, 2.0);
    }

    #[test]
    fn cores_and_labels() {
        let table =
            SpeedupTable::from_records(vec![record(1, 1, 8.0), record(4, 2, 1.0)]).unwrap();
        let last = &table.rows()[1];
        assert_eq!(last.cores, 8);
        assert_eq!(last.label, "MPI=4, OMP=2, Cores=8");
        assert_relative_eq!(table.max_speedup(), 8.0);
    }

    #[test]
    fn cores_of_large_configurations() {
        let table = SpeedupTable::from_records(vec![
            record(1, 1, 8.0),
            record(u32::MAX, u32::MAX, 1.0),
        ])
        .unwrap();
        let last = &table.rows()[1];
        assert_eq!(last.cores, u64::from(u32::MAX) * u64::from(u32::MAX));
        assert!(last.label.ends_with(&format!("Cores={}", last.cores)));
    }

    #[test]
    fn first_baseline_row_wins() {
        let table = SpeedupTable::from_records(vec![
            record(2, 2, 2.0),
            record(1, 1, 8.0),
            record(1, 1, 16.0),
        ])
        .unwrap();
        assert_relative_eq!(table.rows()[0].speedup, 1.0);
        assert_relative_eq!(table.rows()[1].speedup, 0.5);
        assert_relative_eq!(table.rows()[2].speedup, 4.0);
    }

    #[test]
    fn missing_baseline_is_an_error() {
        let result = SpeedupTable::from_records(vec![record(2, 1, 5.0), record(1, 2, 4.0)]);
        assert!(matches!(result, Err(Error::MissingBaselineRow)));
        assert!(matches!(
            SpeedupTable::from_records(Vec::new()),
            Err(Error::MissingBaselineRow)
        ));
    }

    #[test]
    fn title_with_and_without_image_size() {
        let mut sized = record(1, 1, 1.0);
        sized.width = Some(1920);
        sized.height = Some(1080);
        let table = SpeedupTable::from_records(vec![record(2, 1, 0.5), sized]).unwrap();
        assert_eq!(table.title(), "Speedup vs Configuration (1920×1080)");

        let table = SpeedupTable::from_records(vec![record(1, 1, 1.0)]).unwrap();
        assert_eq!(table.title(), "Speedup vs Configuration");
    }

    #[test]
    fn read_table_ignores_extra_columns() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("timing.csv");
        fs::write(
            &path,
            "width,height,window_size,C,mpi_processes,omp_threads,time_seconds\n\
             640,480,31,10,1,1,2.5\n\
             640,480,31,10,2,4,0.5\n",
        )
        .unwrap();
        let records = read_benchmark_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].mpi_processes, 2);
        assert_eq!(records[1].omp_threads, 4);
        assert_eq!(records[1].width, Some(640));
        assert_relative_eq!(records[0].time_seconds, 2.5);
    }

    #[test]
    fn read_table_without_size_columns() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("timing.csv");
        fs::write(&path, "mpi_processes,omp_threads,time_seconds\n1,1,3.0\n").unwrap();
        let records = read_benchmark_records(&path).unwrap();
        assert_eq!(records[0].width, None);
        assert_eq!(records[0].height, None);
    }

    #[test]
    fn read_table_missing_required_column() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("timing.csv");
        fs::write(&path, "mpi_processes,time_seconds\n1,3.0\n").unwrap();
        assert!(matches!(
            read_benchmark_records(&path),
            Err(Error::BenchmarkTableReadFailed(_, _))
        ));
    }
}
