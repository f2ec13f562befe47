use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{NaiveTime, Timelike};
use itertools::Itertools;
use transitheat_density::output::write_atomic;

use super::{
    average_gap_in_window, parse_gtfs_time, FrequencyError, FrequencyReport, StopFrequency,
    StopRow, StopTimeRow,
};

/// computes per-stop arrival frequency for one city's GTFS feed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyAnalysis {
    pub start_sec: u32,
    pub end_sec: u32,
}

impl Default for FrequencyAnalysis {
    fn default() -> Self {
        Self {
            start_sec: 16 * 3600,
            end_sec: 18 * 3600,
        }
    }
}

impl FrequencyAnalysis {
    pub fn new(start_sec: u32, end_sec: u32) -> Result<FrequencyAnalysis, FrequencyError> {
        if start_sec > end_sec {
            return Err(FrequencyError::InvalidTimeWindow {
                start: start_sec,
                end: end_sec,
            });
        }
        Ok(FrequencyAnalysis { start_sec, end_sec })
    }

    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Result<FrequencyAnalysis, FrequencyError> {
        FrequencyAnalysis::new(start.num_seconds_from_midnight(), end.num_seconds_from_midnight())
    }

    /// reads `stop_times.txt` and `stops.txt` from a city's GTFS directory
    pub fn run(&self, city: &str, gtfs_directory: &Path) -> Result<FrequencyReport, FrequencyError> {
        let stop_times: Vec<StopTimeRow> = read_rows(&gtfs_directory.join("stop_times.txt"))?;
        let stops: Vec<StopRow> = read_rows(&gtfs_directory.join("stops.txt"))?;
        self.report(city, stop_times, stops)
    }

    /// builds the report from already loaded rows. stops keep the order in
    /// which they first appear in `stop_times`, then are sorted by gap.
    pub fn report(
        &self,
        city: &str,
        stop_times: Vec<StopTimeRow>,
        stops: Vec<StopRow>,
    ) -> Result<FrequencyReport, FrequencyError> {
        let mut arrivals: HashMap<String, Vec<u32>> = HashMap::new();
        let mut stop_order: Vec<String> = vec![];
        let mut n_blank = 0;
        for row in stop_times {
            let entry = arrivals.entry(row.stop_id.clone()).or_insert_with(|| {
                stop_order.push(row.stop_id.clone());
                vec![]
            });
            match row.arrival_time.as_deref().map(str::trim) {
                Some(t) if !t.is_empty() => entry.push(parse_gtfs_time(t)?),
                _ => n_blank += 1,
            }
        }
        if n_blank > 0 {
            log::debug!("{city}: skipped {n_blank} stop times without an arrival time");
        }

        let stops_by_id: HashMap<String, StopRow> =
            stops.into_iter().map(|s| (s.stop_id.clone(), s)).collect();

        let valid = stop_order
            .into_iter()
            .filter_map(|stop_id| {
                let times = arrivals.get(&stop_id)?;
                let avg_gap_sec = average_gap_in_window(times, self.start_sec, self.end_sec);
                let stop = stops_by_id.get(&stop_id)?;
                match (stop.stop_lat, stop.stop_lon) {
                    (Some(lat), Some(lon)) if avg_gap_sec > 0 => Some(StopFrequency {
                        stop_id,
                        name: stop.stop_name.clone(),
                        lat,
                        lon,
                        avg_gap_sec,
                    }),
                    _ => None,
                }
            })
            .sorted_by_key(|s| s.avg_gap_sec)
            .collect_vec();

        for s in valid.iter() {
            log::debug!(
                "{} frequency is {} seconds or around {} minutes - {}",
                s.stop_id,
                s.avg_gap_sec,
                s.approximate_minutes(),
                s.name
            );
        }
        log::info!("{city}: {} stops with service in the time window", valid.len());

        Ok(FrequencyReport {
            city: city.to_string(),
            start_sec: self.start_sec,
            end_sec: self.end_sec,
            sorted_by: String::from(FrequencyReport::SORTED_BY),
            stops: valid,
        })
    }

    /// runs the analysis and writes the report into `output_directory`
    pub fn run_and_write(
        &self,
        city: &str,
        gtfs_directory: &Path,
        output_directory: &Path,
    ) -> Result<PathBuf, FrequencyError> {
        let report = self.run(city, gtfs_directory)?;
        let out_file = output_directory.join(report.filename());
        let bytes = serde_json::to_vec_pretty(&report)?;
        write_atomic(&out_file, &bytes)?;
        log::info!("wrote frequency report: {}", out_file.display());
        Ok(out_file)
    }
}

fn read_rows<T>(path: &Path) -> Result<Vec<T>, FrequencyError>
where
    T: serde::de::DeserializeOwned,
{
    if !path.is_file() {
        return Err(FrequencyError::InputMissing(path.to_path_buf()));
    }
    let filepath = path.to_str().unwrap_or_default().to_string();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| FrequencyError::CsvError {
            filepath: filepath.clone(),
            source,
        })?;
    reader
        .into_deserialize::<T>()
        .map(|r| {
            r.map_err(|source| FrequencyError::CsvError {
                filepath: filepath.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::FrequencyAnalysis;
    use crate::frequency::{FrequencyError, StopRow, StopTimeRow};
    use chrono::NaiveTime;

    fn stop_time(stop_id: &str, arrival: Option<&str>) -> StopTimeRow {
        StopTimeRow {
            stop_id: stop_id.to_string(),
            arrival_time: arrival.map(String::from),
        }
    }

    fn stop(stop_id: &str, name: &str) -> StopRow {
        StopRow {
            stop_id: stop_id.to_string(),
            stop_name: name.to_string(),
            stop_lat: Some(39.7),
            stop_lon: Some(-105.0),
        }
    }

    #[test]
    fn test_report_sorted_and_filtered() {
        let stop_times = vec![
            stop_time("slow", Some("16:00:00")),
            stop_time("fast", Some("16:00:00")),
            stop_time("slow", Some("16:30:00")),
            stop_time("fast", Some("16:05:00")),
            stop_time("fast", Some("")),
            stop_time("once", Some("17:00:00")),
            stop_time("unnamed", Some("16:00:00")),
            stop_time("unnamed", Some("16:10:00")),
            stop_time("unknown", Some("16:00:00")),
            stop_time("unknown", Some("16:01:00")),
            stop_time("fast", None),
        ];
        let stops = vec![
            stop("fast", "Fast St"),
            stop("slow", "Slow St"),
            stop("once", "Once St"),
            stop("unnamed", ""),
        ];
        let report = FrequencyAnalysis::default()
            .report("denver", stop_times, stops)
            .expect("test failed");
        assert_eq!(report.city, "denver");
        assert_eq!(report.start_sec, 57_600);
        assert_eq!(report.end_sec, 64_800);
        assert_eq!(report.sorted_by, "avg_gap_sec_asc");
        let ids: Vec<&str> = report.stops.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["fast", "unnamed", "slow"]);
        assert_eq!(report.stops[0].avg_gap_sec, 300);
        assert_eq!(report.stops[1].name, "");
        assert_eq!(report.stops[2].avg_gap_sec, 1800);
        assert_eq!(report.stops[2].approximate_minutes(), 31);
        assert_eq!(report.filename(), "frequency_16_18.json");
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let stop_times = vec![
            stop_time("b", Some("16:00:00")),
            stop_time("a", Some("16:00:00")),
            stop_time("a", Some("16:10:00")),
            stop_time("b", Some("16:10:00")),
        ];
        let stops = vec![stop("a", "A"), stop("b", "B")];
        let report = FrequencyAnalysis::default()
            .report("c", stop_times, stops)
            .expect("test failed");
        let ids: Vec<&str> = report.stops.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_invalid_arrival_time() {
        let stop_times = vec![stop_time("a", Some("4pm"))];
        let result = FrequencyAnalysis::default().report("c", stop_times, vec![]);
        assert!(matches!(result, Err(FrequencyError::InvalidTime(_))));
    }

    #[test]
    fn test_window_validation() {
        let start = NaiveTime::from_hms_opt(18, 0, 0).expect("test invariant failed");
        let end = NaiveTime::from_hms_opt(16, 0, 0).expect("test invariant failed");
        assert!(FrequencyAnalysis::from_times(start, end).is_err());
        assert!(FrequencyAnalysis::from_times(end, start).is_ok());
    }

    #[test]
    fn test_run_and_write() {
        let root = std::env::temp_dir().join("transitheat-frequency-tests");
        let gtfs = root.join("cities").join("springfield");
        std::fs::create_dir_all(&gtfs).expect("test invariant failed");
        std::fs::write(
            gtfs.join("stop_times.txt"),
            "\u{feff}trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             t1,16:00:00,16:00:00,s1,1\n\
             t2,16:15:00,16:15:00,s1,1\n\
             t3,16:30:00,16:30:00,s1,1\n",
        )
        .expect("test invariant failed");
        std::fs::write(
            gtfs.join("stops.txt"),
            "stop_id,stop_name,stop_lat,stop_lon\ns1,Main & 1st,39.75,-104.99\n",
        )
        .expect("test invariant failed");
        let out_dir = root.join("out").join("springfield");
        let out_file = FrequencyAnalysis::default()
            .run_and_write("springfield", &gtfs, &out_dir)
            .expect("test failed");
        assert_eq!(out_file, out_dir.join("frequency_16_18.json"));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out_file).expect("test failed"))
                .expect("test failed");
        assert_eq!(json["stops"][0]["stop_id"], "s1");
        assert_eq!(json["stops"][0]["name"], "Main & 1st");
        assert_eq!(json["stops"][0]["avg_gap_sec"], 900);
    }

    #[test]
    fn test_blank_stop_name_read_from_csv() {
        let dir = std::env::temp_dir().join("transitheat-frequency-tests-blank-name");
        std::fs::create_dir_all(&dir).expect("test invariant failed");
        std::fs::write(
            dir.join("stop_times.txt"),
            "trip_id,arrival_time,stop_id\nt1,16:00:00,s1\nt2,16:20:00,s1\nt3,16:00:00,s2\nt4,16:10:00,s2\n",
        )
        .expect("test invariant failed");
        std::fs::write(
            dir.join("stops.txt"),
            "stop_id,stop_name,stop_lat,stop_lon\ns1,,39.75,-104.99\ns2,Main,39.7,\n",
        )
        .expect("test invariant failed");
        let report = FrequencyAnalysis::default().run("c", &dir).expect("test failed");
        assert_eq!(report.stops.len(), 1);
        assert_eq!(report.stops[0].stop_id, "s1");
        assert_eq!(report.stops[0].name, "");
        assert_eq!(report.stops[0].avg_gap_sec, 1200);
    }

    #[test]
    fn test_missing_stop_times() {
        let dir = std::env::temp_dir().join("transitheat-frequency-tests-missing");
        let result = FrequencyAnalysis::default().run("nowhere", &dir);
        assert!(matches!(result, Err(FrequencyError::InputMissing(_))));
    }
}
