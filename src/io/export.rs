//! CSV export for per-tick simulation records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::TickResult;

/// Column header for CSV telemetry export.
const HEADER: &str = "tick,time_hr,waiting,docked,completed,evicted,assigned,\
                       delivered_kwh,received_kwh,clean_drawn_kwh,clean_remaining_kwh,\
                       clean_exhausted";

/// Exports tick records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per tick. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[TickResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes tick records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[TickResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            r.tick.to_string(),
            format!("{:.6}", r.time_hr),
            r.waiting.to_string(),
            r.docked.to_string(),
            r.completed.to_string(),
            r.evicted.to_string(),
            r.assigned.to_string(),
            format!("{:.6}", r.delivered_kwh),
            format!("{:.6}", r.received_kwh),
            format!("{:.6}", r.clean_drawn_kwh),
            format!("{:.6}", r.clean_remaining_kwh),
            r.clean_exhausted.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tick(t: u64) -> TickResult {
        TickResult {
            tick: t,
            time_hr: (t + 1) as f64 / 60.0,
            waiting: 3,
            docked: 2,
            completed: 0,
            evicted: 0,
            assigned: 0,
            delivered_kwh: 1.5,
            received_kwh: 1.5,
            clean_drawn_kwh: 0.5,
            clean_remaining_kwh: 10.0,
            clean_exhausted: false,
        }
    }

    #[test]
    fn header_matches_schema() {
        let mut buf = Vec::new();
        write_csv(&[make_tick(0)], &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "tick,time_hr,waiting,docked,completed,evicted,assigned,\
             delivered_kwh,received_kwh,clean_drawn_kwh,clean_remaining_kwh,clean_exhausted"
        );
    }

    #[test]
    fn row_count_matches_tick_count() {
        let results: Vec<TickResult> = (0..24).map(make_tick).collect();
        let mut buf = Vec::new();
        write_csv(&results, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 24 data rows
        assert_eq!(lines.len(), 25);
    }

    #[test]
    fn rows_are_parseable() {
        let results: Vec<TickResult> = (0..3).map(make_tick).collect();
        let mut buf = Vec::new();
        write_csv(&results, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(12));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            for i in 7..11 {
                let val: Result<f64, _> = rec[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            let exhausted: Result<bool, _> = rec[11].parse();
            assert!(exhausted.is_ok(), "clean_exhausted should parse as bool");
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }
}
