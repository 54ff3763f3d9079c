//! CSV export of the workout log

use std::io::Write;

use super::error::StoreResult;
use super::record::WorkoutRecord;

/// Column order of the exported file
pub const CSV_HEADER: [&str; 5] = ["date", "exercise", "weight", "reps", "estimated_1rm"];

/// Write `records` as CSV with a header row. A missing estimate is an empty cell.
pub fn write_csv<W: Write>(records: &[WorkoutRecord], out: W) -> StoreResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record([
            record.date.clone(),
            record.exercise.clone(),
            record.weight.to_string(),
            record.reps.to_string(),
            record
                .estimated_1rm
                .map(|e| e.to_string())
                .unwrap_or_default(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv() {
        let records = vec![
            WorkoutRecord::new("2026-01-10", "Squat", 100.0, 5)
                .unwrap()
                .with_estimate(117.0),
            WorkoutRecord::new("2026-01-11", "bench, close grip", 62.5, 8).unwrap(),
        ];

        let mut out = Vec::new();
        write_csv(&records, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "date,exercise,weight,reps,estimated_1rm\n\
             2026-01-10,Squat,100,5,117\n\
             2026-01-11,\"bench, close grip\",62.5,8,\n"
        );
    }
}
