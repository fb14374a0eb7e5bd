use aex_view::SeriesPayload;
use std::io::Write;

/// Write a time series as `timestamp,value` CSV. Missing values are empty.
pub fn write_series_csv<W: Write>(series: &SeriesPayload, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["timestamp", "value"])?;
    for point in &series.points {
        let value = point.display_value.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([point.timestamp.as_str(), value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aex_view::TimedValue;

    #[test]
    fn test_series_csv() {
        let series = SeriesPayload {
            entity: Some("Japan".to_string()),
            title: "Japan: Total, USD m".to_string(),
            points: vec![
                TimedValue {
                    timestamp: "2024-01-31".to_string(),
                    display_value: Some(300.0),
                },
                TimedValue {
                    timestamp: "2024-02-29".to_string(),
                    display_value: None,
                },
                TimedValue {
                    timestamp: "2024-03-31".to_string(),
                    display_value: Some(12.5),
                },
            ],
            latest: Some(12.5),
        };
        let mut out = Vec::new();
        write_series_csv(&series, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "timestamp,value\n2024-01-31,300\n2024-02-29,\n2024-03-31,12.5\n"
        );
    }

    #[test]
    fn test_empty_series_has_header_only() {
        let mut out = Vec::new();
        write_series_csv(&SeriesPayload::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "timestamp,value\n");
    }
}
