//! Shared utility functions for AEX crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse a date string in "YYYYMMDD" format (compact format)
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y%m%d")?)
    }

    /// Parse a timestamp cell from a metric source.
    ///
    /// Accepts "YYYY-MM-DD", "YYYYMMDD", "MM/DD/YYYY" and monthly "YYYY-MM"
    /// (which maps to the first of the month). A trailing time component
    /// separated by whitespace is ignored.
    pub fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDate> {
        let day = s.split_whitespace().next().unwrap_or("");
        if let Ok(date) = parse_date(day) {
            return Ok(date);
        }
        if let Ok(date) = parse_date_compact(day) {
            return Ok(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(day, "%m/%d/%Y") {
            return Ok(date);
        }
        match NaiveDate::parse_from_str(&format!("{}-01", day), "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => anyhow::bail!("unrecognized timestamp: {:?}", s),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_parse_date() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            assert_eq!(parse_date("2023-06-15").unwrap(), date);
            assert_eq!(parse_date_compact("20230615").unwrap(), date);
            assert!(parse_date("2023/06/15").is_err());
        }

        #[test]
        fn test_parse_timestamp_formats() {
            let expected = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
            assert_eq!(parse_timestamp("2024-03-31").unwrap(), expected);
            assert_eq!(parse_timestamp("20240331").unwrap(), expected);
            assert_eq!(parse_timestamp("03/31/2024").unwrap(), expected);
            assert_eq!(parse_timestamp("2024-03-31 00:00:00").unwrap(), expected);
        }

        #[test]
        fn test_parse_timestamp_monthly() {
            let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            assert_eq!(parse_timestamp("2024-03").unwrap(), expected);
        }

        #[test]
        fn test_parse_timestamp_rejects_row_numbers() {
            assert!(parse_timestamp("1").is_err());
            assert!(parse_timestamp("").is_err());
            assert!(parse_timestamp("Q1 2024").is_err());
        }
    }
}

/// Numeric cell parsing for tabular sources
pub mod cells {
    /// Parse a numeric cell, mapping null markers and junk to `None`.
    ///
    /// "null", "nan", "n/a", "na" (any case) and the empty string are
    /// missing values, as are non-finite numbers.
    pub fn parse_cell(s: &str) -> Option<f64> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "" | "null" | "nan" | "n/a" | "na" => None,
            v => v.parse::<f64>().ok().filter(|x| x.is_finite()),
        }
    }

}
