use super::FrequencyError;

/// seconds since the start of the service day for a GTFS `H:MM:SS` time.
/// hours may exceed 23 for trips running past midnight.
pub fn parse_gtfs_time(time: &str) -> Result<u32, FrequencyError> {
    let invalid = || FrequencyError::InvalidTime(time.to_string());
    let mut parts = time.trim().split(':');
    let mut field = |max: Option<u32>| -> Result<u32, FrequencyError> {
        let value = parts
            .next()
            .ok_or_else(invalid)?
            .parse::<u32>()
            .map_err(|_| invalid())?;
        match max {
            Some(m) if value > m => Err(invalid()),
            _ => Ok(value),
        }
    };
    let hours = field(None)?;
    let minutes = field(Some(59))?;
    let seconds = field(Some(59))?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(hours * 3600 + minutes * 60 + seconds)
}

#[cfg(test)]
mod tests {
    use super::parse_gtfs_time;

    #[test]
    fn test_parse() {
        assert_eq!(parse_gtfs_time("16:00:00").expect("test failed"), 57_600);
        assert_eq!(parse_gtfs_time("7:05:09").expect("test failed"), 25_509);
        assert_eq!(parse_gtfs_time(" 08:00:00 ").expect("test failed"), 28_800);
    }

    #[test]
    fn test_past_midnight() {
        assert_eq!(parse_gtfs_time("25:30:00").expect("test failed"), 91_800);
    }

    #[test]
    fn test_invalid() {
        assert!(parse_gtfs_time("").is_err());
        assert!(parse_gtfs_time("12:00").is_err());
        assert!(parse_gtfs_time("12:60:00").is_err());
        assert!(parse_gtfs_time("12:00:00:00").is_err());
        assert!(parse_gtfs_time("noon").is_err());
    }
}
