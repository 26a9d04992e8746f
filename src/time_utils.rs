// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamp formatting and measurement-date parsing.

use chrono::{DateTime, NaiveDate, Utc};

/// Current wall-clock time as an RFC3339 string.
///
/// Full sub-second precision, so two consecutive mutations never share
/// an `actualizadoEn` value.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parse a measurement date (`fecha`) for chronological ordering.
///
/// Accepts a full RFC3339 timestamp or a bare `YYYY-MM-DD` date
/// (interpreted as midnight UTC). Returns `None` for anything else;
/// callers sort unparsable dates before parsable ones.
pub fn parse_fecha(fecha: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(fecha) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(fecha, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fecha_date_only() {
        let parsed = parse_fecha("2024-03-15").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-15T00:00:00+00:00");
    }

    #[test]
    fn test_parse_fecha_rfc3339() {
        let parsed = parse_fecha("2024-03-15T08:30:00Z").unwrap();
        assert!(parse_fecha("2024-03-15").unwrap() < parsed);
    }

    #[test]
    fn test_parse_fecha_garbage() {
        assert!(parse_fecha("next tuesday").is_none());
        assert!(parse_fecha("").is_none());
    }
}
