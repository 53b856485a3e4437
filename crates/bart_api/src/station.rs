//! Station abbreviation checks
//!
//! Only the shape of an abbreviation is checked here. Whether the station
//! exists is for the agency to say.

use crate::error::BartError;

/// Pseudo-station accepted by the real-time estimates endpoint
pub const ALL: &str = "all";

/// Length of every station abbreviation (`MCAR`, `12TH`, `19TH`)
pub const ABBR_LEN: usize = 4;

/// Whether `abbr` looks like a station abbreviation
#[must_use]
pub fn is_abbreviation(abbr: &str) -> bool {
    abbr.len() == ABBR_LEN && abbr.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Whether `abbr` is the `all` pseudo-station, in any case
#[must_use]
pub fn is_all(abbr: &str) -> bool {
    abbr.eq_ignore_ascii_case(ALL)
}

/// Check a station abbreviation, returning it unchanged
///
/// # Errors
///
/// Returns [`BartError::InvalidStation`] if `abbr` is not four ASCII
/// alphanumerics.
pub fn validate(abbr: &str) -> Result<&str, BartError> {
    if is_abbreviation(abbr) {
        Ok(abbr)
    } else {
        Err(BartError::InvalidStation(abbr.to_string()))
    }
}

/// Like [`validate`], but also lets `all` through
///
/// # Errors
///
/// Returns [`BartError::InvalidStation`] for anything else.
pub fn validate_or_all(abbr: &str) -> Result<&str, BartError> {
    if is_all(abbr) {
        Ok(abbr)
    } else {
        validate(abbr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_abbreviations() {
        for abbr in ["MCAR", "12TH", "19th", "embr", "Rock"] {
            assert_eq!(validate(abbr).unwrap(), abbr);
        }
    }

    #[test]
    fn test_invalid_abbreviations() {
        for abbr in ["", "MCA", "MCARR", "MC R", "MC-R", "ÉMBR", "all "] {
            let err = validate(abbr).unwrap_err();
            assert!(matches!(err, BartError::InvalidStation(ref s) if s == abbr));
        }
    }

    #[test]
    fn test_all_is_only_valid_for_estimates() {
        assert!(validate("all").is_err());
        assert!(validate_or_all("all").is_ok());
        assert!(validate_or_all("ALL").is_ok());
        assert!(validate_or_all("All").is_ok());
        // four alphanumerics is a station shape, even when it starts with "all"
        assert!(validate_or_all("alls").is_ok());
        assert!(validate_or_all("alls!").is_err());
        assert!(validate_or_all("al").is_err());
        assert_eq!(validate_or_all("ALL").unwrap(), "ALL");
    }

    #[test]
    fn test_error_names_the_input() {
        let err = validate("nope!").unwrap_err();
        assert_eq!(err.to_string(), "Invalid station abbreviation: \"nope!\"");
    }
}
