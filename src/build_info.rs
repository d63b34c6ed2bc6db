//! Version stamp generated by `build.rs`.
//!
//! The simulator prints [`banner`] before each run so saved output can be
//! matched to the build that produced it.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line banner shown at the top of every simulator run.
pub fn banner() -> String {
    format!("zargon {}", LONG_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(PKG_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_date_parses() {
        assert!(chrono::NaiveDate::parse_from_str(BUILD_DATE, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_long_version_carries_every_part() {
        assert!(LONG_VERSION.starts_with(PKG_VERSION));
        for part in [BUILD_COMMIT, BUILD_DATE, BUILD_PROFILE] {
            assert!(LONG_VERSION.contains(part), "{} missing {}", LONG_VERSION, part);
        }
        assert_eq!(banner(), format!("zargon {}", LONG_VERSION));
    }
}
