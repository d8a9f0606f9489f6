//! Build metadata embedded by build.rs

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version and build stamp reported by `nutrisafe_status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamp(option_env!("NUTRISAFE_BUILD_NUMBER"), option_env!("NUTRISAFE_BUILD_TIMESTAMP"))
    }

    fn from_stamp(build_number: Option<&str>, build_timestamp: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build_number: build_number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: build_timestamp.unwrap_or("unknown"),
        }
    }
}

/// One-line banner on stderr; stdout carries the MCP stream
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!(
        "NutriSafe nutrition & allergen engine v{} (build {}, {})",
        info.version, info.build_number, info.build_timestamp
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_parsing() {
        let info = BuildInfo::from_stamp(Some("42"), Some("2026-01-01T00:00:00Z"));
        assert_eq!(info.build_number, 42);
        assert_eq!(info.build_timestamp, "2026-01-01T00:00:00Z");
        assert_eq!(info.version, VERSION);
    }

    #[test]
    fn test_missing_or_bad_stamp_falls_back() {
        let info = BuildInfo::from_stamp(Some("4x2"), None);
        assert_eq!(info.build_number, 0);
        assert_eq!(info.build_timestamp, "unknown");
    }
}
