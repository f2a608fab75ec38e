//! JSON output formatter

use crate::output::FormatError;
use crate::trail::Trail;

/// Format a trail as a pretty-printed JSON array of breadcrumbs
pub fn format_json(trail: &Trail) -> Result<String, FormatError> {
    serde_json::to_string_pretty(trail).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json() {
        let mut trail = Trail::new();
        trail.push_new("Home", "/");
        trail.finalize();

        let json: serde_json::Value = serde_json::from_str(&format_json(&trail).unwrap()).unwrap();
        assert_eq!(json[0]["title"], "Home");
        assert_eq!(json[0]["active"], true);
        assert_eq!(format_json(&Trail::new()).unwrap(), "[]");
    }
}
