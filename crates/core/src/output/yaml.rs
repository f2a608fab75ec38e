//! YAML output formatter

use crate::output::FormatError;
use crate::trail::Trail;

/// Format a trail as a YAML list of breadcrumbs
pub fn format_yaml(trail: &Trail) -> Result<String, FormatError> {
    serde_yaml::to_string(trail).map_err(FormatError::from)
}
