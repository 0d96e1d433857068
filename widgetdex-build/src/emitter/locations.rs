use super::to_pretty_json;
use crate::catalog::LocationIndex;
use crate::error::Result;

/// Render the location index as pretty-printed JSON.
pub fn render_locations(index: &LocationIndex) -> Result<String> {
    to_pretty_json(index)
}
