use crate::shared::validation::SIGNED_DECIMAL_REGEX;

/// Column holding the air temperature in a KMA AWS data row
pub const TEMPERATURE_COLUMN: usize = 8;

const COMMENT_MARKER: char = '#';

/// Extracts the temperature from a KMA observation table: the first row that
/// is neither blank nor a comment, whitespace-split, column 8.
pub fn parse_temperature(body: &str) -> Option<f64> {
    let row = body
        .lines()
        .find(|line| !line.trim().is_empty() && !line.starts_with(COMMENT_MARKER))?;

    let column = row.split_whitespace().nth(TEMPERATURE_COLUMN)?;
    if !SIGNED_DECIMAL_REGEX.is_match(column) {
        return None;
    }

    column.parse().ok()
}
