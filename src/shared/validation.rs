use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Signed decimal number as printed in KMA observation tables
    /// - Valid: "12.3", "-4.0", "7", "+0.5", ".5", "5."
    /// - Invalid: "", "-", ".", "1.2.3", "12a"
    pub static ref SIGNED_DECIMAL_REGEX: Regex =
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)$").unwrap();

    /// Client-generated recommendation round id
    /// - Valid: "default", "b7c0e1d2-1f", "session_42"
    /// - Invalid: "", "has space", "semi;colon"
    pub static ref ROUND_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap();
}
