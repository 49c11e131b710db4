use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Accepts any JSON number and truncates it toward zero. Strings, bools and
/// null are rejected.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }

    match number.as_f64() {
        Some(f) if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(f.trunc() as i64)
        }
        _ => Err(D::Error::custom(format!("{} is not a usable integer", number))),
    }
}
