use serde::{Deserialize, Deserializer};

/// Falls back to `T::default()` when a field is present but malformed,
/// instead of failing the whole struct.
pub fn ok_or_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + Default,
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

pub fn format_with_commas(num: f64) -> String {
    let rounded = num.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        result.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}
