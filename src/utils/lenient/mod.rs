// Lenient field deserializers
// Stored snapshots are hand-edited and written by older clients; a single
// odd field must not make the whole household unreadable.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoints {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Whole, non-negative point value from whatever was stored.
///
/// Fractions round to the nearest integer, numeric strings are parsed, and
/// anything else (null, negative, non-numeric) counts as zero.
pub fn points<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawPoints::deserialize(deserializer)?;
    let value = match raw {
        RawPoints::Int(value) => value as f64,
        RawPoints::Float(value) => value,
        RawPoints::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        RawPoints::Other(_) => 0.0,
    };
    Ok(clamp_points(value))
}

fn clamp_points(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(u32::MAX as f64) as u32
}

/// `null` reads as the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
