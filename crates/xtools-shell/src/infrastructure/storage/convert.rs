//! Conversion from parsed TOML into a value graph.
//!
//! | TOML              | Value                          |
//! |-------------------|--------------------------------|
//! | string            | `Text`                         |
//! | integer / float   | `Int` / `Float`                |
//! | boolean           | `Bool`                         |
//! | array             | `List`                         |
//! | table             | `Map` (no prototype)           |
//! | offset datetime   | `Timestamp`                    |
//! | local datetime    | `Timestamp`, read as UTC       |
//! | local date        | `Timestamp` at midnight UTC    |
//! | local time        | `Text` (no date to anchor it)  |

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use toml::value::{Datetime, Offset};
use xtools_core::{List, Map, Timestamp, Value};

use crate::application::config_source::ConfigError;

/// Converts a parsed TOML document into a `Map` value.
///
/// # Errors
///
/// Returns [`ConfigError::Convert`] if a datetime field is out of range.
pub fn table_to_value(table: &toml::Table) -> Result<Value, ConfigError> {
    convert_table(table, "")
}

fn convert_table(table: &toml::Table, prefix: &str) -> Result<Value, ConfigError> {
    let map = Map::new();
    for (key, value) in table {
        let path = join(prefix, key);
        map.insert(key.as_str(), convert(value, &path)?);
    }
    Ok(Value::Map(map))
}

fn convert(value: &toml::Value, path: &str) -> Result<Value, ConfigError> {
    Ok(match value {
        toml::Value::String(s) => Value::from(s.as_str()),
        toml::Value::Integer(i) => Value::Int(*i),
        toml::Value::Float(x) => Value::Float(*x),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => convert_datetime(dt, path)?,
        toml::Value::Array(items) => {
            let list = List::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                list.push(convert(item, &format!("{path}[{i}]"))?);
            }
            Value::List(list)
        }
        toml::Value::Table(table) => convert_table(table, path)?,
    })
}

fn convert_datetime(dt: &Datetime, path: &str) -> Result<Value, ConfigError> {
    let out_of_range = || ConfigError::Convert {
        key: path.to_string(),
        reason: format!("datetime `{dt}` is out of range"),
    };

    let Some(date) = dt.date else {
        // Local time only.
        return Ok(Value::from(dt.to_string()));
    };

    let date = NaiveDate::from_ymd_opt(i32::from(date.year), u32::from(date.month), u32::from(date.day))
        .ok_or_else(out_of_range)?;
    let time = match dt.time {
        Some(t) => NaiveTime::from_hms_nano_opt(
            u32::from(t.hour),
            u32::from(t.minute),
            u32::from(t.second),
            t.nanosecond,
        )
        .ok_or_else(out_of_range)?,
        None => NaiveTime::MIN,
    };
    let naive = NaiveDateTime::new(date, time);

    let instant: DateTime<Utc> = match dt.offset {
        None | Some(Offset::Z) => naive.and_utc(),
        Some(Offset::Custom { minutes }) => FixedOffset::east_opt(i32::from(minutes) * 60)
            .and_then(|offset| offset.from_local_datetime(&naive).single())
            .ok_or_else(out_of_range)?
            .with_timezone(&Utc),
    };

    Ok(Value::Timestamp(Timestamp::new(instant)))
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
