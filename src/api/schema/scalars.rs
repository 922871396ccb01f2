//! Custom GraphQL scalars.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Opaque record identifier, rendered as a hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub Uuid);

#[Scalar(name = "ObjectId")]
impl ScalarType for ObjectId {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => Uuid::parse_str(s)
                .map(ObjectId)
                .map_err(|_| InputValueError::custom(format!("Invalid ObjectId: {}", s))),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.hyphenated().to_string())
    }
}

impl From<Uuid> for ObjectId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ObjectId> for Uuid {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// UTC instant in RFC 3339 form (`2024-01-01T12:00:00Z`).
///
/// Input without an offset is read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub DateTime<Utc>);

#[Scalar(name = "DateTime")]
impl ScalarType for Timestamp {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => parse_instant(s)
                .map(Timestamp)
                .ok_or_else(|| InputValueError::custom(format!("Invalid DateTime: {}", s))),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_object_id_round_trip() {
        let id = ObjectId(Uuid::now_v7());
        let value = id.to_value();
        assert_eq!(value, Value::String(id.0.hyphenated().to_string()));
        assert_eq!(ObjectId::parse(value).unwrap(), id);
    }

    #[test]
    fn test_object_id_rejects_garbage() {
        assert!(ObjectId::parse(Value::String("not-an-id".to_string())).is_err());
        assert!(ObjectId::parse(Value::from(42)).is_err());
    }

    #[test]
    fn test_timestamp_serializes_with_z() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(
            Timestamp(at).to_value(),
            Value::String("2024-01-15T09:30:00Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_round_trip_keeps_sub_seconds() {
        let at = Utc::now();
        let parsed = Timestamp::parse(Timestamp(at).to_value()).unwrap();
        assert_eq!(parsed.0, at);
    }

    #[test]
    fn test_timestamp_accepts_offsets_and_naive_input() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();

        let offset = Timestamp::parse(Value::String("2024-01-15T11:30:00+02:00".to_string()));
        assert_eq!(offset.unwrap().0, expected);

        let naive = Timestamp::parse(Value::String("2024-01-15T09:30:00".to_string()));
        assert_eq!(naive.unwrap().0, expected);
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(Timestamp::parse(Value::String("yesterday".to_string())).is_err());
    }
}
