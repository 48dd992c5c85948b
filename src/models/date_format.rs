//! `dd-MM-yyyy HH:mm` date handling for event payloads and query strings

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
    Deserializer, Serializer,
};

/// chrono pattern equivalent to `dd-MM-yyyy HH:mm`
pub const DATE_PATTERN: &str = "%d-%m-%Y %H:%M";

/// Human readable form of [`DATE_PATTERN`], used in messages
pub const DATE_PATTERN_HINT: &str = "dd-MM-yyyy HH:mm";

pub fn format(date: &NaiveDateTime) -> String {
    date.format(DATE_PATTERN).to_string()
}

pub fn parse(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_PATTERN).ok()
}

/// ISO-8601 rendering used in error messages.
///
/// Seconds are shown only when non-zero, and the fraction only when there is
/// one, in groups of three digits.
pub fn iso(date: &NaiveDateTime) -> String {
    let minutes = date.format("%Y-%m-%dT%H:%M").to_string();
    let nanos = date.nanosecond() % 1_000_000_000;
    if date.second() == 0 && nanos == 0 {
        return minutes;
    }
    let seconds = format!("{}:{:02}", minutes, date.second());
    if nanos == 0 {
        seconds
    } else if nanos % 1_000_000 == 0 {
        format!("{}.{:03}", seconds, nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!("{}.{:06}", seconds, nanos / 1_000)
    } else {
        format!("{}.{:09}", seconds, nanos)
    }
}

/// Serde adapter for `Option<NaiveDateTime>` body fields.
///
/// Serializes with [`DATE_PATTERN`]. Deserialization never fails on a bad
/// value: anything that does not parse becomes `None`.
pub mod lenient {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&format(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(LenientDateVisitor)
    }

    struct LenientDateVisitor;

    impl<'de> Visitor<'de> for LenientDateVisitor {
        type Value = Option<NaiveDateTime>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a date formatted as {}", DATE_PATTERN_HINT)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(parse(value))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }
}
