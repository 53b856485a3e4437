//! Scalar decoders for the BART JSON surface
//!
//! The agency's JSON output is converted from XML on their side, so scalars
//! show up in a handful of irregular shapes. Each function here is meant to be
//! used with `#[serde(deserialize_with = "...")]` on a response field.
//!
//! | Wire shape                          | Decoded as   | Function        |
//! |-------------------------------------|--------------|-----------------|
//! | `{ "#cdata-section": "text" }`      | `String`     | [`cdata`]       |
//! | `"42"`, `"37.80"`                   | number       | [`number`]      |
//! | `"Leaving"`, `"7"`                  | `u32`        | [`minutes`]     |
//! | `"0"`, `"1"`, `"true"`, `"false"`   | `bool`       | [`flag`]        |
//! | `[{..}, {..}]`, `{..}`, `""`        | `Vec<T>`     | [`one_or_many`] |
//! | `{..}`, `""`                        | `T: Default` | [`blank_or`]    |

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer, StrDeserializer};
use serde::de::{self, Deserializer, IntoDeserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::Deserialize;

/// Key under which the agency stores CDATA text
pub const CDATA_KEY: &str = "#cdata-section";

/// Sentinel the real-time estimates use for "zero minutes"
pub const LEAVING: &str = "Leaving";

/// Parse a minute value, mapping [`LEAVING`] to `0`
#[must_use]
pub fn parse_minutes(raw: &str) -> Option<u32> {
    if raw == LEAVING {
        return Some(0);
    }
    raw.parse().ok()
}

/// Parse one of the boolean spellings the agency uses
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Decode a CDATA-wrapped string. An empty string decodes to an empty string.
pub fn cdata<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CdataVisitor)
}

struct CdataVisitor;

impl<'de> Visitor<'de> for CdataVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object with a {CDATA_KEY:?} string or an empty string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.is_empty() {
            Ok(String::new())
        } else {
            Err(E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut text = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == CDATA_KEY {
                text = Some(map.next_value::<String>()?);
            } else {
                map.next_value::<de::IgnoredAny>()?;
            }
        }
        text.ok_or_else(|| de::Error::missing_field(CDATA_KEY))
    }
}

/// Decode a minute count where `"Leaving"` means `0`
pub fn minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(MinutesVisitor)
}

struct MinutesVisitor;

impl Visitor<'_> for MinutesVisitor {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LEAVING:?} or a whole number of minutes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_minutes(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }
}

/// Decode a boolean carried as `"0"`, `"1"`, `"true"` or `"false"`
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}

struct FlagVisitor;

impl Visitor<'_> for FlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("one of \"0\", \"1\", \"true\", \"false\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_flag(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }
}

/// Decode a number that arrives as a quoted string (bare numbers also work)
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    deserializer.deserialize_any(NumberVisitor(PhantomData))
}

struct NumberVisitor<T>(PhantomData<T>);

impl<T> Visitor<'_> for NumberVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number encoded as a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.is_empty() {
            return Err(E::invalid_value(Unexpected::Str(v), &self));
        }
        v.parse()
            .map_err(|e| E::custom(format_args!("invalid number {v:?}: {e}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        self.visit_str(&v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        self.visit_str(&v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        self.visit_str(&v.to_string())
    }
}

/// Decode a list that may be an array, a single bare element, `""` or `null`.
///
/// Single-element lists lose their array brackets in the agency's XML to JSON
/// conversion.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_any(OneOrManyVisitor(PhantomData))
}

struct OneOrManyVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for OneOrManyVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Vec<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list, a single element or an empty string")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(items)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        T::deserialize(MapAccessDeserializer::new(map)).map(|item| vec![item])
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.is_empty() {
            return Ok(Vec::new());
        }
        let text: StrDeserializer<'_, E> = v.into_deserializer();
        T::deserialize(text).map(|item| vec![item])
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }
}

/// Decode a value that the agency replaces with `""` when it has no content
pub fn blank_or<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    deserializer.deserialize_any(BlankOrVisitor(PhantomData))
}

struct BlankOrVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for BlankOrVisitor<T>
where
    T: Deserialize<'de> + Default,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object or an empty string")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        T::deserialize(MapAccessDeserializer::new(map))
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        T::deserialize(SeqAccessDeserializer::new(seq))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.is_empty() {
            Ok(T::default())
        } else {
            Err(E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(T::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Text {
        #[serde(deserialize_with = "cdata")]
        value: String,
    }

    #[derive(Debug, Deserialize)]
    struct Minutes {
        #[serde(deserialize_with = "minutes")]
        value: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "flag")]
        value: bool,
    }

    #[derive(Debug, Deserialize)]
    struct Count {
        #[serde(deserialize_with = "number")]
        value: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Coordinate {
        #[serde(deserialize_with = "number")]
        value: f64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Items {
        #[serde(default, deserialize_with = "one_or_many")]
        value: Vec<Item>,
    }

    #[derive(Debug, Deserialize)]
    struct Names {
        #[serde(default, deserialize_with = "one_or_many")]
        value: Vec<String>,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(default, deserialize_with = "one_or_many")]
        item: Vec<Item>,
    }

    #[derive(Debug, Deserialize)]
    struct MaybeBlank {
        #[serde(deserialize_with = "blank_or")]
        value: Wrapper,
    }

    fn decode<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("Leaving"), Some(0));
        assert_eq!(parse_minutes("7"), Some(7));
        assert_eq!(parse_minutes("leaving"), None);
        assert_eq!(parse_minutes(""), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_cdata_section() {
        let text: Text = decode(r##"{"value":{"#cdata-section":"No delays reported."}}"##).unwrap();
        assert_eq!(text.value, "No delays reported.");
    }

    #[test]
    fn test_cdata_empty_string() {
        let text: Text = decode(r#"{"value":""}"#).unwrap();
        assert_eq!(text.value, "");
    }

    #[test]
    fn test_cdata_rejects_other_shapes() {
        assert!(decode::<Text>(r#"{"value":"plain"}"#).is_err());
        assert!(decode::<Text>(r#"{"value":{"text":"x"}}"#).is_err());
        assert!(decode::<Text>(r#"{"value":12}"#).is_err());
    }

    #[test]
    fn test_minutes_leaving() {
        let m: Minutes = decode(r#"{"value":"Leaving"}"#).unwrap();
        assert_eq!(m.value, 0);

        let m: Minutes = decode(r#"{"value":"7"}"#).unwrap();
        assert_eq!(m.value, 7);
    }

    #[test]
    fn test_minutes_rejects_garbage() {
        assert!(decode::<Minutes>(r#"{"value":"LEAVING"}"#).is_err());
        assert!(decode::<Minutes>(r#"{"value":"soon"}"#).is_err());
    }

    #[test]
    fn test_flag_spellings() {
        let cases = [
            ("\"1\"", true),
            ("\"0\"", false),
            ("\"true\"", true),
            ("\"false\"", false),
            ("true", true),
        ];
        for (raw, expected) in cases {
            let f: Flag = decode(&format!(r#"{{"value":{raw}}}"#)).unwrap();
            assert_eq!(f.value, expected, "input {raw}");
        }
        assert!(decode::<Flag>(r#"{"value":"TRUE"}"#).is_err());
    }

    #[test]
    fn test_string_numbers() {
        let c: Count = decode(r#"{"value":"42"}"#).unwrap();
        assert_eq!(c.value, 42);

        let c: Count = decode(r#"{"value":42}"#).unwrap();
        assert_eq!(c.value, 42);

        let c: Coordinate = decode(r#"{"value":"-122.283451"}"#).unwrap();
        assert!((c.value + 122.283_451).abs() < 1e-9);
    }

    #[test]
    fn test_string_numbers_reject_empty_and_text() {
        assert!(decode::<Count>(r#"{"value":""}"#).is_err());
        assert!(decode::<Count>(r#"{"value":"forty"}"#).is_err());
        assert!(decode::<Count>(r#"{"value":"4.5"}"#).is_err());
    }

    #[test]
    fn test_one_or_many_shapes() {
        let items: Items = decode(r#"{"value":[{"name":"a"},{"name":"b"}]}"#).unwrap();
        assert_eq!(items.value.len(), 2);

        let items: Items = decode(r#"{"value":{"name":"a"}}"#).unwrap();
        assert_eq!(items.value, vec![Item { name: "a".to_string() }]);

        let items: Items = decode(r#"{"value":""}"#).unwrap();
        assert!(items.value.is_empty());

        let items: Items = decode(r"{}").unwrap();
        assert!(items.value.is_empty());
    }

    #[test]
    fn test_one_or_many_strings() {
        let names: Names = decode(r#"{"value":["MLBR","SFIA"]}"#).unwrap();
        assert_eq!(names.value, vec!["MLBR", "SFIA"]);

        let names: Names = decode(r#"{"value":"MLBR"}"#).unwrap();
        assert_eq!(names.value, vec!["MLBR"]);

        let names: Names = decode(r#"{"value":""}"#).unwrap();
        assert!(names.value.is_empty());
    }

    #[test]
    fn test_blank_or() {
        let v: MaybeBlank = decode(r#"{"value":""}"#).unwrap();
        assert_eq!(v.value, Wrapper::default());

        let v: MaybeBlank = decode(r#"{"value":{"item":{"name":"x"}}}"#).unwrap();
        assert_eq!(v.value.item.len(), 1);

        assert!(decode::<MaybeBlank>(r#"{"value":"nope"}"#).is_err());
    }

    #[test]
    fn test_one_or_many_keeps_inner_error() {
        let err = decode::<Items>(r#"{"value":{"name":7}}"#).unwrap_err();
        assert!(err.to_string().contains("expected a string"), "{err}");

        let err = decode::<Items>(r#"{"value":[{"name":"a"},{"nom":"b"}]}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `name`"), "{err}");
    }

    #[test]
    fn test_blank_or_keeps_inner_error() {
        let err = decode::<MaybeBlank>(r#"{"value":{"item":{"name":false}}}"#).unwrap_err();
        assert!(err.to_string().contains("expected a string"), "{err}");
    }
}
