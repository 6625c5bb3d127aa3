//! Quote data model and JSON encoding helpers.
//!
//! `RawQuote` is what the end-of-day provider returns, `ServedQuote` is what the lookup
//! endpoint hands out. The conversion between the two is a plain field copy with
//! `name` mirroring `symbol`. Served quotes go over the wire as tab-indented JSON,
//! and that exact text is what the server caches.

use std::io;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::QuoteError;

/// Latest end-of-day record as returned by the provider.
///
/// Fields the provider adds beyond these are ignored. Missing or `null` numeric and
/// text fields read as zero/empty; only `symbol` is mandatory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawQuote {
    /// Provider symbol.
    pub symbol: String,
    /// Exchange MIC, e.g. `XNAS`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub exchange: String,
    /// Trading date in the provider's format; passed through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(missing_docs)]
    pub open: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(missing_docs)]
    pub high: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(missing_docs)]
    pub low: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(missing_docs)]
    pub close: f64,
    /// Traded volume for the day.
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: f64,
}

impl RawQuote {
    /// Decode a provider response body.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<RawQuote, QuoteError> {
        serde_json::from_slice(bytes).map_err(|e| QuoteError::UpstreamDecode(e.to_string()))
    }
}

/// Quote in the shape served by the lookup endpoint. Field order is part of the
/// wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServedQuote {
    /// Display name; always the provider symbol.
    pub name: String,
    /// Provider symbol.
    pub symbol: String,
    /// Exchange MIC.
    pub exchange: String,
    /// Trading date, provider format.
    pub date: String,
    #[allow(missing_docs)]
    pub open: f64,
    #[allow(missing_docs)]
    pub high: f64,
    #[allow(missing_docs)]
    pub low: f64,
    #[allow(missing_docs)]
    pub close: f64,
    /// Traded volume; written as an integer when it has no fractional part.
    #[serde(serialize_with = "whole_as_integer")]
    pub volume: f64,
}

impl From<RawQuote> for ServedQuote {
    fn from(raw: RawQuote) -> Self {
        ServedQuote {
            name: raw.symbol.clone(),
            symbol: raw.symbol,
            exchange: raw.exchange,
            date: raw.date,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        }
    }
}

impl ServedQuote {
    /// Encode the quote as tab-indented JSON, the exact body served to clients.
    pub fn to_payload(&self) -> Result<String, QuoteError> {
        let mut buf = Vec::with_capacity(256);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Beyond 2^53 an f64 no longer holds every integer, so leave those as floats.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SBUX_EOD: &str = r#"{"symbol":"SBUX","exchange":"XNAS","date":"2024-01-02","open":84.5,"high":85.0,"low":84.0,"close":84.8,"volume":1000000}"#;

    #[test]
    fn transform_copies_fields_and_mirrors_name() {
        let raw = RawQuote::from_json_bytes(SBUX_EOD.as_bytes()).unwrap();
        let served = ServedQuote::from(raw.clone());
        assert_eq!(served.name, "SBUX");
        assert_eq!(served.symbol, raw.symbol);
        assert_eq!(served.exchange, "XNAS");
        assert_eq!(served.date, "2024-01-02");
        assert_eq!(served.open, 84.5);
        assert_eq!(served.high, 85.0);
        assert_eq!(served.low, 84.0);
        assert_eq!(served.close, 84.8);
        assert_eq!(served.volume, 1_000_000.0);
    }

    #[test]
    fn payload_is_tab_indented_in_fixed_field_order() {
        let raw = RawQuote::from_json_bytes(SBUX_EOD.as_bytes()).unwrap();
        let payload = ServedQuote::from(raw).to_payload().unwrap();
        let expected = "{\n\
            \t\"name\": \"SBUX\",\n\
            \t\"symbol\": \"SBUX\",\n\
            \t\"exchange\": \"XNAS\",\n\
            \t\"date\": \"2024-01-02\",\n\
            \t\"open\": 84.5,\n\
            \t\"high\": 85.0,\n\
            \t\"low\": 84.0,\n\
            \t\"close\": 84.8,\n\
            \t\"volume\": 1000000\n\
            }";
        assert_eq!(payload, expected);
    }

    #[test]
    fn fractional_volume_stays_a_float() {
        let raw = RawQuote::from_json_bytes(br#"{"symbol":"X","volume":12.5}"#).unwrap();
        let payload = ServedQuote::from(raw).to_payload().unwrap();
        assert!(payload.contains("\t\"volume\": 12.5\n"));
    }

    #[test]
    fn provider_extras_and_nulls_are_tolerated() {
        let body = br#"{"symbol":"MSFT","exchange":null,"date":"2024-01-02T00:00:00+0000",
            "open":1.0,"high":null,"adj_close":3.0,"split_factor":1.0}"#;
        let raw = RawQuote::from_json_bytes(body).unwrap();
        assert_eq!(raw.exchange, "");
        assert_eq!(raw.high, 0.0);
        assert_eq!(raw.volume, 0.0);
        assert_eq!(raw.date, "2024-01-02T00:00:00+0000");
    }

    #[test]
    fn non_quote_bodies_fail_to_decode() {
        let bodies: [&[u8]; 4] = [b"<html>oops</html>", b"{\"open\":1.0}", b"{\"symbol\":", b"[]"];
        for body in bodies {
            let err = RawQuote::from_json_bytes(body).unwrap_err();
            assert!(matches!(err, QuoteError::UpstreamDecode(_)), "{err:?}");
        }
    }

    #[test]
    fn payload_reads_back_into_a_served_quote() {
        let raw = RawQuote::from_json_bytes(SBUX_EOD.as_bytes()).unwrap();
        let served = ServedQuote::from(raw);
        let back: ServedQuote = serde_json::from_str(&served.to_payload().unwrap()).unwrap();
        assert_eq!(back, served);
    }
}
