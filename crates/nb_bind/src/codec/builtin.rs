use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Write;
use core::time::Duration;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::BindError;
use crate::codec::{ValueCodec, WireKind};
use crate::info::Typed;
use crate::node::{Node, Number};

#[inline]
fn expect_string(wire: Node) -> Result<String, BindError> {
    match wire {
        Node::String(text) => Ok(text),
        other => Err(BindError::mismatch("STRING", other.token())),
    }
}

// -----------------------------------------------------------------------------
// PathBuf

/// `PathBuf` as a string. Paths that are not valid UTF-8 cannot be encoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathBufCodec;

impl ValueCodec for PathBufCodec {
    type Value = PathBuf;

    #[inline]
    fn wire_kind(&self) -> WireKind {
        WireKind::String
    }

    fn encode(&self, value: &PathBuf) -> Result<Node, BindError> {
        match value.to_str() {
            Some(text) => Ok(Node::from(text)),
            None => Err(BindError::invalid(
                PathBuf::type_info().type_path(),
                "path is not valid UTF-8",
            )),
        }
    }

    #[inline]
    fn decode(&self, wire: Node) -> Result<PathBuf, BindError> {
        expect_string(wire).map(PathBuf::from)
    }
}

// -----------------------------------------------------------------------------
// IpAddr

/// `IpAddr` in its textual form, e.g. `127.0.0.1` or `::1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IpAddrCodec;

impl ValueCodec for IpAddrCodec {
    type Value = IpAddr;

    #[inline]
    fn wire_kind(&self) -> WireKind {
        WireKind::String
    }

    #[inline]
    fn encode(&self, value: &IpAddr) -> Result<Node, BindError> {
        Ok(Node::String(value.to_string()))
    }

    fn decode(&self, wire: Node) -> Result<IpAddr, BindError> {
        let text = expect_string(wire)?;
        text.parse::<IpAddr>().map_err(|err| {
            BindError::invalid(IpAddr::type_info().type_path(), format!("`{text}`: {err}"))
        })
    }
}

// -----------------------------------------------------------------------------
// Duration

/// `Duration` as an ISO-8601 duration such as `PT1.5S` or `PT1H30M`.
///
/// Decoding accepts `P[nD][T[nH][nM][n[.f]S]]`, case-insensitively.
/// Negative durations are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct DurationCodec;

impl ValueCodec for DurationCodec {
    type Value = Duration;

    #[inline]
    fn wire_kind(&self) -> WireKind {
        WireKind::String
    }

    #[inline]
    fn encode(&self, value: &Duration) -> Result<Node, BindError> {
        Ok(Node::String(format_iso_duration(*value)))
    }

    fn decode(&self, wire: Node) -> Result<Duration, BindError> {
        let text = expect_string(wire)?;
        parse_iso_duration(&text).ok_or_else(|| {
            BindError::invalid(
                Duration::type_info().type_path(),
                format!("`{text}` is not an ISO-8601 duration"),
            )
        })
    }
}

fn format_iso_duration(value: Duration) -> String {
    let total = value.as_secs();
    let nanos = value.subsec_nanos();
    let (hours, minutes, secs) = (total / 3600, total % 3600 / 60, total % 60);

    let mut out = String::from("PT");
    // Writing into a `String` cannot fail.
    if hours > 0 {
        let _ = write!(out, "{hours}H");
    }
    if minutes > 0 {
        let _ = write!(out, "{minutes}M");
    }
    if secs > 0 || nanos > 0 || total == 0 {
        let _ = write!(out, "{secs}");
        if nanos > 0 {
            let frac = format!("{nanos:09}");
            out.push('.');
            out.push_str(frac.trim_end_matches('0'));
        }
        out.push('S');
    }
    out
}

fn parse_iso_duration(text: &str) -> Option<Duration> {
    let rest = text.strip_prefix(['P', 'p'])?;
    let (days, time) = match rest.find(['T', 't']) {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };

    let mut secs: u64 = 0;
    let mut nanos: u32 = 0;
    if !days.is_empty() {
        let days = parse_digits(days.strip_suffix(['D', 'd'])?)?;
        secs = days.checked_mul(86_400)?;
    }

    match time {
        None if days.is_empty() => return None,
        None => {}
        Some("") => return None,
        Some(mut time) => {
            let mut last_rank = 0;
            while !time.is_empty() {
                let end = time.find(|c: char| c.is_ascii_alphabetic())?;
                let value = &time[..end];
                let unit = time.as_bytes()[end].to_ascii_uppercase();
                time = &time[end + 1..];

                let (rank, scale) = match unit {
                    b'H' => (1, 3600),
                    b'M' => (2, 60),
                    b'S' => (3, 1),
                    _ => return None,
                };
                if rank <= last_rank {
                    return None;
                }
                last_rank = rank;

                if unit == b'S' {
                    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
                    secs = secs.checked_add(parse_digits(whole)?)?;
                    nanos = parse_nanos(frac)?;
                } else {
                    secs = secs.checked_add(parse_digits(value)?.checked_mul(scale)?)?;
                }
            }
        }
    }

    Some(Duration::new(secs, nanos))
}

#[inline]
fn parse_digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_nanos(frac: &str) -> Option<u32> {
    if frac.is_empty() {
        return Some(0);
    }
    if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: u32 = frac.parse().ok()?;
    Some(digits * 10_u32.pow(9 - frac.len() as u32))
}

// -----------------------------------------------------------------------------
// SystemTime

/// `SystemTime` as milliseconds since the Unix epoch.
///
/// Decoding also accepts the same number written as a string.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeCodec;

impl ValueCodec for SystemTimeCodec {
    type Value = SystemTime;

    fn encode(&self, value: &SystemTime) -> Result<Node, BindError> {
        let number = match value.duration_since(UNIX_EPOCH) {
            Ok(after) => u64::try_from(after.as_millis()).ok().map(Number::PosInt),
            Err(before) => {
                let before = before.duration();
                let round_up = u128::from(before.subsec_nanos() % 1_000_000 != 0);
                i64::try_from(before.as_millis() + round_up)
                    .ok()
                    .map(|millis| Number::from(-millis))
            }
        };
        number.map(Node::Number).ok_or_else(|| {
            BindError::invalid(SystemTime::type_info().type_path(), "out of the millisecond range")
        })
    }

    fn decode(&self, wire: Node) -> Result<SystemTime, BindError> {
        let type_path = SystemTime::type_info().type_path();
        let millis = match &wire {
            Node::Number(number) => number.as_i64(),
            Node::String(text) => text.parse::<i64>().ok(),
            other => return Err(BindError::mismatch("NUMBER", other.token())),
        }
        .ok_or_else(|| BindError::invalid(type_path, format!("`{wire}` is not epoch milliseconds")))?;

        let offset = Duration::from_millis(millis.unsigned_abs());
        let time = if millis >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        };
        time.ok_or_else(|| BindError::invalid(type_path, "out of the platform time range"))
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use std::time::UNIX_EPOCH;

    use super::{SystemTimeCodec, format_iso_duration, parse_iso_duration};
    use crate::codec::ValueCodec;
    use crate::node::{Node, Number};

    #[test]
    fn duration_formats_like_iso() {
        assert_eq!(format_iso_duration(Duration::from_millis(1500)), "PT1.5S");
        assert_eq!(format_iso_duration(Duration::from_secs(5400)), "PT1H30M");
        assert_eq!(format_iso_duration(Duration::ZERO), "PT0S");
        assert_eq!(format_iso_duration(Duration::new(3601, 1)), "PT1H1.000000001S");
    }

    #[test]
    fn duration_parses_components() {
        assert_eq!(parse_iso_duration("PT1.5S"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_iso_duration("PT1H30M"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_iso_duration("pt2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_iso_duration("P1DT1S"), Some(Duration::from_secs(86_401)));
        assert_eq!(parse_iso_duration("P2D"), Some(Duration::from_secs(172_800)));
        assert_eq!(parse_iso_duration("PT"), None);
        assert_eq!(parse_iso_duration("PT1S1M"), None);
        assert_eq!(parse_iso_duration("PT-1S"), None);
        assert_eq!(parse_iso_duration("P+1D"), None);
        assert_eq!(parse_iso_duration("PT+1S"), None);
        assert_eq!(parse_iso_duration("1S"), None);
    }

    #[test]
    fn system_time_uses_epoch_millis() {
        let codec = SystemTimeCodec;
        let time = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        assert_eq!(
            codec.encode(&time).unwrap(),
            Node::Number(Number::PosInt(1_700_000_000_123))
        );
        assert_eq!(codec.decode(Node::from("1700000000123")).unwrap(), time);

        let before = UNIX_EPOCH - Duration::from_millis(5);
        assert_eq!(codec.encode(&before).unwrap(), Node::from(-5_i64));
        assert_eq!(codec.decode(Node::from(-5_i64)).unwrap(), before);
        assert!(codec.decode(Node::from(true)).is_err());
    }
}
