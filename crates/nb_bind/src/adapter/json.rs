use alloc::string::String;
use core::fmt::Write;

use crate::BindError;
use crate::node::Number;
use crate::token::StreamingWriter;

// -----------------------------------------------------------------------------
// JsonWriter

/// Writes compact JSON text.
///
/// The writer keeps no state about container nesting: separators appear
/// exactly where the encoder asks for them.
///
/// # Examples
///
/// ```
/// use nb_bind::adapter::JsonWriter;
/// use nb_bind::token::StreamingWriter;
///
/// let mut writer = JsonWriter::new();
/// writer.start_array().unwrap();
/// writer.write_number((-4.0).into()).unwrap();
/// writer.write_array_comma().unwrap();
/// writer.write_string("a\"b").unwrap();
/// writer.end_array().unwrap();
///
/// assert_eq!(writer.as_str(), r#"[-4.0,"a\"b"]"#);
/// ```
#[derive(Debug, Default, Clone)]
pub struct JsonWriter {
    buf: String,
}

impl JsonWriter {
    #[inline]
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.buf
    }

    fn push_quoted(&mut self, value: &str) {
        self.buf.push('"');
        let mut start = 0;
        for (index, byte) in value.bytes().enumerate() {
            let escaped = match byte {
                b'"' => "\\\"",
                b'\\' => "\\\\",
                b'\n' => "\\n",
                b'\r' => "\\r",
                b'\t' => "\\t",
                0x08 => "\\b",
                0x0c => "\\f",
                0x00..=0x1f => "",
                _ => continue,
            };
            self.buf.push_str(&value[start..index]);
            if escaped.is_empty() {
                // Infallible for `String`.
                let _ = write!(self.buf, "\\u{byte:04x}");
            } else {
                self.buf.push_str(escaped);
            }
            start = index + 1;
        }
        self.buf.push_str(&value[start..]);
        self.buf.push('"');
    }
}

impl StreamingWriter for JsonWriter {
    fn start_object(&mut self) -> Result<(), BindError> {
        self.buf.push('{');
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), BindError> {
        self.buf.push('}');
        Ok(())
    }

    fn start_array(&mut self) -> Result<(), BindError> {
        self.buf.push('[');
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), BindError> {
        self.buf.push(']');
        Ok(())
    }

    fn write_name(&mut self, name: &str) -> Result<(), BindError> {
        self.push_quoted(name);
        self.buf.push(':');
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<(), BindError> {
        self.push_quoted(value);
        Ok(())
    }

    fn write_number(&mut self, value: Number) -> Result<(), BindError> {
        match value {
            Number::PosInt(v) => self.buf.push_str(itoa::Buffer::new().format(v)),
            Number::NegInt(v) => self.buf.push_str(itoa::Buffer::new().format(v)),
            Number::Float(v) if v.is_finite() => self.buf.push_str(ryu::Buffer::new().format_finite(v)),
            Number::Float(v) => {
                return Err(BindError::invalid("f64", alloc::format!("{v} has no JSON form")));
            }
        }
        Ok(())
    }

    fn write_bool(&mut self, value: bool) -> Result<(), BindError> {
        self.buf.push_str(if value { "true" } else { "false" });
        Ok(())
    }

    fn write_null(&mut self) -> Result<(), BindError> {
        self.buf.push_str("null");
        Ok(())
    }

    #[inline]
    fn write_object_comma(&mut self) -> Result<(), BindError> {
        self.buf.push(',');
        Ok(())
    }

    #[inline]
    fn write_array_comma(&mut self) -> Result<(), BindError> {
        self.buf.push(',');
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// from_json_str

/// Parses JSON text into a [`Node`](crate::node::Node).
///
/// Integer literals without fraction or exponent stay integers:
/// non-negative ones become [`Number::PosInt`], negative ones
/// [`Number::NegInt`]. Everything else becomes [`Number::Float`].
///
/// # Examples
///
/// ```
/// use nb_bind::adapter::from_json_str;
/// use nb_bind::node::{Node, Number};
///
/// assert_eq!(from_json_str("9999999").unwrap(), Node::Number(Number::PosInt(9999999)));
/// assert_eq!(from_json_str("-1").unwrap(), Node::Number(Number::NegInt(-1)));
/// assert_eq!(from_json_str("1e2").unwrap(), Node::Number(Number::Float(100.0)));
/// ```
#[cfg(feature = "json")]
pub fn from_json_str(text: &str) -> Result<crate::node::Node, BindError> {
    use alloc::string::ToString;

    serde_json::from_str(text).map_err(|err| BindError::Syntax(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::JsonWriter;
    use crate::BindError;
    use crate::node::Number;
    use crate::token::StreamingWriter;

    #[test]
    fn escapes_control_characters() {
        let mut writer = JsonWriter::new();
        writer.write_string("tab\there\u{1}é").unwrap();
        assert_eq!(writer.as_str(), "\"tab\\there\\u0001é\"");
    }

    #[test]
    fn commas_only_on_request() {
        let mut writer = JsonWriter::new();
        writer.start_object().unwrap();
        writer.write_name("a").unwrap();
        writer.write_number(Number::NegInt(-3)).unwrap();
        writer.write_object_comma().unwrap();
        writer.write_name("b").unwrap();
        writer.write_bool(false).unwrap();
        writer.end_object().unwrap();
        assert_eq!(writer.into_string(), r#"{"a":-3,"b":false}"#);
    }

    #[test]
    fn non_finite_is_rejected() {
        let mut writer = JsonWriter::new();
        let err = writer.write_number(Number::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, BindError::InvalidValue { .. }));
        assert!(writer.as_str().is_empty());
    }

    #[cfg(feature = "json")]
    #[test]
    fn syntax_errors_are_reported() {
        let err = super::from_json_str("{\"a\":").unwrap_err();
        assert!(matches!(err, BindError::Syntax(_)));
    }
}
