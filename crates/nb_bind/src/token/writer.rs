use crate::BindError;
use crate::node::Number;

// -----------------------------------------------------------------------------
// StreamingWriter

/// A token sink, the mirror of [`StreamingReader`](crate::token::StreamingReader).
///
/// The encoder calls [`write_object_comma`] before every object entry but the
/// first, and [`write_array_comma`] likewise for array elements. Writers without
/// separators keep the default no-op.
///
/// [`write_object_comma`]: StreamingWriter::write_object_comma
/// [`write_array_comma`]: StreamingWriter::write_array_comma
pub trait StreamingWriter {
    fn start_object(&mut self) -> Result<(), BindError>;

    fn end_object(&mut self) -> Result<(), BindError>;

    fn start_array(&mut self) -> Result<(), BindError>;

    fn end_array(&mut self) -> Result<(), BindError>;

    /// Writes the name of the next object entry.
    fn write_name(&mut self, name: &str) -> Result<(), BindError>;

    fn write_string(&mut self, value: &str) -> Result<(), BindError>;

    fn write_number(&mut self, value: Number) -> Result<(), BindError>;

    fn write_bool(&mut self, value: bool) -> Result<(), BindError>;

    fn write_null(&mut self) -> Result<(), BindError>;

    /// Separates two object entries.
    #[inline]
    fn write_object_comma(&mut self) -> Result<(), BindError> {
        Ok(())
    }

    /// Separates two array elements.
    #[inline]
    fn write_array_comma(&mut self) -> Result<(), BindError> {
        Ok(())
    }
}
