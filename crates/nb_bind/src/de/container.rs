use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use super::DecodeDriver;
use crate::info::TypeInfo;
use crate::path::PathSegment;
use crate::token::StreamingReader;
use crate::{BindError, Reflect};

impl DecodeDriver<'_> {
    /// Decodes the elements of an array against `item_info`.
    ///
    /// Lists, sets and arrays all collect here first; their builders turn the
    /// elements into the concrete container once the closing token is seen.
    pub(super) fn decode_items<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        item_info: &'static TypeInfo,
        owner: &'static str,
        path: Option<&PathSegment<'_>>,
    ) -> Result<Vec<Box<dyn Reflect>>, BindError> {
        reader.start_array()?;
        let mut items = Vec::new();
        while reader.has_next()? {
            let child = PathSegment::with_index(path, owner, items.len());
            items.push(self.decode_info(reader, item_info, child.as_ref())?);
        }
        reader.end_array()?;
        Ok(items)
    }

    /// Decodes the entries of an object against `value_info`, in arrival order.
    pub(super) fn decode_entries<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        value_info: &'static TypeInfo,
        owner: &'static str,
        path: Option<&PathSegment<'_>>,
    ) -> Result<Vec<(String, Box<dyn Reflect>)>, BindError> {
        reader.start_object()?;
        let mut entries = Vec::new();
        while reader.has_next()? {
            let key = reader.next_name()?;
            let child = PathSegment::with_name(path, owner, &key);
            let value = self.decode_info(reader, value_info, child.as_ref())?;
            entries.push((key, value));
        }
        reader.end_object()?;
        Ok(entries)
    }
}
