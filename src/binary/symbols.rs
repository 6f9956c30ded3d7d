//! Per-session symbol table for the binary codec.
//!
//! The first time a symbol text is written it goes out inline and takes the
//! next index; later occurrences are written as a back-reference to that
//! index. A reader rebuilds the same table in the same order, so writer and
//! reader must each start from a fresh [`SymbolHashList`] for one stream.
//!
//! Entry layout: a VarByte `n`. Odd `n` is a back-reference to index `n >> 1`;
//! even `n` is followed by `n >> 1` bytes of UTF-8 text.

use super::varbyte::{read_bytes, read_var_usize, write_var_usize};
use crate::{Error, Result};
use indexmap::IndexSet;
use std::io::{Read, Write};
use tracing::trace;

#[derive(Clone, Debug, Default)]
pub struct SymbolHashList {
    symbols: IndexSet<String>,
}

impl SymbolHashList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub fn index_of(&self, text: &str) -> Option<usize> {
        self.symbols.get_index_of(text)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.symbols.get_index(index).map(String::as_str)
    }

    /// Adds `text` if it is new and returns its index.
    pub fn register(&mut self, text: &str) -> usize {
        if let Some(index) = self.index_of(text) {
            return index;
        }
        let (index, _) = self.symbols.insert_full(text.to_string());
        trace!("Registered symbol {:?} at index {}", text, index);
        index
    }

    /// Writes a symbol entry, inline on first use and as a back-reference after.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_symbol<W: Write>(&mut self, writer: &mut W, text: &str) -> Result<()> {
        if let Some(index) = self.index_of(text) {
            trace!("Back-reference to symbol {}", index);
            return write_var_usize(writer, (index << 1) | 1);
        }
        write_var_usize(writer, text.len() << 1)?;
        writer.write_all(text.as_bytes())?;
        self.register(text);
        Ok(())
    }

    /// Reads a symbol entry, registering inline text.
    ///
    /// # Errors
    ///
    /// Returns an invariant error for a back-reference past the end of the
    /// table and a format error for invalid UTF-8.
    pub fn read_symbol<R: Read>(&mut self, reader: &mut R) -> Result<String> {
        let entry = read_var_usize(reader)?;
        if entry & 1 == 1 {
            let index = entry >> 1;
            trace!("Resolving symbol back-reference {}", index);
            return self.get(index).map(str::to_string).ok_or_else(|| {
                Error::invariant(format!(
                    "symbol back-reference {} out of range (table has {})",
                    index,
                    self.len()
                ))
            });
        }
        let bytes = read_bytes(reader, entry >> 1)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::format(format!("symbol text is not UTF-8: {}", e)))?;
        self.register(&text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_occurrence_is_back_reference() {
        let mut table = SymbolHashList::new();
        let mut buf = Vec::new();
        table.write_symbol(&mut buf, "abc").unwrap();
        table.write_symbol(&mut buf, "de").unwrap();
        table.write_symbol(&mut buf, "abc").unwrap();
        assert_eq!(buf, vec![0x86, b'a', b'b', b'c', 0x84, b'd', b'e', 0x81]);

        let mut reader = SymbolHashList::new();
        let mut input = &buf[..];
        let read: Vec<String> = (0..3)
            .map(|_| reader.read_symbol(&mut input).unwrap())
            .collect();
        assert_eq!(read, vec!["abc", "de", "abc"]);
        assert_eq!(reader.len(), 2);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut table = SymbolHashList::new();
        assert_eq!(table.register("x"), 0);
        assert_eq!(table.register("y"), 1);
        assert_eq!(table.register("x"), 0);
        assert_eq!(table.get(1), Some("y"));
        assert_eq!(table.index_of("z"), None);
    }

    #[test]
    fn test_dangling_back_reference() {
        let mut table = SymbolHashList::new();
        let buf = [0x83u8];
        assert!(matches!(
            table.read_symbol(&mut &buf[..]),
            Err(Error::Invariant(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut table = SymbolHashList::new();
        let buf = [0x84u8, 0xFF, 0xFE];
        assert!(matches!(
            table.read_symbol(&mut &buf[..]),
            Err(Error::Format(_))
        ));
    }
}
