//! Trace header loading and object identity resolution.
//!
//! The header holds the trace start time and a table mapping object
//! identities to human readable descriptions. Every record names its reactor
//! by identity, and [`SymbolTable::describe`] turns that back into a name.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use crate::error::{Result, TraceError};
use crate::trace::{ObjectId, DESCRIPTION_BUFFER_SIZE, NO_DESCRIPTION_FOUND, OBJECT_ID_WIDTH};
use crate::utils::read_header_field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub object: ObjectId,
    pub description: String,
}

/// Object descriptions read from the trace header.
///
/// Entries are kept in file order. Identities are not guaranteed unique by
/// the format; lookups return the first entry for an identity.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    index: HashMap<ObjectId, usize>,
}

impl SymbolTable {
    pub fn with_capacity(capacity: usize) -> Self {
        SymbolTable {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, object: ObjectId, description: String) {
        let pos = self.entries.len();
        self.index.entry(object).or_insert(pos);
        self.entries.push(SymbolEntry {
            object,
            description,
        });
    }

    pub fn get(&self, object: ObjectId) -> Option<&str> {
        self.index
            .get(&object)
            .map(|&i| self.entries[i].description.as_str())
    }

    /// Description of `object`, or [`NO_DESCRIPTION_FOUND`] if it is unknown.
    pub fn describe(&self, object: ObjectId) -> &str {
        self.get(object).unwrap_or(NO_DESCRIPTION_FOUND)
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------- objects traced:")?;
        for entry in &self.entries {
            writeln!(f, "{}: {}", entry.object, entry.description)?;
        }
        write!(f, "-------")
    }
}

/// Decoded trace header.
#[derive(Debug, Default, Clone)]
pub struct TraceHeader {
    pub start_time: i64,
    pub symbols: SymbolTable,
}

/// Read the trace header from the start of `reader`.
///
/// Any short read is fatal. A declared object count that is negative or above
/// `max_objects` is rejected before any table entry is read.
pub fn read_header<R: Read + ?Sized>(reader: &mut R, max_objects: usize) -> Result<TraceHeader> {
    let start_time = i64::from_ne_bytes(read_header_field(reader, "start time")?);
    let count = i32::from_ne_bytes(read_header_field(reader, "object count")?);

    let count_usize = usize::try_from(count)
        .ok()
        .filter(|&n| n <= max_objects)
        .ok_or(TraceError::ObjectCountOutOfRange {
            count,
            max: max_objects,
        })?;

    let mut symbols = SymbolTable::with_capacity(count_usize);
    for _ in 0..count_usize {
        let object = ObjectId::from_ne_bytes(read_header_field::<_, OBJECT_ID_WIDTH>(
            reader,
            "object identity",
        )?);
        let description = read_description(reader)?;
        symbols.insert(object, description);
    }

    Ok(TraceHeader {
        start_time,
        symbols,
    })
}

/// Read a null terminated description one byte at a time.
///
/// At most `DESCRIPTION_BUFFER_SIZE - 1` bytes are kept. When that bound is
/// reached one more byte is consumed and the string ends there, whatever the
/// byte was; anything left of an overlong description stays in the stream.
fn read_description<R: Read + ?Sized>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    loop {
        let [byte] = read_header_field::<_, 1>(reader, "object description")?;
        if byte == 0 || buf.len() == DESCRIPTION_BUFFER_SIZE - 1 {
            break;
        }
        buf.push(byte);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
