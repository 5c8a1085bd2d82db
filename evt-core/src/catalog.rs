//! Command code to record layout registry

use crate::command_types::Mab;
use crate::record::CommandRecord;
use crate::source::RawCommand;
use crate::Result;
use std::collections::HashMap;

/// Parameter block of a command whose layout is not known
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpaqueRecord {
    /// Command code the block belongs to
    pub code: String,
    /// Raw parameter bytes, preserved verbatim
    pub bytes: Vec<u8>,
}

/// A decoded parameter block, tagged by layout
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Record {
    Mab(Mab),
    Opaque(OpaqueRecord),
}

impl Record {
    /// Command code of the record
    pub fn code(&self) -> &str {
        match self {
            Record::Mab(_) => Mab::CODE,
            Record::Opaque(opaque) => &opaque.code,
        }
    }

    /// Encoded size of the record in bytes
    pub fn size(&self) -> usize {
        match self {
            Record::Mab(_) => Mab::SIZE,
            Record::Opaque(opaque) => opaque.bytes.len(),
        }
    }

    /// Returns true if the record fell back to the opaque layout
    pub fn is_opaque(&self) -> bool {
        matches!(self, Record::Opaque(_))
    }

    /// Encodes the record back into its parameter block
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Record::Mab(mab) => mab.encode(),
            Record::Opaque(opaque) => Ok(opaque.bytes.clone()),
        }
    }
}

impl From<Mab> for Record {
    fn from(mab: Mab) -> Self {
        Record::Mab(mab)
    }
}

/// A record layout with its own [`Record`] variant
pub trait RecordVariant: CommandRecord {
    /// Wraps the record in its variant
    fn into_record(self) -> Record;

    /// Borrows the record back out of its variant
    fn from_record(record: &Record) -> Option<&Self>;
}

impl RecordVariant for Mab {
    fn into_record(self) -> Record {
        Record::Mab(self)
    }

    fn from_record(record: &Record) -> Option<&Self> {
        match record {
            Record::Mab(mab) => Some(mab),
            _ => None,
        }
    }
}

/// Registered decode/encode pair for one command code
#[derive(Clone, Copy)]
struct RecordBinding {
    size: usize,
    decode: fn(&[u8]) -> Result<Record>,
    encode: fn(&Record) -> Result<Vec<u8>>,
}

fn decode_as<R: RecordVariant>(bytes: &[u8]) -> Result<Record> {
    R::decode(bytes).map(R::into_record)
}

fn encode_as<R: RecordVariant>(record: &Record) -> Result<Vec<u8>> {
    match R::from_record(record) {
        Some(typed) => typed.encode(),
        None => record.to_bytes(),
    }
}

/// Registry of known record layouts
///
/// Built once, then shared by reference. Codes without a registered layout
/// decode to [`Record::Opaque`], so every command survives a save cycle.
pub struct CommandCatalog {
    bindings: HashMap<String, RecordBinding>,
}

impl CommandCatalog {
    /// Creates a catalog with every known layout registered
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        catalog.register::<Mab>();
        catalog
    }

    /// Creates a catalog with no layouts; every code decodes as opaque
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Registers the decode/encode pair of layout `R` under its command code
    pub fn register<R: RecordVariant>(&mut self) -> &mut Self {
        self.bindings.insert(
            R::CODE.to_string(),
            RecordBinding {
                size: R::SIZE,
                decode: decode_as::<R>,
                encode: encode_as::<R>,
            },
        );
        self
    }

    pub fn is_registered(&self, code: &str) -> bool {
        self.bindings.contains_key(code)
    }

    /// Declared block size for a registered code
    pub fn record_size(&self, code: &str) -> Option<usize> {
        self.bindings.get(code).map(|b| b.size)
    }

    /// Registered codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Decodes a parameter block for the given command code
    pub fn decode(&self, code: &str, bytes: &[u8]) -> Result<Record> {
        match self.bindings.get(code) {
            Some(binding) => (binding.decode)(bytes),
            None => {
                tracing::debug!(code, size = bytes.len(), "no layout registered, keeping block opaque");
                Ok(Record::Opaque(OpaqueRecord {
                    code: code.to_string(),
                    bytes: bytes.to_vec(),
                }))
            }
        }
    }

    /// Encodes a record back into its parameter block
    ///
    /// Opaque records are written verbatim. A typed record whose code is not
    /// registered here still encodes through its own layout.
    pub fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        if let Record::Opaque(opaque) = record {
            return Ok(opaque.bytes.clone());
        }
        match self.bindings.get(record.code()) {
            Some(binding) => (binding.encode)(record),
            None => record.to_bytes(),
        }
    }

    /// Decodes every command of a list independently
    ///
    /// A failure is reported for its own command only; the rest still decode.
    pub fn decode_all(&self, commands: &[RawCommand]) -> Vec<Result<Record>> {
        commands
            .iter()
            .enumerate()
            .map(|(index, command)| {
                let result = self.decode(&command.header.code, &command.data);
                if let Err(e) = &result {
                    tracing::warn!(index, code = %command.header.code, "failed to decode parameters: {e}");
                }
                result
            })
            .collect()
    }
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self::new()
    }
}
