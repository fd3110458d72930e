//! Table file format and I/O.
//!
//! Each of the four tables is persisted as a single immutable file holding
//! every row of that table.
//!
//! ## File Format
//!
//! ```text
//! +------------------+
//! | Magic (u64)      |  <- File type marker
//! +------------------+
//! | Version (u32)    |  <- Format version
//! +------------------+
//! | Payload len (u32)|
//! +------------------+
//! | CRC32 (u32)      |  <- Checksum of the payload
//! +------------------+
//! | Payload          |  <- bincode-encoded Vec of rows
//! +------------------+
//! ```

use placelite_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Magic number for table files ("PLCTBL" padded)
const TABLE_MAGIC: u64 = 0x504C_4354_424C_0001;

/// Current table file format version
const FORMAT_VERSION: u32 = 1;

/// Header size in bytes: magic + version + payload length + CRC
const HEADER_SIZE: usize = 8 + 4 + 4 + 4;

/// Write all rows of a table to `path`.
pub fn write_table<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let payload =
        bincode::serialize(rows).map_err(|e| Error::Serialization(e.to_string()))?;
    let crc = crc32fast::hash(&payload);

    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&TABLE_MAGIC.to_le_bytes())?;
    writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
    writer.write_all(&(payload.len() as u32).to_le_bytes())?;
    writer.write_all(&crc.to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;

    Ok(())
}

/// Read all rows of a table from `path`, verifying the header and checksum.
pub fn read_table<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut header = [0u8; HEADER_SIZE];
    reader
        .read_exact(&mut header)
        .map_err(|_| Error::Corrupt(format!("{}: truncated header", path.display())))?;

    let magic = u64::from_le_bytes(header[0..8].try_into().unwrap());
    if magic != TABLE_MAGIC {
        return Err(Error::Corrupt(format!("{}: bad magic", path.display())));
    }

    let version = u32::from_le_bytes(header[8..12].try_into().unwrap());
    if version != FORMAT_VERSION {
        return Err(Error::Corrupt(format!(
            "{}: unsupported format version {}",
            path.display(),
            version
        )));
    }

    let payload_len = u32::from_le_bytes(header[12..16].try_into().unwrap()) as usize;
    let expected_crc = u32::from_le_bytes(header[16..20].try_into().unwrap());

    let mut payload = vec![0u8; payload_len];
    reader
        .read_exact(&mut payload)
        .map_err(|_| Error::Corrupt(format!("{}: truncated payload", path.display())))?;

    let crc = crc32fast::hash(&payload);
    if crc != expected_crc {
        return Err(Error::Corrupt(format!(
            "{}: checksum mismatch (expected {:08x}, got {:08x})",
            path.display(),
            expected_crc,
            crc
        )));
    }

    bincode::deserialize(&payload).map_err(|e| Error::Serialization(e.to_string()))
}
