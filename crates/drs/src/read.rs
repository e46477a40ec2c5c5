//! Types for reading DRS archives
//!

use bon::Builder;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::{debug, instrument};

use crate::{
    error::{Error, Result},
    types::{FileInfo, Header, Record, TableDescriptor, FILE_TYPE, VERSION},
};

/// Default exclusive upper bound on the number of tables an archive may declare
pub const MAX_TABLES: u32 = 1024;

/// Default exclusive upper bound on the number of files a table may declare
pub const MAX_FILES: u32 = 4096;

/// Sanity limits applied to the counts an archive declares.
///
/// These are not part of the format. They stop a corrupt archive from requesting huge
/// allocations. Counts equal to or above the limit are rejected.
#[derive(Debug, Clone, Copy, Builder)]
pub struct ReadLimits {
    /// Exclusive upper bound on the table count
    #[builder(default = MAX_TABLES)]
    pub max_tables: u32,

    /// Exclusive upper bound on the file count of a single table
    #[builder(default = MAX_FILES)]
    pub max_files: u32,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_tables: MAX_TABLES,
            max_files: MAX_FILES,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Declared {
    Tables,
    Files,
}

fn check_declared_count(kind: Declared, count: u32, limit: u32) -> Result<u32> {
    if count >= limit {
        return Err(match kind {
            Declared::Tables => Error::TooManyTables { count, limit },
            Declared::Files => Error::TooManyFiles { count, limit },
        });
    }
    Ok(count)
}

// The buffer grows with what is actually read, never with what the archive declares.
fn read_block<R: Read>(reader: &mut R, len: u64, what: &'static str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.take(len).read_to_end(&mut buffer)?;
    let actual = buffer.len() as u64;
    if actual < len {
        return Err(Error::TruncatedInput {
            what,
            expected: len,
            actual,
        });
    }
    Ok(buffer)
}

fn read_records<T: Record, R: Read>(reader: &mut R, count: u32) -> Result<Vec<T>> {
    // u32 count times a small record size always fits
    let len = u64::from(count) * T::SIZE as u64;
    let block = read_block(reader, len, T::NAME)?;
    block.chunks_exact(T::SIZE).map(T::decode).collect()
}

/// Read and validate the 64 byte header at the current position.
///
/// Only the version and file type are checked. The position of the reader is undefined
/// after a failure.
#[instrument(skip(reader), err)]
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let block = read_block(reader, Header::SIZE as u64, Header::NAME)?;
    let header = Header::decode(&block)?;

    if header.version != VERSION {
        return Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(&header.version).into(),
        ));
    }
    if header.file_type != FILE_TYPE {
        return Err(Error::UnsupportedType(
            String::from_utf8_lossy(&header.file_type)
                .trim_end_matches('\0')
                .into(),
        ));
    }

    Ok(header)
}

/// Read `count` table descriptors from the current position.
#[instrument(skip(reader), err)]
pub fn read_table_array<R: Read>(
    reader: &mut R,
    count: u32,
    limits: ReadLimits,
) -> Result<Vec<TableDescriptor>> {
    let count = check_declared_count(Declared::Tables, count, limits.max_tables)?;
    read_records(reader, count)
}

/// Seek to `offset` and read `count` file infos.
#[instrument(skip(reader), err)]
pub fn read_file_info_array<R: Read + Seek>(
    reader: &mut R,
    count: u32,
    offset: u32,
    limits: ReadLimits,
) -> Result<Vec<FileInfo>> {
    let count = check_declared_count(Declared::Files, count, limits.max_files)?;
    seek_to(reader, offset.into())?;
    read_records(reader, count)
}

fn seek_to<R: Seek>(reader: &mut R, offset: u64) -> Result<()> {
    reader
        .seek(SeekFrom::Start(offset))
        .map_err(|source| Error::SeekError { offset, source })?;
    Ok(())
}

/// DRS archive reader
///
/// The header and table array are read up front, file infos are read per table on request.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_drs_contents(reader: impl Read + Seek) -> drs::error::Result<()> {
///     let mut drs = drs::DrsArchive::new(reader)?;
///
///     for i in 0..drs.table_count() {
///         let extension = drs.tables()[i].extension();
///         for info in drs.file_infos(i)? {
///             println!("T{}F{}.{}: {} bytes", i, info.file_id, extension, info.size);
///         }
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DrsArchive<R> {
    reader: R,
    header: Header,
    tables: Vec<TableDescriptor>,
    limits: ReadLimits,
}

impl<R> DrsArchive<R> {
    /// The archive header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The table descriptors in stored order
    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Number of tables contained in this DRS.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of files declared over all tables
    pub fn file_count(&self) -> u64 {
        self.tables.iter().map(|t| u64::from(t.file_count)).sum()
    }

    /// Whether this DRS archive declares no files
    pub fn is_empty(&self) -> bool {
        self.file_count() == 0
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> DrsArchive<R> {
    /// Read a DRS archive with the default [`ReadLimits`].
    pub fn new(reader: R) -> Result<DrsArchive<R>> {
        Self::with_limits(reader, ReadLimits::default())
    }

    /// Read a DRS archive, rejecting declared counts past `limits`.
    ///
    /// The reader is expected to be positioned at the start of the archive.
    pub fn with_limits(mut reader: R, limits: ReadLimits) -> Result<DrsArchive<R>> {
        let header = read_header(&mut reader)?;
        let tables = read_table_array(&mut reader, header.table_count, limits)?;
        debug!(tables = tables.len(), "read table array");

        Ok(DrsArchive {
            reader,
            header,
            tables,
            limits,
        })
    }

    /// Read the file infos of the table at `table_index`
    pub fn file_infos(&mut self, table_index: usize) -> Result<Vec<FileInfo>> {
        let table = self
            .tables
            .get(table_index)
            .ok_or(Error::TableNotFound(table_index))?;

        read_file_info_array(
            &mut self.reader,
            table.file_count,
            table.file_info_offset,
            self.limits,
        )
    }

    /// Copy the data of a file into `writer`, returning the number of bytes written.
    ///
    /// Fails with [`Error::TruncatedInput`] when the archive ends before `size` bytes were
    /// copied. Whatever was copied up to that point stays in `writer`.
    #[instrument(skip(self, writer), err)]
    pub fn copy_file<W: Write + ?Sized>(&mut self, info: &FileInfo, writer: &mut W) -> Result<u64> {
        seek_to(&mut self.reader, info.offset.into())?;

        let expected = u64::from(info.size);
        let copied = io::copy(&mut self.reader.by_ref().take(expected), writer)?;
        if copied < expected {
            return Err(Error::TruncatedInput {
                what: "file data",
                expected,
                actual: copied,
            });
        }

        Ok(copied)
    }
}
