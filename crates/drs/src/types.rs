//! Base types for structure of DRS file.

use std::io::Cursor;

use binrw::{BinRead, BinWrite, Endian};

use crate::error::Result;
use crate::name::decode_extension;

/// The only supported version tag
pub const VERSION: [u8; 4] = *b"1.00";

/// The only supported file type tag
pub const FILE_TYPE: [u8; 12] = *b"tribe\0\0\0\0\0\0\0";

/// A fixed size record of the DRS layout
///
/// Records are decoded field by field at exact byte offsets, never by reinterpreting memory.
pub trait Record: Sized + for<'a> BinRead<Args<'a> = ()> {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Human readable name used in error messages
    const NAME: &'static str;

    /// Decode a record from the first [`Record::SIZE`] bytes of `bytes`
    fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(Self::read_options(
            &mut Cursor::new(bytes),
            Endian::Little,
            (),
        )?)
    }
}

/// DRS file header
///
/// Starts with 40 bytes of free copyright text, then a version ("1.00") and file type ("tribe").
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct Header {
    /// Copyright text, not interpreted
    pub copyright: [u8; 40],

    /// Version tag, "1.00" for every supported archive
    pub version: [u8; 4],

    /// File type tag, "tribe" padded with NUL bytes
    pub file_type: [u8; 12],

    /// The number of tables following the header
    pub table_count: u32,

    /// The offset of the first file's data. Stored as is.
    pub file_offset: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            copyright: [0; 40],
            version: VERSION,
            file_type: FILE_TYPE,
            table_count: Default::default(),
            file_offset: Default::default(),
        }
    }
}

impl Record for Header {
    const SIZE: usize = 64;
    const NAME: &'static str = "header";
}

/// DRS table descriptor
///
/// Defines a group of files sharing an extension
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct TableDescriptor {
    /// The extension in reversed byte order, padded with spaces
    pub extension: [u8; 4],

    /// The offset from the start of the file to this table's file infos
    pub file_info_offset: u32,

    /// The number of files in this table
    pub file_count: u32,
}

impl TableDescriptor {
    /// The extension in display form, see [`decode_extension`]
    pub fn extension(&self) -> String {
        decode_extension(self.extension)
    }
}

impl Record for TableDescriptor {
    const SIZE: usize = 12;
    const NAME: &'static str = "table array";
}

/// DRS file info
///
/// Defines an entry in a table
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct FileInfo {
    /// The identifier of the file, unique within its table
    pub file_id: u32,

    /// The offset to the data of this file from the start of the archive
    pub offset: u32,

    /// The size of the data of this file
    pub size: u32,
}

impl Record for FileInfo {
    const SIZE: usize = 12;
    const NAME: &'static str = "file info array";
}
