//! This library handles reading and extracting **DRS** archives used by Genie engine games.
//!
//! # DRS Archive Format Documentation
//!
//! A DRS archive bundles game assets (graphics, sounds, palettes, scripts) into a single file.
//! Files are grouped in tables, every table sharing a single file extension. Files carry no name,
//! only a numeric identifier, so extracted files are named from their table index, identifier and
//! extension: `T<table>F<id>.<extension>`.
//!
//! ## File Structure
//!
//! A DRS file consists of a header, followed by the table array, one file info array per table,
//! and the file data.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Copyright              | 40 bytes: Free text, not interpreted                       |
//! | 0x0028         | Version                | 4 bytes: Fixed value "1.00"                                |
//! | 0x002C         | File Type              | 12 bytes: "tribe" padded with NUL bytes                    |
//! | 0x0038         | Table Count            | 4 bytes: Number of tables in the archive                   |
//! | 0x003C         | File Offset            | 4 bytes: Offset of the first file's data                   |
//!
//! ### Table Array
//!
//! The table array starts right after the header and holds `Table Count` entries:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Extension              | 4 bytes: Reversed, space padded extension (" vaw")      |
//! | 0x0004         | File Info Offset       | 4 bytes: Absolute offset of the table's file infos      |
//! | 0x0008         | File Count             | 4 bytes: Number of files in the table                   |
//!
//! ### File Info Array
//!
//! Each table points to `File Count` contiguous entries:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | File ID                | 4 bytes: Identifier of the file                         |
//! | 0x0004         | File Offset            | 4 bytes: Absolute offset of the file data               |
//! | 0x0008         | File Size              | 4 bytes: Size of the file data                          |
//!
//! Identifiers are not unique across tables, only the pair of table index and identifier is.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.drs`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Compression**: None, file data is stored verbatim
//!

pub mod error;
pub mod extract;
pub mod name;
pub mod read;
pub mod types;

pub use extract::{extract, ExtractOptions, ExtractionReport};
pub use name::make_output_name;
pub use read::{DrsArchive, ReadLimits};
