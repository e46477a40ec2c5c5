//! Builds DRS archives in memory for tests and benchmarks.

#![allow(dead_code)]

use binrw::BinWrite;
use drs::types::{FileInfo, Header, Record, TableDescriptor};
use std::io::Cursor;

/// A table to put in a fixture archive
pub struct FixtureTable {
    pub extension: [u8; 4],
    pub files: Vec<(u32, Vec<u8>)>,
}

/// A built archive along with the position of each table's file infos
pub struct Fixture {
    pub bytes: Vec<u8>,
    pub info_offsets: Vec<usize>,
}

impl Fixture {
    /// Overwrite the declared size of a file
    pub fn set_size(&mut self, table: usize, file: usize, size: u32) {
        let at = self.info_offsets[table] + file * FileInfo::SIZE + 8;
        self.bytes[at..at + 4].copy_from_slice(&size.to_le_bytes());
    }
}

/// Deterministic filler bytes
pub fn payload(seed: u32, len: usize) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}

/// `tables` tables of `files` files each, with varying sizes and extensions
pub fn generated(tables: usize, files: usize) -> Vec<FixtureTable> {
    const EXTENSIONS: [&[u8; 4]; 4] = [b" vaw", b"pslb", b"anib", b"gp  "];
    (0..tables)
        .map(|t| FixtureTable {
            extension: *EXTENSIONS[t % EXTENSIONS.len()],
            files: (0..files)
                .map(|f| {
                    let id = 50_000 + (t * 100 + f) as u32;
                    (id, payload(id, 17 + 31 * f + t))
                })
                .collect(),
        })
        .collect()
}

/// Lay out header, table array, file info arrays and data, in that order
pub fn build(tables: &[FixtureTable]) -> Fixture {
    let mut info_offsets = Vec::with_capacity(tables.len());
    let mut next = Header::SIZE + tables.len() * TableDescriptor::SIZE;
    for table in tables {
        info_offsets.push(next);
        next += table.files.len() * FileInfo::SIZE;
    }
    let file_offset = next;

    let mut out = Cursor::new(Vec::new());
    let mut copyright = [b' '; 40];
    copyright[..25].copy_from_slice(b"Copyright (c) 1997 nobody");
    Header {
        copyright,
        table_count: tables.len() as u32,
        file_offset: file_offset as u32,
        ..Default::default()
    }
    .write(&mut out)
    .unwrap();

    for (table, offset) in tables.iter().zip(&info_offsets) {
        TableDescriptor {
            extension: table.extension,
            file_info_offset: *offset as u32,
            file_count: table.files.len() as u32,
        }
        .write(&mut out)
        .unwrap();
    }

    let mut data_offset = file_offset;
    for table in tables {
        for (id, data) in &table.files {
            FileInfo {
                file_id: *id,
                offset: data_offset as u32,
                size: data.len() as u32,
            }
            .write(&mut out)
            .unwrap();
            data_offset += data.len();
        }
    }

    let mut bytes = out.into_inner();
    for table in tables {
        for (_, data) in &table.files {
            bytes.extend_from_slice(data);
        }
    }

    Fixture {
        bytes,
        info_offsets,
    }
}
