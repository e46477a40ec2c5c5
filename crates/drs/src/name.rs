//! Output file naming.
//!
//! DRS entries have no names, only numeric identifiers. Extracted files are named
//! `T<table index>F<file id>.<extension>`.

use tracing::instrument;

use crate::error::{Error, Result};
use crate::types::FileInfo;

/// The longest name, in characters, [`make_output_name`] will produce
pub const MAX_NAME_LEN: usize = 64;

/// Convert a stored table extension to its display form.
///
/// Bytes are taken from last to first and spaces are dropped, so `" vaw"` becomes `"wav"`
/// and `"gp  "` becomes `"pg"`. NUL bytes are dropped as well, so `"ab\0c"` becomes `"cba"`.
/// Bytes from 0x80 up are kept as the code point of the same value and so take two bytes
/// once encoded, e.g. 0xE9 is written as `C3 A9`.
///
/// For archives with NUL or non-ASCII extension bytes the resulting names differ from the
/// ones the legacy `drsb` tool wrote, which stopped at the first NUL and copied raw bytes.
pub fn decode_extension(raw: [u8; 4]) -> String {
    raw.iter()
        .rev()
        .filter(|&&b| b != b' ' && b != b'\0')
        .map(|&b| char::from(b))
        .collect()
}

/// Generate the output name of a file, limited to [`MAX_NAME_LEN`] characters.
///
/// ```
/// use drs::{make_output_name, types::FileInfo};
///
/// let info = FileInfo { file_id: 7, ..Default::default() };
/// assert_eq!(make_output_name(2, &info, "pg").unwrap(), "T2F7.pg");
/// ```
pub fn make_output_name(table_index: usize, file_info: &FileInfo, extension: &str) -> Result<String> {
    make_output_name_with_limit(table_index, file_info, extension, MAX_NAME_LEN)
}

/// Generate the output name of a file, failing with [`Error::NameTooLong`] past `limit` characters.
#[instrument(level = "trace", skip(file_info), fields(file_id = file_info.file_id), err)]
pub fn make_output_name_with_limit(
    table_index: usize,
    file_info: &FileInfo,
    extension: &str,
    limit: usize,
) -> Result<String> {
    bounded(
        format!("T{}F{}.{}", table_index, file_info.file_id, extension),
        limit,
    )
}

fn bounded(name: String, limit: usize) -> Result<String> {
    let len = name.chars().count();
    if len > limit {
        return Err(Error::NameTooLong { name, len, limit });
    }
    Ok(name)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{bounded, decode_extension, make_output_name, make_output_name_with_limit};
    use crate::error::{Error, Result};
    use crate::types::FileInfo;

    fn info(file_id: u32) -> FileInfo {
        FileInfo {
            file_id,
            ..Default::default()
        }
    }

    #[test]
    fn extension_is_reversed_and_trimmed() {
        assert_eq!(decode_extension(*b"gp  "), "pg");
        assert_eq!(decode_extension(*b" vaw"), "wav");
        assert_eq!(decode_extension(*b"pslb"), "blsp");
        assert_eq!(decode_extension(*b"a b "), "ba");
    }

    #[test]
    fn extension_skips_nul_bytes() {
        assert_eq!(decode_extension(*b"ab\0c"), "cba");
    }

    #[test]
    fn extension_of_spaces_is_empty() {
        assert_eq!(decode_extension(*b"    "), "");
        assert_eq!(decode_extension([0; 4]), "");
    }

    #[test]
    fn extension_keeps_high_bytes() {
        let extension = decode_extension([b' ', 0xE9, b'x', b't']);
        assert_eq!(extension, "tx\u{e9}");
        assert_eq!(extension.as_bytes(), [b't', b'x', 0xC3, 0xA9]);
    }

    #[test]
    fn name_format() -> Result<()> {
        assert_eq!(make_output_name(2, &info(7), &decode_extension(*b"gp  "))?, "T2F7.pg");
        assert_eq!(make_output_name(0, &info(50500), "wav")?, "T0F50500.wav");
        assert_eq!(make_output_name(1, &info(3), "")?, "T1F3.");
        Ok(())
    }

    #[test]
    fn name_renders_ids_unsigned() -> Result<()> {
        assert_eq!(
            make_output_name(1023, &info(u32::MAX), "blsp")?,
            "T1023F4294967295.blsp"
        );
        Ok(())
    }

    #[test]
    fn name_at_ceiling_is_accepted() -> Result<()> {
        let name = "a".repeat(64);
        assert_eq!(bounded(name.clone(), 64)?, name);
        Ok(())
    }

    #[test]
    fn name_past_ceiling_is_rejected() {
        let err = bounded("a".repeat(65), 64).unwrap_err();
        assert!(matches!(err, Error::NameTooLong { len: 65, limit: 64, .. }));
    }

    #[test]
    fn name_limit_is_applied_to_rendered_name() {
        assert!(make_output_name_with_limit(2, &info(7), "pg", 7).is_ok());
        assert!(matches!(
            make_output_name_with_limit(2, &info(7), "pg", 6),
            Err(Error::NameTooLong { len: 7, limit: 6, .. })
        ));
    }
}
