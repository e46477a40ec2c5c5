//! Extracting every file of a DRS archive into a directory
//!

use bon::Builder;
use std::{
    fs::{self, File},
    io::{BufWriter, Read, Seek, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{Error, Result},
    name::{make_output_name_with_limit, MAX_NAME_LEN},
    read::{DrsArchive, ReadLimits},
    types::FileInfo,
};

/// Options for how an archive should be extracted
#[derive(Debug, Clone, Copy, Builder)]
pub struct ExtractOptions {
    /// Limits on the counts declared by the archive
    #[builder(default)]
    pub limits: ReadLimits,

    /// The longest output file name allowed, in characters
    #[builder(default = MAX_NAME_LEN)]
    pub max_name_len: usize,

    /// Record failing files in the report and carry on instead of stopping at the first one.
    ///
    /// Failures reading the header, the table array or a file info array still stop the run.
    #[builder(default)]
    pub keep_going: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            limits: ReadLimits::default(),
            max_name_len: MAX_NAME_LEN,
            keep_going: false,
        }
    }
}

/// A file written during extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFile {
    /// Index of the table the file belongs to
    pub table_index: usize,
    /// Identifier of the file within its table
    pub file_id: u32,
    /// Where the file was written
    pub path: PathBuf,
    /// Number of bytes written
    pub size: u64,
}

/// A file that could not be extracted
#[derive(Debug)]
pub struct ExtractionFailure {
    /// Index of the table the file belongs to
    pub table_index: usize,
    /// Identifier of the file within its table
    pub file_id: u32,
    /// What went wrong
    pub error: Error,
}

/// Outcome of [`extract`]
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Files written, in archive order
    pub extracted: Vec<ExtractedFile>,
    /// Files skipped because of an error, only filled with [`ExtractOptions::keep_going`]
    pub failures: Vec<ExtractionFailure>,
}

impl ExtractionReport {
    /// Whether every file of the archive was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of files written
    pub fn len(&self) -> usize {
        self.extracted.len()
    }

    /// Whether no file was written
    pub fn is_empty(&self) -> bool {
        self.extracted.is_empty()
    }

    /// Total number of bytes written
    pub fn total_bytes(&self) -> u64 {
        self.extracted.iter().map(|f| f.size).sum()
    }
}

/// Extract every file of the archive in `reader` into `output_dir`.
///
/// The directory is created if needed and existing files are overwritten. Files are written in
/// table order, then file info order. By default the first error stops the run and files written
/// up to that point, including a partially written one, are left on disk.
///
/// ```no_run
/// # fn doit() -> drs::error::Result<()>
/// # {
/// let archive = std::fs::File::open("sounds.drs")?;
/// let report = drs::extract(archive, "sounds", drs::ExtractOptions::default())?;
/// println!("extracted {} files", report.len());
/// # Ok(())
/// # }
/// ```
#[instrument(skip(reader, output_dir), fields(output_dir = %output_dir.as_ref().display()), err)]
pub fn extract<R: Read + Seek>(
    reader: R,
    output_dir: impl AsRef<Path>,
    options: ExtractOptions,
) -> Result<ExtractionReport> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut archive = DrsArchive::with_limits(reader, options.limits)?;
    let mut report = ExtractionReport::default();

    for table_index in 0..archive.table_count() {
        let extension = archive.tables()[table_index].extension();
        let infos = archive.file_infos(table_index)?;
        debug!(table_index, %extension, files = infos.len(), "extracting table");

        for info in &infos {
            match extract_file(
                &mut archive,
                output_dir,
                table_index,
                info,
                &extension,
                options.max_name_len,
            ) {
                Ok(file) => report.extracted.push(file),
                Err(error) if options.keep_going => {
                    warn!(table_index, file_id = info.file_id, "skipping file: {error}");
                    report.failures.push(ExtractionFailure {
                        table_index,
                        file_id: info.file_id,
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }
    }

    info!(
        files = report.len(),
        bytes = report.total_bytes(),
        failures = report.failures.len(),
        "extraction finished"
    );
    Ok(report)
}

fn extract_file<R: Read + Seek>(
    archive: &mut DrsArchive<R>,
    output_dir: &Path,
    table_index: usize,
    info: &FileInfo,
    extension: &str,
    max_name_len: usize,
) -> Result<ExtractedFile> {
    let name = make_output_name_with_limit(table_index, info, extension, max_name_len)?;
    let path = output_dir.join(name);
    info!("writing {}", path.display());

    let mut out = BufWriter::new(File::create(&path)?);
    let size = archive.copy_file(info, &mut out)?;
    out.flush()?;

    Ok(ExtractedFile {
        table_index,
        file_id: info.file_id,
        path,
        size,
    })
}
