use clap::{
    builder::{PathBufValueParser, TypedValueParser},
    Args,
};
use drs::ExtractOptions;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{fs::File, io::BufReader, path::PathBuf};
use tracing::{error, info};

/// Paths at or past this many bytes are refused
const MAX_PATH_LEN: usize = 512;

/// Any path, UTF-8 or not, shorter than [`MAX_PATH_LEN`] bytes
fn bounded_path() -> impl TypedValueParser<Value = PathBuf> {
    PathBufValueParser::new().try_map(|path: PathBuf| {
        if path.as_os_str().len() >= MAX_PATH_LEN {
            return Err(format!(
                "length exceeded the {} bytes allowed",
                MAX_PATH_LEN
            ));
        }
        Ok(path)
    })
}

#[derive(Args)]
pub struct ExtractArgs {
    /// An input DRS file
    #[arg(value_name = "DRS_FILE", value_parser = bounded_path())]
    pub archive: PathBuf,

    /// A target directory, created if missing
    #[arg(short, long, value_name = "OUT_DIR", value_parser = bounded_path())]
    pub output: PathBuf,

    /// Report files that fail to extract and continue with the rest
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.archive)
            .into_diagnostic()
            .context(format!("path: {}", &self.archive.display()))?;

        let report = drs::extract(
            BufReader::new(f),
            &self.output,
            ExtractOptions::builder()
                .keep_going(self.keep_going)
                .build(),
        )
        .context(format!("extracting {}", &self.archive.display()))?;

        info!(
            "extracted {} files ({} bytes) into {}",
            report.len(),
            report.total_bytes(),
            self.output.display()
        );

        if !report.is_complete() {
            for failure in &report.failures {
                error!(
                    "T{}F{}: {}",
                    failure.table_index, failure.file_id, failure.error
                );
            }
            return Err(miette!(
                "{} files could not be extracted",
                report.failures.len()
            ));
        }

        Ok(())
    }
}
