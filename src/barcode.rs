use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::options::{parse_options, BarcodeOptions};
use crate::render::{write_symbol, OutputFormat};
use crate::symbology::{encode, BarcodeType};

#[derive(Debug)]
pub struct GenerateResult {
    pub kind: BarcodeType,
    pub output_path: PathBuf,
    pub format: OutputFormat,
}

/// Append `.png` when `output` has no extension.
pub fn barcode_output_path(output: &Path) -> PathBuf {
    if output.extension().is_some() {
        output.to_path_buf()
    } else {
        output.with_extension("png")
    }
}

/// Generate a barcode of the named type, with options in `key=value,flag` form.
pub fn generate_barcode(
    data: &str,
    barcode_type: &str,
    output: &Path,
    options: Option<&str>,
) -> Result<GenerateResult> {
    let raw_options = parse_options(options)?;
    let kind: BarcodeType = barcode_type.parse()?;
    let options = BarcodeOptions::from_map(kind, &raw_options)?;

    let output_path = barcode_output_path(output);
    let format = OutputFormat::from_path(&output_path)?;
    debug!(?format, path = %output_path.display(), "resolved output");

    let symbol = encode(kind, data, &options)?;
    write_symbol(&symbol, &options.style(), None, &output_path, format)?;

    Ok(GenerateResult {
        kind,
        output_path,
        format,
    })
}
