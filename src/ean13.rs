use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::render::{write_symbol, FileFormat, Style};
use crate::symbology::{check_digit, encode_ean13_body};

/// Width in pixels of one EAN-13 module.
pub const MODULE_WIDTH: u32 = 2;
/// Height in pixels of the bars.
pub const BAR_HEIGHT: u32 = 150;
/// The standard left quiet zone is 11 modules; used on both sides.
pub const QUIET_ZONE_MODULES: u32 = 11;

/// Check that `code` is the 12-digit body of an EAN-13 number.
pub fn validate_ean13_code(code: &str) -> Result<&str> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidEan13("EAN-13 code must contain only digits"));
    }

    if code.len() != 12 {
        return Err(Error::InvalidEan13("EAN-13 code must be exactly 12 digits"));
    }

    Ok(code)
}

/// The 13-digit number printed under the bars.
pub fn full_number(code: &str) -> String {
    format!("{}{}", code, check_digit(code))
}

/// Replace any extension on `output` with the format's extension.
pub fn ean13_output_path(output: &Path, format: FileFormat) -> PathBuf {
    output.with_extension(format.extension())
}

pub fn ean13_style() -> Style {
    Style {
        module_size: MODULE_WIDTH,
        bar_height: BAR_HEIGHT,
        margin: QUIET_ZONE_MODULES * MODULE_WIDTH,
        ..Style::default()
    }
}

/// Generate an EAN-13 barcode from a 12-digit code.
///
/// Both formats print the 13-digit number under the bars.
/// Returns the path actually written.
pub fn generate_ean13(code: &str, output: &Path, format: FileFormat) -> Result<PathBuf> {
    let code = validate_ean13_code(code)?;
    let symbol = encode_ean13_body(code)?;

    let path = ean13_output_path(output, format);
    let caption = full_number(code);
    write_symbol(
        &symbol,
        &ean13_style(),
        Some(&caption),
        &path,
        format.into(),
    )?;

    Ok(path)
}
