use image::{ImageFormat, Rgb, RgbImage};
use qrcode::render::{svg, Renderer};
use qrcode::{Color as Module, EcLevel, QrCode, Version};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::render::{image_side, prepare_output, write_text, FileFormat, Style};
use crate::symbol::Symbol;

pub const DEFAULT_BOX_SIZE: u32 = 10;
pub const DEFAULT_BORDER: u32 = 4;

/// QR error correction level: L (~7%), M (~15%), Q (~25%), H (~30%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorCorrection {
    #[value(name = "L")]
    L,
    #[default]
    #[value(name = "M")]
    M,
    #[value(name = "Q")]
    Q,
    #[value(name = "H")]
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(ErrorCorrection::L),
            "M" => Ok(ErrorCorrection::M),
            "Q" => Ok(ErrorCorrection::Q),
            "H" => Ok(ErrorCorrection::H),
            _ => Err(format!("unknown error correction level '{}'", s)),
        }
    }
}

/// Encode at the smallest version that fits. Failures read "Failed to generate {what}".
fn build_code(data: &[u8], level: ErrorCorrection, what: &'static str) -> Result<QrCode> {
    let code = QrCode::with_error_correction_level(data, level.into())
        .map_err(|e| Error::encode(what, e))?;
    debug!(version = ?code.version(), modules = code.width(), "encoded QR code");
    Ok(code)
}

fn to_symbol(code: &QrCode) -> Symbol {
    let size = code.width();
    let colors = code.to_colors();
    Symbol::matrix_from_fn(size, size, |x, y| colors[y * size + x] == Module::Dark)
}

/// Encode `data` at the smallest version that fits, without a quiet zone.
pub fn encode_qr(data: &[u8], level: ErrorCorrection) -> Result<(Symbol, Version)> {
    let code = build_code(data, level, "QR code")?;
    Ok((to_symbol(&code), code.version()))
}

/// QR module grid for `barcode-gen`, whose encode failures are reported as a barcode.
pub(crate) fn qr_symbol(data: &[u8], level: ErrorCorrection) -> Result<Symbol> {
    build_code(data, level, "barcode").map(|code| to_symbol(&code))
}

/// Everything `qr-gen` needs to produce one file.
#[derive(Debug, Clone)]
pub struct QrOptions {
    pub format: FileFormat,
    pub error_correction: ErrorCorrection,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone width in modules.
    pub border: u32,
    pub fill_color: String,
    pub back_color: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        QrOptions {
            format: FileFormat::Png,
            error_correction: ErrorCorrection::M,
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            fill_color: "black".to_string(),
            back_color: "white".to_string(),
        }
    }
}

impl QrOptions {
    fn style(&self) -> Result<Style> {
        let dark = Color::parse_for("fill", &self.fill_color)?;
        let light = Color::parse_for("background", &self.back_color)?;

        if self.box_size == 0 {
            return Err(Error::InvalidArgument(
                "box size must be at least 1".to_string(),
            ));
        }

        let margin = self.border.checked_mul(self.box_size).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "border of {} boxes at {} pixels per box is too large",
                self.border, self.box_size
            ))
        })?;

        Ok(Style {
            module_size: self.box_size,
            bar_height: self.box_size,
            margin,
            dark,
            light,
        })
    }
}

// qrcode's own renderer, with `border` modules of quiet zone instead of its fixed four.
fn renderer<'a, P: qrcode::render::Pixel>(
    code: &QrCode,
    colors: &'a [Module],
    style: &Style,
    border: u32,
) -> Renderer<'a, P> {
    let mut renderer = Renderer::new(colors, code.width(), border);
    renderer
        .quiet_zone(border > 0)
        .module_dimensions(style.module_size, style.module_size);
    renderer
}

fn qr_image(code: &QrCode, style: &Style, border: u32) -> RgbImage {
    let colors = code.to_colors();
    renderer::<Rgb<u8>>(code, &colors, style, border)
        .dark_color(style.dark.to_rgb())
        .light_color(style.light.to_rgb())
        .build()
}

fn qr_svg(code: &QrCode, style: &Style, border: u32) -> String {
    let colors = code.to_colors();
    let (dark, light) = (style.dark.to_hex(), style.light.to_hex());
    renderer::<svg::Color>(code, &colors, style, border)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build()
}

/// Append the format's extension unless the path already ends with it.
pub fn qr_output_path(output: &Path, format: FileFormat) -> PathBuf {
    let suffix = format!(".{}", format.extension());
    let mut path = output.as_os_str().to_owned();
    if !output.to_string_lossy().ends_with(&suffix) {
        path.push(&suffix);
    }
    PathBuf::from(path)
}

/// Generate a QR code for `data` and write it next to `output`.
///
/// Returns the path actually written.
pub fn generate_qr(data: &str, output: &Path, options: &QrOptions) -> Result<PathBuf> {
    let style = options.style()?;
    let code = build_code(data.as_bytes(), options.error_correction, "QR code")?;
    let side = image_side(code.width(), style.module_size, style.margin)?;

    let path = qr_output_path(output, options.format);
    prepare_output(&path)?;

    match options.format {
        FileFormat::Png => {
            let image = qr_image(&code, &style, options.border);
            debug!(side, "rendered QR image");
            image.save_with_format(&path, ImageFormat::Png)?;
        }
        FileFormat::Svg => write_text(&path, &qr_svg(&code, &style, options.border))?,
    }

    info!(path = %path.display(), "wrote QR code");
    Ok(path)
}
