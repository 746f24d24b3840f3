use std::collections::BTreeMap;
use tracing::warn;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::qr::ErrorCorrection;
use crate::render::Style;
use crate::symbology::BarcodeType;

pub const DEFAULT_SCALE: u32 = 2;
pub const DEFAULT_BAR_HEIGHT: u32 = 100;
pub const MAX_SCALE: u32 = 100;
pub const MAX_BAR_HEIGHT: u32 = 10_000;

/// Light border in pixels drawn around every `barcode-gen` image.
pub const BORDER_PIXELS: u32 = 10;

const COMMON_KEYS: &[&str] = &["scale", "barcolor", "backgroundcolor"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixShape {
    Square,
    Rectangle,
}

/// Resolved `--options` for one barcode type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeOptions {
    pub scale: u32,
    pub bar_height: u32,
    pub bar_color: Color,
    pub background_color: Color,
    pub ec_level: ErrorCorrection,
    pub matrix_shape: Option<MatrixShape>,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        BarcodeOptions {
            scale: DEFAULT_SCALE,
            bar_height: DEFAULT_BAR_HEIGHT,
            bar_color: Color::BLACK,
            background_color: Color::WHITE,
            ec_level: ErrorCorrection::M,
            matrix_shape: None,
        }
    }
}

/// Split `key=value,flag,key2=value2` into a map.
///
/// A pair without `=` is a boolean flag and maps to `"true"`.
pub fn parse_options(input: Option<&str>) -> Result<BTreeMap<String, String>> {
    let mut options = BTreeMap::new();
    let Some(input) = input else {
        return Ok(options);
    };

    for pair in input.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (pair, "true"),
        };
        if key.is_empty() {
            return Err(Error::InvalidOptions(format!(
                "missing option name in '{}'",
                pair
            )));
        }
        options.insert(key.to_string(), value.to_string());
    }

    Ok(options)
}

fn supported_keys(kind: BarcodeType) -> Vec<&'static str> {
    let mut keys = COMMON_KEYS.to_vec();
    if kind.is_linear() {
        keys.push("height");
    }
    match kind {
        BarcodeType::QrCode => keys.push("eclevel"),
        BarcodeType::DataMatrix => keys.push("format"),
        _ => {}
    }
    keys
}

fn invalid(key: &str, value: &str, reason: impl Into<String>) -> Error {
    Error::InvalidOptionValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn bounded(key: &str, value: &str, max: u32) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(invalid(
            key,
            value,
            format!("expected a whole number from 1 to {}", max),
        )),
    }
}

/// Options colors may be written bare (`FF0000`) as well as `#FF0000` or by name.
fn option_color(key: &str, value: &str) -> Result<Color> {
    let bare_hex =
        matches!(value.len(), 3 | 6) && value.bytes().all(|b| b.is_ascii_hexdigit());
    let parsed = if bare_hex {
        Color::parse(&format!("#{}", value))
    } else {
        Color::parse(value)
    };
    parsed.ok_or_else(|| invalid(key, value, "expected a color name or hex value"))
}

impl BarcodeOptions {
    /// Validate a parsed option map against what `kind` supports.
    pub fn from_map(kind: BarcodeType, map: &BTreeMap<String, String>) -> Result<Self> {
        let supported = supported_keys(kind);
        let mut options = BarcodeOptions::default();

        for (key, value) in map {
            if !supported.contains(&key.as_str()) {
                return Err(Error::UnsupportedOption {
                    key: key.clone(),
                    kind: kind.name(),
                    supported: supported.join(", "),
                });
            }

            match key.as_str() {
                "scale" => options.scale = bounded(key, value, MAX_SCALE)?,
                "height" => options.bar_height = bounded(key, value, MAX_BAR_HEIGHT)?,
                "barcolor" => options.bar_color = option_color(key, value)?,
                "backgroundcolor" => options.background_color = option_color(key, value)?,
                "eclevel" => {
                    options.ec_level = value
                        .parse()
                        .map_err(|_| invalid(key, value, "expected one of L, M, Q, H"))?
                }
                "format" => {
                    options.matrix_shape = match value.to_ascii_lowercase().as_str() {
                        "square" => Some(MatrixShape::Square),
                        "rectangle" | "rectangular" => Some(MatrixShape::Rectangle),
                        _ => return Err(invalid(key, value, "expected square or rectangle")),
                    }
                }
                _ => unreachable!("supported_keys and this match disagree on '{key}'"),
            }
        }

        if options.bar_color == options.background_color {
            warn!(
                color = %options.bar_color,
                "bar and background colors are identical; the barcode will not scan"
            );
        }

        Ok(options)
    }

    pub fn style(&self) -> Style {
        Style {
            module_size: self.scale,
            bar_height: self.bar_height,
            margin: BORDER_PIXELS,
            dark: self.bar_color,
            light: self.background_color,
        }
    }
}
