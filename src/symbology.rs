use barcoders::sym::code128::Code128;
use barcoders::sym::code39::Code39;
use barcoders::sym::code93::Code93;
use barcoders::sym::ean13::EAN13;
use barcoders::sym::tf::TF;
use datamatrix::{DataMatrix, SymbolList};
use rxing::{BarcodeFormat, MultiFormatWriter, Writer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::{BarcodeOptions, MatrixShape};
use crate::qr::qr_symbol;
use crate::symbol::Symbol;

/// Symbologies understood by `barcode-gen`, in name order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BarcodeType {
    AztecCode,
    Code128,
    Code39,
    Code93,
    DataMatrix,
    Ean13,
    Interleaved2of5,
    Pdf417,
    QrCode,
    UpcA,
}

impl BarcodeType {
    pub const ALL: [BarcodeType; 10] = [
        BarcodeType::AztecCode,
        BarcodeType::Code128,
        BarcodeType::Code39,
        BarcodeType::Code93,
        BarcodeType::DataMatrix,
        BarcodeType::Ean13,
        BarcodeType::Interleaved2of5,
        BarcodeType::Pdf417,
        BarcodeType::QrCode,
        BarcodeType::UpcA,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BarcodeType::AztecCode => "azteccode",
            BarcodeType::Code128 => "code128",
            BarcodeType::Code39 => "code39",
            BarcodeType::Code93 => "code93",
            BarcodeType::DataMatrix => "datamatrix",
            BarcodeType::Ean13 => "ean13",
            BarcodeType::Interleaved2of5 => "interleaved2of5",
            BarcodeType::Pdf417 => "pdf417",
            BarcodeType::QrCode => "qrcode",
            BarcodeType::UpcA => "upca",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BarcodeType::AztecCode => "Aztec Code - 2D matrix code used in transportation",
            BarcodeType::Code128 => "Code 128 - High-density linear barcode for alphanumeric data",
            BarcodeType::Code39 => "Code 39 - Alphanumeric linear barcode",
            BarcodeType::Code93 => "Code 93 - Compact alphanumeric linear barcode",
            BarcodeType::DataMatrix => {
                "Data Matrix - 2D matrix code for small spaces and high data density"
            }
            BarcodeType::Ean13 => {
                "EAN-13 - 13-digit retail barcode (use ean13-gen for more options)"
            }
            BarcodeType::Interleaved2of5 => "Interleaved 2 of 5 - Numeric-only linear barcode",
            BarcodeType::Pdf417 => "PDF417 - 2D stacked barcode with high data capacity",
            BarcodeType::QrCode => "QR Code - 2D matrix code (use qr-gen for more options)",
            BarcodeType::UpcA => "UPC-A - 12-digit retail barcode",
        }
    }

    /// Linear symbols are drawn as full-height bars and accept a bar height.
    pub fn is_linear(self) -> bool {
        matches!(
            self,
            BarcodeType::Code128
                | BarcodeType::Code39
                | BarcodeType::Code93
                | BarcodeType::Ean13
                | BarcodeType::Interleaved2of5
                | BarcodeType::UpcA
        )
    }

    fn available() -> String {
        BarcodeType::ALL
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for BarcodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BarcodeType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::UnsupportedType {
                name: s.to_string(),
                available: BarcodeType::available(),
            })
    }
}

impl fmt::Display for BarcodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The table printed by `barcode-gen --list-types`.
pub fn list_types() -> String {
    let mut out = String::from("Available barcode types:\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');
    for kind in BarcodeType::ALL {
        out.push_str(&format!("{:15} - {}\n", kind.name(), kind.description()));
    }
    out
}

/// Encode `data` as a symbol of the given type.
pub fn encode(kind: BarcodeType, data: &str, options: &BarcodeOptions) -> Result<Symbol> {
    let symbol = match kind {
        BarcodeType::Code128 => encode_code128(data)?,
        BarcodeType::Code39 => {
            let code = Code39::new(data).map_err(|e| Error::encode("barcode", e))?;
            Symbol::from_bars(&code.encode())
        }
        BarcodeType::Code93 => {
            let code = Code93::new(data).map_err(|e| Error::encode("barcode", e))?;
            Symbol::from_bars(&code.encode())
        }
        BarcodeType::Interleaved2of5 => {
            let code = TF::interleaved(data).map_err(|e| Error::encode("barcode", e))?;
            Symbol::from_bars(&code.encode())
        }
        BarcodeType::Ean13 => {
            let body = retail_body(data, 12, "ean13")?;
            encode_ean13_body(&body)?
        }
        BarcodeType::UpcA => {
            let body = retail_body(data, 11, "upca")?;
            encode_ean13_body(&format!("0{}", body))?
        }
        BarcodeType::DataMatrix => encode_datamatrix(data, options.matrix_shape)?,
        BarcodeType::QrCode => qr_symbol(data.as_bytes(), options.ec_level)?,
        BarcodeType::Pdf417 => encode_rxing(data, BarcodeFormat::PDF_417)?,
        BarcodeType::AztecCode => encode_rxing(data, BarcodeFormat::AZTEC)?,
    };

    debug!(
        kind = %kind,
        width = symbol.width(),
        height = symbol.height(),
        "encoded symbol"
    );

    Ok(symbol)
}

/// Encode a 12-digit EAN-13 body; the encoder appends the check digit.
pub(crate) fn encode_ean13_body(body: &str) -> Result<Symbol> {
    let code = EAN13::new(body).map_err(|e| Error::encode("barcode", e))?;
    Ok(Symbol::from_bars(&code.encode()))
}

/// EAN/UPC check digit for a body of digits. Anything but ASCII digits is skipped.
pub(crate) fn check_digit(body: &str) -> u8 {
    let sum: u32 = body
        .chars()
        .filter_map(|c| c.to_digit(10))
        .rev()
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 0 {
                digit * 3
            } else {
                digit
            }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Strip and verify an optional trailing check digit from retail data.
fn retail_body(data: &str, body_len: usize, name: &str) -> Result<String> {
    let invalid = || {
        Error::encode(
            "barcode",
            format!(
                "{} data must be {} digits, or {} digits ending in a valid check digit",
                name,
                body_len,
                body_len + 1
            ),
        )
    };

    if data.is_empty() || !data.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match data.len() {
        n if n == body_len => Ok(data.to_string()),
        n if n == body_len + 1 => {
            let (body, check) = data.split_at(body_len);
            // upca bodies are checked as the equivalent ean13 body
            let padded = if body_len == 11 {
                format!("0{}", body)
            } else {
                body.to_string()
            };
            if check.parse::<u8>().ok() == Some(check_digit(&padded)) {
                Ok(body.to_string())
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}

fn encode_code128(data: &str) -> Result<Symbol> {
    // 'Ć' selects character set C (digit pairs), 'Ɓ' set B (printable ASCII)
    let all_digits = !data.is_empty() && data.bytes().all(|b| b.is_ascii_digit());
    let prefixed = if all_digits && data.len() >= 4 && data.len() % 2 == 0 {
        format!("Ć{}", data)
    } else {
        format!("Ɓ{}", data)
    };
    let code = Code128::new(&prefixed).map_err(|e| Error::encode("barcode", e))?;
    Ok(Symbol::from_bars(&code.encode()))
}

fn encode_datamatrix(data: &str, shape: Option<MatrixShape>) -> Result<Symbol> {
    let symbols = match shape {
        Some(MatrixShape::Square) => SymbolList::default().enforce_square(),
        Some(MatrixShape::Rectangle) => SymbolList::default().enforce_rectangular(),
        None => SymbolList::default(),
    };
    let bitmap = DataMatrix::encode(data.as_bytes(), symbols)
        .map_err(|e| Error::encode("barcode", format!("{:?}", e)))?
        .bitmap();

    let (width, height) = (bitmap.width(), bitmap.height());
    let mut dark = vec![false; width * height];
    for (x, y) in bitmap.pixels() {
        dark[y * width + x] = true;
    }
    Ok(Symbol::matrix_from_fn(width, height, |x, y| dark[y * width + x]))
}

fn encode_rxing(data: &str, format: BarcodeFormat) -> Result<Symbol> {
    // zero dimensions ask for the natural size, one pixel per module
    let matrix = MultiFormatWriter::default()
        .encode(data, &format, 0, 0)
        .map_err(|e| Error::encode("barcode", e))?;

    let width = matrix.getWidth() as usize;
    let height = matrix.getHeight() as usize;
    Ok(Symbol::matrix_from_fn(width, height, |x, y| {
        matrix.get(x as u32, y as u32)
    }))
}
