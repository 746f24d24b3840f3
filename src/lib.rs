pub mod barcode;
pub mod color;
pub mod ean13;
pub mod error;
pub mod logging;
pub mod options;
pub mod qr;
pub mod render;
pub mod symbol;
pub mod symbology;

pub use barcode::{barcode_output_path, generate_barcode, GenerateResult};
pub use color::Color;
pub use ean13::{ean13_output_path, generate_ean13, validate_ean13_code};
pub use error::{Error, Result};
pub use options::{parse_options, BarcodeOptions, MatrixShape};
pub use qr::{encode_qr, generate_qr, qr_output_path, ErrorCorrection, QrOptions};
pub use render::{render_image, render_svg, write_symbol, FileFormat, OutputFormat, Style};
pub use symbol::Symbol;
pub use symbology::{encode, list_types, BarcodeType};
