use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use barcodegen::qr::{DEFAULT_BORDER, DEFAULT_BOX_SIZE};
use barcodegen::{generate_qr, logging, ErrorCorrection, FileFormat, QrOptions};

const EXAMPLES: &str = "\
Examples:
  qr-gen \"Hello World\"
  qr-gen \"https://example.com\" -o website_qr
  qr-gen \"Contact info\" -f svg -e H --box-size 15
  qr-gen \"Data\" --fill-color red --back-color yellow";

#[derive(Parser, Debug)]
#[command(name = "qr-gen")]
#[command(author, version, about = "Generate QR codes with customizable options", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Data to encode in the QR code
    data: String,

    /// Output filename; the format's extension is appended if missing
    #[arg(short, long, default_value = "qr_code")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FileFormat::Png)]
    format: FileFormat,

    /// Error correction level: L(~7%), M(~15%), Q(~25%), H(~30%)
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = ErrorCorrection::M)]
    error_correction: ErrorCorrection,

    /// Size of each box in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_BOX_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    box_size: u32,

    /// Border size in boxes
    #[arg(long, default_value_t = DEFAULT_BORDER)]
    border: u32,

    /// Foreground color (name or #hex)
    #[arg(long, default_value = "black")]
    fill_color: String,

    /// Background color (name or #hex)
    #[arg(long, default_value = "white")]
    back_color: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.verbose);

    let options = QrOptions {
        format: args.format,
        error_correction: args.error_correction,
        box_size: args.box_size,
        border: args.border,
        fill_color: args.fill_color,
        back_color: args.back_color,
    };

    let path = generate_qr(&args.data, &args.output, &options)?;

    println!("QR code generated successfully: {}", path.display());

    Ok(())
}
