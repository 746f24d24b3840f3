use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use barcodegen::{generate_ean13, logging, FileFormat};

const EXAMPLES: &str = "\
Examples:
  ean13-gen 123456789012
  ean13-gen 123456789012 -o my_barcode
  ean13-gen 123456789012 -f png -o barcode.png";

#[derive(Parser)]
#[command(name = "ean13-gen")]
#[command(author, version, about = "Generate EAN-13 barcodes", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// 12-digit EAN-13 code (checksum will be calculated automatically)
    code: String,

    /// Output filename; the extension is replaced to match the format
    #[arg(short, long, default_value = "barcode")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FileFormat::Svg)]
    format: FileFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.verbose);

    let path = generate_ean13(&args.code, &args.output, args.format)?;

    println!("Barcode generated successfully: {}", path.display());

    Ok(())
}
