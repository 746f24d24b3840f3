use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;

use barcodegen::{generate_barcode, list_types, logging};

const EXAMPLES: &str = "\
Examples:
  barcode-gen \"ABC123\" code128
  barcode-gen \"https://example.com\" datamatrix -o website_dm
  barcode-gen \"Document ID: 12345\" pdf417 -o document.svg
  barcode-gen \"ABC123\" code128 --options \"scale=3,height=60\"
  barcode-gen --list-types";

#[derive(Parser)]
#[command(name = "barcode-gen")]
#[command(author, version, about = "Generate various types of barcodes", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Data to encode in the barcode
    data: Option<String>,

    /// Barcode type (see --list-types for all options)
    #[arg(value_name = "TYPE")]
    barcode_type: Option<String>,

    /// Output filename; .png is added when no extension is given
    #[arg(short, long, default_value = "barcode")]
    output: PathBuf,

    /// Barcode-specific options (format: key=value,key2=value2)
    #[arg(long)]
    options: Option<String>,

    /// List all available barcode types
    #[arg(long)]
    list_types: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// DATA and TYPE, when both are present and non-empty.
    fn inputs(&self) -> Option<(&str, &str)> {
        let data = self.data.as_deref().filter(|s| !s.is_empty())?;
        let barcode_type = self.barcode_type.as_deref().filter(|s| !s.is_empty())?;
        Some((data, barcode_type))
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.verbose);

    if args.list_types {
        print!("{}", list_types());
        return Ok(());
    }

    let Some((data, barcode_type)) = args.inputs() else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "Both 'data' and 'type' are required (unless using --list-types)",
            )
            .exit();
    };

    let result = generate_barcode(data, barcode_type, &args.output, args.options.as_deref())?;

    println!(
        "Barcode generated successfully: {}",
        result.output_path.display()
    );

    Ok(())
}
