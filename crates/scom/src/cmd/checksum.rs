use scom_frame::checksum;
use serde::Serialize;

use crate::cmd::{parse_hex, ChecksumArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_raw, OutputFormat};

#[derive(Serialize)]
struct ChecksumOutput {
    length: usize,
    checksum: String,
    /// Checksum bytes in wire order.
    wire_hex: String,
}

pub fn run(args: ChecksumArgs, format: OutputFormat) -> CliResult<i32> {
    let data = parse_hex("data", &args.data)?;
    let sum = checksum(&data);
    let wire = sum.to_le_bytes();
    let output = ChecksumOutput {
        length: data.len(),
        checksum: format!("0x{sum:04X}"),
        wire_hex: hex::encode(wire),
    };

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table | OutputFormat::Pretty => println!(
            "checksum={} wire={} length={}",
            output.checksum, output.wire_hex, output.length
        ),
        OutputFormat::Raw => print_raw(&wire),
    }

    Ok(SUCCESS)
}
