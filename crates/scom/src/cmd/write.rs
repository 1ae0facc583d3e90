use scom_frame::Value;

use crate::cmd::request::encode_request;
use crate::cmd::{parse_hex, ValueFormatArg, WriteArgs};
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_report, OutputFormat};

pub fn run(args: WriteArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes;
    let value = match args.value_format {
        ValueFormatArg::Bytes => {
            bytes = parse_hex("--value", &args.value)?;
            Value::Bytes(&bytes)
        }
        scalar => parse_scalar(&args.value, scalar)?,
    };

    let report = encode_request(&args.target, &args.codec, Some(&value))?;
    print_report(&report, format);
    Ok(SUCCESS)
}

fn parse_scalar(input: &str, format: ValueFormatArg) -> CliResult<Value<'static>> {
    let input = input.trim();
    let invalid = || CliError::new(USAGE, format!("--value: cannot parse {input:?} as {format:?}"));

    match format {
        ValueFormatArg::Bool => match input.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "off" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
        ValueFormatArg::Enum => input.parse().map(Value::Short).map_err(|_| invalid()),
        ValueFormatArg::Int32 => input.parse().map(Value::Int32).map_err(|_| invalid()),
        ValueFormatArg::Float => input.parse().map(Value::Float).map_err(|_| invalid()),
        ValueFormatArg::Bytes => Err(invalid()),
    }
}
