use crate::cmd::request::encode_request;
use crate::cmd::ReadArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat};

pub fn run(args: ReadArgs, format: OutputFormat) -> CliResult<i32> {
    let report = encode_request(&args.target, &args.codec, None)?;
    print_report(&report, format);
    Ok(SUCCESS)
}
