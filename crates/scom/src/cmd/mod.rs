use clap::{Args, Subcommand, ValueEnum};
use scom_frame::{
    property_id, CodecConfig, ObjectType, PropertyFormat, DEFAULT_BUFFER_SIZE,
    DEFAULT_SOURCE_ADDRESS,
};

use crate::exit::{hex_error, CliResult};
use crate::output::OutputFormat;

pub mod checksum;
pub mod decode;
pub mod errors;
pub mod read;
mod request;
pub mod version;
pub mod write;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a read-property request frame.
    Read(ReadArgs),
    /// Encode a write-property request frame.
    Write(WriteArgs),
    /// Decode a captured response frame.
    Decode(DecodeArgs),
    /// Compute the frame checksum of a byte range.
    Checksum(ChecksumArgs),
    /// List the status codes of the protocol.
    Errors(ErrorsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Read(args) => read::run(args, format),
        Command::Write(args) => write::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Checksum(args) => checksum::run(args, format),
        Command::Errors(args) => errors::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct CodecArgs {
    /// Source address written into requests.
    #[arg(long = "src", env = "SCOM_SRC_ADDR", default_value_t = DEFAULT_SOURCE_ADDRESS)]
    pub source_address: u32,
    /// Size of the frame buffer in bytes.
    #[arg(long, env = "SCOM_BUFFER_SIZE", default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer_size: usize,
}

impl CodecArgs {
    pub fn config(&self) -> CodecConfig {
        CodecConfig {
            source_address: self.source_address,
            buffer_size: self.buffer_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Destination device address (e.g. 101 for the first Xtender).
    #[arg(long)]
    pub dst: u32,
    /// Type of the addressed object.
    #[arg(long, value_enum, default_value = "parameter")]
    pub object_type: ObjectTypeArg,
    /// Object id (user info or parameter number).
    #[arg(long)]
    pub object_id: u32,
    /// Property id. Default: value of a user info, flash value of a parameter.
    #[arg(long)]
    pub property_id: Option<u16>,
}

impl TargetArgs {
    pub fn property_id(&self) -> u16 {
        self.property_id.unwrap_or(match self.object_type {
            ObjectTypeArg::UserInfo => property_id::VALUE,
            ObjectTypeArg::Parameter => property_id::VALUE_QSP,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ObjectTypeArg {
    UserInfo,
    Parameter,
}

impl From<ObjectTypeArg> for ObjectType {
    fn from(arg: ObjectTypeArg) -> Self {
        match arg {
            ObjectTypeArg::UserInfo => ObjectType::UserInfo,
            ObjectTypeArg::Parameter => ObjectType::Parameter,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValueFormatArg {
    Bool,
    Enum,
    Int32,
    Float,
    /// Raw bytes given as hex.
    Bytes,
}

impl From<ValueFormatArg> for PropertyFormat {
    fn from(arg: ValueFormatArg) -> Self {
        match arg {
            ValueFormatArg::Bool => PropertyFormat::Bool,
            ValueFormatArg::Enum => PropertyFormat::Enum,
            ValueFormatArg::Int32 => PropertyFormat::Int32,
            ValueFormatArg::Float => PropertyFormat::Float,
            ValueFormatArg::Bytes => PropertyFormat::ByteStream,
        }
    }
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[command(flatten)]
    pub codec: CodecArgs,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// Value to write.
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,
    /// Encoding of the value.
    #[arg(long, value_enum, default_value = "float")]
    pub value_format: ValueFormatArg,
    #[command(flatten)]
    pub codec: CodecArgs,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes as hex (whitespace allowed).
    pub frame: String,
    /// Interpret the value with this format.
    #[arg(long, value_enum)]
    pub value_format: Option<ValueFormatArg>,
    #[command(flatten)]
    pub codec: CodecArgs,
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Bytes as hex (whitespace allowed).
    pub data: String,
}

#[derive(Args, Debug, Default)]
pub struct ErrorsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse hex input, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(context: &str, input: &str) -> CliResult<Vec<u8>> {
    let compact: String = input.split_whitespace().collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).map_err(|err| hex_error(context, err))
}
