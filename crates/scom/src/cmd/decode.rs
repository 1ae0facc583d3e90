use scom_frame::{expected_frame_length, ErrorCode, Frame, Property, PropertyFormat, Service};
use tracing::{debug, warn};

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{status_code, CliError, CliResult, DATA_INVALID, FAILURE, SUCCESS, USAGE};
use crate::output::{
    print_report, value_to_string, FrameOutput, FrameReport, OutputFormat, PropertyOutput,
};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let received = parse_hex("frame", &args.frame)?;
    let config = args.codec.config();
    let report = decode_response(
        &received,
        config.buffer_size,
        args.value_format.map(PropertyFormat::from),
    )?;

    print_report(&report, format);
    Ok(report.status.as_ref().map_or(SUCCESS, |status| {
        ErrorCode::from_code(status.code).map_or(FAILURE, status_code)
    }))
}

/// Decode a captured response the way a receiver would: header first, then
/// the payload once the announced length is available.
pub fn decode_response(
    received: &[u8],
    buffer_size: usize,
    value_format: Option<PropertyFormat>,
) -> CliResult<FrameReport> {
    let Some(expected) = expected_frame_length(received) else {
        return Err(CliError::new(
            DATA_INVALID,
            format!("truncated frame: {} bytes, no length field", received.len()),
        ));
    };
    if received.len() < expected {
        return Err(CliError::new(
            DATA_INVALID,
            format!("truncated frame: {} of {expected} bytes", received.len()),
        ));
    }
    if received.len() > expected {
        warn!(
            received = received.len(),
            expected, "ignoring bytes after the frame"
        );
    }
    if expected > buffer_size {
        return Err(CliError::new(
            USAGE,
            format!("frame of {expected} bytes exceeds buffer size {buffer_size}"),
        ));
    }

    let mut buffer = vec![0u8; buffer_size];
    buffer[..expected].copy_from_slice(&received[..expected]);

    let mut frame = Frame::new(&mut buffer);
    let decoded = frame
        .decode_frame_header()
        .and_then(|()| frame.decode_frame_data());
    if let Err(err) = decoded {
        debug!(%err, "frame rejected");
        return Ok(FrameReport {
            frame: FrameOutput::from_frame(&frame),
            property: None,
            status: Some(err.into()),
            raw: Vec::new(),
        });
    }

    let service = frame.service;
    let mut property = Property::new(&mut frame);
    let status = match service {
        Service::ReadProperty => property.decode_read_property(),
        Service::WriteProperty => property.decode_write_property(),
        Service::Unknown(id) => {
            return Err(CliError::new(
                DATA_INVALID,
                format!("unsupported service id 0x{id:02X}"),
            ));
        }
    };

    let mut property_output = PropertyOutput::from_property(&property);
    let mut raw = property.value().to_vec();
    match (status, value_format) {
        (Ok(()), Some(format)) => {
            let value = property
                .decode_value(format)
                .map_err(|err| CliError::new(DATA_INVALID, format!("value: {err}")))?;
            property_output.value = Some(value_to_string(&value));
        }
        (Err(_), _) => raw.clear(),
        (Ok(()), None) => {}
    }

    Ok(FrameReport {
        frame: FrameOutput::from_frame(property.frame()),
        property: Some(property_output),
        status: status.err().map(Into::into),
        raw,
    })
}
