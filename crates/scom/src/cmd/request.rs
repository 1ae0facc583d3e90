use scom_frame::{Frame, Property, Value};
use tracing::debug;

use crate::cmd::{CodecArgs, TargetArgs};
use crate::exit::{codec_error, CliResult};
use crate::output::{value_to_string, FrameOutput, FrameReport, PropertyOutput};

/// Encode a read request, or a write request when `value` is given.
pub fn encode_request(
    target: &TargetArgs,
    codec: &CodecArgs,
    value: Option<&Value<'_>>,
) -> CliResult<FrameReport> {
    let config = codec.config();
    let mut buffer = vec![0u8; config.buffer_size];
    let mut frame = Frame::new(&mut buffer);
    frame.src_addr = config.source_address;
    frame.dst_addr = target.dst;

    let mut property = Property::with_address(
        &mut frame,
        target.object_type.into(),
        target.object_id,
        target.property_id(),
    );

    let prepared = match value {
        Some(value) => property
            .set_value(value)
            .and_then(|()| property.encode_write()),
        None => property.encode_read(),
    };
    prepared
        .and_then(|()| property.frame_mut().encode_request())
        .map_err(|err| codec_error("encode failed", err))?;

    let mut property_output = PropertyOutput::from_property(&property);
    property_output.value = value.map(value_to_string);

    let frame = property.frame();
    debug!(
        service = frame.service.name(),
        dst = frame.dst_addr,
        frame_length = frame.frame_length(),
        "request encoded"
    );

    Ok(FrameReport {
        frame: FrameOutput::from_frame(frame),
        property: Some(property_output),
        status: None,
        raw: frame.as_bytes().unwrap_or_default().to_vec(),
    })
}
