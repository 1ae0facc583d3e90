//! Request/response cycles over captured and simulated wire bytes.

use scom_frame::{
    checksum, expected_frame_length, property_id, ErrorCode, Frame, ObjectType, Property,
    PropertyFormat, Service, Value, HEADER_SIZE,
};

/// Read request for user info 3000, property 1, from address 1 to 101.
const CAPTURED_REQUEST: &str = "aa0001000000650000000a006f7100010100b80b00000100c590";

/// Error response from 101 to 1 for user info 3000, property 5, code 0x0002.
const CAPTURED_ERROR_RESPONSE: &str = "aa2265000000010000000c00937b03010100b80b000005000200ce52";

fn bytes(vector: &str) -> Vec<u8> {
    hex::decode(vector).expect("test vector is valid hex")
}

/// Answer `request` the way a device would, writing the response over it.
fn device_reply(buf: &mut [u8], service_flags: u8, value: &[u8]) -> usize {
    let src = buf[6..10].to_vec();
    let dst = buf[2..6].to_vec();
    let data_length = 10 + value.len();

    buf[1] = 0;
    buf[2..6].copy_from_slice(&src);
    buf[6..10].copy_from_slice(&dst);
    buf[10..12].copy_from_slice(&(data_length as u16).to_le_bytes());
    let header_checksum = checksum(&buf[1..12]);
    buf[12..14].copy_from_slice(&header_checksum.to_le_bytes());
    buf[14] = service_flags;
    buf[24..24 + value.len()].copy_from_slice(value);
    let end = HEADER_SIZE + data_length;
    let payload_checksum = checksum(&buf[HEADER_SIZE..end]);
    buf[end..end + 2].copy_from_slice(&payload_checksum.to_le_bytes());
    end + 2
}

#[test]
fn encodes_captured_request() {
    let mut buf = [0u8; 64];
    let mut frame = Frame::new(&mut buf);
    frame.src_addr = 1;
    frame.dst_addr = 101;

    let mut property =
        Property::with_address(&mut frame, ObjectType::UserInfo, 3000, property_id::VALUE);
    property.encode_read().unwrap();
    property.frame_mut().encode_request().unwrap();

    assert_eq!(frame.as_bytes().unwrap(), bytes(CAPTURED_REQUEST).as_slice());
}

#[test]
fn decodes_captured_error_response() {
    let mut buf = bytes(CAPTURED_ERROR_RESPONSE);
    let mut frame = Frame::new(&mut buf);

    frame.decode_frame_header().unwrap();
    assert_eq!(frame.src_addr, 101);
    assert_eq!(frame.dst_addr, 1);
    assert_eq!(frame.data_length, 12);
    assert!(frame.frame_flags.rcc_reset);
    assert_eq!(frame.frame_flags.reserved, 1);

    frame.decode_frame_data().unwrap();
    assert!(frame.is_response());
    assert!(frame.has_error_flag());
    assert_eq!(frame.service, Service::ReadProperty);
    assert_eq!(
        frame.payload().unwrap(),
        bytes("03010100b80b000005000200").as_slice()
    );

    let mut property = Property::new(&mut frame);
    assert_eq!(
        property.decode_read_property(),
        Err(ErrorCode::DeviceNotFound)
    );
    assert!(property.same_address(ObjectType::UserInfo, 3000, 5));
}

#[test]
fn captured_request_is_not_a_response() {
    let mut buf = bytes(CAPTURED_REQUEST);
    let mut frame = Frame::new(&mut buf);
    frame.decode_frame_header().unwrap();
    assert_eq!(frame.decode_frame_data(), Err(ErrorCode::InvalidFrame));
}

#[test]
fn read_parameter_roundtrip_in_one_buffer() {
    let mut buf = [0u8; 64];
    let mut frame = Frame::new(&mut buf);
    frame.src_addr = 1;
    frame.dst_addr = 101;

    let mut property = Property::with_address(
        &mut frame,
        ObjectType::Parameter,
        3000,
        property_id::VALUE_QSP,
    );
    property.encode_read().unwrap();
    property.frame_mut().encode_request().unwrap();

    // the header of the request decodes to the same fields
    let frame = property.frame_mut();
    frame.decode_frame_header().unwrap();
    assert_eq!((frame.src_addr, frame.dst_addr, frame.data_length), (1, 101, 10));

    device_reply(frame.buffer_mut(), 0x02, &54.0f32.to_le_bytes());
    frame.reset();
    frame.decode_frame_header().unwrap();
    frame.decode_frame_data().unwrap();
    assert_eq!((frame.src_addr, frame.dst_addr), (101, 1));

    property.decode_read_property().unwrap();
    assert!(property.same_address(ObjectType::Parameter, 3000, property_id::VALUE_QSP));
    assert_eq!(
        property.decode_value(PropertyFormat::Float),
        Ok(Value::Float(54.0))
    );
}

#[test]
fn write_parameter_roundtrip() {
    let mut buf = [0u8; 64];
    let mut frame = Frame::new(&mut buf);
    frame.src_addr = 1;
    frame.dst_addr = 101;

    let mut property = Property::with_address(
        &mut frame,
        ObjectType::Parameter,
        1107,
        property_id::UNSAVED_VALUE_QSP,
    );
    property.set_value(&Value::Float(32.0)).unwrap();
    property.encode_write().unwrap();
    property.frame_mut().encode_request().unwrap();
    assert_eq!(property.frame().frame_length(), 30);

    let frame = property.frame_mut();
    device_reply(frame.buffer_mut(), 0x02, &[]);
    frame.decode_frame_header().unwrap();
    frame.decode_frame_data().unwrap();
    assert_eq!(frame.service, Service::WriteProperty);

    property.decode_write_property().unwrap();
    assert_eq!(property.value_length(), 0);
    assert_eq!(property.object_id, 1107);
}

#[test]
fn write_rejected_as_read_only() {
    let mut buf = [0u8; 64];
    let mut frame = Frame::new(&mut buf);
    frame.dst_addr = 101;

    let mut property = Property::with_address(&mut frame, ObjectType::Parameter, 1107, 5);
    property.set_value(&Value::Int32(3)).unwrap();
    property.encode_write().unwrap();
    property.frame_mut().encode_request().unwrap();

    device_reply(property.frame_mut().buffer_mut(), 0x03, &0x0025u16.to_le_bytes());
    let frame = property.frame_mut();
    frame.decode_frame_header().unwrap();
    frame.decode_frame_data().unwrap();

    assert_eq!(
        property.decode_write_property(),
        Err(ErrorCode::PropertyIsReadOnly)
    );
    assert!(property.frame().last_error().unwrap().is_application());
}

#[test]
fn reception_in_chunks() {
    let wire = bytes(CAPTURED_ERROR_RESPONSE);
    let mut buf = [0u8; 64];
    let mut received = 0;
    let mut expected = None;

    for chunk in wire.chunks(5) {
        buf[received..received + chunk.len()].copy_from_slice(chunk);
        received += chunk.len();
        if expected.is_none() {
            expected = expected_frame_length(&buf[..received]);
        }
        if expected.is_some_and(|len| received >= len) {
            break;
        }
    }

    assert_eq!(expected, Some(wire.len()));
    let mut frame = Frame::new(&mut buf);
    frame.decode_frame_header().unwrap();
    frame.decode_frame_data().unwrap();
}

#[test]
fn corrupted_payload_detected_after_valid_header() {
    let mut buf = bytes(CAPTURED_ERROR_RESPONSE);
    buf[24] = 0x03;

    let mut frame = Frame::new(&mut buf);
    frame.decode_frame_header().unwrap();
    assert_eq!(frame.decode_frame_data(), Err(ErrorCode::InvalidFrame));
}

#[test]
fn independent_frames_on_separate_threads() {
    let mut buffers = vec![[0u8; 64]; 4];

    std::thread::scope(|scope| {
        for (index, buf) in buffers.iter_mut().enumerate() {
            scope.spawn(move || {
                let mut frame = Frame::new(buf);
                frame.src_addr = 1;
                frame.dst_addr = 101 + index as u32;
                let mut property = Property::with_address(
                    &mut frame,
                    ObjectType::UserInfo,
                    3000 + index as u32,
                    property_id::VALUE,
                );
                property.encode_read().unwrap();
                property.frame_mut().encode_request().unwrap();
            });
        }
    });

    for (index, buf) in buffers.iter_mut().enumerate() {
        let mut frame = Frame::new(buf);
        frame.decode_frame_header().unwrap();
        assert_eq!(frame.dst_addr, 101 + index as u32);
    }
}
