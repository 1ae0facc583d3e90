use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use scom_frame::{ErrorCode, Frame, Property, Value};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct StatusOutput {
    pub code: u16,
    pub name: String,
    pub category: &'static str,
}

impl From<ErrorCode> for StatusOutput {
    fn from(err: ErrorCode) -> Self {
        Self {
            code: err.code(),
            name: err.to_string(),
            category: err.category().as_str(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct PropertyOutput {
    pub object_type: &'static str,
    pub object_id: u32,
    pub property_id: u16,
    pub value_length: usize,
    pub value_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PropertyOutput {
    pub fn from_property(property: &Property<'_, '_>) -> Self {
        Self {
            object_type: property.object_type.name(),
            object_id: property.object_id,
            property_id: property.property_id,
            value_length: property.value_length(),
            value_hex: hex::encode(property.value()),
            value: None,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct FrameOutput {
    pub src_addr: u32,
    pub dst_addr: u32,
    pub service: &'static str,
    pub service_id: u8,
    pub data_length: usize,
    pub frame_length: usize,
    pub frame_flags: u8,
    pub service_flags: u8,
    pub payload_hex: String,
    pub frame_hex: String,
}

impl FrameOutput {
    pub fn from_frame(frame: &Frame<'_>) -> Self {
        Self {
            src_addr: frame.src_addr,
            dst_addr: frame.dst_addr,
            service: frame.service.name(),
            service_id: frame.service.id(),
            data_length: frame.data_length,
            frame_length: frame.frame_length(),
            frame_flags: frame.frame_flags.to_byte(),
            service_flags: frame.service_flags.to_byte(),
            payload_hex: frame.payload().map(hex::encode).unwrap_or_default(),
            frame_hex: frame.as_bytes().map(hex::encode).unwrap_or_default(),
        }
    }
}

/// Everything known about one encoded or decoded frame.
#[derive(Serialize, Debug)]
pub struct FrameReport {
    pub frame: FrameOutput,
    pub property: Option<PropertyOutput>,
    pub status: Option<StatusOutput>,
    #[serde(skip)]
    pub raw: Vec<u8>,
}

pub fn print_report(report: &FrameReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (field, value) in report_rows(report) {
                table.add_row(vec![field.to_string(), value]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line = report_rows(report)
                .into_iter()
                .map(|(field, value)| format!("{field}={value}"))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{line}");
        }
        OutputFormat::Raw => print_raw(&report.raw),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn report_rows(report: &FrameReport) -> Vec<(&'static str, String)> {
    let frame = &report.frame;
    let mut rows = vec![
        ("src", frame.src_addr.to_string()),
        ("dst", frame.dst_addr.to_string()),
        ("service", format!("{} (0x{:02X})", frame.service, frame.service_id)),
        ("data_length", frame.data_length.to_string()),
        ("frame_flags", format!("0x{:02X}", frame.frame_flags)),
        ("service_flags", format!("0x{:02X}", frame.service_flags)),
    ];
    if let Some(property) = &report.property {
        rows.push(("object_type", property.object_type.to_string()));
        rows.push(("object_id", property.object_id.to_string()));
        rows.push(("property_id", property.property_id.to_string()));
        rows.push(("value_length", property.value_length.to_string()));
        rows.push(("value_hex", property.value_hex.clone()));
        if let Some(value) = &property.value {
            rows.push(("value", value.clone()));
        }
    }
    rows.push(("payload", frame.payload_hex.clone()));
    rows.push(("frame", frame.frame_hex.clone()));
    rows.push((
        "status",
        report.status.as_ref().map_or_else(
            || "ok".to_string(),
            |status| format!("{} (0x{:04X}, {})", status.name, status.code, status.category),
        ),
    ));
    rows
}

pub fn value_to_string(value: &Value<'_>) -> String {
    match value {
        Value::Bool(flag) => flag.to_string(),
        Value::Short(short) => short.to_string(),
        Value::Int32(int) => int.to_string(),
        Value::Float(float) => float.to_string(),
        Value::Bytes(bytes) => hex::encode(bytes),
    }
}
