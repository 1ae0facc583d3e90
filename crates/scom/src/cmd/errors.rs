use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use scom_frame::ErrorCode;

use crate::cmd::ErrorsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{OutputFormat, StatusOutput};

pub fn run(_args: ErrorsArgs, format: OutputFormat) -> CliResult<i32> {
    let rows: Vec<StatusOutput> = ErrorCode::ALL.iter().copied().map(Into::into).collect();

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
        ),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CODE", "NAME", "CATEGORY"]);
            for row in &rows {
                table.add_row(vec![
                    format!("0x{:04X}", row.code),
                    row.name.clone(),
                    row.category.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("0x{:04X} {} ({})", row.code, row.name, row.category);
            }
        }
    }

    Ok(SUCCESS)
}
