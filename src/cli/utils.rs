use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::gateway::{Notice, NoticeLevel, Notifier};
use crate::types::{Envelope, Page};

/// Prints notices to stderr so JSON on stdout stays parseable
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    output: OutputFormat,
}

impl ConsoleNotifier {
    pub fn new(output: OutputFormat) -> Self {
        Self { output }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        match self.output {
            OutputFormat::Json => {
                let level = match notice.level {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Warning => "warning",
                    NoticeLevel::Error => "error",
                };
                eprintln!("{}", json!({ "notice": notice.message, "level": level }));
            }
            OutputFormat::Text => match notice.level {
                NoticeLevel::Info => eprintln!("{}", notice.message),
                _ => eprintln!("⚠ {}", notice.message),
            },
        }
    }
}

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Payload of a successful envelope; a failing one becomes the command's error
pub fn unwrap_envelope<T>(envelope: Envelope<T>) -> anyhow::Result<T> {
    Ok(envelope.into_result()?)
}

/// Outcome of a mutation (`Envelope<bool>`) as a success line
pub fn output_mutation(
    output_format: &OutputFormat,
    envelope: Envelope<bool>,
    message: &str,
) -> anyhow::Result<()> {
    let server_message = envelope.message().to_string();
    if !unwrap_envelope(envelope)? {
        anyhow::bail!("Server reported no change: {}", server_message);
    }
    output_success(output_format, message, None)
}

/// JSON rendering of a single record, or the text callback
pub fn output_record<T, F>(output_format: &OutputFormat, record: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => text(record),
    }
    Ok(())
}

/// A page of rows as JSON, or as a text table built from `header` and `row`
pub fn output_page<T, F>(
    output_format: &OutputFormat,
    collection_name: &str,
    page: &Page<T>,
    header: &str,
    row: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    if page.is_empty() {
        return match output_format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&json!({ "total": page.total, collection_name: [] }))?);
                Ok(())
            }
            OutputFormat::Text => {
                println!("No {} found (total {})", collection_name, page.total);
                Ok(())
            }
        };
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "total": page.total,
                collection_name: page.rows
            }))?);
        }
        OutputFormat::Text => {
            print_table(header, page.rows.iter().map(row));
            println!("{} of {} shown", page.rows.len(), page.total);
        }
    }
    Ok(())
}

/// A full list as JSON, or as a text table
pub fn output_list<T, F>(
    output_format: &OutputFormat,
    collection_name: &str,
    rows: &[T],
    header: &str,
    row: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    if rows.is_empty() {
        return output_empty_collection(output_format, collection_name, &format!("No {} found", collection_name));
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: rows }))?);
        }
        OutputFormat::Text => print_table(header, rows.iter().map(row)),
    }
    Ok(())
}

fn print_table(header: &str, rows: impl Iterator<Item = String>) {
    println!("{}", header);
    println!("{}", "-".repeat(header.len().max(20)));
    for row in rows {
        println!("{}", row);
    }
}

pub fn display_opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Parse a JSON document from stdin
pub fn read_json_stdin<T: DeserializeOwned>() -> anyhow::Result<T> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    parse_json_input(&input)
}

pub fn parse_json_input<T: DeserializeOwned>(input: &str) -> anyhow::Result<T> {
    if input.trim().is_empty() {
        anyhow::bail!("Expected a JSON object on stdin");
    }
    serde_json::from_str(input).map_err(|e| anyhow::anyhow!("Invalid JSON input: {}", e))
}

/// Comma- or space-separated ids as typed on the command line
pub fn parse_ids(raw: &[String]) -> anyhow::Result<Vec<i64>> {
    let mut ids = Vec::new();
    for part in raw.iter().flat_map(|s| s.split(',')) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("'{}' is not a valid id", part))?;
        ids.push(id);
    }

    if ids.is_empty() {
        anyhow::bail!("At least one id is required");
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::department::AddDepartmentRequest;

    #[test]
    fn test_parse_ids_accepts_commas_and_separate_args() {
        let raw = vec!["1,2".to_string(), "3".to_string(), ",4,".to_string()];
        assert_eq!(parse_ids(&raw).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_ids_rejects_garbage() {
        assert!(parse_ids(&["1,x".to_string()]).is_err());
        assert!(parse_ids(&[",".to_string()]).is_err());
    }

    #[test]
    fn test_parse_json_input() {
        let request: AddDepartmentRequest = parse_json_input(r#"{"name": "Teaching"}"#).unwrap();
        assert_eq!(request.name, "Teaching");
        assert!(parse_json_input::<AddDepartmentRequest>("  ").is_err());
    }

    #[test]
    fn test_display_opt() {
        assert_eq!(display_opt(&Some(3)), "3");
        assert_eq!(display_opt::<String>(&None), "-");
    }
}
