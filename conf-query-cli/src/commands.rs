use crate::config::{Config, DialectName};
use anyhow::{Context, Result};
use conf_query::json::{Number, Value as JsonValue};
use conf_query::{
    ConferenceQuery, FilterValue, FormattedFilters, Postgres, QueryResult, Sqlite,
    format_filters, nearly_sold_out_announcement, parse_conferences, parse_query_forms,
};
use miniserde::Serialize;
use std::io::Read;
use std::path::Path;

#[derive(Serialize)]
struct FilterOut {
    field: String,
    operator: String,
    value: JsonValue,
}

#[derive(Serialize)]
struct CheckOut {
    #[serde(rename = "inequalityField")]
    inequality_field: Option<String>,
    filters: Vec<FilterOut>,
}

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_query(input: &Path) -> Result<ConferenceQuery> {
    let raw = parse_query_forms(&read_input(input)?)?;
    Ok(ConferenceQuery::from_raw(&raw)?)
}

pub fn check(input: &Path) -> Result<String> {
    let raw = parse_query_forms(&read_input(input)?)?;
    let formatted = format_filters(&raw)?;
    Ok(render_check(&formatted))
}

pub fn render_check(formatted: &FormattedFilters) -> String {
    let out = CheckOut {
        inequality_field: formatted.inequality_field.map(|f| f.property().to_string()),
        filters: formatted
            .iter()
            .map(|f| FilterOut {
                field: f.field.property().to_string(),
                operator: f.op.as_str().to_string(),
                value: match &f.value {
                    FilterValue::Int(i) => JsonValue::Number(Number::I64(*i)),
                    FilterValue::String(s) => JsonValue::String(s.clone()),
                },
            })
            .collect(),
    };
    miniserde::json::to_string(&out)
}

pub fn sql(
    input: &Path,
    config: &Config,
    dialect: Option<DialectName>,
    table: Option<&str>,
) -> Result<String> {
    let query = load_query(input)?;
    let table = table.unwrap_or(&config.table);
    let result = match dialect.unwrap_or(config.dialect) {
        DialectName::Postgres => query.to_sql(&Postgres, table)?,
        DialectName::Sqlite => query.to_sql(&Sqlite, table)?,
    };
    Ok(render_sql(&result))
}

/// SQL on the first line, then one parameter per line.
pub fn render_sql(result: &QueryResult) -> String {
    let mut out = result.sql.clone();
    for param in &result.params {
        out.push('\n');
        out.push_str(&param.to_string());
    }
    out
}

pub fn run(input: &Path, data: &Path) -> Result<String> {
    let query = load_query(input)?;
    let conferences = parse_conferences(&read_input(data)?)
        .with_context(|| format!("Failed to load conferences from {}", data.display()))?;
    let names: Vec<&str> = query
        .run(&conferences)
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    Ok(names.join("\n"))
}

pub fn announce(data: &Path) -> Result<String> {
    let conferences = parse_conferences(&read_input(data)?)
        .with_context(|| format!("Failed to load conferences from {}", data.display()))?;
    Ok(nearly_sold_out_announcement(&conferences).unwrap_or_default())
}
