//! SQL generation and INSERT logic for MySQL population.

use crate::error::MySQLPopulatorError;
use mock_generator::MockRecord;
use mock_populate::{TargetTable, RECORD_COLUMNS, SURROGATE_KEY_COLUMN};
use mysql_async::{prelude::*, Conn, Params, Value};

/// MySQL column type for each of [`RECORD_COLUMNS`].
const COLUMN_TYPES: [&str; 4] = ["INT", "CHAR(1)", "VARCHAR(6)", "VARCHAR(255)"];

/// Generate the idempotent CREATE TABLE statement for a target table.
pub fn generate_create_table(table: TargetTable) -> String {
    let mut columns: Vec<String> = Vec::with_capacity(RECORD_COLUMNS.len() + 1);

    if table.is_history() {
        columns.push(format!(
            "`{SURROGATE_KEY_COLUMN}` INT AUTO_INCREMENT PRIMARY KEY"
        ));
    }

    for (i, (name, ty)) in RECORD_COLUMNS.iter().zip(COLUMN_TYPES).enumerate() {
        if i == 0 && !table.is_history() {
            columns.push(format!("`{name}` {ty} NOT NULL PRIMARY KEY"));
        } else {
            columns.push(format!("`{name}` {ty}"));
        }
    }

    format!(
        "CREATE TABLE IF NOT EXISTS `{}` ({})",
        table.name(),
        columns.join(", ")
    )
}

/// Generate a multi-row INSERT with positional placeholders.
pub fn generate_insert(table: TargetTable, row_count: usize) -> String {
    let col_placeholders: Vec<&str> = RECORD_COLUMNS.iter().map(|_| "?").collect();
    let row_template = format!("({})", col_placeholders.join(", "));
    let rows_template: Vec<&str> = (0..row_count).map(|_| row_template.as_str()).collect();

    format!(
        "INSERT INTO `{}` ({}) VALUES {}",
        table.name(),
        RECORD_COLUMNS
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", "),
        rows_template.join(", ")
    )
}

/// Positional parameters for `records`, in [`RECORD_COLUMNS`] order.
pub fn record_params(records: &[MockRecord]) -> Vec<Value> {
    let mut params = Vec::with_capacity(records.len() * RECORD_COLUMNS.len());
    for record in records {
        params.push(Value::from(record.group_id));
        params.push(Value::from(record.status.as_char().to_string()));
        params.push(Value::from(record.program_name.as_str()));
        params.push(Value::from(record.carrier.as_str()));
    }
    params
}

/// Insert a batch of records with a single statement.
pub async fn insert_batch(
    conn: &mut Conn,
    table: TargetTable,
    records: &[MockRecord],
) -> Result<u64, MySQLPopulatorError> {
    if records.is_empty() {
        return Ok(0);
    }

    let sql = generate_insert(table, records.len());
    conn.exec_drop(&sql, Params::Positional(record_params(records)))
        .await?;

    Ok(records.len() as u64)
}
