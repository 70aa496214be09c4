//! Populate command runner.

use anyhow::Context;
use mock_populate::{
    init_schema_session, run_session, MemoryStore, PopulateConfig, RunReport, TargetTable,
};
use mock_populate_mysql::{MySQLConnectionArgs, MySQLPopulateArgs, MySQLStore};

use super::mask_connection_password;

fn table_list(tables: &[TargetTable]) -> String {
    tables
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn log_report(report: &RunReport) {
    for table in &report.tables {
        tracing::info!(
            "{}: {} rows before, {} inserted with {} statements in {:?}",
            table.table,
            table.existing_rows,
            table.rows_inserted,
            table.statement_count,
            table.duration
        );
    }
}

/// Run populate command to fill the enabled target tables with mock rows
pub async fn run_populate(args: MySQLPopulateArgs) -> anyhow::Result<()> {
    let config: PopulateConfig = args
        .common
        .to_config()
        .context("Invalid populate arguments")?;
    let connection_string = &args.connection.mysql_connection_string;

    if args.common.dry_run {
        tracing::info!(
            "[DRY-RUN] Would populate MySQL with {} rows per table (seed={:?})",
            config.row_count,
            config.seed
        );
        tracing::info!(
            "[DRY-RUN] Connection: {}",
            mask_connection_password(connection_string)
        );
        tracing::info!("[DRY-RUN] Tables: {}", table_list(&config.enabled_targets));

        let mut store = MemoryStore::new();
        let report = run_session(&mut store, config.clone())
            .await
            .context("Dry run failed")?;

        for table in &config.enabled_targets {
            if let Some(record) = store.rows(*table).first() {
                tracing::info!(
                    "[DRY-RUN] Sample '{}' row: {}",
                    table,
                    serde_json::to_string(record)?
                );
            }
        }
        log_report(&report);
        return Ok(());
    }

    tracing::info!(
        "Populating MySQL at {} with {} rows per table (tables: {}, seed={:?})",
        mask_connection_password(connection_string),
        config.row_count,
        table_list(&config.enabled_targets),
        config.seed
    );

    let mut store = MySQLStore::connect(connection_string)
        .await
        .context("Failed to connect to MySQL")?;

    let report = run_session(&mut store, config)
        .await
        .context("Failed to populate mock data")?;

    log_report(&report);
    tracing::info!("Mock data created successfully.");
    Ok(())
}

/// Run schema command to create the target tables only
pub async fn run_schema(connection: MySQLConnectionArgs) -> anyhow::Result<()> {
    tracing::info!(
        "Creating target tables at {}",
        mask_connection_password(&connection.mysql_connection_string)
    );

    let mut store = MySQLStore::connect(&connection.mysql_connection_string)
        .await
        .context("Failed to connect to MySQL")?;

    init_schema_session(&mut store)
        .await
        .context("Failed to create target tables")?;

    tracing::info!("Target tables ready: {}", table_list(&TargetTable::ALL));
    Ok(())
}
