//! SQLite import/export.
//!
//! The tabular interchange format is a single `Devices` table with all
//! TEXT columns, matching what office tooling exports. Import is
//! lenient like the JSON path: unknown enum strings take the first
//! member, bad dates take today, nameless rows are skipped.

use std::path::Path;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::warn;

use fleetmon_core::{Device, DeviceCategory, DeviceStatus};

use crate::error::CliError;

#[derive(sqlx::FromRow)]
struct DeviceRow {
    #[sqlx(rename = "Category")]
    category: String,
    #[sqlx(rename = "Name")]
    name: String,
    #[sqlx(rename = "SerialNumber")]
    serial_number: String,
    #[sqlx(rename = "InstallDate")]
    install_date: String,
    #[sqlx(rename = "Status")]
    status: String,
}

async fn open(path: &Path, create: bool) -> Result<SqlitePool, CliError> {
    let db_url = format!("sqlite:{}", path.display());
    let options = SqliteConnectOptions::from_str(&db_url)
        .map_err(db_err)?
        .create_if_missing(create);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(db_err)
}

fn db_err(e: sqlx::Error) -> CliError {
    CliError::Data {
        message: format!("SQLite error: {e}"),
    }
}

/// Read every row of the `Devices` table.
pub async fn import_devices(path: &Path) -> Result<Vec<Device>, CliError> {
    if !path.exists() {
        return Err(CliError::Data {
            message: format!("no such file: {}", path.display()),
        });
    }
    let pool = open(path, false).await?;

    let rows: Vec<DeviceRow> =
        sqlx::query_as("SELECT Category, Name, SerialNumber, InstallDate, Status FROM Devices")
            .fetch_all(&pool)
            .await
            .map_err(db_err)?;
    pool.close().await;

    let mut devices = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        if row.name.trim().is_empty() {
            warn!(index, "skipping device row with empty name");
            continue;
        }
        devices.push(Device {
            category: row
                .category
                .parse::<DeviceCategory>()
                .unwrap_or(DeviceCategory::Server),
            name: row.name,
            serial_number: row.serial_number,
            install_date: row
                .install_date
                .parse::<NaiveDate>()
                .unwrap_or_else(|_| Local::now().date_naive()),
            status: row
                .status
                .parse::<DeviceStatus>()
                .unwrap_or(DeviceStatus::Working),
        });
    }
    Ok(devices)
}

/// Recreate the `Devices` table and write the given set.
pub async fn export_devices(path: &Path, devices: &[Device]) -> Result<(), CliError> {
    let pool = open(path, true).await?;

    sqlx::query("DROP TABLE IF EXISTS Devices")
        .execute(&pool)
        .await
        .map_err(db_err)?;
    sqlx::query(
        "CREATE TABLE Devices (
            Category     TEXT NOT NULL,
            Name         TEXT NOT NULL,
            SerialNumber TEXT NOT NULL,
            InstallDate  TEXT NOT NULL,
            Status       TEXT NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .map_err(db_err)?;

    for device in devices {
        sqlx::query(
            "INSERT INTO Devices (Category, Name, SerialNumber, InstallDate, Status)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(device.category.to_string())
        .bind(&device.name)
        .bind(&device.serial_number)
        .bind(device.install_date.format("%Y-%m-%d").to_string())
        .bind(device.status.to_string())
        .execute(&pool)
        .await
        .map_err(db_err)?;
    }

    pool.close().await;
    Ok(())
}
