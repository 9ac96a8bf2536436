use chrono::SecondsFormat;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{AssetType, CreateReport, Report};

/// Report repository over both asset tables.
///
/// Every statement is derived from the `AssetType` tag, so table and column
/// names never come from request input.
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn select_columns(asset_type: AssetType) -> String {
        format!(
            "id, {} AS asset_number, damage, location, image_path, timestamp",
            asset_type.identifier_column()
        )
    }

    fn insert_sql(asset_type: AssetType) -> String {
        let (extra_column, extra_value) = match asset_type.discriminator() {
            Some(_) => (", type", ", ?"),
            None => ("", ""),
        };

        format!(
            "INSERT INTO {} ({}, damage, location, image_path{}) VALUES (?, ?, ?, ?{}) RETURNING {}",
            asset_type.table(),
            asset_type.identifier_column(),
            extra_column,
            extra_value,
            Self::select_columns(asset_type)
        )
    }

    fn list_sql(asset_type: AssetType) -> String {
        let filter = match asset_type.discriminator() {
            Some(_) => " WHERE type = ?",
            None => "",
        };

        format!(
            "SELECT {} FROM {}{} ORDER BY timestamp DESC, id DESC",
            Self::select_columns(asset_type),
            asset_type.table(),
            filter
        )
    }

    /// Insert a report into the table selected by `data.asset_type`
    pub async fn create(&self, data: &CreateReport) -> Result<Report> {
        let sql = Self::insert_sql(data.asset_type);

        let mut query = sqlx::query_as::<_, Report>(&sql)
            .bind(&data.asset_number)
            .bind(&data.damage)
            .bind(&data.location)
            .bind(&data.image_path);

        if let Some(discriminator) = data.asset_type.discriminator() {
            query = query.bind(discriminator);
        }

        let mut report = query.fetch_one(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to insert {} report: {:?}", data.asset_type, e);
            AppError::Database(e)
        })?;
        report.asset_type = data.asset_type;

        tracing::info!(
            "Created {} report: id={}, asset_number={}, damage={}",
            data.asset_type,
            report.id,
            report.asset_number,
            report.damage
        );

        Ok(report)
    }

    /// All reports of one asset type, newest first
    pub async fn list(&self, asset_type: AssetType) -> Result<Vec<Report>> {
        let sql = Self::list_sql(asset_type);

        let mut query = sqlx::query_as::<_, Report>(&sql);
        if let Some(discriminator) = asset_type.discriminator() {
            query = query.bind(discriminator);
        }

        let mut reports = query.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to fetch {} reports: {:?}", asset_type, e);
            AppError::QueryFailed(e)
        })?;

        for report in &mut reports {
            report.asset_type = asset_type;
        }

        tracing::debug!("Fetched {} {} reports", reports.len(), asset_type);

        Ok(reports)
    }

    /// CSV document with one record per report, newest first
    pub async fn export_csv(&self, asset_type: AssetType) -> Result<String> {
        let reports = self.list(asset_type).await?;
        let csv = render_csv(asset_type, &reports)?;

        tracing::info!(
            "Generated CSV for {} {} reports",
            reports.len(),
            asset_type
        );

        Ok(csv)
    }
}

/// Encode reports with proper quoting of delimiters, quotes and newlines
pub fn render_csv(asset_type: AssetType, reports: &[Report]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(asset_type.csv_header())?;

    for report in reports {
        let id = report.id.to_string();
        let timestamp = report
            .timestamp_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        writer.write_record([
            id.as_str(),
            report.asset_number.as_str(),
            report.damage.as_str(),
            report.location.as_str(),
            report.image_path.as_str(),
            timestamp.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Csv(e.error().to_string()))?;

    String::from_utf8(bytes).map_err(|e| AppError::Csv(e.to_string()))
}
