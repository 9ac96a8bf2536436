use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Inspected asset class. Each variant owns one report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Rotor blade units, stored in `damage_reports`
    #[default]
    Windmill,
    /// Solar panel units, stored in `solar_panel_reports`
    Solar,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Windmill => "windmill",
            AssetType::Solar => "solar",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            AssetType::Windmill => "damage_reports",
            AssetType::Solar => "solar_panel_reports",
        }
    }

    /// Column holding the caller supplied asset identifier
    pub fn identifier_column(&self) -> &'static str {
        match self {
            AssetType::Windmill => "windmill_number",
            AssetType::Solar => "panel_id",
        }
    }

    /// Value of the `type` discriminator column, for tables that carry one
    pub fn discriminator(&self) -> Option<&'static str> {
        match self {
            AssetType::Windmill => Some("windmill"),
            AssetType::Solar => None,
        }
    }

    pub fn csv_header(&self) -> [&'static str; 6] {
        [
            "id",
            self.identifier_column(),
            "damage",
            "location",
            "image_path",
            "timestamp",
        ]
    }

    pub fn csv_file_name(&self) -> &'static str {
        match self {
            AssetType::Windmill => "windmill_damage_reports.csv",
            AssetType::Solar => "solar_panel_reports.csv",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AssetType {
    /// Only `solar` selects the solar table; anything else is a windmill
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("solar") {
            AssetType::Solar
        } else {
            AssetType::Windmill
        }
    }
}

impl FromStr for AssetType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetType::from(s))
    }
}

impl<'de> Deserialize<'de> for AssetType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(AssetType::from(raw.as_str()))
    }
}

/// Database row shared by both report tables.
///
/// The per-table identifier column is selected as `asset_number`.
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: i64,
    pub asset_number: String,
    pub damage: String,
    pub location: String,
    pub image_path: String,
    pub timestamp: NaiveDateTime,
    #[sqlx(skip)]
    pub asset_type: AssetType,
}

impl Report {
    /// Store timestamps are written in UTC
    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        self.timestamp.and_utc()
    }
}

/// Data for inserting a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub asset_type: AssetType,
    pub asset_number: String,
    pub damage: String,
    pub location: String,
    pub image_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_parsing() {
        assert_eq!("windmill".parse::<AssetType>(), Ok(AssetType::Windmill));
        assert_eq!("Solar".parse::<AssetType>(), Ok(AssetType::Solar));
        assert_eq!(" solar ".parse::<AssetType>(), Ok(AssetType::Solar));
        assert_eq!("".parse::<AssetType>(), Ok(AssetType::Windmill));
        assert_eq!("rotor".parse::<AssetType>(), Ok(AssetType::Windmill));
        assert_eq!("hydro".parse::<AssetType>(), Ok(AssetType::Windmill));
    }

    #[test]
    fn test_asset_type_deserializes_from_json_string() {
        let parsed: AssetType = serde_json::from_str("\"solar\"").unwrap();
        assert_eq!(parsed, AssetType::Solar);
        let fallback: AssetType = serde_json::from_str("\"hydro\"").unwrap();
        assert_eq!(fallback, AssetType::Windmill);
    }

    #[test]
    fn test_asset_type_schema_decisions() {
        assert_eq!(AssetType::Windmill.table(), "damage_reports");
        assert_eq!(AssetType::Solar.table(), "solar_panel_reports");
        assert_eq!(AssetType::Windmill.discriminator(), Some("windmill"));
        assert_eq!(AssetType::Solar.discriminator(), None);
        assert_eq!(
            AssetType::Windmill.csv_header().join(","),
            "id,windmill_number,damage,location,image_path,timestamp"
        );
        assert_eq!(
            AssetType::Solar.csv_header().join(","),
            "id,panel_id,damage,location,image_path,timestamp"
        );
    }
}
