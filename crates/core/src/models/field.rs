use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScheduleError;
use crate::models::pagination::page_offset;
use crate::models::schedule::SortOrder;

/// Longest accepted field code.
pub const MAX_CODE_LEN: usize = 15;
/// Longest accepted field name.
pub const MAX_NAME_LEN: usize = 100;

/// A reservable facility.
///
/// Schedules reference a field through `id`; `uuid` is the public identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: i64,
    pub uuid: Uuid,
    pub code: String,
    pub name: String,
    pub price_per_hour: i64,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A field that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewField {
    pub uuid: Uuid,
    pub code: String,
    pub name: String,
    pub price_per_hour: i64,
    pub images: Vec<String>,
}

/// Full replacement of a field's editable attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPatch {
    pub code: String,
    pub name: String,
    pub price_per_hour: i64,
    pub images: Vec<String>,
}

/// Columns a field listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSortColumn {
    Id,
    Code,
    Name,
    PricePerHour,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl FieldSortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldSortColumn::Id => "id",
            FieldSortColumn::Code => "code",
            FieldSortColumn::Name => "name",
            FieldSortColumn::PricePerHour => "price_per_hour",
            FieldSortColumn::CreatedAt => "created_at",
            FieldSortColumn::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for FieldSortColumn {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(FieldSortColumn::Id),
            "code" => Ok(FieldSortColumn::Code),
            "name" => Ok(FieldSortColumn::Name),
            "price_per_hour" => Ok(FieldSortColumn::PricePerHour),
            "created_at" => Ok(FieldSortColumn::CreatedAt),
            "updated_at" => Ok(FieldSortColumn::UpdatedAt),
            other => Err(ScheduleError::InvalidInput(format!(
                "Unsupported sort column: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldListParams {
    pub page: i64,
    pub limit: i64,
    pub sort_column: FieldSortColumn,
    pub sort_order: SortOrder,
}

impl FieldListParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.limit)
    }
}

/// Image entries are already-hosted URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRequest {
    pub code: String,
    pub name: String,
    pub price_per_hour: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Omitting `images` keeps the current list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFieldRequest {
    pub code: String,
    pub name: String,
    pub price_per_hour: i64,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRequestParam {
    pub page: i64,
    pub limit: i64,
    pub sort_column: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResponse {
    pub uuid: Uuid,
    pub code: String,
    pub name: String,
    pub price_per_hour: i64,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Field> for FieldResponse {
    fn from(field: Field) -> Self {
        Self {
            uuid: field.uuid,
            code: field.code,
            name: field.name,
            price_per_hour: field.price_per_hour,
            images: field.images,
            created_at: field.created_at,
            updated_at: field.updated_at,
        }
    }
}
