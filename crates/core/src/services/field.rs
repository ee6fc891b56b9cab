use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        field::{
            FieldListParams, FieldPatch, FieldRequest, FieldRequestParam, FieldResponse,
            FieldSortColumn, NewField, UpdateFieldRequest, MAX_CODE_LEN, MAX_NAME_LEN,
        },
        pagination::{check_page, PaginationResult},
        schedule::SortOrder,
    },
    repository::FieldRepository,
};

/// Management of the facilities schedules are opened on.
///
/// Image upload is not handled here; callers pass URLs of images that are
/// already hosted.
#[derive(Clone)]
pub struct FieldService {
    fields: Arc<dyn FieldRepository>,
}

impl FieldService {
    pub fn new(fields: Arc<dyn FieldRepository>) -> Self {
        Self { fields }
    }

    pub async fn get_all_with_pagination(
        &self,
        param: FieldRequestParam,
    ) -> ScheduleResult<PaginationResult<FieldResponse>> {
        let params = list_params(&param)?;
        let (rows, total) = self.fields.find_all_paginated(params).await?;

        let data = rows.into_iter().map(FieldResponse::from).collect();
        Ok(PaginationResult::new(data, total, params.page, params.limit))
    }

    pub async fn get_all_without_pagination(&self) -> ScheduleResult<Vec<FieldResponse>> {
        let fields = self.fields.find_all().await?;
        Ok(fields.into_iter().map(FieldResponse::from).collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> ScheduleResult<FieldResponse> {
        self.fields
            .find_by_uuid(uuid)
            .await?
            .map(FieldResponse::from)
            .ok_or_else(|| ScheduleError::field_not_found(uuid))
    }

    pub async fn create(&self, request: FieldRequest) -> ScheduleResult<FieldResponse> {
        let (code, name) = validate(&request.code, &request.name, request.price_per_hour)?;
        validate_images(&request.images)?;

        let field = self
            .fields
            .create(NewField {
                uuid: Uuid::new_v4(),
                code,
                name,
                price_per_hour: request.price_per_hour,
                images: request.images,
            })
            .await?;
        info!(field = %field.uuid, code = %field.code, "Created field");

        Ok(field.into())
    }

    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateFieldRequest,
    ) -> ScheduleResult<FieldResponse> {
        let (code, name) = validate(&request.code, &request.name, request.price_per_hour)?;
        let current = self
            .fields
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScheduleError::field_not_found(uuid))?;

        let images = match request.images {
            Some(images) => {
                validate_images(&images)?;
                images
            }
            None => current.images,
        };

        let field = self
            .fields
            .update(
                uuid,
                FieldPatch {
                    code,
                    name,
                    price_per_hour: request.price_per_hour,
                    images,
                },
            )
            .await?;
        info!(field = %uuid, "Updated field");

        Ok(field.into())
    }

    /// Fields that still have schedules cannot be deleted.
    pub async fn delete(&self, uuid: Uuid) -> ScheduleResult<()> {
        self.fields
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScheduleError::field_not_found(uuid))?;

        self.fields.delete(uuid).await?;
        info!(field = %uuid, "Deleted field");
        Ok(())
    }
}

fn validate(code: &str, name: &str, price_per_hour: i64) -> ScheduleResult<(String, String)> {
    let code = code.trim();
    let name = name.trim();

    if code.is_empty() || code.chars().count() > MAX_CODE_LEN {
        return Err(ScheduleError::InvalidInput(format!(
            "Field code must be 1 to {} characters",
            MAX_CODE_LEN
        )));
    }
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(ScheduleError::InvalidInput(format!(
            "Field name must be 1 to {} characters",
            MAX_NAME_LEN
        )));
    }
    if price_per_hour < 0 {
        return Err(ScheduleError::InvalidInput(
            "Price per hour cannot be negative".to_string(),
        ));
    }

    Ok((code.to_string(), name.to_string()))
}

fn validate_images(images: &[String]) -> ScheduleResult<()> {
    if images.iter().any(|image| image.trim().is_empty()) {
        return Err(ScheduleError::InvalidInput(
            "Image URLs cannot be blank".to_string(),
        ));
    }
    Ok(())
}

fn list_params(param: &FieldRequestParam) -> ScheduleResult<FieldListParams> {
    check_page(param.page, param.limit)?;

    let (sort_column, sort_order) = match &param.sort_column {
        Some(column) => (
            column.parse::<FieldSortColumn>()?,
            param
                .sort_order
                .as_deref()
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or(SortOrder::Asc),
        ),
        None => (FieldSortColumn::CreatedAt, SortOrder::Desc),
    };

    Ok(FieldListParams {
        page: param.page,
        limit: param.limit,
        sort_column,
        sort_order,
    })
}
