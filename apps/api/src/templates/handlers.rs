use axum::{extract::Path, Json};

use crate::errors::AppError;
use crate::templates::catalog::{get_template, list_templates, Template, TemplateList};

/// GET /api/templates
pub async fn handle_list_templates() -> Json<TemplateList> {
    Json(list_templates())
}

/// GET /api/templates/:id
pub async fn handle_get_template(Path(id): Path<String>) -> Result<Json<Template>, AppError> {
    let template =
        get_template(&id).inspect_err(|_| tracing::debug!("Unknown template id {id:?}"))?;
    Ok(Json(template))
}
