use crate::error::{AppError, AppResult};
use crate::models::ReporteModel;
use crate::response::ApiResponse;
use crate::services::reporte::{NuevoReporte, ReporteService};
use crate::services::upload::{UploadConfig, UploadService};
use crate::utils::{format_bogota, SharedClock};
use axum::{
    body::Bytes,
    extract::multipart::Field,
    extract::{FromRequest, Multipart, Path, Request},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CrearReporteRequest {
    /// Incident type (bache, alumbrado, ...)
    #[validate(length(min = 1, max = 50))]
    pub tipo: Option<String>,
    /// Reporter name
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,
    /// What happened and where
    #[validate(length(min = 1))]
    pub descripcion: Option<String>,
    /// Latitude
    pub lat: Option<f64>,
    /// Longitude
    pub lng: Option<f64>,
    /// Responsible institution
    #[validate(length(min = 1, max = 100))]
    pub entidad: Option<String>,
}

fn falta_campo(field: &str) -> AppError {
    AppError::Validation(format!("Falta el campo: {}", field))
}

impl CrearReporteRequest {
    /// Presence check for every required field, in submission order.
    fn into_nuevo(self, imagen: Option<String>) -> AppResult<NuevoReporte> {
        Ok(NuevoReporte {
            tipo: self.tipo.ok_or_else(|| falta_campo("tipo"))?,
            nombre: self.nombre.ok_or_else(|| falta_campo("nombre"))?,
            descripcion: self.descripcion.ok_or_else(|| falta_campo("descripcion"))?,
            lat: self.lat.ok_or_else(|| falta_campo("lat"))?,
            lng: self.lng.ok_or_else(|| falta_campo("lng"))?,
            entidad: self.entidad.ok_or_else(|| falta_campo("entidad"))?,
            imagen,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReporteView {
    /// Report ID
    pub id: i32,
    pub tipo: String,
    pub nombre: String,
    pub descripcion: String,
    pub lat: f64,
    pub lng: f64,
    pub entidad: String,
    /// Bogota wall time, `YYYY-MM-DD HH:MM:SS`
    pub fecha_creacion: String,
    /// Stored upload filename, if any
    pub imagen: Option<String>,
}

impl From<ReporteModel> for ReporteView {
    fn from(r: ReporteModel) -> Self {
        Self {
            id: r.id,
            tipo: r.tipo,
            nombre: r.nombre,
            descripcion: r.descripcion,
            lat: r.lat,
            lng: r.lng,
            entidad: r.entidad,
            fecha_creacion: format_bogota(r.fecha_creacion),
            imagen: r.imagen,
        }
    }
}

#[utoipa::path(
    post,
    path = "/reporte",
    request_body = CrearReporteRequest,
    responses(
        (status = 201, description = "Report created", body = ReporteView),
        (status = 400, description = "Missing or invalid field", body = AppError),
        (status = 500, description = "Storage failure", body = AppError),
    ),
    tag = "reportes"
)]
pub async fn crear_reporte(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<UploadConfig>,
    Extension(clock): Extension<SharedClock>,
    req: Request,
) -> AppResult<impl IntoResponse> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (payload, imagen) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read form: {}", e)))?;
        parse_multipart(multipart, &config).await?
    } else {
        let body = Bytes::from_request(req, &())
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read body: {}", e)))?;
        if body.is_empty() {
            return Err(AppError::Validation("Datos vacíos".to_string()));
        }
        let payload: CrearReporteRequest = serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))?;
        (payload, None)
    };

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let nuevo = payload.into_nuevo(imagen)?;

    let service = ReporteService::new(db, clock);
    let reporte = service.crear(nuevo).await?;

    tracing::info!(id = reporte.id, tipo = %reporte.tipo, "reporte creado");

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            ReporteView::from(reporte),
            "Reporte agregado correctamente".to_string(),
        ),
    ))
}

/// Collect the form fields of a multipart submission, saving the optional
/// `imagen` attachment as it streams by.
async fn parse_multipart(
    mut multipart: Multipart,
    config: &UploadConfig,
) -> AppResult<(CrearReporteRequest, Option<String>)> {
    let mut request = CrearReporteRequest::default();
    let mut imagen = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "tipo" => request.tipo = Some(text_field(field, &name).await?),
            "nombre" => request.nombre = Some(text_field(field, &name).await?),
            "descripcion" => request.descripcion = Some(text_field(field, &name).await?),
            "lat" => request.lat = Some(float_field(field, &name).await?),
            "lng" => request.lng = Some(float_field(field, &name).await?),
            "entidad" => request.entidad = Some(text_field(field, &name).await?),
            "imagen" => {
                // Browsers send an empty part when no file was chosen.
                if !field.file_name().is_some_and(|f| !f.is_empty()) {
                    continue;
                }
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read file data: {}", e))
                })?;
                if data.is_empty() {
                    continue;
                }
                imagen = Some(UploadService::save_image(config, &data, &content_type).await?);
            }
            _ => {}
        }
    }

    Ok((request, imagen))
}

async fn text_field(field: Field<'_>, name: &str) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read field {}: {}", name, e)))
}

async fn float_field(field: Field<'_>, name: &str) -> AppResult<f64> {
    let raw = text_field(field, name).await?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::Validation(format!("Valor inválido para el campo: {}", name)))
}

#[utoipa::path(
    delete,
    path = "/eliminar/{id}",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "No such report", body = AppError),
        (status = 500, description = "Storage failure", body = AppError),
    ),
    tag = "reportes"
)]
pub async fn eliminar_reporte(
    Extension(db): Extension<DatabaseConnection>,
    Extension(clock): Extension<SharedClock>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = ReporteService::new(db, clock);
    service.eliminar(id).await?;

    tracing::info!(id, "reporte eliminado");

    Ok(ApiResponse::with_message(
        serde_json::Value::Null,
        "Reporte eliminado correctamente".to_string(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/reportes",
    responses(
        (status = 200, description = "All reports, newest first", body = Vec<ReporteView>),
        (status = 500, description = "Storage failure", body = AppError),
    ),
    tag = "reportes"
)]
pub async fn api_reportes(
    Extension(db): Extension<DatabaseConnection>,
    Extension(clock): Extension<SharedClock>,
) -> AppResult<Json<Vec<ReporteView>>> {
    let service = ReporteService::new(db, clock);
    let reportes = service.listar().await?;
    Ok(Json(reportes.into_iter().map(ReporteView::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn modelo() -> ReporteModel {
        ReporteModel {
            id: 7,
            tipo: "bache".to_string(),
            nombre: "Juan".to_string(),
            descripcion: "Hueco grande".to_string(),
            lat: 4.65,
            lng: -74.05,
            entidad: "IDU".to_string(),
            fecha_creacion: NaiveDate::from_ymd_opt(2024, 6, 15)
                .unwrap()
                .and_hms_opt(20, 30, 0)
                .unwrap(),
            imagen: None,
        }
    }

    #[test]
    fn view_converts_timestamp_to_bogota() {
        let view = ReporteView::from(modelo());
        assert_eq!(view.fecha_creacion, "2024-06-15 15:30:00");
        assert_eq!(view.id, 7);
        assert_eq!(view.tipo, "bache");
        assert!(view.imagen.is_none());
    }

    #[test]
    fn view_carries_image_filename() {
        let mut m = modelo();
        m.imagen = Some("abc.png".to_string());
        let view = ReporteView::from(m);
        assert_eq!(view.imagen.as_deref(), Some("abc.png"));
    }

    #[test]
    fn missing_fields_are_reported_in_submission_order() {
        let vacio = CrearReporteRequest::default();
        let err = vacio.into_nuevo(None).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Falta el campo: tipo"));

        let sin_lat = CrearReporteRequest {
            tipo: Some("bache".to_string()),
            nombre: Some("Juan".to_string()),
            descripcion: Some("Hueco".to_string()),
            lat: None,
            lng: Some(-74.05),
            entidad: Some("IDU".to_string()),
        };
        let err = sin_lat.into_nuevo(None).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Falta el campo: lat"));
    }

    #[test]
    fn complete_request_becomes_nuevo_reporte() {
        let req = CrearReporteRequest {
            tipo: Some("bache".to_string()),
            nombre: Some("Juan".to_string()),
            descripcion: Some("Hueco".to_string()),
            lat: Some(4.65),
            lng: Some(-74.05),
            entidad: Some("IDU".to_string()),
        };
        let nuevo = req.into_nuevo(Some("f.png".to_string())).unwrap();
        assert_eq!(nuevo.tipo, "bache");
        assert_eq!(nuevo.lat, 4.65);
        assert_eq!(nuevo.imagen.as_deref(), Some("f.png"));
    }
}
