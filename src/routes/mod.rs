use crate::handlers;
use axum::{extract::DefaultBodyLimit, routing, Router};

// Above the upload cap so oversized images reach the validation path.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn create_routes() -> Router {
    Router::new()
        .route("/", routing::get(handlers::pages::index))
        .route("/reportes", routing::get(handlers::pages::lista_reportes))
        .route("/reporte", routing::post(handlers::reporte::crear_reporte))
        .route(
            "/eliminar/{id}",
            routing::delete(handlers::reporte::eliminar_reporte),
        )
        .route(
            "/api/reportes",
            routing::get(handlers::reporte::api_reportes),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
