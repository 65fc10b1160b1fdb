use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const REPORTES_HTML: &str = include_str!("../../static/reportes.html");

/// Map page. Report data is loaded client-side from `/api/reportes`.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// List view of all reports.
pub async fn lista_reportes() -> Html<&'static str> {
    Html(REPORTES_HTML)
}
