use axum::response::Html;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// GET / - Live chart page fed by `/chart-data`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
