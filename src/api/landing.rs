/*
 * Responsibility
 * - Static page for `/`, served by the service-key gate without any key check
 */
use axum::response::Html;

const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Notes API</title></head>
<body>
<h1>Notes API</h1>
<p>This service is an API. Requests need the service key header and, outside <code>/auth/</code>, a bearer session token.</p>
</body>
</html>
"#;

pub fn page() -> Html<&'static str> {
    Html(PAGE)
}
