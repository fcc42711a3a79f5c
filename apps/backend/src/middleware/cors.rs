use actix_cors::Cors;
use actix_web::http::header;

const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// CORS for the browser client. Only explicitly configured origins are
/// allowed; with none configured, only local development origins are.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let origins: Vec<&str> = allowed_origins
        .iter()
        .map(String::as_str)
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();
    let origins = if origins.is_empty() {
        LOCAL_ORIGINS.to_vec()
    } else {
        origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
