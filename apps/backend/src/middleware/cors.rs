use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS policy.
///
/// With no configured origins the policy is open: any origin, method and
/// header, with credentials. A non-empty origin list narrows only the
/// accepted origins.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    if allowed_origins.is_empty() {
        // Echoes the request origin, which credentials require
        return cors.allow_any_origin();
    }

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

/// Parse a comma-separated origin list, dropping blanks, `null`, and
/// anything that is not an http(s) origin.
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}
