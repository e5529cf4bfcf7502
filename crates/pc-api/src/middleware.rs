//! pickchef/crates/pc-api/src/middleware.rs Middleware
//!
//! Access logging and cross-origin policy for the PickChef API.

use actix_cors::Cors;
use actix_web::middleware::Logger;

// Returns the standard access logger for the PickChef API.
pub fn standard_middleware() -> Logger {
    // We use the 'default' logger which outputs:
    // remote-ip "request-line" status-code response-size "referrer" "user-agent"
    Logger::default()
}

// Configures CORS (Cross-Origin Resource Sharing)
// Only the listed origins get CORS headers; any method and header is accepted.
// Requests from other origins are still served, just without those headers.
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .block_on_origin_mismatch(false)
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
