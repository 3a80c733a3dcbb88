//! Cross-cutting HTTP layers applied around the whole router.

pub mod cors;
pub mod request_id;
pub mod security_headers;
