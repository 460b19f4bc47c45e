pub mod http;
pub mod models;

pub use http::{CHAT_FALLBACK, HttpDocumentService, UPLOAD_FALLBACK};
