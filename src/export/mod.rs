pub mod markdown;
pub mod payload;

pub use markdown::{render_markdown, write_document};
pub use payload::{build_payload, sanitize_title, ExportPayload, TABLE_HEAD};
