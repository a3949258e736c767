/// Error code registry for relibot
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Ingestion errors (CSV uploads, timestamps)
/// - 3000-3999: Storage errors (backend, I/O)
/// - 4000-4999: Export errors (xlsx, pdf, markdown, json)
/// - 7000-7999: Validation errors
/// - 9000-9999: Other errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1004;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;

    // Ingestion errors (2000-2999)
    pub const INGEST_EMPTY_FILE: u16 = 2001;
    pub const INGEST_NO_ROWS: u16 = 2002;
    pub const INGEST_MISSING_COLUMN: u16 = 2003;
    pub const INGEST_MALFORMED_CSV: u16 = 2004;
    pub const INGEST_UNREADABLE_FILE: u16 = 2005;

    // Storage errors (3000-3999)
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_NOT_FOUND: u16 = 3004;
    pub const STORAGE_ALREADY_EXISTS: u16 = 3005;
    pub const STORAGE_TEMPORARY: u16 = 3009;
    pub const STORAGE_BACKEND_ERROR: u16 = 3010;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3011;
    pub const STORAGE_UNAUTHORIZED: u16 = 3013;

    // Export errors (4000-4999)
    pub const EXPORT_GENERIC: u16 = 4000;
    pub const EXPORT_XLSX_FAILED: u16 = 4001;
    pub const EXPORT_PDF_FAILED: u16 = 4002;
    pub const EXPORT_FONTS_MISSING: u16 = 4003;
    pub const EXPORT_UNKNOWN_FORMAT: u16 = 4004;

    // Validation errors (7000-7999)
    pub const VALIDATION_REQUIRED_FIELD: u16 = 7001;
    pub const VALIDATION_INVALID_FORMAT: u16 = 7005;
    pub const VALIDATION_INVALID_INPUT: u16 = 7008;
    pub const VALIDATION_INVALID_DATA: u16 = 7009;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}
