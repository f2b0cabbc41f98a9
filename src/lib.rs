// Tahsilat Core - Payment normalization and currency conversion
// Exposes all modules for use in the CLI and tests

pub mod classify;
pub mod columns;
pub mod convert;
pub mod dedup;
pub mod import;
pub mod payment;
pub mod rates;
pub mod store;

// Re-export commonly used types
pub use classify::{
    detect_payment_channel, detect_payment_type, is_tl_payment, is_usd_currency,
    normalize_currency,
};
pub use columns::{missing_required, resolve_columns, ColumnMap, REQUIRED_FIELDS};
pub use convert::{ConversionStats, CurrencyOptimizer};
pub use dedup::{partition, DuplicateRecord};
pub use import::{
    detect_format, import_csv, import_file, import_json, import_xlsx, validate_entities,
};
pub use payment::{ConversionConfidence, PaymentEntity, RawRecord};
pub use rates::{
    RateConfidence, RateLookup, RateQuote, RateService, RateSource, TcmbSource,
    DEFAULT_USD_RATE,
};
pub use store::{load_store, save_store};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
