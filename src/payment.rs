// 💰 Payment Entity - Canonical, USD-normalized payment record
// Builds a PaymentEntity from a raw export row: date/amount parsing,
// channel and payment-type classification, check detection, USD conversion.
// No parse or conversion failure ever escapes this module; everything
// degrades to a null/zero sentinel plus a log entry.

use crate::classify;
use crate::columns::{field, ColumnMap};
use crate::rates::{RateConfidence, RateLookup};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One raw row as read from an uploaded file: column name → scalar value.
/// Ephemeral; discarded after normalization.
pub type RawRecord = serde_json::Map<String, Value>;

/// Default check maturity when the export omits it: 6 months after payment
pub const DEFAULT_CHECK_MATURITY_DAYS: i64 = 180;

const DEFAULT_PROJECT_NAME: &str = "Genel Proje";

// ============================================================================
// CONVERSION CONFIDENCE
// ============================================================================

/// How trustworthy the USD figures on an entity are. Downstream reporting
/// must not present `Default` conversions as verified numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionConfidence {
    /// Exact-date official rate, or a USD-denominated original
    Verified,
    /// Converted with a nearby-day or warm-cache fallback rate
    Fallback,
    /// Converted with the hardcoded last-resort rate
    Default,
    /// No usable rate; `usd_amount` is 0
    Unconverted,
}

impl Default for ConversionConfidence {
    fn default() -> Self {
        ConversionConfidence::Unconverted
    }
}

impl From<RateConfidence> for ConversionConfidence {
    fn from(c: RateConfidence) -> Self {
        match c {
            RateConfidence::Official => ConversionConfidence::Verified,
            RateConfidence::MostRecent => ConversionConfidence::Fallback,
            RateConfidence::Default => ConversionConfidence::Default,
        }
    }
}

// ============================================================================
// PAYMENT ENTITY
// ============================================================================

/// Canonical payment record, the durable unit of the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntity {
    /// Stable identity, assigned at construction
    #[serde(default = "new_id")]
    pub id: String,

    // Identity-relevant fields
    pub customer_name: String,
    pub date: Option<NaiveDateTime>,
    /// Amount in the original `currency`
    pub amount: f64,
    pub currency: String,

    // Context
    pub project_name: String,
    pub account_name: String,
    pub payment_status: String,
    /// Rate column as supplied by the source, informational only
    #[serde(default)]
    pub source_exchange_rate: f64,

    // Derived USD figures
    pub usd_amount: f64,
    pub conversion_rate: f64,
    /// Date whose rate produced `usd_amount`: `date − 1 day`, or the
    /// maturity date for checks; the payment date itself for USD originals
    pub conversion_date: Option<NaiveDate>,
    #[serde(default)]
    pub conversion_confidence: ConversionConfidence,

    // Classification
    pub payment_channel: String,
    pub payment_type: String,
    pub collection_method: String,
    pub is_tl_payment: bool,
    pub is_check_payment: bool,

    // Check-specific fields
    #[serde(default)]
    pub check_amount: f64,
    #[serde(default)]
    pub check_maturity_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub check_usd_amount: f64,
    #[serde(default)]
    pub check_conversion_rate: f64,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl PaymentEntity {
    /// Build a canonical entity from a resolved raw row.
    ///
    /// `rates` is consulted once for the main amount (unless the payment is
    /// USD-denominated or dateless) and once more for the check amount on
    /// check payments.
    pub fn from_record(
        record: &RawRecord,
        columns: &ColumnMap,
        rates: &mut dyn RateLookup,
    ) -> PaymentEntity {
        let get = |canonical: &str| -> Option<&Value> {
            columns.get(canonical).and_then(|header| record.get(header))
        };

        let customer_name = text(get(field::CUSTOMER_NAME));
        let date = parse_date_value(get(field::DATE));
        let mut project_name = text(get(field::PROJECT_NAME));
        if project_name.is_empty() {
            project_name = DEFAULT_PROJECT_NAME.to_string();
        }
        let account_name = text(get(field::ACCOUNT_NAME));
        let amount = parse_amount_value(get(field::AMOUNT));
        let currency = classify::normalize_currency(&text(get(field::CURRENCY)));
        let source_exchange_rate = parse_amount_value(get(field::EXCHANGE_RATE));
        let payment_status = text(get(field::PAYMENT_STATUS));
        let mut collection_method = text(get(field::COLLECTION_METHOD));

        // Check detection: explicit collection-method marker, or a positive
        // check amount paired with a maturity field. Never inferred from
        // amount size alone.
        let mut check_amount = parse_amount_value(get(field::CHECK_AMOUNT));
        let maturity_field_present = !text(get(field::CHECK_MATURITY_DATE)).is_empty();
        let mut check_maturity_date = parse_date_value(get(field::CHECK_MATURITY_DATE));

        let method_upper = collection_method.to_uppercase();
        let is_check_payment = matches!(method_upper.as_str(), "ÇEK" | "CEK" | "CHECK")
            || (check_amount > 0.0 && maturity_field_present);

        // A check with no explicit amount is a check over the main amount
        if is_check_payment && check_amount == 0.0 {
            check_amount = amount;
        }

        // Main USD conversion
        let (usd_amount, conversion_rate, conversion_date, conversion_confidence) =
            convert_to_usd(amount, &currency, date, rates);

        // Check USD conversion, keyed on the maturity date (fallback to the
        // payment date) before the maturity default is applied
        let (check_usd_amount, check_conversion_rate) = if is_check_payment && check_amount > 0.0 {
            let (usd, rate, _, _) =
                convert_to_usd(check_amount, &currency, check_maturity_date.or(date), rates);
            (usd, rate)
        } else {
            (0.0, 0.0)
        };

        if is_check_payment && check_maturity_date.is_none() {
            check_maturity_date = date.map(|d| d + Duration::days(DEFAULT_CHECK_MATURITY_DAYS));
        }

        let is_tl_payment = classify::is_tl_payment(&currency, &account_name);
        let payment_channel = classify::detect_payment_channel(&account_name).to_string();
        let payment_type = classify::detect_payment_type(
            &collection_method,
            &account_name,
            is_check_payment,
            is_tl_payment,
        )
        .to_string();

        // Backfill the collection method with the detected type when the
        // source left it empty or as the placeholder
        if collection_method.is_empty() || collection_method == classify::TYPE_OTHER {
            collection_method = payment_type.clone();
        }

        PaymentEntity {
            id: new_id(),
            customer_name,
            date,
            amount,
            currency,
            project_name,
            account_name,
            payment_status,
            source_exchange_rate,
            usd_amount,
            conversion_rate,
            conversion_date,
            conversion_confidence,
            payment_channel,
            payment_type,
            collection_method,
            is_tl_payment,
            is_check_payment,
            check_amount,
            check_maturity_date,
            check_usd_amount,
            check_conversion_rate,
        }
    }

    /// Calendar day of the payment, ignoring time
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date.map(|d| d.date())
    }
}

// ============================================================================
// USD CONVERSION
// ============================================================================

/// Convert an amount to USD. Returns
/// `(usd_amount, conversion_rate, conversion_date, confidence)`.
///
/// USD originals convert by identity with no lookup. A missing date or a
/// failed lookup yields the zeroed sentinel, leaving the original amount
/// untouched on the entity.
fn convert_to_usd(
    amount: f64,
    currency: &str,
    date: Option<NaiveDateTime>,
    rates: &mut dyn RateLookup,
) -> (f64, f64, Option<NaiveDate>, ConversionConfidence) {
    if amount <= 0.0 {
        return (0.0, 0.0, None, ConversionConfidence::Unconverted);
    }

    if classify::is_usd_currency(currency) {
        return (
            amount,
            1.0,
            date.map(|d| d.date()),
            ConversionConfidence::Verified,
        );
    }

    let Some(date) = date else {
        return (0.0, 0.0, None, ConversionConfidence::Unconverted);
    };

    match rates.usd_rate(date.date()) {
        Some(quote) if quote.rate > 0.0 => (
            round2(amount / quote.rate),
            quote.rate,
            Some(date.date() - Duration::days(1)),
            quote.confidence.into(),
        ),
        _ => {
            warn!(
                "No usable USD rate for payment dated {}; keeping amount in {}",
                date.date(),
                currency
            );
            (0.0, 0.0, None, ConversionConfidence::Unconverted)
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// VALUE PARSING
// ============================================================================

/// Scalar → trimmed string; null-ish markers become empty
fn text(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    };
    match s.to_lowercase().as_str() {
        "nan" | "none" | "null" => String::new(),
        _ => s,
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y/%m/%d",
    "%d.%m.%y",
    "%d/%m/%y",
];

fn parse_date_value(value: Option<&Value>) -> Option<NaiveDateTime> {
    let s = text(value);
    parse_date(&s)
}

/// Try the ordered format list; total failure is `None`, never an error
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    warn!("Could not parse date: {:?}", raw);
    None
}

fn parse_amount_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_amount(s),
        _ => 0.0,
    }
}

/// Parse an amount string: strips thousands separators and currency glyphs,
/// extracts the value from the dynamic-column pattern `Label(Σ:VALUE)` /
/// `Label(?:VALUE)`, and decides between Turkish and US separator styles.
/// Returns `0.0` on failure, never an error.
pub fn parse_amount(raw: &str) -> f64 {
    let mut s = raw.trim().to_string();
    if s.is_empty() {
        return 0.0;
    }
    match s.to_lowercase().as_str() {
        "nan" | "none" | "null" => return 0.0,
        _ => {}
    }

    // Dynamic-column pattern: take the substring after `?:` or `Σ:` up to
    // the closing parenthesis
    if s.contains('(') {
        for marker in ["?:", "Σ:"] {
            if let Some(pos) = s.find(marker) {
                let start = pos + marker.len();
                let end = s[start..]
                    .find(')')
                    .map(|i| start + i)
                    .unwrap_or(s.len());
                s = s[start..end].to_string();
                break;
            }
        }
    }

    // Currency glyphs and spacing
    s.retain(|c| !matches!(c, '₺' | '$' | '€' | ' ' | '\u{a0}'));

    let has_dot = s.contains('.');
    let has_comma = s.contains(',');
    if has_dot && has_comma {
        // The rightmost separator is the decimal one
        if s.rfind(',') > s.rfind('.') {
            s = s.replace('.', "").replace(',', ".");
        } else {
            s = s.replace(',', "");
        }
    } else if has_comma {
        let idx = s.rfind(',').unwrap_or(0);
        let decimals = s.len() - idx - 1;
        if s.matches(',').count() == 1 && (1..=2).contains(&decimals) {
            s = s.replace(',', ".");
        } else {
            s = s.replace(',', "");
        }
    }

    match s.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            warn!("Could not parse amount: {:?}", raw);
            0.0
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::resolve_columns;
    use crate::rates::RateQuote;
    use serde_json::json;

    /// Fixed-rate lookup that records every requested payment date
    struct FixedRate {
        rate: f64,
        confidence: RateConfidence,
        requested: Vec<NaiveDate>,
    }

    impl FixedRate {
        fn new(rate: f64) -> Self {
            FixedRate {
                rate,
                confidence: RateConfidence::Official,
                requested: Vec::new(),
            }
        }
    }

    impl RateLookup for FixedRate {
        fn usd_rate(&mut self, payment_date: NaiveDate) -> Option<RateQuote> {
            self.requested.push(payment_date);
            Some(RateQuote {
                rate: self.rate,
                confidence: self.confidence,
            })
        }
    }

    /// Lookup with no rates at all
    struct NoRate {
        requested: usize,
    }

    impl RateLookup for NoRate {
        fn usd_rate(&mut self, _payment_date: NaiveDate) -> Option<RateQuote> {
            self.requested += 1;
            None
        }
    }

    fn record(pairs: &[(&str, Value)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn standard_columns() -> ColumnMap {
        resolve_columns(&[
            "Müşteri Adı Soyadı".to_string(),
            "Tarih".to_string(),
            "Hesap Adı".to_string(),
            "Ödenen Tutar".to_string(),
            "Ödenen Döviz".to_string(),
            "Tahsilat Şekli".to_string(),
            "Çek Tutarı".to_string(),
            "Çek Vade Tarihi".to_string(),
        ])
    }

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_usd_payment_converts_by_identity_without_lookup() {
        let mut rates = FixedRate::new(30.0);
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Ayşe Yılmaz")),
            ("Tarih", json!("2024-01-15")),
            ("Hesap Adı", json!("OFİS DOLAR KASA")),
            ("Ödenen Tutar", json!(2500.0)),
            ("Ödenen Döviz", json!("USD")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);

        assert_eq!(p.usd_amount, 2500.0);
        assert_eq!(p.conversion_rate, 1.0);
        assert_eq!(p.conversion_confidence, ConversionConfidence::Verified);
        assert!(!p.is_tl_payment);
        // No rate lookup for USD originals
        assert!(rates.requested.is_empty());
    }

    #[test]
    fn test_tl_payment_converted_with_previous_day_conversion_date() {
        let mut rates = FixedRate::new(30.0);
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Mehmet Demir")),
            ("Tarih", json!("15.01.2024")),
            ("Hesap Adı", json!("ÇARŞI KASA TL")),
            ("Ödenen Tutar", json!("30,000.00")),
            ("Ödenen Döviz", json!("TL")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);

        assert_eq!(p.amount, 30000.0);
        assert_eq!(p.usd_amount, 1000.0);
        assert_eq!(p.conversion_rate, 30.0);
        assert_eq!(
            p.conversion_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 14).unwrap())
        );
        assert!(p.is_tl_payment);
        assert_eq!(rates.requested, vec![dt(2024, 1, 15).date()]);
    }

    #[test]
    fn test_missing_date_degrades_to_unconverted() {
        let mut rates = FixedRate::new(30.0);
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Ali Kaya")),
            ("Tarih", json!("not-a-date")),
            ("Hesap Adı", json!("ÇARŞI KASA")),
            ("Ödenen Tutar", json!(1000.0)),
            ("Ödenen Döviz", json!("TL")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);

        assert_eq!(p.date, None);
        assert_eq!(p.amount, 1000.0); // original amount preserved
        assert_eq!(p.usd_amount, 0.0);
        assert_eq!(p.conversion_rate, 0.0);
        assert_eq!(p.conversion_confidence, ConversionConfidence::Unconverted);
        assert!(rates.requested.is_empty());
    }

    #[test]
    fn test_failed_lookup_degrades_to_unconverted() {
        let mut rates = NoRate { requested: 0 };
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Ali Kaya")),
            ("Tarih", json!("2024-01-15")),
            ("Hesap Adı", json!("ÇARŞI KASA")),
            ("Ödenen Tutar", json!(1000.0)),
            ("Ödenen Döviz", json!("TL")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);

        assert_eq!(p.amount, 1000.0);
        assert_eq!(p.usd_amount, 0.0);
        assert_eq!(p.conversion_confidence, ConversionConfidence::Unconverted);
        assert_eq!(rates.requested, 1);
    }

    #[test]
    fn test_check_payment_defaults() {
        let mut rates = FixedRate::new(30.0);
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Fatma Şahin")),
            ("Tarih", json!("2024-01-15")),
            ("Hesap Adı", json!("A KASA ÇEK")),
            ("Ödenen Tutar", json!(60000.0)),
            ("Ödenen Döviz", json!("TL")),
            ("Tahsilat Şekli", json!("ÇEK")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);

        assert!(p.is_check_payment);
        // No explicit check amount: main amount is the check amount
        assert_eq!(p.check_amount, 60000.0);
        // No maturity date: 180 days after the payment date
        assert_eq!(p.check_maturity_date, Some(dt(2024, 7, 13)));
        assert_eq!(p.payment_channel, "A KASA ÇEK");
        assert_eq!(p.payment_type, "Çek");
        assert!(p.check_usd_amount > 0.0);
    }

    #[test]
    fn test_check_conversion_keyed_on_maturity_date() {
        let mut rates = FixedRate::new(30.0);
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Fatma Şahin")),
            ("Tarih", json!("2024-01-15")),
            ("Hesap Adı", json!("B KASA ÇEK")),
            ("Ödenen Tutar", json!(60000.0)),
            ("Ödenen Döviz", json!("TL")),
            ("Çek Tutarı", json!(45000.0)),
            ("Çek Vade Tarihi", json!("2024-06-30")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);

        assert!(p.is_check_payment);
        assert_eq!(p.check_amount, 45000.0);
        assert_eq!(p.check_maturity_date, Some(dt(2024, 6, 30)));
        // Main amount looked up on the payment date, check on the maturity
        assert_eq!(
            rates.requested,
            vec![dt(2024, 1, 15).date(), dt(2024, 6, 30).date()]
        );
    }

    #[test]
    fn test_check_not_inferred_from_amount_alone() {
        let mut rates = FixedRate::new(30.0);
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Ali Kaya")),
            ("Tarih", json!("2024-01-15")),
            ("Hesap Adı", json!("YAPI KREDİ TL")),
            ("Ödenen Tutar", json!(9_999_999.0)),
            ("Ödenen Döviz", json!("TL")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);
        assert!(!p.is_check_payment);
        assert_eq!(p.check_amount, 0.0);
    }

    #[test]
    fn test_collection_method_backfilled_with_detected_type() {
        let mut rates = FixedRate::new(30.0);
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Ali Kaya")),
            ("Tarih", json!("2024-01-15")),
            ("Hesap Adı", json!("YAPI KREDİ TL HESABI")),
            ("Ödenen Tutar", json!(1000.0)),
            ("Ödenen Döviz", json!("TL")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);
        assert_eq!(p.payment_type, "BANK_TRANSFER");
        assert_eq!(p.collection_method, "BANK_TRANSFER");
        assert_eq!(p.payment_channel, "BANKA HAVALESİ");
    }

    #[test]
    fn test_fallback_rate_tags_low_confidence() {
        let mut rates = FixedRate::new(41.0);
        rates.confidence = RateConfidence::Default;
        let rec = record(&[
            ("Müşteri Adı Soyadı", json!("Ali Kaya")),
            ("Tarih", json!("2024-01-15")),
            ("Hesap Adı", json!("ÇARŞI KASA")),
            ("Ödenen Tutar", json!(4100.0)),
            ("Ödenen Döviz", json!("TL")),
        ]);

        let p = PaymentEntity::from_record(&rec, &standard_columns(), &mut rates);
        assert_eq!(p.usd_amount, 100.0);
        assert_eq!(p.conversion_confidence, ConversionConfidence::Default);
    }

    // ------------------------------------------------------------------------
    // Amount parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_amount_dynamic_column_sigma() {
        assert_eq!(parse_amount("Ödenen Tutar(Σ:11,059,172.00)"), 11_059_172.00);
    }

    #[test]
    fn test_parse_amount_dynamic_column_question() {
        assert_eq!(parse_amount("Ödenen Tutar(?:9,835,209.80)"), 9_835_209.80);
    }

    #[test]
    fn test_parse_amount_us_style() {
        assert_eq!(parse_amount("$1,234.56"), 1234.56);
        assert_eq!(parse_amount("11,059,172.00"), 11_059_172.00);
    }

    #[test]
    fn test_parse_amount_turkish_style() {
        assert_eq!(parse_amount("1.234,56"), 1234.56);
        assert_eq!(parse_amount("₺ 1.000.000,25"), 1_000_000.25);
    }

    #[test]
    fn test_parse_amount_single_comma() {
        assert_eq!(parse_amount("1000,5"), 1000.5);
        // Three digits after a single comma is a thousands separator
        assert_eq!(parse_amount("1,059"), 1059.0);
    }

    #[test]
    fn test_parse_amount_failure_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("nan"), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
    }

    // ------------------------------------------------------------------------
    // Date parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-15"), Some(dt(2024, 1, 15)));
        assert_eq!(parse_date("15.01.2024"), Some(dt(2024, 1, 15)));
        assert_eq!(parse_date("15/01/2024"), Some(dt(2024, 1, 15)));
        assert_eq!(parse_date("15-01-2024"), Some(dt(2024, 1, 15)));
        assert_eq!(parse_date("2024/01/15"), Some(dt(2024, 1, 15)));
        assert_eq!(parse_date("15.01.24"), Some(dt(2024, 1, 15)));
    }

    #[test]
    fn test_parse_date_with_time() {
        assert_eq!(
            parse_date("15.01.2024 14:30:00"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(14, 30, 0)
        );
    }

    #[test]
    fn test_parse_date_failure_is_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("nan"), None);
        assert_eq!(parse_date("yarın"), None);
    }
}
