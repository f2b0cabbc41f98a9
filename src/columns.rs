// 🗂️ Column Resolver - Canonical field mapping
// Maps arbitrary export headers (including encoding-corrupted variants)
// to canonical field names

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// CANONICAL FIELD NAMES
// ============================================================================

/// Canonical field name constants used across the pipeline
pub mod field {
    pub const CUSTOMER_NAME: &str = "customer_name";
    pub const DATE: &str = "date";
    pub const PROJECT_NAME: &str = "project_name";
    pub const ACCOUNT_NAME: &str = "account_name";
    pub const AMOUNT: &str = "amount";
    pub const CURRENCY: &str = "currency";
    pub const EXCHANGE_RATE: &str = "exchange_rate";
    pub const PAYMENT_STATUS: &str = "payment_status";
    pub const COLLECTION_METHOD: &str = "collection_method";
    pub const CHECK_AMOUNT: &str = "check_amount";
    pub const CHECK_MATURITY_DATE: &str = "check_maturity_date";
}

/// Fields that must be present for an import to proceed
pub const REQUIRED_FIELDS: &[&str] = &[
    field::CUSTOMER_NAME,
    field::DATE,
    field::ACCOUNT_NAME,
    field::AMOUNT,
];

// ============================================================================
// ALIAS TABLE
// ============================================================================

struct FieldSpec {
    canonical: &'static str,
    /// Primary header name as exported by the CRM
    primary: &'static str,
    /// Known alternatives, including the mojibake forms produced by the
    /// legacy export tooling (ý/þ in place of ı/ş)
    alternatives: &'static [&'static str],
}

/// Alias table in resolution order. Check-specific fields come before the
/// generic amount/date fields so substring matching cannot steal their
/// headers when the exact names are absent.
const FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec {
        canonical: field::CUSTOMER_NAME,
        primary: "Müşteri Adı Soyadı",
        alternatives: &[
            "Müşteri",
            "Customer",
            "Ad Soyad",
            "İsim",
            "Müþteri Adý Soyadý",
            "Müþteri Adý",
            "Müþteri",
        ],
    },
    FieldSpec {
        canonical: field::CHECK_MATURITY_DATE,
        primary: "Çek Vade Tarihi",
        alternatives: &[
            "Cek Vade Tarihi",
            "Check Maturity Date",
            "Vade Tarihi",
            "Maturity Date",
        ],
    },
    FieldSpec {
        canonical: field::DATE,
        primary: "Tarih",
        alternatives: &["Date", "Ödeme Tarihi"],
    },
    FieldSpec {
        canonical: field::PROJECT_NAME,
        primary: "Proje Adı",
        alternatives: &["Proje", "Project", "Proje Adý"],
    },
    FieldSpec {
        canonical: field::ACCOUNT_NAME,
        primary: "Hesap Adı",
        alternatives: &["Hesap", "Account", "Kanal", "Hesap Adý"],
    },
    FieldSpec {
        canonical: field::CHECK_AMOUNT,
        primary: "Çek Tutarı",
        alternatives: &["Cek Tutari", "Check Amount", "Çek Miktarı", "Çek Tutarý"],
    },
    FieldSpec {
        canonical: field::AMOUNT,
        primary: "Ödenen Tutar",
        alternatives: &[
            "Tutar",
            "Amount",
            "Miktar",
            "Para",
            "Alacak Tutarı",
            "Alacak Tutarý",
        ],
    },
    FieldSpec {
        canonical: field::COLLECTION_METHOD,
        primary: "Tahsilat Şekli",
        alternatives: &[
            "Tahsilat Sekli",
            "Tahsilat Þekli",
            "Payment Type",
            "Ödeme Türü",
            "Ödeme Şekli",
            "Collection Method",
        ],
    },
    FieldSpec {
        canonical: field::CURRENCY,
        primary: "Ödenen Döviz",
        alternatives: &["Döviz", "Currency"],
    },
    FieldSpec {
        canonical: field::EXCHANGE_RATE,
        primary: "Ödenen Kur",
        alternatives: &["Kur", "Exchange Rate"],
    },
    FieldSpec {
        canonical: field::PAYMENT_STATUS,
        primary: "Ödeme Durumu",
        alternatives: &["Payment Status"],
    },
];

// ============================================================================
// COLUMN MAP
// ============================================================================

/// Mapping from canonical field name to the raw header that supplied it.
/// Built once per input source; immutable after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMap {
    map: BTreeMap<String, String>,
}

impl ColumnMap {
    /// Raw header for a canonical field, if the source provided one
    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.map.get(canonical).map(|s| s.as_str())
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.map.contains_key(canonical)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Resolve raw headers (already whitespace-trimmed) to a `ColumnMap`.
///
/// Precedence, applied as three passes so an exact match anywhere always
/// beats a substring match:
/// 1. Exact match against the primary name
/// 2. Case-insensitive exact match against any alternative
/// 3. Case-insensitive substring match in either direction — tolerates
///    dynamic suffixes such as `"Ödenen Tutar(Σ:11,059,172.00)"`
///
/// Each raw header is claimed by at most one canonical field. A field with
/// no match is simply absent from the map; required-field validation is a
/// separate step (`missing_required`).
pub fn resolve_columns(headers: &[String]) -> ColumnMap {
    let mut map = BTreeMap::new();
    let mut claimed = vec![false; headers.len()];

    // Pass 1: exact primary
    for spec in FIELD_SPECS {
        if map.contains_key(spec.canonical) {
            continue;
        }
        for (idx, header) in headers.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            if header == spec.primary {
                map.insert(spec.canonical.to_string(), header.clone());
                claimed[idx] = true;
                break;
            }
        }
    }

    // Pass 2: case-insensitive exact against alternatives (and the primary,
    // which covers case-only damage)
    for spec in FIELD_SPECS {
        if map.contains_key(spec.canonical) {
            continue;
        }
        let candidates: Vec<String> = std::iter::once(spec.primary)
            .chain(spec.alternatives.iter().copied())
            .map(|a| a.to_lowercase())
            .collect();
        for (idx, header) in headers.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let header_lower = header.to_lowercase();
            if candidates.iter().any(|c| *c == header_lower) {
                map.insert(spec.canonical.to_string(), header.clone());
                claimed[idx] = true;
                break;
            }
        }
    }

    // Pass 3: case-insensitive substring, either direction
    for spec in FIELD_SPECS {
        if map.contains_key(spec.canonical) {
            continue;
        }
        let candidates: Vec<String> = std::iter::once(spec.primary)
            .chain(spec.alternatives.iter().copied())
            .map(|a| a.to_lowercase())
            .collect();
        for (idx, header) in headers.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let header_lower = header.to_lowercase();
            if candidates
                .iter()
                .any(|c| header_lower.contains(c.as_str()) || c.contains(header_lower.as_str()))
            {
                map.insert(spec.canonical.to_string(), header.clone());
                claimed[idx] = true;
                break;
            }
        }
    }

    ColumnMap { map }
}

/// Canonical fields required for import that the map did not resolve.
/// The caller aggregates these into a single failure.
pub fn missing_required(map: &ColumnMap) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| !map.contains(f))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_primary_match() {
        let map = resolve_columns(&headers(&[
            "Müşteri Adı Soyadı",
            "Tarih",
            "Hesap Adı",
            "Ödenen Tutar",
        ]));

        assert_eq!(map.get(field::CUSTOMER_NAME), Some("Müşteri Adı Soyadı"));
        assert_eq!(map.get(field::DATE), Some("Tarih"));
        assert_eq!(map.get(field::ACCOUNT_NAME), Some("Hesap Adı"));
        assert_eq!(map.get(field::AMOUNT), Some("Ödenen Tutar"));
    }

    #[test]
    fn test_alternative_match_case_insensitive() {
        let map = resolve_columns(&headers(&["customer", "DATE", "account", "AMOUNT"]));

        assert_eq!(map.get(field::CUSTOMER_NAME), Some("customer"));
        assert_eq!(map.get(field::DATE), Some("DATE"));
        assert_eq!(map.get(field::ACCOUNT_NAME), Some("account"));
        assert_eq!(map.get(field::AMOUNT), Some("AMOUNT"));
    }

    #[test]
    fn test_mojibake_headers_resolve() {
        let map = resolve_columns(&headers(&[
            "Müþteri Adý Soyadý",
            "Tarih",
            "Hesap Adý",
            "Tahsilat Þekli",
            "Çek Tutarý",
        ]));

        assert_eq!(map.get(field::CUSTOMER_NAME), Some("Müþteri Adý Soyadý"));
        assert_eq!(map.get(field::ACCOUNT_NAME), Some("Hesap Adý"));
        assert_eq!(map.get(field::COLLECTION_METHOD), Some("Tahsilat Þekli"));
        assert_eq!(map.get(field::CHECK_AMOUNT), Some("Çek Tutarý"));
    }

    #[test]
    fn test_dynamic_suffix_header() {
        let map = resolve_columns(&headers(&["Ödenen Tutar(Σ:11,059,172.00)"]));
        assert_eq!(
            map.get(field::AMOUNT),
            Some("Ödenen Tutar(Σ:11,059,172.00)")
        );
    }

    #[test]
    fn test_check_fields_not_stolen_by_generic_fields() {
        // "Tarih" is a substring of "Çek Vade Tarihi" and "Tutar" of
        // "Çek Tutarı"; exact primaries must win for all four fields.
        let map = resolve_columns(&headers(&[
            "Tarih",
            "Çek Vade Tarihi",
            "Ödenen Tutar",
            "Çek Tutarı",
        ]));

        assert_eq!(map.get(field::DATE), Some("Tarih"));
        assert_eq!(map.get(field::CHECK_MATURITY_DATE), Some("Çek Vade Tarihi"));
        assert_eq!(map.get(field::AMOUNT), Some("Ödenen Tutar"));
        assert_eq!(map.get(field::CHECK_AMOUNT), Some("Çek Tutarı"));
    }

    #[test]
    fn test_unmatched_field_absent_not_error() {
        let map = resolve_columns(&headers(&["Tarih"]));
        assert_eq!(map.get(field::CUSTOMER_NAME), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_missing_required_aggregated() {
        let map = resolve_columns(&headers(&["Tarih", "Ödenen Tutar"]));
        let missing = missing_required(&map);
        assert_eq!(missing, vec![field::CUSTOMER_NAME, field::ACCOUNT_NAME]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let hs = headers(&[
            "Müşteri Adı Soyadı",
            "Tarih",
            "Hesap Adı",
            "Ödenen Tutar(Σ:11,059,172.00)",
            "Ödenen Döviz",
        ]);
        let first = resolve_columns(&hs);
        let second = resolve_columns(&hs);
        assert_eq!(first, second);
    }
}
