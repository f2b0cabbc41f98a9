// 🏷️ Classification Rules - Rules as Data
// Keyword rule tables for payment channel and payment type detection.
// Keywords carry the known mojibake forms of Turkish letters (Ý/Þ for İ/Ş)
// produced by the legacy export tooling; the corruption patterns are a
// fixed, enumerable set, so they are listed rather than transliterated.

// ============================================================================
// CHANNEL LABELS
// ============================================================================

pub const CHANNEL_UNKNOWN: &str = "Bilinmeyen";
pub const CHANNEL_OTHER: &str = "Diğer";
pub const CHANNEL_CARSI: &str = "ÇARŞI";
pub const CHANNEL_LOCATION_B: &str = "LOCATION_B";
pub const CHANNEL_OFIS: &str = "OFİS";
pub const CHANNEL_BANK_TRANSFER: &str = "BANKA HAVALESİ";
pub const CHANNEL_CHECK: &str = "ÇEK";
pub const CHANNEL_CHECK_KASA_A: &str = "A KASA ÇEK";
pub const CHANNEL_CHECK_KASA_B: &str = "B KASA ÇEK";
pub const CHANNEL_CASH: &str = "NAKİT";

// ============================================================================
// PAYMENT TYPE LABELS
// ============================================================================

pub const TYPE_BANK_TRANSFER: &str = "BANK_TRANSFER";
pub const TYPE_CASH: &str = "Nakit";
pub const TYPE_CHECK: &str = "Çek";
pub const TYPE_OTHER: &str = "Diğer";

// ============================================================================
// CHANNEL RULE TABLE
// ============================================================================

struct ChannelRule {
    channel: &'static str,
    keywords: &'static [&'static str],
}

/// Ordered rule table: first match wins. Keywords are matched against the
/// upper-cased account name.
const CHANNEL_RULES: &[ChannelRule] = &[
    ChannelRule {
        channel: CHANNEL_LOCATION_B,
        keywords: &["LOCATION_B", "KUYUMCU KENT", "KUYUMCU_KENT"],
    },
    ChannelRule {
        channel: CHANNEL_CARSI,
        keywords: &["ÇARŞI", "CARSI", "ÇARÞI", "CARÞI", "CARŞI", "ÇARSI"],
    },
    ChannelRule {
        channel: CHANNEL_OFIS,
        keywords: &["OFİS", "OFIS", "LOCATION_C", "OFÝS", "MERKEZ", "OFFICE", "KAPAKLI"],
    },
    ChannelRule {
        channel: CHANNEL_BANK_TRANSFER,
        keywords: &[
            "YAPI KREDİ",
            "YAPI KREDI",
            "YAPIKREDÝ",
            "YAPIKREDI",
            "HAVALE",
            "TRANSFER",
            "BANKA",
        ],
    },
    ChannelRule {
        channel: CHANNEL_CHECK,
        keywords: &["ÇEK", "CEK", "CHECK"],
    },
    ChannelRule {
        channel: CHANNEL_CASH,
        keywords: &["NAKIT", "NAKİT", "NAKÝT", "CASH"],
    },
];

/// Detect the payment channel from the account name.
///
/// Empty account name maps to `Bilinmeyen`; no keyword match maps to
/// `Diğer`. The check rule sub-classifies into `A KASA ÇEK` / `B KASA ÇEK`
/// when a kasa marker is present in the same string.
pub fn detect_payment_channel(account_name: &str) -> &'static str {
    if account_name.trim().is_empty() {
        return CHANNEL_UNKNOWN;
    }

    let account_upper = account_name.to_uppercase();

    for rule in CHANNEL_RULES {
        if rule.keywords.iter().any(|k| account_upper.contains(k)) {
            if rule.channel == CHANNEL_CHECK {
                if account_upper.contains("A KASA") || account_upper.contains("A_KASA") {
                    return CHANNEL_CHECK_KASA_A;
                }
                if account_upper.contains("B KASA") || account_upper.contains("B_KASA") {
                    return CHANNEL_CHECK_KASA_B;
                }
            }
            return rule.channel;
        }
    }

    CHANNEL_OTHER
}

// ============================================================================
// PAYMENT TYPE DETECTION
// ============================================================================

const BANK_ACCOUNT_KEYWORDS: &[&str] = &[
    "YAPI KREDİ",
    "YAPI KREDI",
    "YAPIKREDÝ",
    "YAPIKREDI",
    "YAPI",
];

const TRANSFER_KEYWORDS: &[&str] = &["HAVALE", "TRANSFER", "BANKA", "GARANTI", "İŞ BANKASI"];

/// Detect the payment type.
///
/// Precedence:
/// 1. An explicit, non-default collection-method value
/// 2. Account-name keyword heuristics
/// 3. `BANK_TRANSFER` for TL payments with a named account
/// 4. `Diğer`
pub fn detect_payment_type(
    collection_method: &str,
    account_name: &str,
    is_check_payment: bool,
    is_tl_payment: bool,
) -> &'static str {
    if collection_method.trim().is_empty() && account_name.trim().is_empty() {
        return TYPE_OTHER;
    }

    // Explicit collection method wins, unless it is the default placeholder
    if !collection_method.trim().is_empty() && collection_method != TYPE_OTHER {
        let method_upper = collection_method.to_uppercase();
        if method_upper.contains("NAKİT") || method_upper.contains("NAKIT") {
            return TYPE_CASH;
        }
        if method_upper.contains("BANKA") || method_upper.contains("HAVALE") {
            return TYPE_BANK_TRANSFER;
        }
        if method_upper.contains("ÇEK") || method_upper.contains("CEK") {
            return TYPE_CHECK;
        }
    }

    let account_upper = account_name.to_uppercase();

    if BANK_ACCOUNT_KEYWORDS.iter().any(|k| account_upper.contains(k)) {
        return TYPE_BANK_TRANSFER;
    }
    // Kasa accounts are cash tills unless explicitly marked nakit already
    if account_upper.contains("KASA") && !account_upper.contains("NAKİT") {
        return TYPE_CASH;
    }
    if is_check_payment {
        return TYPE_CHECK;
    }
    if TRANSFER_KEYWORDS.iter().any(|k| account_upper.contains(k)) {
        return TYPE_BANK_TRANSFER;
    }

    if is_tl_payment && !account_upper.trim().is_empty() {
        return TYPE_BANK_TRANSFER;
    }

    TYPE_OTHER
}

// ============================================================================
// CURRENCY HEURISTICS
// ============================================================================

const TL_CURRENCY_VALUES: &[&str] = &["TL", "TRY", "TURKISH LIRA", "TÜRK LİRASI"];
const USD_CURRENCY_VALUES: &[&str] = &["USD", "US DOLLAR", "DOLLAR", "DOLAR"];

/// Decide whether a payment is TL-denominated: currency field first, then
/// account-name keywords, defaulting to TL when unclear.
pub fn is_tl_payment(currency: &str, account_name: &str) -> bool {
    let currency_upper = currency.to_uppercase();
    if TL_CURRENCY_VALUES.contains(&currency_upper.as_str()) {
        return true;
    }
    if USD_CURRENCY_VALUES.contains(&currency_upper.as_str()) {
        return false;
    }

    let account_lower = account_name.to_lowercase();
    if !account_lower.is_empty() {
        if ["tl", "türk lirası", "turk lirasi", "lira"]
            .iter()
            .any(|k| account_lower.contains(k))
        {
            return true;
        }
        if ["usd", "dolar", "dollar", "$"]
            .iter()
            .any(|k| account_lower.contains(k))
        {
            return false;
        }
    }

    true
}

/// True when the currency value denotes USD (alias-tolerant)
pub fn is_usd_currency(currency: &str) -> bool {
    USD_CURRENCY_VALUES.contains(&currency.to_uppercase().as_str())
}

/// Canonicalize a raw currency value: `TL`, `USD`, `EUR`, or the
/// upper-cased input when unrecognized.
pub fn normalize_currency(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return "TL".to_string();
    }
    if TL_CURRENCY_VALUES.contains(&upper.as_str()) {
        return "TL".to_string();
    }
    if USD_CURRENCY_VALUES.contains(&upper.as_str()) {
        return "USD".to_string();
    }
    if ["EUR", "EURO", "AVRO"].contains(&upper.as_str()) {
        return "EUR".to_string();
    }
    upper
}

// ============================================================================
// TESTS
// ============================================================================
