// 💾 Entity Store - JSON persistence for payment entities
// Flat JSON array, loaded whole and rewritten whole on save

use crate::payment::PaymentEntity;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Load the entity collection. A missing file is an empty store, not an
/// error; a corrupt file is.
pub fn load_store(path: &Path) -> Result<Vec<PaymentEntity>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store: {}", path.display()))?;
    let entities: Vec<PaymentEntity> = serde_json::from_str(&contents)
        .with_context(|| format!("Corrupt store file: {}", path.display()))?;
    Ok(entities)
}

/// Persist the whole collection, rewriting the file in full
pub fn save_store(path: &Path, entities: &[PaymentEntity]) -> Result<()> {
    let body = serde_json::to_string_pretty(entities).context("Failed to serialize store")?;
    fs::write(path, body)
        .with_context(|| format!("Failed to write store: {}", path.display()))?;
    info!("Saved {} entities to {}", entities.len(), path.display());
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::ConversionConfidence;
    use chrono::NaiveDate;

    fn sample_entity() -> PaymentEntity {
        PaymentEntity {
            id: "store-test".to_string(),
            customer_name: "Ali Veli".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0),
            amount: 1500.0,
            currency: "TL".to_string(),
            project_name: "Genel Proje".to_string(),
            account_name: "ÇARŞI KASA TL".to_string(),
            payment_status: String::new(),
            source_exchange_rate: 0.0,
            usd_amount: 50.0,
            conversion_rate: 30.0,
            conversion_date: NaiveDate::from_ymd_opt(2024, 1, 14),
            conversion_confidence: ConversionConfidence::Verified,
            payment_channel: "ÇARŞI".to_string(),
            payment_type: "Nakit".to_string(),
            collection_method: "Nakit".to_string(),
            is_tl_payment: true,
            is_check_payment: false,
            check_amount: 0.0,
            check_maturity_date: None,
            check_usd_amount: 0.0,
            check_conversion_rate: 0.0,
        }
    }

    #[test]
    fn test_missing_store_is_empty() {
        let path = std::env::temp_dir().join("tahsilat_store_missing.json");
        fs::remove_file(&path).ok();
        assert!(load_store(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir().join("tahsilat_store_roundtrip.json");
        let entities = vec![sample_entity()];

        save_store(&path, &entities).unwrap();
        let loaded = load_store(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "store-test");
        assert_eq!(loaded[0].usd_amount, 50.0);
        assert_eq!(
            loaded[0].conversion_date,
            NaiveDate::from_ymd_opt(2024, 1, 14)
        );
        assert_eq!(
            loaded[0].conversion_confidence,
            ConversionConfidence::Verified
        );
    }

    #[test]
    fn test_corrupt_store_is_an_error() {
        let path = std::env::temp_dir().join("tahsilat_store_corrupt.json");
        fs::write(&path, "{not json").unwrap();
        let result = load_store(&path);
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
