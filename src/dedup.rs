// 🔍 Duplicate Detection - Exact amount + calendar date matching
// A new payment is a duplicate iff its amount equals an existing payment's
// amount exactly and both fall on the same calendar day. No other field
// participates; time-of-day is ignored.

use crate::payment::PaymentEntity;
use log::info;
use serde::{Deserialize, Serialize};

// ============================================================================
// DUPLICATE RECORD
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateRecord {
    /// The rejected entity
    pub entity: PaymentEntity,
    /// Id of the entity it collided with
    pub matched_id: String,
    /// Human-readable reason
    pub reason: String,
}

// ============================================================================
// PARTITIONING
// ============================================================================

/// Split a new batch into unique entities and duplicates.
///
/// Each new entity is compared first against the existing collection, then
/// against entities already accepted from the same batch, so intra-file
/// repeats are caught too. `unique` preserves input order minus removals;
/// `duplicates` preserves detection order.
pub fn partition(
    new_entities: Vec<PaymentEntity>,
    existing: &[PaymentEntity],
) -> (Vec<PaymentEntity>, Vec<DuplicateRecord>) {
    let mut unique: Vec<PaymentEntity> = Vec::new();
    let mut duplicates: Vec<DuplicateRecord> = Vec::new();

    for entity in new_entities {
        if let Some(matched) = existing.iter().find(|e| is_duplicate(&entity, e)) {
            duplicates.push(record(entity, matched, "existing"));
            continue;
        }
        if let Some(matched) = unique.iter().find(|e| is_duplicate(&entity, e)) {
            duplicates.push(record(entity, matched, "batch"));
            continue;
        }
        unique.push(entity);
    }

    if !duplicates.is_empty() {
        info!(
            "Duplicate detection: {} unique, {} duplicates rejected",
            unique.len(),
            duplicates.len()
        );
    }

    (unique, duplicates)
}

/// Exact amount equality and equal calendar day. Dateless entities never
/// match anything.
fn is_duplicate(a: &PaymentEntity, b: &PaymentEntity) -> bool {
    let (Some(date_a), Some(date_b)) = (a.calendar_date(), b.calendar_date()) else {
        return false;
    };
    a.amount == b.amount && date_a == date_b
}

fn record(entity: PaymentEntity, matched: &PaymentEntity, scope: &str) -> DuplicateRecord {
    let date = matched
        .calendar_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let reason = match scope {
        "batch" => format!(
            "duplicate within batch: same date {} and same amount {} {}",
            date, matched.amount, matched.currency
        ),
        _ => format!(
            "same date {} and same amount {} {}",
            date, matched.amount, matched.currency
        ),
    };
    DuplicateRecord {
        matched_id: matched.id.clone(),
        reason,
        entity,
    }
}

// ============================================================================
// TESTS
// ============================================================================
