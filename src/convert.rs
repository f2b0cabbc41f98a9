// ⚡ Currency Conversion Orchestrator - Batched rate warm-up
// Collapses per-payment rate lookups down to one lookup per distinct date:
// collect the distinct `date − 1` keys, warm a local cache in one pass,
// then re-derive every entity's USD figures from the warm cache.

use crate::payment::{ConversionConfidence, PaymentEntity};
use crate::rates::{RateConfidence, RateQuote, RateService, DEFAULT_USD_RATE};
use chrono::{Duration, NaiveDate};
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// How many days back to probe the service when an entity's own date key
/// is missing from the warm cache
const FALLBACK_LOOKBACK_DAYS: i64 = 7;

// ============================================================================
// STATISTICS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Entities passed through the orchestrator
    pub total_payments: usize,
    /// TL entities that actually need a conversion
    pub tl_payments: usize,
    /// Distinct `date − 1` keys across the batch
    pub unique_dates: usize,
    /// Network fetches the batch actually performed
    pub api_calls_made: usize,
    /// Batch dates already present in the warm cache
    pub cache_hits: usize,
}

impl ConversionStats {
    /// Share of date keys served without a network call, in percent
    pub fn cache_efficiency(&self) -> f64 {
        let served = self.api_calls_made + self.cache_hits;
        if served == 0 {
            return 0.0;
        }
        (self.cache_hits as f64 / served as f64) * 100.0
    }

    /// Naïve per-payment calls avoided by batching
    pub fn api_calls_saved(&self) -> usize {
        self.tl_payments.saturating_sub(self.api_calls_made)
    }
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Per-run conversion context: warm rate cache plus statistics. Constructed
/// per pipeline invocation and handed the rate service by reference; there
/// is deliberately no global instance.
pub struct CurrencyOptimizer<'a> {
    service: &'a mut RateService,
    rate_cache: BTreeMap<String, RateQuote>,
    stats: ConversionStats,
}

impl<'a> CurrencyOptimizer<'a> {
    pub fn new(service: &'a mut RateService) -> Self {
        CurrencyOptimizer {
            service,
            rate_cache: BTreeMap::new(),
            stats: ConversionStats::default(),
        }
    }

    /// Re-derive USD figures for a whole batch.
    ///
    /// Phases: collect distinct lookup dates, warm the local cache (one
    /// service call per distinct date at most), then resolve every entity
    /// from the warm cache. Per-entity resolution never starts before the
    /// whole batch fetch completes.
    pub fn pre_convert(&mut self, payments: Vec<PaymentEntity>) -> Vec<PaymentEntity> {
        info!(
            "Starting batched currency conversion for {} payments",
            payments.len()
        );
        self.stats = ConversionStats {
            total_payments: payments.len(),
            ..ConversionStats::default()
        };

        let unique_dates = self.collect_unique_dates(&payments);
        info!(
            "Found {} unique dates requiring conversion",
            unique_dates.len()
        );

        self.batch_fetch(&unique_dates);

        let converted: Vec<PaymentEntity> = payments
            .into_iter()
            .map(|p| self.convert_single(p))
            .collect();

        self.log_results();
        converted
    }

    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    /// Warm-cache snapshot (ISO date → quote). Quotes keep the confidence
    /// the service reported, so a walked-back rate is never upgraded to a
    /// verified one at resolution time.
    pub fn rate_cache(&self) -> &BTreeMap<String, RateQuote> {
        &self.rate_cache
    }

    /// Distinct `date − 1` keys needed by the batch; counts TL payments
    /// along the way
    fn collect_unique_dates(&mut self, payments: &[PaymentEntity]) -> BTreeSet<NaiveDate> {
        let mut unique_dates = BTreeSet::new();
        for payment in payments {
            if !payment.is_tl_payment {
                continue;
            }
            if let Some(date) = payment.calendar_date() {
                unique_dates.insert(date - Duration::days(1));
                self.stats.tl_payments += 1;
            }
        }
        self.stats.unique_dates = unique_dates.len();
        unique_dates
    }

    /// One service call per date not already warm. A date that only yields
    /// the default constant is treated as a failure and left absent, so it
    /// is never mistaken for a published rate.
    fn batch_fetch(&mut self, unique_dates: &BTreeSet<NaiveDate>) {
        let calls_before = self.service.network_calls();

        for date in unique_dates {
            let key = iso(*date);
            if self.rate_cache.contains_key(&key) {
                self.stats.cache_hits += 1;
                continue;
            }
            match self.service.rate_for(*date) {
                Some(quote) if quote.confidence != RateConfidence::Default => {
                    self.rate_cache.insert(key, quote);
                }
                _ => warn!("No published rate available for {}", key),
            }
        }

        self.stats.api_calls_made = self.service.network_calls() - calls_before;
    }

    /// Resolve one entity from the warm cache, with the fallback chain for
    /// missing date keys
    fn convert_single(&mut self, mut payment: PaymentEntity) -> PaymentEntity {
        if !payment.is_tl_payment {
            // Already USD (or other non-TL); normalization settled it
            return payment;
        }

        let Some(date) = payment.calendar_date() else {
            payment.usd_amount = 0.0;
            payment.conversion_rate = 0.0;
            payment.conversion_date = None;
            payment.conversion_confidence = ConversionConfidence::Unconverted;
            return payment;
        };

        let target = date - Duration::days(1);
        if let Some(quote) = self.rate_cache.get(&iso(target)).copied() {
            if quote.rate > 0.0 {
                payment.usd_amount = round2(payment.amount / quote.rate);
                payment.conversion_rate = quote.rate;
                payment.conversion_date = Some(target);
                payment.conversion_confidence = quote.confidence.into();
                return payment;
            }
        }

        match self.fallback_rate() {
            Some((rate, confidence)) => {
                warn!(
                    "No rate for {}, converting with fallback rate {}",
                    iso(target),
                    rate
                );
                payment.usd_amount = round2(payment.amount / rate);
                payment.conversion_rate = rate;
                payment.conversion_date = None;
                payment.conversion_confidence = confidence;
            }
            None => {
                warn!("No fallback rate for {}, leaving unconverted", iso(target));
                payment.usd_amount = 0.0;
                payment.conversion_rate = 0.0;
                payment.conversion_date = None;
                payment.conversion_confidence = ConversionConfidence::Unconverted;
            }
        }
        payment
    }

    /// Fallback chain: first positive rate anywhere in the warm cache
    /// (ascending date order), then the service over the last 7 days, then
    /// the default constant
    fn fallback_rate(&mut self) -> Option<(f64, ConversionConfidence)> {
        if let Some(rate) = self.rate_cache.values().map(|q| q.rate).find(|r| *r > 0.0) {
            return Some((rate, ConversionConfidence::Fallback));
        }

        let today = self.service.today();
        for days_back in 1..=FALLBACK_LOOKBACK_DAYS {
            if let Some(quote) = self.service.rate_for(today - Duration::days(days_back)) {
                if quote.confidence != RateConfidence::Default && quote.rate > 0.0 {
                    return Some((quote.rate, ConversionConfidence::Fallback));
                }
            }
        }

        Some((DEFAULT_USD_RATE, ConversionConfidence::Default))
    }

    fn log_results(&self) {
        let stats = &self.stats;
        info!("=== CURRENCY CONVERSION RESULTS ===");
        info!("Total payments processed: {}", stats.total_payments);
        info!("TL payments requiring conversion: {}", stats.tl_payments);
        info!("Unique dates requiring rates: {}", stats.unique_dates);
        info!("API calls made: {}", stats.api_calls_made);
        info!("Cache hits: {}", stats.cache_hits);
        info!("Cache efficiency: {:.1}%", stats.cache_efficiency());
        info!(
            "API calls saved: {} of {}",
            stats.api_calls_saved(),
            stats.tl_payments
        );
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
