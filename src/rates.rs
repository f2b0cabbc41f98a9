// 💱 Exchange Rate Service - TCMB daily USD selling rate
// Cache-first lookup with network fetch, most-recent-day fallback and a
// last-resort default rate. Rates are TL per 1 USD, keyed by ISO date.

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration as StdDuration;

/// Last-resort rate when neither cache nor feed yields anything usable.
/// Never cached, and always surfaced with `RateConfidence::Default` so
/// downstream reporting can flag the conversion as low-confidence.
pub const DEFAULT_USD_RATE: f64 = 41.0;

/// How many days to walk backward when falling back to the most recent
/// published rate
const MOST_RECENT_LOOKBACK_DAYS: i64 = 30;

const FETCH_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// RATE QUOTE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateConfidence {
    /// Official rate for the requested lookup date
    Official,
    /// Rate borrowed from a nearby day (feed gap, future date)
    MostRecent,
    /// Hardcoded default; no published rate was reachable at all
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    /// TL per 1 USD, always > 0
    pub rate: f64,
    pub confidence: RateConfidence,
}

// ============================================================================
// RATE SOURCE
// ============================================================================

/// Seam for the daily rate feed, so tests can count and script fetches.
///
/// `Ok(None)` means "not published for that date" (the 404 case — expected
/// for weekends, holidays and not-yet-published days, logged at debug only).
/// `Err` is a real network or parse failure.
pub trait RateSource {
    fn fetch(&self, date: NaiveDate) -> Result<Option<f64>>;
}

/// Production source: TCMB daily XML at `{base}/{YYYYMM}/{DDMMYYYY}.xml`
pub struct TcmbSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

pub const TCMB_BASE_URL: &str = "https://www.tcmb.gov.tr/kurlar";

impl TcmbSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(StdDuration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client for TCMB feed")?;

        Ok(TcmbSource {
            client,
            base_url: base_url.into(),
        })
    }

    fn url_for(&self, date: NaiveDate) -> String {
        format!(
            "{}/{}/{}.xml",
            self.base_url,
            date.format("%Y%m"),
            date.format("%d%m%Y")
        )
    }
}

impl RateSource for TcmbSource {
    fn fetch(&self, date: NaiveDate) -> Result<Option<f64>> {
        let url = self.url_for(date);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Request to TCMB feed failed: {}", url))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            // Expected for unpublished dates
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .with_context(|| format!("TCMB feed returned an error for {}", url))?;

        let body = response
            .text()
            .with_context(|| format!("Failed to read TCMB response body for {}", url))?;

        parse_tcmb_xml(&body)
    }
}

// ============================================================================
// TCMB XML PARSING
// ============================================================================

#[derive(Debug, Deserialize)]
struct TcmbDailyRates {
    #[serde(rename = "Currency", default)]
    currencies: Vec<TcmbCurrency>,
}

#[derive(Debug, Deserialize)]
struct TcmbCurrency {
    #[serde(rename = "@CurrencyCode")]
    currency_code: String,
    #[serde(rename = "ForexSelling", default)]
    forex_selling: Option<String>,
}

/// Extract the official USD selling rate from a TCMB daily XML document.
/// Returns `Ok(None)` when the document carries no usable USD entry.
fn parse_tcmb_xml(xml: &str) -> Result<Option<f64>> {
    let daily: TcmbDailyRates =
        quick_xml::de::from_str(xml).context("Failed to parse TCMB XML")?;

    let rate = daily
        .currencies
        .iter()
        .find(|c| c.currency_code == "USD")
        .and_then(|c| c.forex_selling.as_deref())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|r| *r > 0.0);

    Ok(rate)
}

// ============================================================================
// RATE LOOKUP SEAM
// ============================================================================

/// What the normalizer needs from a rate provider: the USD rate applicable
/// to a payment dated `payment_date`. Implemented by `RateService` and by
/// the warm-cache view of the conversion orchestrator.
pub trait RateLookup {
    fn usd_rate(&mut self, payment_date: NaiveDate) -> Option<RateQuote>;
}

impl RateLookup for RateService {
    fn usd_rate(&mut self, payment_date: NaiveDate) -> Option<RateQuote> {
        RateService::usd_rate(self, payment_date)
    }
}

// ============================================================================
// RATE SERVICE
// ============================================================================

/// Date-indexed rate lookup with a write-through JSON cache.
///
/// Request state machine for payment date `D` (lookup key `D − 1`):
/// cache hit → future-date short-circuit → network fetch → most-recent-day
/// walk → default constant. Lookups never fail outward; every failure path
/// degrades to the next state and logs.
pub struct RateService {
    source: Box<dyn RateSource>,
    cache_file: Option<PathBuf>,
    cache: BTreeMap<String, f64>,
    network_calls: usize,
    today_override: Option<NaiveDate>,
}

impl RateService {
    /// Production service: TCMB feed plus an on-disk JSON cache
    pub fn new(cache_file: impl Into<PathBuf>) -> Result<Self> {
        let source = TcmbSource::new(TCMB_BASE_URL)?;
        let mut service = RateService::with_source(Box::new(source));
        let path = cache_file.into();
        service.cache = load_cache(&path);
        service.cache_file = Some(path);
        Ok(service)
    }

    /// In-memory service over an arbitrary source (tests, orchestration)
    pub fn with_source(source: Box<dyn RateSource>) -> Self {
        RateService {
            source,
            cache_file: None,
            cache: BTreeMap::new(),
            network_calls: 0,
            today_override: None,
        }
    }

    /// Pin "now" for deterministic future-date handling in tests
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today_override = Some(today);
    }

    /// Current date, honoring a test override
    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Count of `RateSource::fetch` invocations made so far
    pub fn network_calls(&self) -> usize {
        self.network_calls
    }

    /// Snapshot of the in-memory cache (ISO date → rate)
    pub fn cached_rates(&self) -> &BTreeMap<String, f64> {
        &self.cache
    }

    /// Seed a rate directly (cache import tooling and tests)
    pub fn put_rate(&mut self, date: NaiveDate, rate: f64) {
        if rate > 0.0 {
            self.cache.insert(iso(date), rate);
        }
    }

    /// USD rate for a payment dated `payment_date`: uses the official rate
    /// of the previous day, per the reconciliation convention.
    pub fn usd_rate(&mut self, payment_date: NaiveDate) -> Option<RateQuote> {
        self.rate_for(payment_date - Duration::days(1))
    }

    /// USD rate for an exact lookup date (no day shift). Never raises:
    /// network and parse failures degrade through the fallback chain.
    pub fn rate_for(&mut self, target: NaiveDate) -> Option<RateQuote> {
        // 1. Cache hit
        if let Some(rate) = self.cache.get(&iso(target)) {
            return Some(RateQuote {
                rate: *rate,
                confidence: RateConfidence::Official,
            });
        }

        // 2. Future dates are never published; skip straight to fallback
        if target > self.today() {
            return self.most_recent_rate();
        }

        // 3. Network fetch, write-through on success
        if let Some(rate) = self.fetch_and_cache(target) {
            info!("Fetched USD rate for {}: {}", iso(target), rate);
            return Some(RateQuote {
                rate,
                confidence: RateConfidence::Official,
            });
        }

        // 4./5. Walk back from today, then the default constant
        self.most_recent_rate()
    }

    /// One fetch attempt; caches and persists on success. Failures are
    /// logged here and reported as `None`.
    fn fetch_and_cache(&mut self, date: NaiveDate) -> Option<f64> {
        self.network_calls += 1;
        match self.source.fetch(date) {
            Ok(Some(rate)) if rate > 0.0 => {
                self.cache.insert(iso(date), rate);
                self.save_cache();
                Some(rate)
            }
            Ok(Some(_)) | Ok(None) => {
                debug!("No published USD rate for {}", iso(date));
                None
            }
            Err(e) => {
                error!("Failed to fetch USD rate for {}: {:#}", iso(date), e);
                None
            }
        }
    }

    /// Walk backward from today for up to 30 days, cache first then feed.
    /// Falls through to `DEFAULT_USD_RATE` (not cached) when nothing is
    /// found.
    fn most_recent_rate(&mut self) -> Option<RateQuote> {
        let today = self.today();
        for days_back in 1..=MOST_RECENT_LOOKBACK_DAYS {
            let check_date = today - Duration::days(days_back);
            if let Some(rate) = self.cache.get(&iso(check_date)) {
                debug!("Using cached rate from {}", iso(check_date));
                return Some(RateQuote {
                    rate: *rate,
                    confidence: RateConfidence::MostRecent,
                });
            }
            if let Some(rate) = self.fetch_and_cache(check_date) {
                info!("Using most recent rate from {}: {}", iso(check_date), rate);
                return Some(RateQuote {
                    rate,
                    confidence: RateConfidence::MostRecent,
                });
            }
        }

        warn!(
            "No exchange rate found in the last {} days, using default rate {}",
            MOST_RECENT_LOOKBACK_DAYS, DEFAULT_USD_RATE
        );
        Some(RateQuote {
            rate: DEFAULT_USD_RATE,
            confidence: RateConfidence::Default,
        })
    }

    /// Rewrite the whole cache file. Write failures are logged, never
    /// propagated: a stale cache file only costs extra fetches later.
    fn save_cache(&self) {
        let Some(path) = &self.cache_file else {
            return;
        };
        match serde_json::to_string_pretty(&self.cache) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    error!("Failed to save rate cache to {}: {}", path.display(), e);
                }
            }
            Err(e) => error!("Failed to serialize rate cache: {}", e),
        }
    }
}

/// Load the JSON cache file; a missing or corrupt file is an empty cache.
/// Non-positive rates are dropped on load.
fn load_cache(path: &PathBuf) -> BTreeMap<String, f64> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<BTreeMap<String, f64>>(&content) {
            Ok(map) => map.into_iter().filter(|(_, r)| *r > 0.0).collect(),
            Err(e) => {
                warn!("Failed to parse rate cache {}: {}", path.display(), e);
                BTreeMap::new()
            }
        },
        Err(_) => BTreeMap::new(),
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// TESTS
// ============================================================================
