// Tahsilat CLI - Import payment exports into the entity store

use anyhow::{bail, Result};
use std::env;
use std::path::{Path, PathBuf};

use tahsilat_core::{
    dedup, import, store, ConversionConfidence, CurrencyOptimizer, RateService,
};

const DEFAULT_STORE: &str = "payments.json";
const DEFAULT_RATE_CACHE: &str = "exchange_rates.json";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("import") if args.len() >= 3 => {
            let input = Path::new(&args[2]);
            let store_path = args
                .get(3)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE));
            run_import(input, &store_path)
        }
        _ => {
            eprintln!("Usage: tahsilat import <file.csv|file.xlsx|file.json> [store.json]");
            bail!("No command given");
        }
    }
}

fn run_import(input: &Path, store_path: &Path) -> Result<()> {
    println!("💱 Tahsilat Import - CSV/JSON → normalized USD entities");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load existing store
    let existing = store::load_store(store_path)?;
    println!("\n📂 Store: {} existing payments", existing.len());

    // 2. Normalize rows. The rate service is cache-first, so each unique
    //    date is fetched at most once across this and the batch pass.
    let mut rates = RateService::new(DEFAULT_RATE_CACHE)?;
    let entities = import::import_file(input, &mut rates)?;
    println!("✓ Normalized {} rows from {}", entities.len(), input.display());

    // 3. Batched currency conversion
    println!("\n💱 Converting to USD...");
    let mut optimizer = CurrencyOptimizer::new(&mut rates);
    let converted = optimizer.pre_convert(entities);
    let stats = *optimizer.stats();
    println!(
        "✓ {} TL payments over {} unique dates ({} rate fetches, {} saved)",
        stats.tl_payments,
        stats.unique_dates,
        stats.api_calls_made,
        stats.api_calls_saved()
    );

    let low_confidence = converted
        .iter()
        .filter(|p| {
            matches!(
                p.conversion_confidence,
                ConversionConfidence::Fallback | ConversionConfidence::Default
            )
        })
        .count();
    if low_confidence > 0 {
        println!("⚠️  {} payments converted with low-confidence rates", low_confidence);
    }

    // 4. Validation
    let (valid, warnings) = import::validate_entities(converted);
    for warning in &warnings {
        println!("⚠️  {}", warning);
    }

    // 5. Duplicate detection
    println!("\n🔍 Checking for duplicates...");
    let (unique, duplicates) = dedup::partition(valid, &existing);
    for duplicate in &duplicates {
        println!("  ✗ {}: {}", duplicate.entity.customer_name, duplicate.reason);
    }
    println!(
        "✓ {} unique payments, {} duplicates rejected",
        unique.len(),
        duplicates.len()
    );

    // 6. Persist
    let mut all = existing;
    let added = unique.len();
    all.extend(unique);
    store::save_store(store_path, &all)?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🎉 Import complete!");
    println!("✓ Added {} payments ({} total in store)", added, all.len());

    Ok(())
}
