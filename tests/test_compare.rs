//! Comparison orchestration tests: validation, ordering, best price, summaries.

mod common;

use common::{FailingSummarizer, FixedSummarizer, UnreachableSummarizer};
use compario_sdk::compare::normalize_product_name;
use compario_sdk::{
    ComparioError, ComparioSdk, MemoryStore, PricePolicy, StoreCatalog, StoreProfile,
};

// ---------------------------------------------------------------------------
// search_prices
// ---------------------------------------------------------------------------

#[test]
fn iphone_search_returns_sorted_quotes_for_every_store() {
    let sdk = common::memory_sdk();

    let result = sdk.search_prices("iPhone 15").unwrap();
    assert_eq!(result.product_name, "iPhone 15");
    assert_eq!(result.results.len(), 5);
    assert!(result.results.iter().all(|q| q.price > 0.0));
    assert!(common::is_sorted_by_price(&result.results));

    let best = result.best_price.as_ref().unwrap();
    assert_eq!(best.store, result.results[0].store);
    assert_eq!(best, &result.results[0]);
}

#[test]
fn random_policy_keeps_best_price_consistent_with_results() {
    let sdk = ComparioSdk::builder()
        .storage(MemoryStore::new())
        .price_policy(PricePolicy::Random)
        .build()
        .unwrap();

    for _ in 0..25 {
        let result = sdk.search_prices("Galaxy S24").unwrap();
        assert_eq!(result.results.len(), 5);
        assert!(common::is_sorted_by_price(&result.results));

        let min = result
            .results
            .iter()
            .map(|q| q.price)
            .fold(f64::INFINITY, f64::min);
        let best = result.best_price.as_ref().unwrap();
        assert_eq!(best, &result.results[0]);
        assert_eq!(best.price, min);
    }
}

#[test]
fn best_price_is_the_minimum_for_many_names() {
    let sdk = common::memory_sdk();

    for name in ["Pencil", "Galaxy Watch", "PlayStation 5", "Dell Notebook", "Kettle"] {
        let result = sdk.search_prices(name).unwrap();
        let min = result
            .results
            .iter()
            .map(|q| q.price)
            .fold(f64::INFINITY, f64::min);
        assert!(common::is_sorted_by_price(&result.results), "{name}");
        assert_eq!(result.best_price.unwrap().price, min, "{name}");
    }
}

#[test]
fn empty_name_is_rejected() {
    let sdk = common::sdk_with_summarizer(UnreachableSummarizer);

    let err = sdk.search_prices("").unwrap_err();
    assert!(matches!(err, ComparioError::InvalidArgument(_)));

    let err = sdk.search_prices("   \t ").unwrap_err();
    assert!(matches!(err, ComparioError::InvalidArgument(_)));
}

#[test]
fn overlong_name_is_rejected() {
    let sdk = common::memory_sdk();
    let err = sdk.search_prices(&"x".repeat(256)).unwrap_err();
    assert!(matches!(err, ComparioError::InvalidArgument(_)));
}

#[test]
fn name_is_normalized_before_pricing() {
    let sdk = common::memory_sdk();

    let messy = sdk.search_prices("  iPhone   15 ").unwrap();
    let clean = sdk.search_prices("iPhone 15").unwrap();
    assert_eq!(messy.product_name, "iPhone 15");
    assert_eq!(messy.results, clean.results);
}

#[test]
fn normalize_collapses_whitespace() {
    assert_eq!(normalize_product_name(" a \n b\tc "), "a b c");
    assert_eq!(normalize_product_name("   "), "");
}

#[test]
fn ties_keep_catalog_order() {
    let catalog = StoreCatalog::new()
        .with_store(StoreProfile::new("First", 1.0, 1.0, "https://first.test/{query}").unwrap())
        .with_store(StoreProfile::new("Second", 1.0, 1.0, "https://second.test/{query}").unwrap());
    let sdk = ComparioSdk::builder()
        .storage(MemoryStore::new())
        .catalog(catalog)
        .build()
        .unwrap();

    let result = sdk.search_prices("Widget").unwrap();
    assert_eq!(result.results[0].price, result.results[1].price);
    assert_eq!(result.best_price.unwrap().store, common::store("First"));
}

#[test]
fn empty_catalog_yields_no_prices_without_summarizing() {
    let sdk = ComparioSdk::builder()
        .storage(MemoryStore::new())
        .catalog(StoreCatalog::new())
        .summarizer(UnreachableSummarizer)
        .build()
        .unwrap();

    let result = sdk.search_prices("Widget").unwrap();
    assert!(result.is_empty());
    assert!(result.best_price.is_none());
    assert_eq!(result.summary, "No prices found for Widget.");
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

#[test]
fn failing_summarizer_falls_back_to_template() {
    let sdk = common::sdk_with_summarizer(FailingSummarizer);

    let result = sdk.search_prices("iPhone 15").unwrap();
    let best = result.best_price.as_ref().unwrap();
    assert!(!result.summary.is_empty());
    assert!(result.summary.contains(best.store.name()));
    assert!(result.summary.contains(&format!("{:.2}", best.price)));
}

#[test]
fn blank_summary_falls_back_to_template() {
    let sdk = common::sdk_with_summarizer(FixedSummarizer("   "));

    let result = sdk.search_prices("Kettle").unwrap();
    assert!(result.summary.starts_with("The best price for Kettle is $"));
}

#[test]
fn summarizer_text_is_used_when_available() {
    let sdk = common::sdk_with_summarizer(FixedSummarizer(" Buy it at Amazon. "));

    let result = sdk.search_prices("Kettle").unwrap();
    assert_eq!(result.summary, "Buy it at Amazon.");
}

#[test]
fn missing_summarizer_uses_template() {
    let sdk = common::memory_sdk();

    let result = sdk.search_prices("Kettle").unwrap();
    let best = result.best_price.unwrap();
    assert_eq!(
        result.summary,
        format!(
            "The best price for Kettle is ${:.2} at {}, compared across 5 stores.",
            best.price, best.store
        )
    );
}

#[test]
fn comparison_serializes_with_camel_case_keys() {
    let sdk = common::memory_sdk();
    let result = sdk.search_prices("Kettle").unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["productName"], "Kettle");
    assert!(json["bestPrice"]["price"].is_number());
    assert_eq!(json["results"].as_array().unwrap().len(), 5);
    assert!(json["results"][0].get("image").is_none());
}
