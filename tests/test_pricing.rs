//! Price generator tests: catalog coverage, determinism, keyword bands, links.

mod common;

use compario_sdk::pricing::{base_price_band, round_price, seed_for, PriceGenerator, SeededRng};
use compario_sdk::{PricePolicy, Store, StoreCatalog, StoreProfile};

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_returns_one_quote_per_store_in_catalog_order() {
    let catalog = StoreCatalog::default();
    let quotes = PriceGenerator::new(&catalog, PricePolicy::Deterministic).generate("Desk Lamp");

    assert_eq!(quotes.len(), catalog.len());
    let stores: Vec<&Store> = quotes.iter().map(|q| &q.store).collect();
    let expected: Vec<&Store> = catalog.iter().map(|p| &p.store).collect();
    assert_eq!(stores, expected);
}

#[test]
fn generate_is_stable_for_the_same_name() {
    let catalog = StoreCatalog::default();
    let gen = PriceGenerator::new(&catalog, PricePolicy::Deterministic);

    let first = gen.generate("Sony WH-1000XM5");
    let second = gen.generate("Sony WH-1000XM5");
    assert_eq!(first, second);
}

#[test]
fn generate_seed_ignores_case() {
    let catalog = StoreCatalog::default();
    let gen = PriceGenerator::new(&catalog, PricePolicy::Deterministic);

    let upper: Vec<f64> = gen.generate("IPHONE 15").iter().map(|q| q.price).collect();
    let lower: Vec<f64> = gen.generate("iphone 15").iter().map(|q| q.price).collect();
    assert_eq!(upper, lower);
}

#[test]
fn generate_prices_are_positive_and_two_decimal() {
    let catalog = StoreCatalog::default();
    let gen = PriceGenerator::new(&catalog, PricePolicy::Deterministic);

    for name in ["iPhone 15", "Pencil", "MacBook Air", "Xbox Series X", "Bose Speaker"] {
        for quote in gen.generate(name) {
            assert!(quote.price > 0.0, "{name} at {} was {}", quote.store, quote.price);
            assert_eq!(round_price(quote.price), quote.price);
        }
    }
}

#[test]
fn generate_applies_store_bands() {
    let catalog = common::two_store_catalog();
    let gen = PriceGenerator::new(&catalog, PricePolicy::Deterministic);

    for name in ["Coffee Mug", "Galaxy S24", "Gaming Laptop"] {
        let quotes = gen.generate(name);
        assert_eq!(quotes[0].store, common::store("Cheapo"));
        assert_eq!(quotes[1].store, common::store("Pricey"));
        assert!(quotes[0].price < quotes[1].price, "{name}");
    }
}

#[test]
fn generate_with_empty_catalog_returns_nothing() {
    let catalog = StoreCatalog::new();
    let quotes = PriceGenerator::new(&catalog, PricePolicy::Deterministic).generate("Anything");
    assert!(quotes.is_empty());
}

#[test]
fn generate_random_policy_still_covers_catalog() {
    let catalog = StoreCatalog::default();
    let quotes = PriceGenerator::new(&catalog, PricePolicy::Random).generate("iPhone 15");
    assert_eq!(quotes.len(), 5);
    assert!(quotes.iter().all(|q| q.price > 0.0));
}

#[test]
fn generate_builds_encoded_search_links() {
    let catalog = StoreCatalog::default();
    let quotes = PriceGenerator::new(&catalog, PricePolicy::Deterministic).generate("Pixel 8 & Case");

    let amazon = quotes.iter().find(|q| q.store == Store::Amazon).unwrap();
    assert_eq!(amazon.url, "https://www.amazon.com/s?k=Pixel%208%20%26%20Case");
    assert_eq!(amazon.title, "Pixel 8 & Case - Amazon");
    assert!(amazon.image.is_none());
}

// ---------------------------------------------------------------------------
// Keyword bands
// ---------------------------------------------------------------------------

#[test]
fn phone_keywords_pick_phone_band() {
    assert_eq!(base_price_band("iPhone 15 Pro").label, "phone");
    assert_eq!(base_price_band("Samsung Galaxy S24").label, "phone");
    assert_eq!(base_price_band("Smartphones").label, "phone");
}

#[test]
fn other_keywords_pick_their_bands() {
    assert_eq!(base_price_band("MacBook Air M3").label, "computer");
    assert_eq!(base_price_band("LG OLED TV").label, "entertainment");
    assert_eq!(base_price_band("Sony Headphones").label, "audio");
}

#[test]
fn keywords_match_word_prefixes_only() {
    assert_eq!(base_price_band("Gas Stove").label, "generic");
    assert_eq!(base_price_band("Coffee Mug").label, "generic");
}

#[test]
fn phone_band_prices_exceed_generic_band() {
    let catalog = StoreCatalog::default();
    let gen = PriceGenerator::new(&catalog, PricePolicy::Deterministic);

    let phone_min = gen
        .generate("iPhone 15")
        .iter()
        .map(|q| q.price)
        .fold(f64::INFINITY, f64::min);
    let mug_max = gen
        .generate("Coffee Mug")
        .iter()
        .map(|q| q.price)
        .fold(0.0, f64::max);
    assert!(phone_min > mug_max);
}

// ---------------------------------------------------------------------------
// Seeds
// ---------------------------------------------------------------------------

#[test]
fn seed_is_rolling_string_hash() {
    assert_eq!(seed_for(""), 0);
    assert_eq!(seed_for("a"), 97);
    assert_eq!(seed_for("ab"), 97 * 31 + 98);
    assert_eq!(seed_for("AB"), seed_for("ab"));
}

#[test]
fn seeded_rng_reports_its_seed() {
    assert_eq!(SeededRng::for_product("tv").seed(), Some(seed_for("tv")));
    assert_eq!(SeededRng::from_entropy().seed(), None);
}

#[test]
fn seeded_rng_degenerate_band_returns_low() {
    let mut rng = SeededRng::for_product("x");
    assert_eq!(rng.uniform(3.0, 3.0), 3.0);
    assert_eq!(rng.uniform(5.0, 1.0), 5.0);
}

// ---------------------------------------------------------------------------
// StoreProfile
// ---------------------------------------------------------------------------

#[test]
fn store_profile_rejects_bad_bands() {
    assert!(StoreProfile::new("A", 1.2, 1.0, "https://a.test/{query}").is_err());
    assert!(StoreProfile::new("A", -0.1, 1.0, "https://a.test/{query}").is_err());
    assert!(StoreProfile::new("A", 0.9, f64::NAN, "https://a.test/{query}").is_err());
}

#[test]
fn store_profile_appends_query_without_placeholder() {
    let profile = StoreProfile::new("A", 1.0, 1.0, "https://a.test/search?q=").unwrap();
    assert_eq!(profile.search_url_for("usb hub"), "https://a.test/search?q=usb%20hub");
}

#[test]
fn with_store_replaces_existing_profile() {
    let catalog = StoreCatalog::default()
        .with_store(StoreProfile::new("amazon", 0.5, 0.5, "https://a.test/{query}").unwrap());
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.get(&Store::Amazon).unwrap().min_factor, 0.5);
}

#[test]
fn store_names_round_trip_through_json() {
    let json = serde_json::to_string(&vec![Store::Ebay, Store::BestBuy, Store::from("Target")]).unwrap();
    assert_eq!(json, r#"["eBay","Best Buy","Target"]"#);

    let back: Vec<Store> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vec![Store::Ebay, Store::BestBuy, Store::Other("Target".into())]);
}
