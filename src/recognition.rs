//! Image upload validation and product recognition.
//!
//! Real vision services live outside this crate behind [`ProductRecognizer`].
//! [`AspectRatioRecognizer`] is the offline fallback: it only looks at the
//! image dimensions.

use std::collections::HashMap;

use tracing::info;

use crate::config;
use crate::error::{ComparioError, Result};
use crate::models::Recognition;

// ---------------------------------------------------------------------------
// ImageUpload
// ---------------------------------------------------------------------------

/// An uploaded product photo.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImageUpload {
    pub fn new(content_type: impl Into<String>, data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            content_type: content_type.into(),
            data,
            width,
            height,
        }
    }

    /// Check presence, size (max 5 MiB) and format (JPEG/PNG).
    pub fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(ComparioError::InvalidArgument("No image provided".into()));
        }
        if self.data.len() > config::MAX_UPLOAD_BYTES {
            return Err(ComparioError::InvalidArgument(
                "Image too large (max 5MB)".into(),
            ));
        }
        let content_type = self.content_type.trim().to_lowercase();
        if !config::ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(ComparioError::InvalidArgument(
                "Invalid format (JPG/PNG only)".into(),
            ));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

// ---------------------------------------------------------------------------
// ProductRecognizer
// ---------------------------------------------------------------------------

/// Turns an image into a product name.
pub trait ProductRecognizer: Send {
    fn recognize(&self, image: &ImageUpload) -> Result<Recognition>;
}

/// Dimension-based guesser used when no vision service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectRatioRecognizer;

impl ProductRecognizer for AspectRatioRecognizer {
    fn recognize(&self, image: &ImageUpload) -> Result<Recognition> {
        let ratio = image.aspect_ratio();
        let product_name = if ratio > 1.5 {
            "Smartphone or Mobile Device"
        } else if ratio < 0.7 {
            "Laptop or Tablet"
        } else {
            "Product"
        };
        info!(product = product_name, ratio, "simple recognizer guess");

        Ok(Recognition {
            product_name: product_name.to_string(),
            brand: None,
            model: None,
            size: None,
            labels: vec![product_name.to_lowercase()],
            confidence: 50.0,
            source: "simple_fallback".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Brand names
// ---------------------------------------------------------------------------

/// Fallback name when nothing about the product could be identified.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Canonical brand names, keyed by lowercase spelling or product line.
fn brand_spellings() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("apple", "Apple"),
        ("iphone", "Apple"),
        ("ipad", "Apple"),
        ("macbook", "Apple"),
        ("imac", "Apple"),
        ("airpods", "Apple"),
        ("samsung", "Samsung"),
        ("galaxy", "Samsung"),
        ("sony", "Sony"),
        ("lg", "LG"),
        ("hp", "HP"),
        ("dell", "Dell"),
        ("xps", "Dell"),
        ("inspiron", "Dell"),
        ("alienware", "Dell"),
        ("lenovo", "Lenovo"),
        ("thinkpad", "Lenovo"),
        ("ideapad", "Lenovo"),
        ("asus", "ASUS"),
        ("rog", "ASUS"),
        ("zenbook", "ASUS"),
        ("acer", "Acer"),
        ("predator", "Acer"),
        ("aspire", "Acer"),
        ("oneplus", "OnePlus"),
        ("xiaomi", "Xiaomi"),
        ("redmi", "Xiaomi"),
        ("poco", "Xiaomi"),
        ("mi", "Xiaomi"),
        ("google", "Google"),
        ("pixel", "Google"),
        ("microsoft", "Microsoft"),
        ("bose", "Bose"),
        ("jbl", "JBL"),
        ("nike", "Nike"),
        ("adidas", "Adidas"),
    ])
}

/// Canonical capitalization for a detected brand.
///
/// Known brands and product lines map to the maker's house style
/// (`"jbl"` -> `"JBL"`, `"thinkpad"` -> `"Lenovo"`); anything else gets its
/// first letter uppercased and the rest lowercased.
pub fn normalize_brand_name(brand: &str) -> String {
    let lower = brand.trim().to_lowercase();
    if let Some(canonical) = brand_spellings().get(lower.as_str()) {
        return canonical.to_string();
    }
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Remove words equal to `brand` (ASCII case-insensitive) from `text`.
fn strip_brand(text: &str, brand: &str) -> String {
    text.split_whitespace()
        .filter(|w| !w.eq_ignore_ascii_case(brand))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assemble a product name from recognized parts.
///
/// Produces `"<Brand> <model> (<size>)"`, skipping missing parts. The brand is
/// normalized and not repeated if the model already contains it. Without a
/// model, `fallback` (e.g. the best label) takes its place. If nothing is
/// known the result is [`UNKNOWN_PRODUCT`].
pub fn build_product_name(
    brand: Option<&str>,
    model: Option<&str>,
    size: Option<&str>,
    fallback: Option<&str>,
) -> String {
    let brand = brand.map(normalize_brand_name).filter(|b| !b.is_empty());
    let mut parts: Vec<String> = Vec::new();

    let body = model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .or_else(|| fallback.map(str::trim).filter(|f| !f.is_empty()));
    let body = match (&brand, body) {
        (Some(b), Some(text)) => Some(strip_brand(text, b)),
        (None, Some(text)) => Some(text.to_string()),
        (_, None) => None,
    };

    if let Some(b) = brand {
        parts.push(b);
    }
    if let Some(text) = body.filter(|t| !t.is_empty()) {
        parts.push(text);
    }
    if let Some(size) = size.map(str::trim).filter(|s| !s.is_empty()) {
        parts.push(format!("({})", size));
    }

    if parts.is_empty() {
        UNKNOWN_PRODUCT.to_string()
    } else {
        parts.join(" ")
    }
}

impl Recognition {
    /// Rebuild `product_name` from brand, model and size when any is known.
    ///
    /// The recognizer's own name serves as the fallback for a missing model.
    /// A recognition carrying none of the three parts is returned unchanged.
    pub fn normalized(mut self) -> Self {
        if self.brand.is_none() && self.model.is_none() && self.size.is_none() {
            return self;
        }
        let fallback = Some(self.product_name.as_str()).filter(|n| *n != UNKNOWN_PRODUCT);
        self.product_name = build_product_name(
            self.brand.as_deref(),
            self.model.as_deref(),
            self.size.as_deref(),
            fallback,
        );
        self.brand = self
            .brand
            .as_deref()
            .map(normalize_brand_name)
            .filter(|b| !b.is_empty());
        self
    }
}
