//! Product record types

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Store-assigned identifier for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    /// The id handed to the first product of an empty collection
    pub const FIRST: ProductId = ProductId(1);

    /// The following id, `None` once `u64::MAX` is reached
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A stored product record.
///
/// Field names match the on-disk JSON array exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    #[serde(alias = "thumbnailRef")]
    pub thumbnail: String,
    pub code: String,
    pub stock: u64,
}

// Largest magnitude below which every whole f64 is exactly representable as an integer.
const MAX_EXACT_PRICE: f64 = 9_007_199_254_740_992.0;

/// Whole prices are written as integers (`200`, not `200.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < MAX_EXACT_PRICE {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// Rejected input for a product field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field `{0}` is required")]
    Missing(&'static str),

    #[error("field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

fn require_price(price: f64) -> Result<(), ValidationError> {
    if price == 0.0 {
        return Err(ValidationError::Missing("price"));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::Invalid {
            field: "price",
            reason: format!("expected a positive amount, got {price}"),
        });
    }
    Ok(())
}

fn require_stock(stock: u64) -> Result<(), ValidationError> {
    if stock == 0 {
        return Err(ValidationError::Missing("stock"));
    }
    Ok(())
}

/// Caller-supplied fields for a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(alias = "thumbnailRef")]
    pub thumbnail: String,
    pub code: String,
    pub stock: u64,
}

impl NewProduct {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        thumbnail: impl Into<String>,
        code: impl Into<String>,
        stock: u64,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            thumbnail: thumbnail.into(),
            code: code.into(),
            stock,
        }
    }

    /// Check every required field, reporting the first one that is empty or zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_price(self.price)?;
        require_text("thumbnail", &self.thumbnail)?;
        require_text("code", &self.code)?;
        require_stock(self.stock)
    }

    /// Trimmed product code, as it will be stored
    pub fn trimmed_code(&self) -> &str {
        self.code.trim()
    }

    /// Build the stored record, trimming every text field.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            thumbnail: self.thumbnail.trim().to_string(),
            code: self.code.trim().to_string(),
            stock: self.stock,
        }
    }
}

/// Per-field overlay applied by an update.
///
/// `None` leaves the stored value untouched. `id` is present only so that an
/// attempt to change it can be detected and rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(alias = "thumbnailRef", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn stock(mut self, stock: u64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// True when the patch would set `id` to something other than `current`
    pub fn changes_id(&self, current: ProductId) -> bool {
        matches!(self.id, Some(id) if id != current)
    }

    /// Trimmed replacement code, if the patch carries one
    pub fn trimmed_code(&self) -> Option<&str> {
        self.code.as_deref().map(str::trim)
    }

    /// Validate the fields the patch sets; unset fields are not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(price) = self.price {
            require_price(price)?;
        }
        if let Some(thumbnail) = &self.thumbnail {
            require_text("thumbnail", thumbnail)?;
        }
        if let Some(code) = &self.code {
            require_text("code", code)?;
        }
        if let Some(stock) = self.stock {
            require_stock(stock)?;
        }
        Ok(())
    }

    /// Overwrite the fields present in the patch. `id` is never written.
    pub fn apply(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            product.description = description.trim().to_string();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(thumbnail) = &self.thumbnail {
            product.thumbnail = thumbnail.trim().to_string();
        }
        if let Some(code) = &self.code {
            product.code = code.trim().to_string();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProduct {
        NewProduct::new("A", "d", 200.0, "thumb", "abc123", 25)
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut input = sample();
        input.description = "   ".to_string();
        assert_eq!(input.validate(), Err(ValidationError::Missing("description")));

        let mut input = sample();
        input.stock = 0;
        assert_eq!(input.validate(), Err(ValidationError::Missing("stock")));

        let mut input = sample();
        input.price = 0.0;
        assert_eq!(input.validate(), Err(ValidationError::Missing("price")));

        let mut input = sample();
        input.thumbnail = String::new();
        assert_eq!(input.validate(), Err(ValidationError::Missing("thumbnail")));

        let mut input = sample();
        input.code = " \t".to_string();
        assert_eq!(input.validate(), Err(ValidationError::Missing("code")));
    }

    #[test]
    fn test_patch_validate_numbers() {
        assert!(matches!(
            ProductPatch::new().price(-1.0).validate(),
            Err(ValidationError::Invalid { field: "price", .. })
        ));
        assert_eq!(
            ProductPatch::new().stock(0).validate(),
            Err(ValidationError::Missing("stock"))
        );
        assert!(ProductPatch::new().price(3.5).stock(1).validate().is_ok());
    }

    #[test]
    fn test_checked_next() {
        assert_eq!(ProductId(1).checked_next(), Some(ProductId(2)));
        assert_eq!(ProductId(u64::MAX).checked_next(), None);
    }

    #[test]
    fn test_whole_price_written_as_integer() {
        let product = sample().into_product(ProductId::FIRST);
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains(r#""price":200,"#));

        let mut fractional = product;
        fractional.price = 19.99;
        let json = serde_json::to_string(&fractional).unwrap();
        assert!(json.contains(r#""price":19.99,"#));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut input = sample();
        input.price = -3.5;
        assert!(matches!(
            input.validate(),
            Err(ValidationError::Invalid { field: "price", .. })
        ));
    }

    #[test]
    fn test_into_product_trims_text() {
        let input = NewProduct::new("  A ", "d\n", 10.0, " t ", " x1 ", 3);
        let product = input.into_product(ProductId(7));
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.title, "A");
        assert_eq!(product.description, "d");
        assert_eq!(product.thumbnail, "t");
        assert_eq!(product.code, "x1");
    }

    #[test]
    fn test_patch_overlays_only_present_fields() {
        let mut product = sample().into_product(ProductId::FIRST);
        let before = product.clone();

        ProductPatch::new().title(" X ").apply(&mut product);

        assert_eq!(product.title, "X");
        assert_eq!(product.description, before.description);
        assert_eq!(product.price, before.price);
        assert_eq!(product.code, before.code);
        assert_eq!(product.stock, before.stock);
    }

    #[test]
    fn test_patch_changes_id() {
        let current = ProductId(1);
        assert!(!ProductPatch::new().changes_id(current));
        assert!(!ProductPatch::new().id(ProductId(1)).changes_id(current));
        assert!(ProductPatch::new().id(ProductId(2)).changes_id(current));
    }

    #[test]
    fn test_patch_from_partial_json() {
        let patch: ProductPatch = serde_json::from_str(r#"{"title":"X","thumbnailRef":"img"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("X"));
        assert_eq!(patch.thumbnail.as_deref(), Some("img"));
        assert!(patch.id.is_none());
        assert!(patch.price.is_none());
    }

    #[test]
    fn test_product_json_field_names() {
        let product = sample().into_product(ProductId::FIRST);
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["thumbnail"], "thumb");
        assert_eq!(value["code"], "abc123");
        assert_eq!(value["stock"], 25);
    }

    #[test]
    fn test_product_reads_integer_price() {
        let json = r#"{"id":1,"title":"A","description":"d","price":200,"thumbnail":"t","code":"c","stock":2}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, 200.0);
    }
}
