use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelfstock_core::{DomainError, DomainResult};

/// Expiry dates are entered and displayed as ISO `YYYY-MM-DD`.
const EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// Closed set of product kinds.
///
/// The kind is fixed at construction and carries the kind-specific fields.
/// Keeping this a sum type means every per-kind behavior (rendering, expiry)
/// is an exhaustive match, not an open override point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductKind {
    Generic,
    Electronics {
        brand: String,
        /// Warranty length in years, kept as entered (free text, never parsed).
        warranty: String,
    },
    Grocery {
        expiry: NaiveDate,
    },
    Clothing {
        size: String,
        material: String,
    },
}

/// One inventory item: shared base fields plus its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: String,
    name: String,
    price: f64,
    quantity: i64,
    kind: ProductKind,
}

impl Product {
    fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        kind: ProductKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            kind,
        }
    }

    pub fn generic(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Self::new(id, name, price, quantity, ProductKind::Generic)
    }

    pub fn electronics(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        brand: impl Into<String>,
        warranty: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            name,
            price,
            quantity,
            ProductKind::Electronics {
                brand: brand.into(),
                warranty: warranty.into(),
            },
        )
    }

    /// Construct a grocery item, parsing `expiry` as `YYYY-MM-DD`.
    ///
    /// This is the only fallible constructor; a malformed date rejects the
    /// whole product (no partially constructed value).
    pub fn grocery(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        expiry: &str,
    ) -> DomainResult<Self> {
        let expiry = NaiveDate::parse_from_str(expiry, EXPIRY_FORMAT)
            .map_err(|e| DomainError::parse(format!("expiry date {expiry:?}: {e}")))?;
        Ok(Self::new(id, name, price, quantity, ProductKind::Grocery { expiry }))
    }

    pub fn clothing(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        size: impl Into<String>,
        material: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            name,
            price,
            quantity,
            ProductKind::Clothing {
                size: size.into(),
                material: material.into(),
            },
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Whether this product is expired relative to `on`.
    ///
    /// Only groceries can expire; the comparison is strict (`expiry < on`),
    /// so a product expiring today is still good. The reference date is
    /// injected by the caller so results stay deterministic under test.
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        match &self.kind {
            ProductKind::Grocery { expiry } => *expiry < on,
            _ => false,
        }
    }

    /// Per-kind display line.
    ///
    /// `on` is the reference date for grocery expiry status; it is evaluated
    /// here, at render time, not cached from construction.
    pub fn render(&self, on: NaiveDate) -> String {
        let Self {
            id,
            name,
            price,
            quantity,
            kind,
        } = self;
        match kind {
            ProductKind::Generic => {
                format!("ID: {id}, Name: {name}, Price: Rs{price}, Quantity: {quantity}")
            }
            ProductKind::Electronics { brand, warranty } => format!(
                "[Electronics] ID: {id}, Name: {name}, Brand: {brand}, Price: Rs{price}, \
                 Quantity: {quantity}, Warranty: {warranty} years"
            ),
            ProductKind::Grocery { expiry } => {
                let status = if self.is_expired(on) { "Expired" } else { "Good" };
                format!(
                    "[Grocery] ID: {id}, Name: {name}, Price: Rs{price}, \
                     Quantity: {quantity}, Expiry: {expiry} ({status})"
                )
            }
            ProductKind::Clothing { size, material } => format!(
                "[Clothing] ID: {id}, Name: {name}, Price: Rs{price}, \
                 Quantity: {quantity}, Size: {size}, Material: {material}"
            ),
        }
    }
}
