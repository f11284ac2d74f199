//! Products, product drafts and categories.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::{Price, PriceError};

/// Category used when a draft does not name one ("general").
pub const DEFAULT_CATEGORY: &str = "عام";

/// Placeholder image used when a draft does not provide one.
pub const DEFAULT_IMAGE: &str = "https://picsum.photos/300/400";

/// Stock level used when a draft does not provide one.
pub const DEFAULT_STOCK: u32 = 10;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A product offered by the shop.
///
/// `stock` is informational only: adding to the cart and placing an order
/// never check or decrement it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub stock: u32,
}

/// Error validating a size/color selection against a product.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The product offers sizes but none was chosen.
    #[error("please choose a size")]
    SizeRequired,
    /// The chosen size is not offered.
    #[error("size '{0}' is not available for this product")]
    UnknownSize(String),
    /// The chosen color is not offered.
    #[error("color '{0}' is not available for this product")]
    UnknownColor(String),
}

impl Product {
    /// Check a size/color choice before it goes into the cart.
    ///
    /// A size is mandatory when the product offers sizes. A color is
    /// optional, but when given it must be one of the offered colors.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] describing the first problem found.
    pub fn check_selection(
        &self,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<(), SelectionError> {
        match size {
            None if !self.sizes.is_empty() => return Err(SelectionError::SizeRequired),
            Some(size) if !self.sizes.iter().any(|s| s == size) => {
                return Err(SelectionError::UnknownSize(size.to_owned()));
            }
            _ => {}
        }

        if let Some(color) = color
            && !self.colors.iter().any(|c| c == color)
        {
            return Err(SelectionError::UnknownColor(color.to_owned()));
        }

        Ok(())
    }
}

/// Error converting a [`ProductDraft`] into a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    /// Name missing or blank.
    #[error("product name is required")]
    MissingName,
    /// Price missing.
    #[error("product price is required")]
    MissingPrice,
    /// Price not a positive whole number within range.
    #[error("product {0}")]
    InvalidPrice(#[from] PriceError),
}

/// Product form state, with every field optional until save time.
///
/// Sizes and colors may be sent either as lists or as the comma-separated
/// text the admin form uses (`"S, M, L"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub sizes: Option<OptionList>,
    pub colors: Option<OptionList>,
    pub stock: Option<u32>,
}

/// List of size or color options as submitted by a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionList {
    /// Already split list.
    List(Vec<String>),
    /// Comma-separated text.
    Text(String),
}

impl OptionList {
    /// Normalize into a list of trimmed, non-empty entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect(),
            Self::Text(text) => parse_option_list(&text),
        }
    }
}

/// Split comma-separated option text, trimming entries and dropping blanks.
#[must_use]
pub fn parse_option_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

impl ProductDraft {
    /// The category the draft will be saved under.
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Validate the draft and build a product with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] when the name is missing or blank, or the
    /// price is missing or fails [`Price::validate_listing`].
    pub fn into_product(self, id: ProductId) -> Result<Product, ProductError> {
        let category = self.category_or_default().to_owned();

        let name = self
            .name
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty())
            .ok_or(ProductError::MissingName)?;

        let price = self
            .price
            .ok_or(ProductError::MissingPrice)?
            .validate_listing()?;

        Ok(Product {
            id,
            name,
            price,
            category,
            description: self.description.unwrap_or_default(),
            image: self
                .image
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_owned()),
            sizes: self.sizes.map(OptionList::into_vec).unwrap_or_default(),
            colors: self.colors.map(OptionList::into_vec).unwrap_or_default(),
            stock: self.stock.unwrap_or(DEFAULT_STOCK),
        })
    }
}
