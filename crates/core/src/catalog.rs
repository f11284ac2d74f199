//! Product catalog store.
//!
//! Holds the product list and the static category list. Products are
//! created from a [`ProductDraft`], replaced in place by id on update, and
//! removed by id.

use crate::types::{Category, Product, ProductDraft, ProductError, ProductId};

/// Category filter value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Errors from catalog mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No product with this id.
    #[error("product not found: {0}")]
    NotFound(ProductId),
    /// The draft names a category that does not exist.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// The draft failed validation.
    #[error(transparent)]
    Invalid(#[from] ProductError),
}

/// Which products to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from a query value; missing, blank and `"all"` mean
    /// every category.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | ALL_CATEGORIES) => Self::All,
            Some(name) => Self::Named(name.to_owned()),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => product.category == *name,
        }
    }
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Create a catalog from existing products and categories.
    #[must_use]
    pub const fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// All products, newest first.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The category reference list.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    /// Products matching a category filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Validate a draft and add it as a new product at the front of the list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if the draft fails validation, or
    /// [`CatalogError::UnknownCategory`] if its category is not listed.
    pub fn create(&mut self, draft: ProductDraft) -> Result<Product, CatalogError> {
        self.check_category(&draft)?;
        let product = draft.into_product(ProductId::generate())?;
        self.products.insert(0, product.clone());
        Ok(product)
    }

    /// Replace an existing product with the validated draft, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id, or a
    /// validation error for the draft.
    pub fn update(&mut self, id: &ProductId, draft: ProductDraft) -> Result<Product, CatalogError> {
        self.check_category(&draft)?;
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        *slot = draft.into_product(id.clone())?;
        Ok(slot.clone())
    }

    /// Remove a product by id, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id.
    pub fn delete(&mut self, id: &ProductId) -> Result<Product, CatalogError> {
        let pos = self
            .products
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        Ok(self.products.remove(pos))
    }

    fn check_category(&self, draft: &ProductDraft) -> Result<(), CatalogError> {
        let category = draft.category_or_default();
        if self.categories.is_empty() || self.categories.iter().any(|c| c.name == category) {
            Ok(())
        } else {
            Err(CatalogError::UnknownCategory(category.to_owned()))
        }
    }
}
