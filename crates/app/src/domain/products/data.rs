//! Products Data

use crate::domain::{
    products::records::{Category, ProductSort},
    vendors::records::VendorUuid,
};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Editable product fields. Updates replace all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub category: Category,
    pub mrp: u64,
    pub selling_price: u64,
    pub stock: u32,
    pub unit: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
}

/// Product search filters and paging.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub vendor: Option<VendorUuid>,
    pub q: Option<String>,
    pub featured: Option<bool>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub sort: ProductSort,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_and_clamps() {
        let default = ProductQuery::default();

        assert_eq!(default.page(), 1);
        assert_eq!(default.limit(), 20);
        assert_eq!(default.offset(), 0);

        let wild = ProductQuery {
            page: Some(0),
            limit: Some(500),
            ..ProductQuery::default()
        };

        assert_eq!(wild.page(), 1);
        assert_eq!(wild.limit(), 100);

        let third = ProductQuery {
            page: Some(3),
            limit: Some(10),
            ..ProductQuery::default()
        };

        assert_eq!(third.offset(), 20);
    }
}
