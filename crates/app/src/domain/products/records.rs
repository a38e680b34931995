//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{ParseValueError, vendors::records::VendorUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Grocery,
    Beverages,
    Dairy,
    Bakery,
    Produce,
    Electronics,
    Clothing,
    Footwear,
    PersonalCare,
    Other,
}

impl Category {
    pub const ALL: [Self; 10] = [
        Self::Grocery,
        Self::Beverages,
        Self::Dairy,
        Self::Bakery,
        Self::Produce,
        Self::Electronics,
        Self::Clothing,
        Self::Footwear,
        Self::PersonalCare,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grocery => "grocery",
            Self::Beverages => "beverages",
            Self::Dairy => "dairy",
            Self::Bakery => "bakery",
            Self::Produce => "produce",
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Footwear => "footwear",
            Self::PersonalCare => "personal-care",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ParseValueError::new("category", value))
    }
}

/// Listing order for product searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl ProductSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Rating => "rating",
        }
    }
}

impl FromStr for ProductSort {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::Rating),
            _ => Err(ParseValueError::new("sort", value)),
        }
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub vendor_uuid: VendorUuid,
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
    pub rating_average: f64,
    pub rating_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whole-percent markdown from MRP, rounded down.
    #[must_use]
    pub fn discount_percent(&self) -> u64 {
        if self.mrp == 0 {
            return 0;
        }

        self.mrp.saturating_sub(self.selling_price).saturating_mul(100) / self.mrp
    }
}

/// One page of a product search.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_round_trips() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn personal_care_uses_a_hyphen() {
        assert_eq!(Category::PersonalCare.as_str(), "personal-care");
        assert!("personal_care".parse::<Category>().is_err());
    }

    #[test]
    fn unknown_sort_is_rejected() {
        assert!("cheapest".parse::<ProductSort>().is_err());
        assert_eq!("rating".parse::<ProductSort>(), Ok(ProductSort::Rating));
    }

    #[test]
    fn discount_percent_rounds_down() {
        let product = ProductRecord {
            uuid: ProductUuid::new(),
            vendor_uuid: VendorUuid::new(),
            title: "Ghee".to_string(),
            description: String::new(),
            short_description: String::new(),
            category: Category::Dairy,
            mrp: 30_000,
            selling_price: 26_000,
            stock: 4,
            unit: "jar".to_string(),
            tags: Vec::new(),
            images: Vec::new(),
            is_featured: false,
            is_active: true,
            rating_average: 0.0,
            rating_count: 0,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(product.discount_percent(), 13);
    }
}
