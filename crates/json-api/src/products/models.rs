//! Product Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::products::{
    data::ProductDetails,
    records::{Category, ProductPage, ProductRecord},
};

use crate::extensions::*;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub vendor_uuid: Uuid,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub category: String,

    /// Maximum retail price in paise.
    pub mrp: u64,

    /// Price charged in paise.
    pub selling_price: u64,

    /// Whole-percent markdown from MRP.
    pub discount_percent: u64,

    pub stock: u32,
    pub unit: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub rating_average: f64,
    pub rating_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            discount_percent: product.discount_percent(),
            uuid: product.uuid.into(),
            vendor_uuid: product.vendor_uuid.into(),
            title: product.title,
            description: product.description,
            short_description: product.short_description,
            category: product.category.to_string(),
            mrp: product.mrp,
            selling_price: product.selling_price,
            stock: product.stock,
            unit: product.unit,
            tags: product.tags,
            images: product.images,
            is_featured: product.is_featured,
            is_active: product.is_active,
            rating_average: product.rating_average,
            rating_count: product.rating_count,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    pub count: usize,
    pub products: Vec<ProductResponse>,
}

impl From<Vec<ProductRecord>> for ProductsResponse {
    fn from(products: Vec<ProductRecord>) -> Self {
        Self {
            count: products.len(),
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}

/// One page of search results
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPageResponse {
    pub products: Vec<ProductResponse>,

    /// Products on this page.
    pub count: usize,

    /// Products matching the search across all pages.
    pub total: u64,

    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

impl From<ProductPage> for ProductPageResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            count: page.products.len(),
            pages: page.total.div_ceil(u64::from(page.limit.max(1))),
            products: page.products.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

/// Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub short_description: String,

    /// One of the values listed by `GET /api/products/categories`.
    pub category: String,

    pub mrp: u64,
    pub selling_price: u64,

    #[serde(default)]
    pub stock: u32,

    /// Defaults to `piece`.
    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl TryFrom<ProductRequest> for ProductDetails {
    type Error = StatusError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_category(&request.category)?,
            title: request.title,
            description: request.description,
            short_description: request.short_description,
            mrp: request.mrp,
            selling_price: request.selling_price,
            stock: request.stock,
            unit: request.unit,
            tags: request.tags,
            images: request.images,
            is_featured: request.is_featured,
            is_active: request.is_active,
        })
    }
}

pub(crate) fn parse_category(value: &str) -> Result<Category, StatusError> {
    value.parse::<Category>().or_400("invalid category")
}
