//! Product catalog requests (`products=...`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Currency, UnitOfMeasure, gateway_operation, validate};
use crate::{error::Result, response::ProductResponse};

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductRecord {
    /// Product being updated.
    pub product_id: Option<String>,
    /// SKU.
    pub product_sku: Option<String>,
    /// Description.
    pub product_description: Option<String>,
    /// Unit cost.
    pub product_cost: Option<Decimal>,
    /// Currency.
    pub product_currency: Currency,
    /// Commodity code.
    pub product_commodity_code: Option<String>,
    /// Unit of measure.
    pub product_unit_of_measure: UnitOfMeasure,
    /// Fixed tax amount added to the cost.
    pub product_tax_amount: Option<Decimal>,
    /// Fixed discount amount.
    pub product_discount_amount: Option<Decimal>,
    /// Base64 image, 2 MB at most.
    pub product_image_data: Option<String>,
    /// Image file name.
    pub product_image_name: Option<String>,
}

impl ProductRecord {
    fn check_amounts(&self) -> Result<()> {
        validate::non_negative("product_cost", self.product_cost)?;
        validate::non_negative("product_tax_amount", self.product_tax_amount)?;
        validate::non_negative("product_discount_amount", self.product_discount_amount)?;
        if self.product_image_data.is_some() {
            validate::required_opt("product_image_name", self.product_image_name.as_deref())?;
        }
        Ok(())
    }

    fn check_add(&self) -> Result<()> {
        validate::required_opt("product_sku", self.product_sku.as_deref())?;
        validate::required_opt("product_description", self.product_description.as_deref())?;
        validate::present("product_cost", self.product_cost.as_ref())?;
        self.check_amounts()
    }

    fn check_update(&self) -> Result<()> {
        validate::required_opt("product_id", self.product_id.as_deref())?;
        self.check_amounts()
    }
}

gateway_operation! {
    /// Add a product.
    AddProduct(ProductRecord) -> ProductResponse {
        name: "add_product",
        endpoint: Transact,
        discriminant: "products" = "add_product",
        validate: ProductRecord::check_add,
    }
}

gateway_operation! {
    /// Update a product.
    UpdateProduct(ProductRecord) -> ProductResponse {
        name: "update_product",
        endpoint: Transact,
        discriminant: "products" = "update_product",
        validate: ProductRecord::check_update,
    }
}

/// Remove a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteProduct {
    /// Product to delete.
    pub product_id: String,
}

impl DeleteProduct {
    /// Targets `product_id`.
    pub fn new(product_id: impl Into<String>) -> Self {
        Self { product_id: product_id.into() }
    }

    fn check(&self) -> Result<()> {
        validate::required("product_id", &self.product_id)
    }
}

gateway_operation! {
    impl DeleteProduct => ProductResponse {
        name: "delete_product",
        endpoint: Transact,
        discriminant: ["products" = "delete_product"],
        validate: DeleteProduct::check,
    }
}
