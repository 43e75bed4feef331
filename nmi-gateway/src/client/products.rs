use super::{ApiResponse, operation_client};
use crate::{
    request::{
        Call,
        product::{AddProduct, DeleteProduct, ProductRecord, UpdateProduct},
    },
    response::ProductResponse,
    transport::Transport,
};

operation_client! {
    /// Product catalog operations (`products=...`).
    Products
}

impl<T: Transport> Products<T> {
    /// Adds a product.
    pub async fn add(&self, call: impl Into<Call<ProductRecord>>) -> ApiResponse<ProductResponse> {
        self.dispatcher.execute(call.into().map(AddProduct)).await
    }

    /// Updates a product.
    pub async fn update(&self, call: impl Into<Call<ProductRecord>>) -> ApiResponse<ProductResponse> {
        self.dispatcher.execute(call.into().map(UpdateProduct)).await
    }

    /// Deletes a product.
    pub async fn delete(&self, call: impl Into<Call<DeleteProduct>>) -> ApiResponse<ProductResponse> {
        self.dispatcher.execute(call.into()).await
    }
}
