use std::sync::Arc;

use crate::{
  catalog::{decode, transport_error, wire::CatalogProduct, CatalogClient},
  models::{context::Context, errors::StoreError, products::Product},
  store::database::ProductSource,
};

#[tonic::async_trait]
impl ProductSource for CatalogClient {
  async fn get_by_id(&self, ctx: Arc<Context>, id: &str) -> Result<Option<Product>, StoreError> {
    let path = "wishlists.catalog.get_by_id";
    let url = self.endpoint(&["products", id], path)?;

    let request = async {
      let res = self.client.get(url).send().await.map_err(|e| transport_error(e, path))?;
      let product = decode::<Option<CatalogProduct>>(res, path).await?;
      Ok(product.map(Product::from))
    };

    ctx.run(request).await?
  }

  async fn list(
    &self,
    ctx: Arc<Context>,
    count: u32,
    offset: u32,
  ) -> Result<Option<Vec<Product>>, StoreError> {
    let path = "wishlists.catalog.list";
    let url = self.endpoint(&["products"], path)?;

    let request = async {
      let res = self
        .client
        .get(url)
        .query(&[("count", count), ("offset", offset)])
        .send()
        .await
        .map_err(|e| transport_error(e, path))?;
      let page = decode::<Option<Vec<CatalogProduct>>>(res, path).await?;
      Ok(page.map(|products| products.into_iter().map(Product::from).collect()))
    };

    ctx.run(request).await?
  }
}
