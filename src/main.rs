use std::error::Error;

use megacommerce_wishlists::server::{Server, ServerArgs};
use megacommerce_wishlists::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
  init_tracing("wishlists")?;

  let server = Server::new(ServerArgs::default()).await?;
  server.run().await
}
