use std::time::Duration;

use configs::DatabaseConfig;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use tracing::info;

use crate::blog::BlogItem;

pub const APP_NAME: &str = "blog-service";

/// Build a MongoDB client from config. The driver connects lazily; call [`ping`] to fail fast.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<Client> {
    let mut options = ClientOptions::parse(&cfg.url).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.max_pool_size = Some(cfg.max_connections);
    options.min_pool_size = Some(cfg.min_connections);
    options.connect_timeout = Some(Duration::from_secs(cfg.connect_timeout_secs));
    options.server_selection_timeout = Some(Duration::from_secs(cfg.server_selection_timeout_secs));
    let client = Client::with_options(options)?;
    Ok(client)
}

/// Round-trip a `ping` command against the admin database.
pub async fn ping(client: &Client) -> anyhow::Result<()> {
    client.database("admin").run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Connect, ping, and log. Used at startup and by the DB-backed tests.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Client> {
    let client = connect_with_config(cfg).await?;
    ping(&client).await?;
    info!(database = %cfg.database, collection = %cfg.collection, "connected to mongodb");
    Ok(client)
}

pub fn blog_collection(client: &Client, cfg: &DatabaseConfig) -> Collection<BlogItem> {
    client.database(&cfg.database).collection::<BlogItem>(&cfg.collection)
}
