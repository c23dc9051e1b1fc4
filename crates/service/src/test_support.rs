#![cfg(test)]
use configs::DatabaseConfig;
use mongodb::Collection;
use models::BlogItem;

pub fn skip_db_tests() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("MONGODB_URI").is_err()
}

/// Fresh, uniquely named collection on the `MONGODB_URI` server so tests never share state.
pub async fn get_collection() -> Result<Collection<BlogItem>, anyhow::Error> {
    let mut cfg = DatabaseConfig {
        database: "blog_service_test".into(),
        collection: format!("blog_{}", mongodb::bson::oid::ObjectId::new().to_hex()),
        server_selection_timeout_secs: 3,
        ..DatabaseConfig::default()
    };
    cfg.normalize_from_env();
    let client = models::db::connect(&cfg).await?;
    Ok(models::db::blog_collection(&client, &cfg))
}
