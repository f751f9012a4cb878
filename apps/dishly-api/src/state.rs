use std::sync::Arc;

use dishly_service::DishlyService;
use dishly_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DishlyService>,
}
impl AppState {
	pub async fn new(config: dishly_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = DishlyService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
