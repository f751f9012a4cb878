pub mod list;
pub mod search;
pub mod time_serde;

mod error;

pub use error::{ServiceError, ServiceResult};
pub use list::{DishListItem, ListDishListsRequest, ListDishListsResponse};
pub use search::{
	PersonRef, ScoredDishList, ScoredRecipe, ScoredUser, SearchRequest, SearchResponse, SearchTab,
	SocialContext,
};

use dishly_config::Config;
use dishly_storage::db::Db;

pub struct DishlyService {
	pub cfg: Config,
	pub db: Db,
}
impl DishlyService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}
