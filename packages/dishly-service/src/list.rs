use time::OffsetDateTime;
use uuid::Uuid;

use dishly_storage::{
	dishlists::{self, DishListFilter},
	models::DishListSummary,
};

use crate::{DishlyService, ServiceError, ServiceResult, search::PersonRef};

#[derive(Debug, Clone)]
pub struct ListDishListsRequest {
	pub requester_id: Uuid,
	pub filter: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishListItem {
	pub dishlist_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub visibility: String,
	pub owner: PersonRef,
	pub follower_count: i64,
	pub recipe_count: i64,
	pub pinned: bool,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDishListsResponse {
	pub dish_lists: Vec<DishListItem>,
}

impl DishlyService {
	pub async fn list_dishlists(
		&self,
		req: ListDishListsRequest,
	) -> ServiceResult<ListDishListsResponse> {
		let raw_filter = req.filter.as_deref().map(str::trim).filter(|value| !value.is_empty());
		let filter = match raw_filter {
			None => DishListFilter::All,
			Some(raw) =>
				DishListFilter::parse(raw).ok_or_else(|| ServiceError::InvalidRequest {
					message: "filter must be one of all, mine, collaborations, or following."
						.to_string(),
				})?,
		};
		let rows = dishlists::list_for_user(&self.db, req.requester_id, filter).await?;
		let dish_lists = rows.into_iter().map(item_from_summary).collect();

		Ok(ListDishListsResponse { dish_lists })
	}
}

fn item_from_summary(row: DishListSummary) -> DishListItem {
	DishListItem {
		dishlist_id: row.dishlist_id,
		title: row.title,
		description: row.description,
		visibility: row.visibility,
		owner: PersonRef {
			user_id: row.owner_id,
			username: row.owner_username,
			first_name: row.owner_first_name,
			last_name: row.owner_last_name,
		},
		follower_count: row.follower_count,
		recipe_count: row.recipe_count,
		pinned: row.pinned,
		updated_at: row.updated_at,
	}
}
