use time::OffsetDateTime;
use uuid::Uuid;

use dishly_domain::ingredients::IngredientEntry;

pub const VISIBILITY_PUBLIC: &str = "PUBLIC";
pub const VISIBILITY_PRIVATE: &str = "PRIVATE";

/// Display-name fields of a user referenced by a candidate (recipe creator,
/// dishlist owner, collaborator).
#[derive(Clone, Debug)]
pub struct UserRef {
	pub user_id: Uuid,
	pub username: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserCandidate {
	pub user_id: Uuid,
	pub username: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub avatar_url: Option<String>,
}

#[derive(Debug)]
pub struct RecipeCandidate {
	pub recipe_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub image_url: Option<String>,
	pub prep_time: Option<i32>,
	pub cook_time: Option<i32>,
	pub servings: Option<i32>,
	pub tags: Vec<String>,
	pub ingredients: Vec<IngredientEntry>,
	pub creator: UserRef,
	pub updated_at: OffsetDateTime,
}

/// A contained recipe sampled into a dishlist candidate, capped at ten per
/// list by the fetch query.
#[derive(Debug)]
pub struct RecipeSample {
	pub recipe_id: Uuid,
	pub title: String,
	pub ingredients: Vec<IngredientEntry>,
}

#[derive(Debug)]
pub struct DishListCandidate {
	pub dishlist_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub visibility: String,
	pub owner: UserRef,
	pub collaborators: Vec<UserRef>,
	pub sample_recipes: Vec<RecipeSample>,
	pub follower_count: i64,
	pub recipe_count: i64,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct DishListSummary {
	pub dishlist_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub visibility: String,
	pub owner_id: Uuid,
	pub owner_username: Option<String>,
	pub owner_first_name: Option<String>,
	pub owner_last_name: Option<String>,
	pub follower_count: i64,
	pub recipe_count: i64,
	pub pinned: bool,
	pub updated_at: OffsetDateTime,
}
