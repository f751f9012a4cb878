mod cursor;
mod dishlists;
mod recipes;
mod users;
mod weights;

use std::collections::HashSet;

use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use dishly_domain::relevance::QueryMatcher;
use dishly_storage::{models::UserRef, social};

use crate::{DishlyService, ServiceResult};

pub use dishlists::ScoredDishList;
pub use recipes::ScoredRecipe;
pub use users::ScoredUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTab {
	All,
	Users,
	Recipes,
	DishLists,
}
impl SearchTab {
	/// A missing or blank tab selects the combined tab; an unrecognized one
	/// selects nothing (the caller returns empty results rather than erroring).
	pub fn parse(raw: Option<&str>) -> Option<Self> {
		let Some(raw) = raw else { return Some(Self::All) };
		let raw = raw.trim();

		if raw.is_empty() {
			return Some(Self::All);
		}

		match raw.to_ascii_lowercase().as_str() {
			"all" => Some(Self::All),
			"users" => Some(Self::Users),
			"recipes" => Some(Self::Recipes),
			"dishlists" => Some(Self::DishLists),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Users => "users",
			Self::Recipes => "recipes",
			Self::DishLists => "dishlists",
		}
	}

	pub(crate) fn is_all(self) -> bool {
		matches!(self, Self::All)
	}
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
	pub requester_id: Uuid,
	pub query: String,
	pub tab: Option<String>,
	pub cursor: Option<String>,
	pub limit: Option<String>,
}

/// Display-name fields of a user attached to a result for client rendering.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
	pub user_id: Uuid,
	pub username: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
}
impl From<UserRef> for PersonRef {
	fn from(user: UserRef) -> Self {
		Self {
			user_id: user.user_id,
			username: user.username,
			first_name: user.first_name,
			last_name: user.last_name,
		}
	}
}

/// The requester's social graph, loaded once per search request and
/// discarded with it.
#[derive(Debug, Clone)]
pub struct SocialContext {
	pub following: HashSet<Uuid>,
	pub followers: HashSet<Uuid>,
	pub followed_dishlists: HashSet<Uuid>,
	pub saved_recipes: HashSet<Uuid>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub users: Vec<ScoredUser>,
	pub recipes: Vec<ScoredRecipe>,
	pub dish_lists: Vec<ScoredDishList>,
	pub next_cursor: Option<String>,
}
impl SearchResponse {
	fn empty() -> Self {
		Self { users: Vec::new(), recipes: Vec::new(), dish_lists: Vec::new(), next_cursor: None }
	}
}

impl DishlyService {
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let query = req.query.trim();

		// No query text means no search; the store is never consulted.
		if query.is_empty() {
			return Ok(SearchResponse::empty());
		}

		let Some(tab) = SearchTab::parse(req.tab.as_deref()) else {
			return Ok(SearchResponse::empty());
		};
		let limit = resolve_limit(req.limit.as_deref(), &self.cfg.search);
		let matcher = QueryMatcher::new(query);
		let context = self.social_context(req.requester_id).await?;
		let now = OffsetDateTime::now_utc();

		debug!(tab = tab.as_str(), limit, "Running search.");

		match tab {
			SearchTab::All => {
				let (mut users, mut recipes, mut dish_lists) = tokio::try_join!(
					self.search_users(req.requester_id, &matcher, &context, tab),
					self.search_recipes(req.requester_id, &matcher, &context, tab, now),
					self.search_dishlists(req.requester_id, &matcher, &context, tab, now),
				)?;
				let preview = self.cfg.search.all_tab_limit as usize;

				users.truncate(preview);
				recipes.truncate(preview);
				dish_lists.truncate(preview);

				// Blending happens after scoring and gating; the gate reads
				// raw scores, display order reads normalized ones.
				let normalization = &self.cfg.search.normalization;

				for user in &mut users {
					user.score *= normalization.users;
				}
				for recipe in &mut recipes {
					recipe.score *= normalization.recipes;
				}
				for dish_list in &mut dish_lists {
					dish_list.score *= normalization.dishlists;
				}

				Ok(SearchResponse { users, recipes, dish_lists, next_cursor: None })
			},
			SearchTab::Users => {
				let ranked =
					self.search_users(req.requester_id, &matcher, &context, tab).await?;
				let (users, next_cursor) =
					cursor::paginate(ranked, req.cursor.as_deref(), limit, |user| user.user_id);

				Ok(SearchResponse { users, next_cursor, ..SearchResponse::empty() })
			},
			SearchTab::Recipes => {
				let ranked =
					self.search_recipes(req.requester_id, &matcher, &context, tab, now).await?;
				let (recipes, next_cursor) = cursor::paginate(
					ranked,
					req.cursor.as_deref(),
					limit,
					|recipe| recipe.recipe_id,
				);

				Ok(SearchResponse { recipes, next_cursor, ..SearchResponse::empty() })
			},
			SearchTab::DishLists => {
				let ranked =
					self.search_dishlists(req.requester_id, &matcher, &context, tab, now).await?;
				let (dish_lists, next_cursor) = cursor::paginate(
					ranked,
					req.cursor.as_deref(),
					limit,
					|dish_list| dish_list.dishlist_id,
				);

				Ok(SearchResponse { dish_lists, next_cursor, ..SearchResponse::empty() })
			},
		}
	}

	async fn social_context(&self, requester_id: Uuid) -> ServiceResult<SocialContext> {
		let (following, followers, followed_dishlists, saved_recipes) = tokio::try_join!(
			social::following_ids(&self.db, requester_id),
			social::follower_ids(&self.db, requester_id),
			social::followed_dishlist_ids(&self.db, requester_id),
			social::saved_recipe_ids(&self.db, requester_id),
		)?;

		Ok(SocialContext {
			following: following.into_iter().collect(),
			followers: followers.into_iter().collect(),
			followed_dishlists: followed_dishlists.into_iter().collect(),
			saved_recipes: saved_recipes.into_iter().collect(),
		})
	}
}

fn resolve_limit(raw: Option<&str>, cfg: &dishly_config::Search) -> usize {
	let requested =
		raw.and_then(|value| value.trim().parse::<u32>().ok()).unwrap_or(cfg.default_limit);

	requested.clamp(1, cfg.max_limit) as usize
}

pub(crate) fn display_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
	let first = first_name.unwrap_or("").trim();
	let last = last_name.unwrap_or("").trim();
	let full = format!("{first} {last}");
	let trimmed = full.trim();

	if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
	use super::{SearchTab, display_name, resolve_limit};

	fn search_cfg() -> dishly_config::Search {
		dishly_config::Search::default()
	}

	#[test]
	fn tab_parsing_defaults_to_all_and_rejects_unknown_values() {
		assert_eq!(SearchTab::parse(None), Some(SearchTab::All));
		assert_eq!(SearchTab::parse(Some("")), Some(SearchTab::All));
		assert_eq!(SearchTab::parse(Some("  ")), Some(SearchTab::All));
		assert_eq!(SearchTab::parse(Some("Users")), Some(SearchTab::Users));
		assert_eq!(SearchTab::parse(Some("RECIPES")), Some(SearchTab::Recipes));
		assert_eq!(SearchTab::parse(Some("dishlists")), Some(SearchTab::DishLists));
		assert_eq!(SearchTab::parse(Some("bogus")), None);
	}

	#[test]
	fn limit_defaults_and_clamps() {
		let cfg = search_cfg();

		assert_eq!(resolve_limit(None, &cfg), 20);
		assert_eq!(resolve_limit(Some("35"), &cfg), 35);
		assert_eq!(resolve_limit(Some("500"), &cfg), 50);
		assert_eq!(resolve_limit(Some("0"), &cfg), 1);
		assert_eq!(resolve_limit(Some("not-a-number"), &cfg), 20);
		assert_eq!(resolve_limit(Some(" 10 "), &cfg), 10);
	}

	#[test]
	fn display_name_joins_and_trims() {
		assert_eq!(display_name(Some("Anna"), Some("Miller")), Some("Anna Miller".to_string()));
		assert_eq!(display_name(Some("Anna"), None), Some("Anna".to_string()));
		assert_eq!(display_name(None, Some(" Miller ")), Some("Miller".to_string()));
		assert_eq!(display_name(None, None), None);
		assert_eq!(display_name(Some("  "), Some("")), None);
	}
}
