use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use dishly_domain::ingredients;

use crate::{
	CANDIDATE_CAP, Result,
	db::Db,
	like_pattern,
	models::{RecipeCandidate, UserRef},
};

#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
	recipe_id: Uuid,
	title: String,
	description: Option<String>,
	image_url: Option<String>,
	prep_time: Option<i32>,
	cook_time: Option<i32>,
	servings: Option<i32>,
	tags: Value,
	ingredients: Value,
	updated_at: OffsetDateTime,
	creator_id: Uuid,
	creator_username: Option<String>,
	creator_first_name: Option<String>,
	creator_last_name: Option<String>,
}

/// Fetches the recipe-candidate superset for a query. Only recipes reachable
/// through a dishlist the requester can access (public, owned, collaborated,
/// or followed) are eligible.
pub async fn search_candidates(
	db: &Db,
	query: &str,
	requester_id: Uuid,
) -> Result<Vec<RecipeCandidate>> {
	let pattern = like_pattern(query);
	let rows = sqlx::query_as::<_, RecipeRow>(
		"\
SELECT
	r.recipe_id,
	r.title,
	r.description,
	r.image_url,
	r.prep_time,
	r.cook_time,
	r.servings,
	r.tags,
	r.ingredients,
	r.updated_at,
	u.user_id AS creator_id,
	u.username AS creator_username,
	u.first_name AS creator_first_name,
	u.last_name AS creator_last_name
FROM recipes r
JOIN users u ON u.user_id = r.creator_id
WHERE EXISTS (
		SELECT 1
		FROM dishlist_recipes dr
		JOIN dishlists d ON d.dishlist_id = dr.dishlist_id
		WHERE dr.recipe_id = r.recipe_id
			AND (
				d.visibility = 'PUBLIC'
				OR d.owner_id = $1
				OR EXISTS (
					SELECT 1
					FROM dishlist_collaborators c
					WHERE c.dishlist_id = d.dishlist_id AND c.user_id = $1)
				OR EXISTS (
					SELECT 1
					FROM dishlist_follows f
					WHERE f.dishlist_id = d.dishlist_id AND f.user_id = $1)))
	AND (
		r.title ILIKE $2
		OR r.description ILIKE $2
		OR r.tags::text ILIKE $2
		OR r.ingredients::text ILIKE $2
		OR u.username ILIKE $2
		OR u.first_name ILIKE $2
		OR u.last_name ILIKE $2)
ORDER BY r.recipe_id
LIMIT $3",
	)
	.bind(requester_id)
	.bind(pattern.as_str())
	.bind(CANDIDATE_CAP)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(assemble).collect())
}

fn assemble(row: RecipeRow) -> RecipeCandidate {
	RecipeCandidate {
		recipe_id: row.recipe_id,
		title: row.title,
		description: row.description,
		image_url: row.image_url,
		prep_time: row.prep_time,
		cook_time: row.cook_time,
		servings: row.servings,
		tags: ingredients::parse_tags(&row.tags),
		ingredients: ingredients::parse_entries(&row.ingredients),
		creator: UserRef {
			user_id: row.creator_id,
			username: row.creator_username,
			first_name: row.creator_first_name,
			last_name: row.creator_last_name,
		},
		updated_at: row.updated_at,
	}
}
