use std::collections::HashMap;

use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use dishly_domain::ingredients;

use crate::{
	CANDIDATE_CAP, Result,
	db::Db,
	like_pattern,
	models::{DishListCandidate, DishListSummary, RecipeSample, UserRef},
};

/// How many contained recipes are sampled into each dishlist candidate.
const SAMPLE_RECIPES_PER_LIST: i64 = 10;

const ACCESS_PREDICATE: &str = "\
(
	d.visibility = 'PUBLIC'
	OR d.owner_id = $1
	OR EXISTS (
		SELECT 1
		FROM dishlist_collaborators c
		WHERE c.dishlist_id = d.dishlist_id AND c.user_id = $1)
	OR EXISTS (
		SELECT 1
		FROM dishlist_follows f
		WHERE f.dishlist_id = d.dishlist_id AND f.user_id = $1))";

/// Access filter for the dishlist listing. Each variant maps to one
/// predicate; the match below is exhaustive so a new variant cannot ship
/// without a predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DishListFilter {
	All,
	Mine,
	Collaborations,
	Following,
}
impl DishListFilter {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"all" => Some(Self::All),
			"mine" => Some(Self::Mine),
			"collaborations" => Some(Self::Collaborations),
			"following" => Some(Self::Following),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Mine => "mine",
			Self::Collaborations => "collaborations",
			Self::Following => "following",
		}
	}

	fn predicate(self) -> &'static str {
		match self {
			Self::All => "\
(
	d.owner_id = $1
	OR EXISTS (
		SELECT 1
		FROM dishlist_collaborators c
		WHERE c.dishlist_id = d.dishlist_id AND c.user_id = $1)
	OR EXISTS (
		SELECT 1
		FROM dishlist_follows f
		WHERE f.dishlist_id = d.dishlist_id AND f.user_id = $1))",
			Self::Mine => "d.owner_id = $1",
			Self::Collaborations => "\
EXISTS (
	SELECT 1
	FROM dishlist_collaborators c
	WHERE c.dishlist_id = d.dishlist_id AND c.user_id = $1)",
			Self::Following => "\
EXISTS (
	SELECT 1
	FROM dishlist_follows f
	WHERE f.dishlist_id = d.dishlist_id AND f.user_id = $1)",
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
struct DishListRow {
	dishlist_id: Uuid,
	title: String,
	description: Option<String>,
	visibility: String,
	updated_at: OffsetDateTime,
	owner_id: Uuid,
	owner_username: Option<String>,
	owner_first_name: Option<String>,
	owner_last_name: Option<String>,
	follower_count: i64,
	recipe_count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CollaboratorRow {
	dishlist_id: Uuid,
	user_id: Uuid,
	username: Option<String>,
	first_name: Option<String>,
	last_name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct SampleRow {
	dishlist_id: Uuid,
	recipe_id: Uuid,
	title: String,
	ingredients: Value,
}

/// Fetches the dishlist-candidate superset for a query, with collaborators
/// and up to ten sampled contained recipes attached. Only PUBLIC lists and
/// lists the requester owns, collaborates on, or follows are eligible.
pub async fn search_candidates(
	db: &Db,
	query: &str,
	requester_id: Uuid,
) -> Result<Vec<DishListCandidate>> {
	let pattern = like_pattern(query);
	let sql = format!(
		"\
SELECT
	d.dishlist_id,
	d.title,
	d.description,
	d.visibility,
	d.updated_at,
	o.user_id AS owner_id,
	o.username AS owner_username,
	o.first_name AS owner_first_name,
	o.last_name AS owner_last_name,
	(SELECT count(*) FROM dishlist_follows f WHERE f.dishlist_id = d.dishlist_id) AS follower_count,
	(SELECT count(*) FROM dishlist_recipes dr WHERE dr.dishlist_id = d.dishlist_id) AS recipe_count
FROM dishlists d
JOIN users o ON o.user_id = d.owner_id
WHERE {ACCESS_PREDICATE}
	AND (
		d.title ILIKE $2
		OR d.description ILIKE $2
		OR o.username ILIKE $2
		OR o.first_name ILIKE $2
		OR o.last_name ILIKE $2
		OR EXISTS (
			SELECT 1
			FROM dishlist_recipes dr
			JOIN recipes r ON r.recipe_id = dr.recipe_id
			WHERE dr.dishlist_id = d.dishlist_id
				AND (r.title ILIKE $2 OR r.ingredients::text ILIKE $2)))
ORDER BY d.dishlist_id
LIMIT $3",
	);
	let rows = sqlx::query_as::<_, DishListRow>(&sql)
		.bind(requester_id)
		.bind(pattern.as_str())
		.bind(CANDIDATE_CAP)
		.fetch_all(&db.pool)
		.await?;

	if rows.is_empty() {
		return Ok(Vec::new());
	}

	let ids: Vec<Uuid> = rows.iter().map(|row| row.dishlist_id).collect();
	let mut collaborators = fetch_collaborators(db, &ids).await?;
	let mut samples = fetch_sample_recipes(db, &ids).await?;
	let candidates = rows
		.into_iter()
		.map(|row| DishListCandidate {
			collaborators: collaborators.remove(&row.dishlist_id).unwrap_or_default(),
			sample_recipes: samples.remove(&row.dishlist_id).unwrap_or_default(),
			dishlist_id: row.dishlist_id,
			title: row.title,
			description: row.description,
			visibility: row.visibility,
			owner: UserRef {
				user_id: row.owner_id,
				username: row.owner_username,
				first_name: row.owner_first_name,
				last_name: row.owner_last_name,
			},
			follower_count: row.follower_count,
			recipe_count: row.recipe_count,
			updated_at: row.updated_at,
		})
		.collect();

	Ok(candidates)
}

/// Lists the dishlists a user sees on their home surface, pinned lists
/// first.
pub async fn list_for_user(
	db: &Db,
	user_id: Uuid,
	filter: DishListFilter,
) -> Result<Vec<DishListSummary>> {
	let predicate = filter.predicate();
	let sql = format!(
		"\
SELECT
	d.dishlist_id,
	d.title,
	d.description,
	d.visibility,
	d.updated_at,
	o.user_id AS owner_id,
	o.username AS owner_username,
	o.first_name AS owner_first_name,
	o.last_name AS owner_last_name,
	(SELECT count(*) FROM dishlist_follows f WHERE f.dishlist_id = d.dishlist_id) AS follower_count,
	(SELECT count(*) FROM dishlist_recipes dr WHERE dr.dishlist_id = d.dishlist_id) AS recipe_count,
	EXISTS (
		SELECT 1
		FROM dishlist_pins p
		WHERE p.dishlist_id = d.dishlist_id AND p.user_id = $1) AS pinned
FROM dishlists d
JOIN users o ON o.user_id = d.owner_id
WHERE {predicate}
ORDER BY pinned DESC, d.updated_at DESC",
	);
	let rows = sqlx::query_as::<_, DishListSummary>(&sql)
		.bind(user_id)
		.fetch_all(&db.pool)
		.await?;

	Ok(rows)
}

async fn fetch_collaborators(db: &Db, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<UserRef>>> {
	let rows = sqlx::query_as::<_, CollaboratorRow>(
		"\
SELECT
	c.dishlist_id,
	u.user_id,
	u.username,
	u.first_name,
	u.last_name
FROM dishlist_collaborators c
JOIN users u ON u.user_id = c.user_id
WHERE c.dishlist_id = ANY($1)
ORDER BY c.added_at",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;
	let mut out: HashMap<Uuid, Vec<UserRef>> = HashMap::new();

	for row in rows {
		out.entry(row.dishlist_id).or_default().push(UserRef {
			user_id: row.user_id,
			username: row.username,
			first_name: row.first_name,
			last_name: row.last_name,
		});
	}

	Ok(out)
}

async fn fetch_sample_recipes(db: &Db, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<RecipeSample>>> {
	let rows = sqlx::query_as::<_, SampleRow>(
		"\
SELECT dishlist_id, recipe_id, title, ingredients
FROM (
	SELECT
		dr.dishlist_id,
		r.recipe_id,
		r.title,
		r.ingredients,
		row_number() OVER (PARTITION BY dr.dishlist_id ORDER BY dr.added_at) AS sample_rank
	FROM dishlist_recipes dr
	JOIN recipes r ON r.recipe_id = dr.recipe_id
	WHERE dr.dishlist_id = ANY($1)) sampled
WHERE sample_rank <= $2
ORDER BY dishlist_id, sample_rank",
	)
	.bind(ids)
	.bind(SAMPLE_RECIPES_PER_LIST)
	.fetch_all(&db.pool)
	.await?;
	let mut out: HashMap<Uuid, Vec<RecipeSample>> = HashMap::new();

	for row in rows {
		out.entry(row.dishlist_id).or_default().push(RecipeSample {
			recipe_id: row.recipe_id,
			title: row.title,
			ingredients: ingredients::parse_entries(&row.ingredients),
		});
	}

	Ok(out)
}
