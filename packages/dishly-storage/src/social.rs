use uuid::Uuid;

use crate::{Result, db::Db};

pub async fn following_ids(db: &Db, user_id: Uuid) -> Result<Vec<Uuid>> {
	let ids = sqlx::query_scalar::<_, Uuid>(
		"SELECT following_id FROM follows WHERE follower_id = $1",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids)
}

pub async fn follower_ids(db: &Db, user_id: Uuid) -> Result<Vec<Uuid>> {
	let ids =
		sqlx::query_scalar::<_, Uuid>("SELECT follower_id FROM follows WHERE following_id = $1")
			.bind(user_id)
			.fetch_all(&db.pool)
			.await?;

	Ok(ids)
}

pub async fn followed_dishlist_ids(db: &Db, user_id: Uuid) -> Result<Vec<Uuid>> {
	let ids = sqlx::query_scalar::<_, Uuid>(
		"SELECT dishlist_id FROM dishlist_follows WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids)
}

/// Recipes present in any dishlist the user owns or collaborates on.
pub async fn saved_recipe_ids(db: &Db, user_id: Uuid) -> Result<Vec<Uuid>> {
	let ids = sqlx::query_scalar::<_, Uuid>(
		"\
SELECT DISTINCT dr.recipe_id
FROM dishlist_recipes dr
JOIN dishlists d ON d.dishlist_id = dr.dishlist_id
WHERE d.owner_id = $1
	OR EXISTS (
		SELECT 1
		FROM dishlist_collaborators c
		WHERE c.dishlist_id = d.dishlist_id AND c.user_id = $1)",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids)
}
