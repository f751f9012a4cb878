use uuid::Uuid;

use crate::{CANDIDATE_CAP, Result, db::Db, like_pattern, models::UserCandidate};

/// Fetches the user-candidate superset for a query. The requester is always
/// excluded; scoring decides the final order.
pub async fn search_candidates(
	db: &Db,
	query: &str,
	exclude_user: Uuid,
) -> Result<Vec<UserCandidate>> {
	let pattern = like_pattern(query);
	let rows = sqlx::query_as::<_, UserCandidate>(
		"\
SELECT user_id, username, first_name, last_name, avatar_url
FROM users
WHERE user_id <> $1
	AND (username ILIKE $2 OR first_name ILIKE $2 OR last_name ILIKE $2)
ORDER BY user_id
LIMIT $3",
	)
	.bind(exclude_user)
	.bind(pattern.as_str())
	.bind(CANDIDATE_CAP)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
