use uuid::Uuid;

/// Stateless cursor windowing over a fully re-scored result list. The cursor
/// is the id of an earlier result; when it is stale or unparseable the first
/// page is returned instead.
pub(crate) fn paginate<T>(
	items: Vec<T>,
	cursor: Option<&str>,
	limit: usize,
	id_of: impl Fn(&T) -> Uuid,
) -> (Vec<T>, Option<String>) {
	let start = cursor
		.and_then(|raw| Uuid::parse_str(raw.trim()).ok())
		.and_then(|id| items.iter().position(|item| id_of(item) == id))
		.map(|position| position + 1)
		.unwrap_or(0);
	let mut page: Vec<T> = items.into_iter().skip(start).collect();
	let has_more = page.len() > limit;

	page.truncate(limit);

	let next_cursor = if has_more { page.last().map(|item| id_of(item).to_string()) } else { None };

	(page, next_cursor)
}
