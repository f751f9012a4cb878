use regex::Regex;
use time::OffsetDateTime;

const RECENCY_WINDOW_DAYS: f32 = 30.0;
const POPULARITY_LOG_SCALE: f64 = 3.0;

/// Per-field weight table for the tiered text match. Only the single best
/// tier applies to a field; tiers are never summed.
#[derive(Clone, Copy, Debug)]
pub struct MatchWeights {
	pub exact: f32,
	pub starts_with: f32,
	pub word: f32,
	pub contains: f32,
}

/// A normalized search query plus its precompiled word-boundary pattern.
/// Built once per request and reused across every candidate field.
#[derive(Debug)]
pub struct QueryMatcher {
	query: String,
	word: Option<Regex>,
}
impl QueryMatcher {
	pub fn new(query: &str) -> Self {
		let query = query.trim().to_lowercase();
		let word = if query.is_empty() {
			None
		} else {
			// The query is user input; metacharacters must be escaped before
			// it is embedded in the pattern.
			Regex::new(&format!(r"\b{}\b", regex::escape(&query))).ok()
		};

		Self { query, word }
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn is_empty(&self) -> bool {
		self.query.is_empty()
	}

	pub fn score(&self, text: Option<&str>, weights: &MatchWeights) -> f32 {
		if self.query.is_empty() {
			return 0.0;
		}

		let Some(text) = text else { return 0.0 };
		let text = text.trim().to_lowercase();

		if text.is_empty() {
			return 0.0;
		}
		if text == self.query {
			return weights.exact;
		}
		if text.starts_with(&self.query) {
			return weights.starts_with;
		}
		if self.word.as_ref().map(|pattern| pattern.is_match(&text)).unwrap_or(false) {
			return weights.word;
		}
		if text.contains(&self.query) {
			return weights.contains;
		}

		0.0
	}

	/// Best single score across a set of texts for one weight table.
	pub fn best_score<'a, I>(&self, texts: I, weights: &MatchWeights) -> f32
	where
		I: IntoIterator<Item = &'a str>,
	{
		texts
			.into_iter()
			.map(|text| self.score(Some(text), weights))
			.fold(0.0_f32, f32::max)
	}
}

/// Logarithmic follower-count boost, capped at `max_boost`.
pub fn popularity_boost(count: i64, max_boost: f32) -> f32 {
	if count <= 0 {
		return 0.0;
	}

	let raw = ((count as f64 + 1.0).log10() * POPULARITY_LOG_SCALE) as f32;

	raw.min(max_boost)
}

/// Linear decay from `max_boost` at zero days elapsed to zero at thirty
/// days. A tie-breaker among near-equal scores, never a primary signal.
pub fn recency_boost(updated_at: OffsetDateTime, now: OffsetDateTime, max_boost: f32) -> f32 {
	let days = ((now - updated_at).as_seconds_f32() / 86_400.0).max(0.0);

	if days >= RECENCY_WINDOW_DAYS {
		return 0.0;
	}

	max_boost * (1.0 - days / RECENCY_WINDOW_DAYS)
}
