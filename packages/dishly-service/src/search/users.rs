use std::cmp::Ordering;

use uuid::Uuid;

use dishly_domain::relevance::QueryMatcher;
use dishly_storage::{models::UserCandidate, users};

use crate::{DishlyService, ServiceResult};

use super::{SearchTab, SocialContext, display_name, weights};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredUser {
	pub user_id: Uuid,
	pub username: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub avatar_url: Option<String>,
	pub score: f32,
	pub is_following: bool,
	pub is_mutual: bool,
}

impl DishlyService {
	pub(crate) async fn search_users(
		&self,
		requester_id: Uuid,
		matcher: &QueryMatcher,
		context: &SocialContext,
		tab: SearchTab,
	) -> ServiceResult<Vec<ScoredUser>> {
		let candidates = users::search_candidates(&self.db, matcher.query(), requester_id).await?;
		let min_score = if tab.is_all() {
			self.cfg.search.min_score.users_all
		} else {
			self.cfg.search.min_score.users_tab
		};

		Ok(rank_users(candidates, matcher, context, tab, min_score))
	}
}

pub(crate) fn rank_users(
	candidates: Vec<UserCandidate>,
	matcher: &QueryMatcher,
	context: &SocialContext,
	tab: SearchTab,
	min_score: f32,
) -> Vec<ScoredUser> {
	let mut ranked: Vec<ScoredUser> = candidates
		.into_iter()
		.map(|candidate| score_user(candidate, matcher, context, tab))
		.filter(|scored| scored.score >= min_score)
		.collect();

	ranked.sort_by(|a, b| {
		let by_follow = if tab == SearchTab::Users {
			b.is_following.cmp(&a.is_following)
		} else {
			Ordering::Equal
		};

		b.score.total_cmp(&a.score).then(by_follow).then_with(|| {
			a.username.as_deref().unwrap_or("").cmp(b.username.as_deref().unwrap_or(""))
		})
	});

	ranked
}

fn score_user(
	candidate: UserCandidate,
	matcher: &QueryMatcher,
	context: &SocialContext,
	tab: SearchTab,
) -> ScoredUser {
	let name = display_name(candidate.first_name.as_deref(), candidate.last_name.as_deref());
	// Name and username are independent fields; their tiers add up.
	let mut score = matcher.score(name.as_deref(), &weights::USER_NAME)
		+ matcher.score(candidate.username.as_deref(), &weights::USER_USERNAME);
	let is_following = context.following.contains(&candidate.user_id);
	let is_mutual = is_following && context.followers.contains(&candidate.user_id);

	if tab.is_all() {
		if score >= weights::SOCIAL_GATE {
			if is_mutual {
				score += weights::USER_MUTUAL_ALL;
			} else if is_following {
				score += weights::USER_FOLLOW_ALL;
			}
		}
	} else if is_mutual {
		score += weights::USER_MUTUAL_TAB;
	} else if is_following {
		score += weights::USER_FOLLOW_TAB;
	}

	ScoredUser {
		user_id: candidate.user_id,
		username: candidate.username,
		first_name: candidate.first_name,
		last_name: candidate.last_name,
		avatar_url: candidate.avatar_url,
		score,
		is_following,
		is_mutual,
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use uuid::Uuid;

	use dishly_domain::relevance::QueryMatcher;
	use dishly_storage::models::UserCandidate;

	use super::rank_users;
	use crate::search::{SearchTab, SocialContext};

	fn candidate(id: u128, username: &str, first: Option<&str>, last: Option<&str>) -> UserCandidate {
		UserCandidate {
			user_id: Uuid::from_u128(id),
			username: if username.is_empty() { None } else { Some(username.to_string()) },
			first_name: first.map(str::to_string),
			last_name: last.map(str::to_string),
			avatar_url: None,
		}
	}

	fn context() -> SocialContext {
		SocialContext {
			following: HashSet::new(),
			followers: HashSet::new(),
			followed_dishlists: HashSet::new(),
			saved_recipes: HashSet::new(),
		}
	}

	#[test]
	fn exact_username_with_mutual_follow_scores_140_on_the_users_tab() {
		let mut context = context();

		context.following.insert(Uuid::from_u128(1));
		context.followers.insert(Uuid::from_u128(1));

		let matcher = QueryMatcher::new("chefanna");
		let ranked = rank_users(
			vec![candidate(1, "chefanna", Some("Anna"), Some("Miller"))],
			&matcher,
			&context,
			SearchTab::Users,
			40.0,
		);

		assert_eq!(ranked.len(), 1);
		assert_eq!(ranked[0].score, 140.0);
		assert!(ranked[0].is_following);
		assert!(ranked[0].is_mutual);
	}

	#[test]
	fn name_and_username_matches_are_additive() {
		let matcher = QueryMatcher::new("anna");
		// Name "Anna Miller" starts with the query (90), username contains it (50).
		let ranked = rank_users(
			vec![candidate(1, "the_anna_kitchen", Some("Anna"), Some("Miller"))],
			&matcher,
			&context(),
			SearchTab::Users,
			40.0,
		);

		assert_eq!(ranked[0].score, 90.0 + 50.0);
	}

	#[test]
	fn combined_tab_gates_the_social_bonus_on_the_text_score() {
		let mut context = context();

		context.following.insert(Uuid::from_u128(1));
		context.followers.insert(Uuid::from_u128(1));

		let matcher = QueryMatcher::new("maria");
		// A contains-tier username match (50) sits on the gate, so the
		// mutual bonus applies.
		let on_gate = rank_users(
			vec![candidate(1, "annamaria", None, None)],
			&matcher,
			&context,
			SearchTab::All,
			30.0,
		);

		assert_eq!(on_gate[0].score, 50.0 + 20.0);

		// A mutually-followed user with no text match at all scores zero:
		// the bonus never applies below the gate and the threshold drops
		// the candidate.
		let matcher = QueryMatcher::new("sourdough");
		let no_match = rank_users(
			vec![candidate(1, "annamaria", None, None)],
			&matcher,
			&context,
			SearchTab::All,
			30.0,
		);

		assert!(no_match.is_empty());
	}

	#[test]
	fn dedicated_tab_applies_the_social_bonus_unconditionally() {
		let mut context = context();

		context.following.insert(Uuid::from_u128(1));

		let matcher = QueryMatcher::new("ria");
		let ranked = rank_users(
			vec![candidate(1, "annamaria", None, None)],
			&matcher,
			&context,
			SearchTab::Users,
			40.0,
		);

		// Contains-tier username match (50) plus the one-way follow bonus (30).
		assert_eq!(ranked[0].score, 80.0);
	}

	#[test]
	fn candidates_below_the_minimum_score_are_dropped() {
		let matcher = QueryMatcher::new("ria");
		let ranked = rank_users(
			vec![candidate(1, "annamaria", None, None)],
			&matcher,
			&context(),
			SearchTab::All,
			60.0,
		);

		assert!(ranked.is_empty());
	}

	#[test]
	fn followed_users_rank_first_among_score_ties_on_the_users_tab() {
		let mut context = context();

		context.following.insert(Uuid::from_u128(2));

		let matcher = QueryMatcher::new("cook");
		// An exact unfollowed match (100) ties with a followed prefix match
		// (70 + 30); the followed user wins the tie even though "cook" sorts
		// before "cooking_daily".
		let ranked = rank_users(
			vec![candidate(1, "cook", None, None), candidate(2, "cooking_daily", None, None)],
			&matcher,
			&context,
			SearchTab::Users,
			40.0,
		);

		assert_eq!(ranked[0].score, ranked[1].score);
		assert_eq!(ranked[0].user_id, Uuid::from_u128(2));
		assert!(ranked[0].is_following);
	}

	#[test]
	fn score_ties_break_alphabetically_with_missing_usernames_first() {
		let matcher = QueryMatcher::new("lee");
		let ranked = rank_users(
			vec![
				candidate(1, "zlee", None, None),
				candidate(2, "alee", None, None),
				candidate(3, "", Some("Lee"), None),
				candidate(4, "rob", Some("Lee"), None),
			],
			&matcher,
			&context(),
			SearchTab::All,
			30.0,
		);

		// Two exact name matches tie at 100; the missing username sorts
		// before "rob". The two contains-tier username matches follow in
		// alphabetical order.
		assert_eq!(ranked[0].user_id, Uuid::from_u128(3));
		assert_eq!(ranked[1].user_id, Uuid::from_u128(4));
		assert_eq!(ranked[2].user_id, Uuid::from_u128(2));
		assert_eq!(ranked[3].user_id, Uuid::from_u128(1));
	}
}
