use time::OffsetDateTime;
use uuid::Uuid;

use dishly_domain::relevance::{QueryMatcher, popularity_boost, recency_boost};
use dishly_storage::{
	dishlists,
	models::{DishListCandidate, RecipeSample, UserRef},
};

use crate::{DishlyService, ServiceResult};

use super::{PersonRef, SearchTab, SocialContext, display_name, weights};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDishList {
	pub dishlist_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub visibility: String,
	pub owner: PersonRef,
	pub collaborators: Vec<PersonRef>,
	pub follower_count: i64,
	pub recipe_count: i64,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	pub score: f32,
	pub is_following: bool,
	pub is_collaborator: bool,
}

impl DishlyService {
	pub(crate) async fn search_dishlists(
		&self,
		requester_id: Uuid,
		matcher: &QueryMatcher,
		context: &SocialContext,
		tab: SearchTab,
		now: OffsetDateTime,
	) -> ServiceResult<Vec<ScoredDishList>> {
		let candidates =
			dishlists::search_candidates(&self.db, matcher.query(), requester_id).await?;
		let min_score = if tab.is_all() {
			self.cfg.search.min_score.dishlists_all
		} else {
			self.cfg.search.min_score.dishlists_tab
		};

		Ok(rank_dishlists(candidates, requester_id, matcher, context, tab, min_score, now))
	}
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn rank_dishlists(
	candidates: Vec<DishListCandidate>,
	requester_id: Uuid,
	matcher: &QueryMatcher,
	context: &SocialContext,
	tab: SearchTab,
	min_score: f32,
	now: OffsetDateTime,
) -> Vec<ScoredDishList> {
	let mut ranked: Vec<ScoredDishList> = candidates
		.into_iter()
		.map(|candidate| score_dishlist(candidate, requester_id, matcher, context, tab, now))
		.filter(|scored| scored.score >= min_score)
		.collect();

	ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.dishlist_id.cmp(&b.dishlist_id)));

	ranked
}

fn score_dishlist(
	candidate: DishListCandidate,
	requester_id: Uuid,
	matcher: &QueryMatcher,
	context: &SocialContext,
	tab: SearchTab,
	now: OffsetDateTime,
) -> ScoredDishList {
	let mut score = matcher.score(Some(&candidate.title), &weights::LIST_TITLE);
	let owner_name =
		display_name(candidate.owner.first_name.as_deref(), candidate.owner.last_name.as_deref());

	score += matcher.score(owner_name.as_deref(), &weights::LIST_OWNER_NAME);
	score += matcher.score(candidate.owner.username.as_deref(), &weights::LIST_OWNER_USERNAME);
	score += best_collaborator_score(&candidate.collaborators, matcher);
	score += matcher.best_score(
		candidate.sample_recipes.iter().map(|recipe| recipe.title.as_str()),
		&weights::LIST_RECIPE_TITLE,
	);
	score += sampled_ingredient_score(&candidate.sample_recipes, matcher);
	score += matcher.score(candidate.description.as_deref(), &weights::LIST_DESCRIPTION);

	let is_following = context.followed_dishlists.contains(&candidate.dishlist_id);
	let is_owner_followed = context.following.contains(&candidate.owner.user_id);
	let is_collaborator =
		candidate.collaborators.iter().any(|collaborator| collaborator.user_id == requester_id);

	if tab.is_all() {
		if score >= weights::SOCIAL_GATE {
			let mut bonus = 0.0;

			if is_following {
				bonus += weights::LIST_FOLLOW_ALL;
			}
			if is_owner_followed {
				bonus += weights::LIST_OWNER_FOLLOWED_ALL;
			}

			score += bonus.min(weights::LIST_SOCIAL_CAP_ALL);
		}
		if score >= weights::SOCIAL_GATE {
			score += popularity_boost(candidate.follower_count, weights::LIST_POPULARITY_MAX);
		}
	} else {
		if is_following {
			score += weights::LIST_FOLLOW_TAB;
		}

		score += popularity_boost(candidate.follower_count, weights::LIST_POPULARITY_MAX);
	}

	score += recency_boost(candidate.updated_at, now, weights::RECENCY_MAX);

	ScoredDishList {
		dishlist_id: candidate.dishlist_id,
		title: candidate.title,
		description: candidate.description,
		visibility: candidate.visibility,
		owner: PersonRef::from(candidate.owner),
		collaborators: candidate.collaborators.into_iter().map(PersonRef::from).collect(),
		follower_count: candidate.follower_count,
		recipe_count: candidate.recipe_count,
		updated_at: candidate.updated_at,
		score,
		is_following,
		is_collaborator,
	}
}

fn best_collaborator_score(collaborators: &[UserRef], matcher: &QueryMatcher) -> f32 {
	collaborators
		.iter()
		.filter_map(|collaborator| {
			display_name(collaborator.first_name.as_deref(), collaborator.last_name.as_deref())
		})
		.map(|name| matcher.score(Some(&name), &weights::LIST_COLLABORATOR_NAME))
		.fold(0.0_f32, f32::max)
}

/// Scans sampled recipes in order and keeps the best ingredient match of the
/// FIRST recipe that yields any match; later recipes are not consulted. The
/// early exit is part of the ranking contract.
fn sampled_ingredient_score(samples: &[RecipeSample], matcher: &QueryMatcher) -> f32 {
	for recipe in samples {
		let best = matcher
			.best_score(recipe.ingredients.iter().filter_map(|entry| entry.text()), &weights::LIST_INGREDIENT);

		if best > 0.0 {
			return best;
		}
	}

	0.0
}
