use time::OffsetDateTime;
use uuid::Uuid;

use dishly_domain::{
	ingredients::IngredientEntry,
	relevance::{QueryMatcher, recency_boost},
};
use dishly_storage::{models::RecipeCandidate, recipes};

use crate::{DishlyService, ServiceResult};

use super::{PersonRef, SearchTab, SocialContext, display_name, weights};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecipe {
	pub recipe_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub image_url: Option<String>,
	pub prep_time: Option<i32>,
	pub cook_time: Option<i32>,
	pub servings: Option<i32>,
	pub tags: Vec<String>,
	pub ingredients: Vec<IngredientEntry>,
	pub creator: PersonRef,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	pub score: f32,
	pub is_saved: bool,
	pub is_creator_followed: bool,
}

impl DishlyService {
	pub(crate) async fn search_recipes(
		&self,
		requester_id: Uuid,
		matcher: &QueryMatcher,
		context: &SocialContext,
		tab: SearchTab,
		now: OffsetDateTime,
	) -> ServiceResult<Vec<ScoredRecipe>> {
		let candidates =
			recipes::search_candidates(&self.db, matcher.query(), requester_id).await?;

		Ok(rank_recipes(candidates, matcher, context, tab, self.cfg.search.min_score.recipes, now))
	}
}

pub(crate) fn rank_recipes(
	candidates: Vec<RecipeCandidate>,
	matcher: &QueryMatcher,
	context: &SocialContext,
	tab: SearchTab,
	min_score: f32,
	now: OffsetDateTime,
) -> Vec<ScoredRecipe> {
	let mut ranked: Vec<ScoredRecipe> = candidates
		.into_iter()
		.map(|candidate| score_recipe(candidate, matcher, context, tab, now))
		.filter(|scored| scored.score >= min_score)
		.collect();

	ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.recipe_id.cmp(&b.recipe_id)));

	ranked
}

fn score_recipe(
	candidate: RecipeCandidate,
	matcher: &QueryMatcher,
	context: &SocialContext,
	tab: SearchTab,
	now: OffsetDateTime,
) -> ScoredRecipe {
	let mut score = matcher.score(Some(&candidate.title), &weights::RECIPE_TITLE);

	// Only the single best tag counts.
	score += matcher.best_score(candidate.tags.iter().map(String::as_str), &weights::RECIPE_TAG);
	score += best_ingredient_score(&candidate.ingredients, matcher);
	score += matcher.score(candidate.description.as_deref(), &weights::RECIPE_DESCRIPTION);

	let creator_name =
		display_name(candidate.creator.first_name.as_deref(), candidate.creator.last_name.as_deref());

	score += matcher.score(creator_name.as_deref(), &weights::RECIPE_CREATOR_NAME);

	let is_saved = context.saved_recipes.contains(&candidate.recipe_id);
	let is_creator_followed = context.following.contains(&candidate.creator.user_id);

	if tab.is_all() {
		if score >= weights::SOCIAL_GATE {
			let mut bonus = 0.0;

			if is_saved {
				bonus += weights::RECIPE_SAVED_ALL;
			}
			if is_creator_followed {
				bonus += weights::RECIPE_CREATOR_FOLLOWED_ALL;
			}

			score += bonus.min(weights::RECIPE_SOCIAL_CAP_ALL);
		}
	} else {
		if is_saved {
			score += weights::RECIPE_SAVED_TAB;
		}
		if is_creator_followed {
			score += weights::RECIPE_CREATOR_FOLLOWED_TAB;
		}
	}

	score += recency_boost(candidate.updated_at, now, weights::RECENCY_MAX);

	ScoredRecipe {
		recipe_id: candidate.recipe_id,
		title: candidate.title,
		description: candidate.description,
		image_url: candidate.image_url,
		prep_time: candidate.prep_time,
		cook_time: candidate.cook_time,
		servings: candidate.servings,
		tags: candidate.tags,
		ingredients: candidate.ingredients,
		creator: PersonRef::from(candidate.creator),
		updated_at: candidate.updated_at,
		score,
		is_saved,
		is_creator_followed,
	}
}

/// Best single ingredient match. The first few entries carry a heavier
/// weight table than the rest; entries without text contribute nothing.
fn best_ingredient_score(ingredients: &[IngredientEntry], matcher: &QueryMatcher) -> f32 {
	let mut best = 0.0_f32;

	for (index, entry) in ingredients.iter().enumerate() {
		let Some(text) = entry.text() else { continue };
		let table = if index < weights::LEAD_INGREDIENT_COUNT {
			&weights::RECIPE_LEAD_INGREDIENT
		} else {
			&weights::RECIPE_TAIL_INGREDIENT
		};

		best = best.max(matcher.score(Some(text), table));
	}

	best
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use time::{Duration, OffsetDateTime};
	use uuid::Uuid;

	use dishly_domain::{ingredients::IngredientEntry, relevance::QueryMatcher};
	use dishly_storage::models::{RecipeCandidate, UserRef};

	use super::rank_recipes;
	use crate::search::{SearchTab, SocialContext};

	fn now() -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp")
	}

	fn candidate(id: u128, title: &str) -> RecipeCandidate {
		RecipeCandidate {
			recipe_id: Uuid::from_u128(id),
			title: title.to_string(),
			description: None,
			image_url: None,
			prep_time: None,
			cook_time: None,
			servings: None,
			tags: Vec::new(),
			ingredients: Vec::new(),
			creator: UserRef {
				user_id: Uuid::from_u128(9_000 + id),
				username: None,
				first_name: None,
				last_name: None,
			},
			// Old enough that the recency boost is zero.
			updated_at: now() - Duration::days(60),
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
	fn title_matches_outrank_description_only_matches() {
		let mut title_hit = candidate(1, "Chicken Curry");
		let mut description_hit = candidate(2, "Weeknight Stir Fry");

		title_hit.description = Some("A quick family dinner.".to_string());
		description_hit.description = Some("Great for leftover chicken today.".to_string());

		let matcher = QueryMatcher::new("chicken");
		let ranked = rank_recipes(
			vec![description_hit, title_hit],
			&matcher,
			&context(),
			SearchTab::Recipes,
			0.0,
			now(),
		);

		assert_eq!(ranked.len(), 2);
		assert_eq!(ranked[0].title, "Chicken Curry");
		assert_eq!(ranked[0].score, 90.0);
		assert_eq!(ranked[1].score, 18.0);
	}

	#[test]
	fn only_the_best_tag_counts() {
		let mut with_tags = candidate(1, "Garden Salad");

		with_tags.tags =
			vec!["vegan".to_string(), "vegan bowls".to_string(), "raw vegan".to_string()];

		let matcher = QueryMatcher::new("vegan");
		let ranked =
			rank_recipes(vec![with_tags], &matcher, &context(), SearchTab::Recipes, 0.0, now());

		// Exact tag (50), not 50 + 40 + 35.
		assert_eq!(ranked[0].score, 50.0);
	}

	#[test]
	fn lead_ingredients_outweigh_trailing_ones() {
		let mut lead = candidate(1, "Simple Bake");
		let mut trailing = candidate(2, "Simple Roast");

		lead.ingredients = vec![
			IngredientEntry::Plain("paprika".to_string()),
			IngredientEntry::Plain("salt".to_string()),
		];
		trailing.ingredients = vec![
			IngredientEntry::Plain("salt".to_string()),
			IngredientEntry::Plain("pepper".to_string()),
			IngredientEntry::Plain("oil".to_string()),
			IngredientEntry::Plain("paprika".to_string()),
		];

		let matcher = QueryMatcher::new("paprika");
		let ranked = rank_recipes(
			vec![trailing, lead],
			&matcher,
			&context(),
			SearchTab::Recipes,
			0.0,
			now(),
		);

		assert_eq!(ranked[0].recipe_id, Uuid::from_u128(1));
		assert_eq!(ranked[0].score, 45.0);
		assert_eq!(ranked[1].score, 25.0);
	}

	#[test]
	fn header_entries_score_like_any_other_entry() {
		let mut with_header = candidate(1, "Layer Cake");

		with_header.ingredients = vec![IngredientEntry::Structured {
			kind: "header".to_string(),
			text: "frosting".to_string(),
		}];

		let matcher = QueryMatcher::new("frosting");
		let ranked =
			rank_recipes(vec![with_header], &matcher, &context(), SearchTab::Recipes, 0.0, now());

		assert_eq!(ranked[0].score, 45.0);
	}

	#[test]
	fn combined_tab_caps_the_social_bonus_at_ten() {
		let mut saved_and_followed = candidate(1, "Chicken Curry");

		saved_and_followed.creator.user_id = Uuid::from_u128(77);

		let mut context = context();

		context.saved_recipes.insert(Uuid::from_u128(1));
		context.following.insert(Uuid::from_u128(77));

		let matcher = QueryMatcher::new("chicken");
		let ranked = rank_recipes(
			vec![saved_and_followed],
			&matcher,
			&context,
			SearchTab::All,
			30.0,
			now(),
		);

		// Prefix title match (90) plus the capped bonus, not 90 + 16.
		assert_eq!(ranked[0].score, 100.0);
		assert!(ranked[0].is_saved);
		assert!(ranked[0].is_creator_followed);
	}

	#[test]
	fn dedicated_tab_stacks_both_social_bonuses() {
		let mut saved_and_followed = candidate(1, "Chicken Curry");

		saved_and_followed.creator.user_id = Uuid::from_u128(77);

		let mut context = context();

		context.saved_recipes.insert(Uuid::from_u128(1));
		context.following.insert(Uuid::from_u128(77));

		let matcher = QueryMatcher::new("chicken");
		let ranked = rank_recipes(
			vec![saved_and_followed],
			&matcher,
			&context,
			SearchTab::Recipes,
			30.0,
			now(),
		);

		assert_eq!(ranked[0].score, 90.0 + 15.0 + 10.0);
	}

	#[test]
	fn combined_tab_gate_blocks_social_bonus_for_weak_text_matches() {
		let mut weak = candidate(1, "Family Dinner Ideas");

		weak.description = Some("Uses leftover chicken.".to_string());

		let mut context = context();

		context.saved_recipes.insert(Uuid::from_u128(1));

		let matcher = QueryMatcher::new("chicken");
		let ranked =
			rank_recipes(vec![weak], &matcher, &context, SearchTab::All, 0.0, now());

		// Description word-match only (18): below the gate, the saved bonus
		// must not apply.
		assert_eq!(ranked[0].score, 18.0);
	}

	#[test]
	fn recency_boost_acts_as_a_tie_breaker() {
		let fresh = {
			let mut recipe = candidate(1, "Miso Soup");

			recipe.updated_at = now();

			recipe
		};
		let stale = candidate(2, "Miso Ramen");

		let matcher = QueryMatcher::new("miso");
		let ranked =
			rank_recipes(vec![stale, fresh], &matcher, &context(), SearchTab::Recipes, 0.0, now());

		assert_eq!(ranked[0].recipe_id, Uuid::from_u128(1));
		assert_eq!(ranked[0].score, 95.0);
		assert_eq!(ranked[1].score, 90.0);
	}

	#[test]
	fn equal_scores_sort_by_identifier_for_stable_pagination() {
		let matcher = QueryMatcher::new("soup");
		let ranked = rank_recipes(
			vec![candidate(3, "Soup Basics"), candidate(1, "Soup Stocks"), candidate(2, "Soup Pots")],
			&matcher,
			&context(),
			SearchTab::Recipes,
			0.0,
			now(),
		);

		assert_eq!(ranked[0].recipe_id, Uuid::from_u128(1));
		assert_eq!(ranked[1].recipe_id, Uuid::from_u128(2));
		assert_eq!(ranked[2].recipe_id, Uuid::from_u128(3));
	}

	#[test]
	fn below_threshold_recipes_are_dropped() {
		let mut weak = candidate(1, "Family Dinner Ideas");

		weak.description = Some("Uses leftover chicken.".to_string());

		let matcher = QueryMatcher::new("chicken");
		let ranked =
			rank_recipes(vec![weak], &matcher, &context(), SearchTab::Recipes, 30.0, now());

		assert!(ranked.is_empty());
	}
}
