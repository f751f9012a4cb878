use dishly_domain::relevance::MatchWeights;

/// On the combined tab, social bonuses and the popularity boost only apply
/// once the text score alone has reached this floor.
pub(crate) const SOCIAL_GATE: f32 = 50.0;

pub(crate) const RECENCY_MAX: f32 = 5.0;

/// Ingredients listed first are usually the dish's main components; they
/// carry the heavier weight table.
pub(crate) const LEAD_INGREDIENT_COUNT: usize = 3;

pub(crate) const USER_NAME: MatchWeights =
	MatchWeights { exact: 100.0, starts_with: 90.0, word: 80.0, contains: 60.0 };
pub(crate) const USER_USERNAME: MatchWeights =
	MatchWeights { exact: 100.0, starts_with: 70.0, word: 65.0, contains: 50.0 };
pub(crate) const USER_MUTUAL_ALL: f32 = 20.0;
pub(crate) const USER_FOLLOW_ALL: f32 = 15.0;
pub(crate) const USER_MUTUAL_TAB: f32 = 40.0;
pub(crate) const USER_FOLLOW_TAB: f32 = 30.0;

pub(crate) const RECIPE_TITLE: MatchWeights =
	MatchWeights { exact: 100.0, starts_with: 90.0, word: 80.0, contains: 60.0 };
pub(crate) const RECIPE_TAG: MatchWeights =
	MatchWeights { exact: 50.0, starts_with: 40.0, word: 35.0, contains: 25.0 };
pub(crate) const RECIPE_LEAD_INGREDIENT: MatchWeights =
	MatchWeights { exact: 45.0, starts_with: 40.0, word: 35.0, contains: 25.0 };
pub(crate) const RECIPE_TAIL_INGREDIENT: MatchWeights =
	MatchWeights { exact: 25.0, starts_with: 20.0, word: 18.0, contains: 12.0 };
pub(crate) const RECIPE_DESCRIPTION: MatchWeights =
	MatchWeights { exact: 25.0, starts_with: 20.0, word: 18.0, contains: 15.0 };
pub(crate) const RECIPE_CREATOR_NAME: MatchWeights =
	MatchWeights { exact: 20.0, starts_with: 15.0, word: 12.0, contains: 8.0 };
pub(crate) const RECIPE_SAVED_ALL: f32 = 10.0;
pub(crate) const RECIPE_CREATOR_FOLLOWED_ALL: f32 = 6.0;
pub(crate) const RECIPE_SOCIAL_CAP_ALL: f32 = 10.0;
pub(crate) const RECIPE_SAVED_TAB: f32 = 15.0;
pub(crate) const RECIPE_CREATOR_FOLLOWED_TAB: f32 = 10.0;

pub(crate) const LIST_TITLE: MatchWeights =
	MatchWeights { exact: 100.0, starts_with: 90.0, word: 80.0, contains: 60.0 };
pub(crate) const LIST_OWNER_NAME: MatchWeights =
	MatchWeights { exact: 60.0, starts_with: 50.0, word: 45.0, contains: 35.0 };
pub(crate) const LIST_OWNER_USERNAME: MatchWeights =
	MatchWeights { exact: 55.0, starts_with: 45.0, word: 40.0, contains: 30.0 };
pub(crate) const LIST_COLLABORATOR_NAME: MatchWeights =
	MatchWeights { exact: 35.0, starts_with: 30.0, word: 25.0, contains: 20.0 };
pub(crate) const LIST_RECIPE_TITLE: MatchWeights =
	MatchWeights { exact: 35.0, starts_with: 30.0, word: 25.0, contains: 18.0 };
pub(crate) const LIST_INGREDIENT: MatchWeights =
	MatchWeights { exact: 30.0, starts_with: 25.0, word: 20.0, contains: 15.0 };
pub(crate) const LIST_DESCRIPTION: MatchWeights =
	MatchWeights { exact: 25.0, starts_with: 20.0, word: 18.0, contains: 15.0 };
pub(crate) const LIST_FOLLOW_ALL: f32 = 10.0;
pub(crate) const LIST_OWNER_FOLLOWED_ALL: f32 = 8.0;
pub(crate) const LIST_SOCIAL_CAP_ALL: f32 = 10.0;
pub(crate) const LIST_FOLLOW_TAB: f32 = 20.0;
pub(crate) const LIST_POPULARITY_MAX: f32 = 15.0;
