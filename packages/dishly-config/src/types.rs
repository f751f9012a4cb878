use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
	#[serde(default = "default_all_tab_limit")]
	pub all_tab_limit: u32,
	#[serde(default)]
	pub min_score: MinScore,
	#[serde(default)]
	pub normalization: Normalization,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: default_limit(),
			max_limit: default_max_limit(),
			all_tab_limit: default_all_tab_limit(),
			min_score: MinScore::default(),
			normalization: Normalization::default(),
		}
	}
}

/// Minimum total score a candidate needs before it is included in results.
#[derive(Debug, Deserialize)]
pub struct MinScore {
	#[serde(default = "default_users_all")]
	pub users_all: f32,
	#[serde(default = "default_users_tab")]
	pub users_tab: f32,
	#[serde(default = "default_recipes")]
	pub recipes: f32,
	#[serde(default = "default_dishlists_all")]
	pub dishlists_all: f32,
	#[serde(default = "default_dishlists_tab")]
	pub dishlists_tab: f32,
}
impl Default for MinScore {
	fn default() -> Self {
		Self {
			users_all: default_users_all(),
			users_tab: default_users_tab(),
			recipes: default_recipes(),
			dishlists_all: default_dishlists_all(),
			dishlists_tab: default_dishlists_tab(),
		}
	}
}

/// Cross-category multipliers applied on the combined tab so blended result
/// lists sit on a comparable scale. Tuning values; the blending structure
/// does not change when these move.
#[derive(Debug, Deserialize)]
pub struct Normalization {
	#[serde(default = "default_norm_users")]
	pub users: f32,
	#[serde(default = "default_norm_recipes")]
	pub recipes: f32,
	#[serde(default = "default_norm_dishlists")]
	pub dishlists: f32,
}
impl Default for Normalization {
	fn default() -> Self {
		Self {
			users: default_norm_users(),
			recipes: default_norm_recipes(),
			dishlists: default_norm_dishlists(),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	#[serde(default = "default_bind_localhost_only")]
	pub bind_localhost_only: bool,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: default_bind_localhost_only() }
	}
}

fn default_limit() -> u32 {
	20
}

fn default_max_limit() -> u32 {
	50
}

fn default_all_tab_limit() -> u32 {
	10
}

fn default_users_all() -> f32 {
	30.0
}

fn default_users_tab() -> f32 {
	40.0
}

fn default_recipes() -> f32 {
	30.0
}

fn default_dishlists_all() -> f32 {
	30.0
}

fn default_dishlists_tab() -> f32 {
	35.0
}

fn default_norm_users() -> f32 {
	1.0
}

fn default_norm_recipes() -> f32 {
	0.9
}

fn default_norm_dishlists() -> f32 {
	0.95
}

fn default_bind_localhost_only() -> bool {
	true
}
