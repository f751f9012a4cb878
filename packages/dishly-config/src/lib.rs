mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, MinScore, Normalization, Postgres, Search, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::Parse { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_limit < cfg.search.default_limit {
		return Err(Error::Validation {
			message: "search.max_limit must be greater than or equal to search.default_limit."
				.to_string(),
		});
	}
	if cfg.search.all_tab_limit == 0 {
		return Err(Error::Validation {
			message: "search.all_tab_limit must be greater than zero.".to_string(),
		});
	}

	for (path, value) in [
		("search.min_score.users_all", cfg.search.min_score.users_all),
		("search.min_score.users_tab", cfg.search.min_score.users_tab),
		("search.min_score.recipes", cfg.search.min_score.recipes),
		("search.min_score.dishlists_all", cfg.search.min_score.dishlists_all),
		("search.min_score.dishlists_tab", cfg.search.min_score.dishlists_tab),
	] {
		if !value.is_finite() {
			return Err(Error::Validation {
				message: format!("{path} must be a finite number."),
			});
		}
		if value < 0.0 {
			return Err(Error::Validation { message: format!("{path} must be zero or greater.") });
		}
	}

	for (path, value) in [
		("search.normalization.users", cfg.search.normalization.users),
		("search.normalization.recipes", cfg.search.normalization.recipes),
		("search.normalization.dishlists", cfg.search.normalization.dishlists),
	] {
		if !value.is_finite() {
			return Err(Error::Validation {
				message: format!("{path} must be a finite number."),
			});
		}
		if value <= 0.0 {
			return Err(Error::Validation {
				message: format!("{path} must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	if cfg.service.log_level.is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
