//! Directory configuration, persisted as the first element of the snapshot.

use serde::{Deserialize, Serialize};

/// One entry of the group assignment table. The order of entries matters:
/// the single-group policy walks the table in its defined order.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GroupWeight {
	pub name: Box<str>,
	pub probability: f64,
}

impl GroupWeight {
	pub fn new(name: impl Into<Box<str>>, probability: f64) -> Self {
		GroupWeight { name: name.into(), probability }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
	/// Base URL path for the SCIM API
	#[serde(default = "default_scimbase")]
	pub scimbase: Box<str>,
	/// Port number to use, unless the `PORT` environment variable is defined
	#[serde(default = "default_scimport")]
	pub scimport: u16,
	/// Basic auth credentials
	#[serde(default = "default_username")]
	pub username: Box<str>,
	#[serde(default = "default_password")]
	pub password: Box<str>,
	/// Bearer token, generated at bootstrap when no snapshot exists
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<Box<str>>,
	/// Nationalities to draw random people from
	#[serde(default = "default_countries")]
	pub countries: Vec<Box<str>>,
	/// Groups users are randomly assigned to, with their probabilities
	#[serde(default = "default_groups")]
	pub groups: Vec<GroupWeight>,
	/// Assign people to multiple groups, or just one?
	#[serde(default = "default_multigroup")]
	pub multigroup: bool,
	/// How many random users to seed at bootstrap
	#[serde(default = "default_seed_users")]
	pub seed_users: usize,
}

fn default_scimbase() -> Box<str> {
	"/scim/v2".into()
}

fn default_scimport() -> u16 {
	2000
}

fn default_username() -> Box<str> {
	"admin".into()
}

fn default_password() -> Box<str> {
	"secret".into()
}

fn default_countries() -> Vec<Box<str>> {
	[
		"AU", "BR", "CA", "CH", "DE", "DK", "ES", "FI", "FR", "GB", "IE", "NL", "NO", "NZ",
		"US",
	]
	.into_iter()
	.map(Box::from)
	.collect()
}

fn default_groups() -> Vec<GroupWeight> {
	vec![
		GroupWeight::new("Vegetarians", 0.20),
		GroupWeight::new("Cyclists", 0.33),
		GroupWeight::new("Runners", 0.33),
		GroupWeight::new("Swimmers", 0.33),
		GroupWeight::new("Musicians", 0.20),
		GroupWeight::new("Dancers", 0.20),
		GroupWeight::new("Readers", 0.20),
	]
}

fn default_multigroup() -> bool {
	true
}

fn default_seed_users() -> usize {
	3
}

impl Default for Config {
	fn default() -> Self {
		Config {
			scimbase: default_scimbase(),
			scimport: default_scimport(),
			username: default_username(),
			password: default_password(),
			token: None,
			countries: default_countries(),
			groups: default_groups(),
			multigroup: default_multigroup(),
			seed_users: default_seed_users(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_config_fills_defaults() {
		let config: Config =
			serde_json::from_str(r#"{ "token": "abc", "multigroup": false }"#).unwrap();
		assert_eq!(config.token.as_deref(), Some("abc"));
		assert!(!config.multigroup);
		assert_eq!(config.scimbase.as_ref(), "/scim/v2");
		assert_eq!(config.groups.len(), 7);
	}
}

// vim: ts=4
