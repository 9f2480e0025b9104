//! Locally generated random candidate users.
//!
//! Stands in for a remote random-person service: produces already-shaped
//! `User` records (login id, work email and phone, address in one of the
//! requested countries, empty group list) that the caller inserts through
//! the directory's normal mutation contract. Generation holds no store
//! lock and never touches the network.

use async_trait::async_trait;
use rand::RngExt;
use uuid::Uuid;

use scimdir::prelude::*;
use scimdir::resource::{Address, MultiValue, Name, User};
use scimdir::user_source::UserSource;

const GIVEN_NAMES: &[&str] = &[
	"Alma", "Bram", "Carla", "Dries", "Elena", "Felix", "Greta", "Hugo", "Ines", "Jonas",
	"Katja", "Lars", "Maja", "Nils", "Olga", "Piet", "Quinn", "Rosa", "Sven", "Tilda",
];

const FAMILY_NAMES: &[&str] = &[
	"Andersen", "Bakker", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Hansen",
	"Ivanova", "Jensen", "Keller", "Larsen", "Moreau", "Nielsen", "OBrien", "Petersen",
	"Quigley", "Rossi", "Schmidt", "Tanaka",
];

const PREFIXES: &[&str] = &["Mr", "Mrs", "Ms", "Dr"];

const CITIES: &[&str] = &[
	"Aarhus", "Bergen", "Cork", "Dresden", "Eindhoven", "Fremantle", "Geneva", "Hamilton",
	"Invercargill", "Joinville", "Kelowna", "Lyon", "Malaga", "Nantes", "Oulu", "Porto",
];

#[derive(Debug, Default)]
pub struct UserSourceRandom;

impl UserSourceRandom {
	pub fn new() -> Self {
		UserSourceRandom
	}
}

fn pick<'a>(rng: &mut impl RngExt, pool: &[&'a str]) -> &'a str {
	pool[rng.random_range(0..pool.len())]
}

fn generate_user(countries: &[Box<str>]) -> User {
	let mut rng = rand::rng();

	let given = pick(&mut rng, GIVEN_NAMES);
	let family = pick(&mut rng, FAMILY_NAMES);
	let username =
		format!("{}{}{:02}", given.to_lowercase(), family.to_lowercase(), rng.random_range(0..100));
	let country = if countries.is_empty() {
		"US".into()
	} else {
		countries[rng.random_range(0..countries.len())].clone()
	};
	let phone: String =
		(0..9).map(|_| char::from(b'0' + rng.random_range(0..10u8))).collect();

	User {
		schemas: Vec::new(),
		id: Some(Uuid::new_v4().to_string().into()),
		username: username.into(),
		display_name: Some(format!("{} {}", given, family).into()),
		active: true,
		title: None,
		name: Name {
			honorific_prefix: Some(Box::from(pick(&mut rng, PREFIXES))),
			given_name: Some(Box::from(given)),
			family_name: Some(Box::from(family)),
		},
		emails: vec![MultiValue {
			value: format!("{}.{}@example.com", given.to_lowercase(), family.to_lowercase())
				.into(),
			typ: Some("work".into()),
		}],
		phone_numbers: vec![MultiValue { value: phone.into(), typ: Some("work".into()) }],
		addresses: vec![Address {
			typ: Some("work".into()),
			locality: Some(Box::from(pick(&mut rng, CITIES))),
			postal_code: Some(format!("{:05}", rng.random_range(0..100_000u32)).into()),
			country: Some(country),
		}],
		groups: Vec::new(),
		meta: None,
		extra: serde_json::Map::new(),
	}
}

#[async_trait]
impl UserSource for UserSourceRandom {
	async fn fetch_users(&self, count: usize, countries: &[Box<str>]) -> SdResult<Vec<User>> {
		let users: Vec<User> = (0..count).map(|_| generate_user(countries)).collect();
		debug!("Generated {} random users", users.len());
		Ok(users)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_fetch_produces_shaped_candidates() {
		let source = UserSourceRandom::new();
		let users = source.fetch_users(5, &["NL".into(), "DK".into()]).await.unwrap();

		assert_eq!(users.len(), 5);
		for user in &users {
			assert!(user.id.is_some());
			assert!(!user.username.is_empty());
			assert!(user.active);
			assert!(user.groups.is_empty());
			assert!(user.meta.is_none());
			let country = user.addresses[0].country.as_deref().unwrap();
			assert!(country == "NL" || country == "DK");
		}
	}

	#[tokio::test]
	async fn test_empty_country_list_falls_back() {
		let source = UserSourceRandom::new();
		let users = source.fetch_users(1, &[]).await.unwrap();
		assert_eq!(users[0].addresses[0].country.as_deref(), Some("US"));
	}
}

// vim: ts=4
