//! Directory record types: users, groups, and their membership references.
//!
//! The JSON shape follows what the directory actually stores: lowercased
//! single-word attribute names (`username`, `displayname`), `$ref` link
//! fields, and camelCase `meta` sub-attributes. Unknown attributes are
//! preserved through a flattened map so already-shaped records round-trip
//! without schema validation.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SCHEMA_URN_BASE: &str = "urn:ietf:params:scim:schemas:core:2.0:";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceType {
	User,
	Group,
}

impl ResourceType {
	pub fn as_str(&self) -> &'static str {
		match self {
			ResourceType::User => "User",
			ResourceType::Group => "Group",
		}
	}

	pub fn plural(&self) -> &'static str {
		match self {
			ResourceType::User => "Users",
			ResourceType::Group => "Groups",
		}
	}

	pub fn schema_urn(&self) -> String {
		format!("{}{}", SCHEMA_URN_BASE, self.as_str())
	}
}

impl std::fmt::Display for ResourceType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Common metadata stamped onto every record
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Meta {
	#[serde(rename = "resourceType", skip_serializing_if = "Option::is_none")]
	pub resource_type: Option<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created: Option<DateTime<Utc>>,
	#[serde(rename = "lastModified", skip_serializing_if = "Option::is_none")]
	pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Name {
	#[serde(rename = "honorificprefix", skip_serializing_if = "Option::is_none")]
	pub honorific_prefix: Option<Box<str>>,
	#[serde(rename = "givenname", skip_serializing_if = "Option::is_none")]
	pub given_name: Option<Box<str>>,
	#[serde(rename = "familyname", skip_serializing_if = "Option::is_none")]
	pub family_name: Option<Box<str>>,
}

/// Typed multi-valued attribute (emails, phone numbers)
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct MultiValue {
	pub value: Box<str>,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub typ: Option<Box<str>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Address {
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub typ: Option<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub locality: Option<Box<str>>,
	#[serde(rename = "postalCode", skip_serializing_if = "Option::is_none")]
	pub postal_code: Option<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub country: Option<Box<str>>,
}

/// Back-reference from a user to a group it belongs to
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GroupRef {
	pub value: Box<str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display: Option<Box<str>>,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub typ: Option<Box<str>>,
	#[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
	pub reference: Option<Box<str>>,
}

/// Forward-reference from a group to a member user
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MemberRef {
	pub value: Box<str>,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub typ: Option<Box<str>>,
	#[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
	pub reference: Option<Box<str>>,
}

fn default_true() -> bool {
	true
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub schemas: Vec<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<Box<str>>,
	pub username: Box<str>,
	#[serde(rename = "displayname", skip_serializing_if = "Option::is_none")]
	pub display_name: Option<Box<str>>,
	#[serde(default = "default_true")]
	pub active: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<Box<str>>,
	#[serde(default)]
	pub name: Name,
	#[serde(default)]
	pub emails: Vec<MultiValue>,
	#[serde(rename = "phoneNumbers", default, skip_serializing_if = "Vec::is_empty")]
	pub phone_numbers: Vec<MultiValue>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub addresses: Vec<Address>,
	#[serde(default)]
	pub groups: Vec<GroupRef>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub meta: Option<Meta>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Group {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub schemas: Vec<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<Box<str>>,
	#[serde(rename = "displayname")]
	pub display_name: Box<str>,
	#[serde(default)]
	pub members: Vec<MemberRef>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub meta: Option<Meta>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Group {
	/// A fresh, unstamped group with no members
	pub fn empty(display_name: impl Into<Box<str>>) -> Self {
		Group {
			schemas: Vec::new(),
			id: None,
			display_name: display_name.into(),
			members: Vec::new(),
			meta: None,
			extra: Map::new(),
		}
	}
}

/// Accessors the generic store and the metadata stamper need from every
/// record variant.
pub trait DirectoryRecord:
	Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
	const RESOURCE_TYPE: ResourceType;

	fn id(&self) -> Option<&str>;
	fn set_id(&mut self, id: Box<str>);
	fn schemas_mut(&mut self) -> &mut Vec<Box<str>>;
	fn meta(&self) -> Option<&Meta>;
	/// Creates an empty `meta` sub-object if the record has none yet
	fn ensure_meta(&mut self) -> &mut Meta;
}

impl DirectoryRecord for User {
	const RESOURCE_TYPE: ResourceType = ResourceType::User;

	fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	fn set_id(&mut self, id: Box<str>) {
		self.id = Some(id);
	}

	fn schemas_mut(&mut self) -> &mut Vec<Box<str>> {
		&mut self.schemas
	}

	fn meta(&self) -> Option<&Meta> {
		self.meta.as_ref()
	}

	fn ensure_meta(&mut self) -> &mut Meta {
		self.meta.get_or_insert_with(Meta::default)
	}
}

impl DirectoryRecord for Group {
	const RESOURCE_TYPE: ResourceType = ResourceType::Group;

	fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	fn set_id(&mut self, id: Box<str>) {
		self.id = Some(id);
	}

	fn schemas_mut(&mut self) -> &mut Vec<Box<str>> {
		&mut self.schemas
	}

	fn meta(&self) -> Option<&Meta> {
		self.meta.as_ref()
	}

	fn ensure_meta(&mut self) -> &mut Meta {
		self.meta.get_or_insert_with(Meta::default)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_user_json_shape() {
		let user: User = serde_json::from_value(json!({
			"username": "jdoe",
			"displayname": "John Doe",
			"name": { "givenname": "John", "familyname": "Doe" },
			"emails": [{ "value": "jdoe@example.com", "type": "work" }],
			"x-custom": "kept"
		}))
		.unwrap();

		assert_eq!(user.username.as_ref(), "jdoe");
		assert!(user.active);
		assert_eq!(user.name.given_name.as_deref(), Some("John"));
		assert_eq!(user.extra.get("x-custom"), Some(&json!("kept")));

		let value = serde_json::to_value(&user).unwrap();
		assert_eq!(value["displayname"], json!("John Doe"));
		assert_eq!(value["x-custom"], json!("kept"));
	}

	#[test]
	fn test_group_ref_serializes_dollar_ref() {
		let group_ref = GroupRef {
			value: "g1".into(),
			display: Some("Runners".into()),
			typ: Some("direct".into()),
			reference: Some("/scim/v2/Groups/g1".into()),
		};
		let value = serde_json::to_value(&group_ref).unwrap();
		assert_eq!(value["$ref"], json!("/scim/v2/Groups/g1"));
	}

	#[test]
	fn test_meta_camel_case() {
		let meta = Meta {
			resource_type: Some("User".into()),
			location: Some("/scim/v2/Users/u1".into()),
			created: None,
			last_modified: None,
		};
		let value = serde_json::to_value(&meta).unwrap();
		assert_eq!(value["resourceType"], json!("User"));
		assert!(value.get("lastModified").is_none());
	}
}

// vim: ts=4
