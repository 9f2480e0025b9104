//! Metadata stamping for incoming records.
//!
//! Every record entering a collection passes through [`stamp`] first:
//! missing ids are minted, the core schema URN is ensured, and the `meta`
//! sub-object gets its resource type, location, and timestamps. A caller-
//! provided id survives stamping untouched.

use chrono::Utc;
use uuid::Uuid;

use scimdir_types::resource::DirectoryRecord;

pub fn stamp<T: DirectoryRecord>(record: &mut T, scimbase: &str) {
	let id: Box<str> = match record.id() {
		Some(id) => id.into(),
		None => {
			let id: Box<str> = Uuid::new_v4().to_string().into();
			record.set_id(id.clone());
			id
		}
	};

	let urn = T::RESOURCE_TYPE.schema_urn();
	let schemas = record.schemas_mut();
	if !schemas.iter().any(|schema| schema.as_ref() == urn) {
		schemas.push(urn.into());
	}

	let location: Box<str> = format!("{}/{}/{}", scimbase, T::RESOURCE_TYPE.plural(), id).into();
	let now = Utc::now();
	let meta = record.ensure_meta();
	meta.resource_type = Some(T::RESOURCE_TYPE.as_str().into());
	meta.location = Some(location);
	if meta.created.is_none() {
		meta.created = Some(now);
	}
	meta.last_modified = Some(now);
}

/// Refresh only the modification timestamp, keeping everything else
pub fn touch_modified<T: DirectoryRecord>(record: &mut T) {
	record.ensure_meta().last_modified = Some(Utc::now());
}


// vim: ts=4
