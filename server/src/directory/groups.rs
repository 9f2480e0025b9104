//! Weighted random group assignment.
//!
//! Two policies, selected by `multigroup`:
//!   - multi: one independent draw per table entry, a user can land in any
//!     subset of the groups (including none)
//!   - single: one draw walked against the cumulative probabilities, at
//!     most one group, and the chosen group's name doubles as the user's
//!     title
//!
//! The draws are computed up front with a plain closure so the policy is a
//! pure function; the async linking happens afterward, without a thread-
//! local RNG held across an await.

use rand::RngExt;

use super::meta;
use super::Directory;
use crate::prelude::*;
use scimdir_types::config::GroupWeight;
use scimdir_types::resource::{Group, GroupRef, MemberRef, User};

/// Decide which group names a user gets, and the title if the single-group
/// policy picked one. `draw` yields uniform values in `[0, 1)`.
pub fn pick_groups(
	table: &[GroupWeight],
	multigroup: bool,
	draw: &mut dyn FnMut() -> f64,
) -> (Vec<Box<str>>, Option<Box<str>>) {
	if multigroup {
		let names = table
			.iter()
			.filter(|entry| draw() < entry.probability)
			.map(|entry| entry.name.clone())
			.collect();
		return (names, None);
	}

	let roll = draw();
	let mut cumulative = 0.0;
	for entry in table {
		cumulative += entry.probability;
		if roll < cumulative {
			return (vec![entry.name.clone()], Some(entry.name.clone()));
		}
	}
	// roll beyond the whole table: no group, no title
	(Vec::new(), None)
}

/// Draw groups for a freshly generated user and link each membership. The
/// user must already carry an id.
pub async fn assign_to_groups(directory: &Directory, user: &mut User) -> SdResult<()> {
	let config = directory.config();
	let (names, title) = {
		let mut rng = rand::rng();
		pick_groups(&config.groups, config.multigroup, &mut || rng.random())
	};

	for name in names {
		add_user_to_group(directory, &name, user).await?;
	}
	if let Some(title) = title {
		user.title = Some(title);
	}
	Ok(())
}

/// Look up a group by display name, creating and persisting it on first use
async fn find_group(directory: &Directory, name: &str) -> SdResult<Group> {
	if let Some(group) = directory
		.groups
		.get_all()
		.into_iter()
		.find(|group| group.display_name.as_ref() == name)
	{
		return Ok(group);
	}

	let mut group = Group::empty(name);
	meta::stamp(&mut group, &directory.config().scimbase);
	directory.add_group(group.clone()).await?;
	Ok(group)
}

/// Link both directions of one membership: the member entry on the stored
/// group, and the group back-reference on the (not yet stored) user.
pub async fn add_user_to_group(
	directory: &Directory,
	name: &str,
	user: &mut User,
) -> SdResult<()> {
	let group = find_group(directory, name).await?;
	let group_id = group
		.id
		.clone()
		.ok_or_else(|| Error::Internal(format!("group '{}' has no id", name)))?;
	let user_id = user
		.id
		.clone()
		.ok_or_else(|| Error::Internal("user not stamped before group assignment".into()))?;

	let member = MemberRef {
		value: user_id,
		typ: Some("User".into()),
		reference: user.meta.as_ref().and_then(|meta| meta.location.clone()),
	};
	directory.groups.edit(|groups| {
		if let Some(stored) =
			groups.iter_mut().find(|group| group.id.as_deref() == Some(group_id.as_ref()))
		{
			stored.members.push(member);
			meta::touch_modified(stored);
		}
	});

	user.groups.push(GroupRef {
		value: group_id,
		display: Some(group.display_name.clone()),
		typ: Some("direct".into()),
		reference: group.meta.as_ref().and_then(|meta| meta.location.clone()),
	});
	Ok(())
}


// vim: ts=4
