//! External source of candidate user records.
//!
//! The source only produces already-shaped `User` records; inserting them
//! through the normal mutation contract is the caller's job. A fetch must
//! not hold any store lock.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::SdResult;
use crate::resource::User;

#[async_trait]
pub trait UserSource: Debug + Send + Sync {
	/// Produce `count` fresh candidate users drawn from the given
	/// nationality list
	async fn fetch_users(&self, count: usize, countries: &[Box<str>]) -> SdResult<Vec<User>>;
}

// vim: ts=4
