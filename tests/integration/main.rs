//! Integration tests for Prepper Helper.
//!
//! `public_test` runs without a database. The rest use `TEST_DATABASE_URL`
//! and return early when it is unset.

mod auth_test;
mod helpers;
mod invitation_test;
mod item_test;
mod public_test;
mod push_test;
mod stash_test;
