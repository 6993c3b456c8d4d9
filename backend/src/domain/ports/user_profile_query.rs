//! Driving port for loading the signed-in user.
//!
//! Inbound adapters use this port to resolve the session's user id without
//! importing persistence details.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

use super::fixtures::{fixture_admin, fixture_member};

/// Domain use-case port for reading the current user's profile.
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the user behind `user_id`, or `None` when the account is gone.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<User>, Error>;
}

/// Profile query resolving the two fixture accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery;

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        let candidates = [fixture_admin()?, fixture_member()?];
        Ok(candidates.into_iter().find(|user| user.id() == user_id))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::fixtures::FIXTURE_ADMIN_ID;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_profile_query_resolves_known_ids() {
        let admin_id = UserId::new(FIXTURE_ADMIN_ID).expect("user id");
        let user = FixtureUserProfileQuery
            .fetch_profile(&admin_id)
            .await
            .expect("profile response")
            .expect("known user");
        assert!(user.is_admin());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_profile_query_returns_none_for_strangers() {
        let user = FixtureUserProfileQuery
            .fetch_profile(&UserId::random())
            .await
            .expect("profile response");
        assert!(user.is_none());
    }
}
