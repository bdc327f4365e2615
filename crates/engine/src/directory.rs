use std::future::Future;

use api_types::{group::Group, relationship::Relationship};
use client::ApiClient;

use crate::ResultEngine;

/// Read access to the remote directory, as needed by the resolvers.
///
/// Every call reflects remote state at call time; implementations must not
/// cache between calls.
pub trait Directory {
    /// All groups, active or not.
    fn groups(&self) -> impl Future<Output = ResultEngine<Vec<Group>>> + Send;

    /// Relationships whose `memberId` is `member_id`.
    fn relationships_of_member(
        &self,
        member_id: &str,
    ) -> impl Future<Output = ResultEngine<Vec<Relationship>>> + Send;

    /// Relationships whose `groupId` is `group_id`.
    fn relationships_of_group(
        &self,
        group_id: &str,
    ) -> impl Future<Output = ResultEngine<Vec<Relationship>>> + Send;

    /// The single manager edge of `managed_id`.
    fn manager_of(&self, managed_id: &str)
    -> impl Future<Output = ResultEngine<Relationship>> + Send;
}

impl Directory for ApiClient {
    async fn groups(&self) -> ResultEngine<Vec<Group>> {
        Ok(self.all_groups().await?)
    }

    async fn relationships_of_member(&self, member_id: &str) -> ResultEngine<Vec<Relationship>> {
        Ok(self.relationships_by_member_id(member_id).await?)
    }

    async fn relationships_of_group(&self, group_id: &str) -> ResultEngine<Vec<Relationship>> {
        Ok(self.relationships_by_group_id(group_id).await?)
    }

    async fn manager_of(&self, managed_id: &str) -> ResultEngine<Relationship> {
        Ok(self.manager_relationship(managed_id).await?)
    }
}
