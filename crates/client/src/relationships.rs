use api_types::relationship::Relationship;

use crate::{ApiClient, ClientError, Filter, Result};

pub const RELATIONSHIPS: &str = "relationships";

impl ApiClient {
    /// Relationships in which `member_id` is the contained member.
    pub async fn relationships_by_member_id(&self, member_id: &str) -> Result<Vec<Relationship>> {
        self.fetch(RELATIONSHIPS, Some(&Filter::eq("memberId", member_id)))
            .await
    }

    /// Relationships in which `group_id` is the containing group.
    pub async fn relationships_by_group_id(&self, group_id: &str) -> Result<Vec<Relationship>> {
        self.fetch(RELATIONSHIPS, Some(&Filter::eq("groupId", group_id)))
            .await
    }

    /// The manager edge of `managed_id`. Its `account_id` is the manager.
    pub async fn manager_relationship(&self, managed_id: &str) -> Result<Relationship> {
        let mut relationships: Vec<Relationship> = self
            .fetch(RELATIONSHIPS, Some(&Filter::eq("managedId", managed_id)))
            .await?;
        if relationships.len() != 1 {
            return Err(ClientError::NotUnique {
                lookup: format!("manager of {managed_id}"),
                found: relationships.len(),
            });
        }
        Ok(relationships.remove(0))
    }
}
