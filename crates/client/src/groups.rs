use std::collections::HashSet;

use api_types::group::Group;

use crate::{ApiClient, Result};

pub const GROUPS: &str = "groups";

impl ApiClient {
    pub async fn all_groups(&self) -> Result<Vec<Group>> {
        self.fetch(GROUPS, None).await
    }

    pub async fn all_group_ids(&self) -> Result<HashSet<String>> {
        Ok(self
            .all_groups()
            .await?
            .into_iter()
            .map(|group| group.id)
            .collect())
    }

    pub async fn active_group_ids(&self) -> Result<HashSet<String>> {
        Ok(self
            .all_groups()
            .await?
            .into_iter()
            .filter(|group| group.active)
            .map(|group| group.id)
            .collect())
    }
}
