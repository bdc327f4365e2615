//! Upward resolution: from a member to the groups containing it.

use std::collections::{HashSet, VecDeque};

use crate::{Directory, GroupSnapshot, ResultEngine};

/// Answers "which groups does this member belong to?".
#[derive(Debug)]
pub struct MembershipResolver<'a, D> {
    directory: &'a D,
}

impl<'a, D: Directory> MembershipResolver<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// Active groups that list `member_id` directly as a member.
    pub async fn direct_groups_of(
        &self,
        snapshot: &GroupSnapshot,
        member_id: &str,
    ) -> ResultEngine<HashSet<String>> {
        let relationships = self.directory.relationships_of_member(member_id).await?;

        Ok(relationships
            .iter()
            .filter_map(|rel| rel.membership())
            .map(|(group_id, _)| group_id)
            .filter(|group_id| snapshot.is_active(group_id))
            .map(str::to_string)
            .collect())
    }

    /// Active groups containing `member_id` directly or through any chain of
    /// active groups.
    ///
    /// The walk goes outward over member -> group edges with an explicit
    /// frontier. Inactive groups are dead ends: they are neither reported nor
    /// expanded. Each node is expanded at most once, so cycles terminate and
    /// the number of fetches is bounded by the distinct active groups reached.
    pub async fn all_groups_of(
        &self,
        snapshot: &GroupSnapshot,
        member_id: &str,
    ) -> ResultEngine<HashSet<String>> {
        let mut found = HashSet::new();
        let mut visited = HashSet::from([member_id.to_string()]);
        let mut frontier = VecDeque::from([member_id.to_string()]);

        while let Some(member) = frontier.pop_front() {
            let relationships = self.directory.relationships_of_member(&member).await?;

            for (group_id, _) in relationships.iter().filter_map(|rel| rel.membership()) {
                if !snapshot.is_active(group_id) {
                    continue;
                }
                found.insert(group_id.to_string());
                if visited.insert(group_id.to_string()) {
                    frontier.push_back(group_id.to_string());
                }
            }
        }

        tracing::debug!(
            member_id,
            groups = found.len(),
            expanded = visited.len(),
            "resolved group memberships"
        );
        Ok(found)
    }
}
