//! Downward resolution: from a group to the accounts it ultimately contains.

use std::collections::{HashSet, VecDeque};

use crate::{Directory, GroupSnapshot, MemberKind, ResultEngine};

/// Answers "which accounts ultimately belong to this group?".
#[derive(Debug)]
pub struct MemberResolver<'a, D> {
    directory: &'a D,
}

impl<'a, D: Directory> MemberResolver<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// Terminal members reachable from `group_id` through active groups.
    ///
    /// Member ids are classified against the snapshot: non-group ids are
    /// collected, active groups are expanded once each, inactive groups are
    /// dropped without being expanded. An inactive `group_id` yields nothing.
    /// Group ids never appear in the result.
    pub async fn members_of(
        &self,
        snapshot: &GroupSnapshot,
        group_id: &str,
    ) -> ResultEngine<HashSet<String>> {
        let mut members = HashSet::new();
        if snapshot.classify(group_id) == MemberKind::Group && !snapshot.is_active(group_id) {
            tracing::debug!(group_id, "group is inactive, nothing to resolve");
            return Ok(members);
        }

        let mut visited = HashSet::from([group_id.to_string()]);
        let mut frontier = VecDeque::from([group_id.to_string()]);

        while let Some(group) = frontier.pop_front() {
            let relationships = self.directory.relationships_of_group(&group).await?;

            for (_, member_id) in relationships.iter().filter_map(|rel| rel.membership()) {
                match snapshot.classify(member_id) {
                    MemberKind::Terminal => {
                        members.insert(member_id.to_string());
                    }
                    MemberKind::Group if !snapshot.is_active(member_id) => {}
                    MemberKind::Group => {
                        if visited.insert(member_id.to_string()) {
                            frontier.push_back(member_id.to_string());
                        }
                    }
                }
            }
        }

        tracing::debug!(
            group_id,
            members = members.len(),
            expanded = visited.len(),
            "resolved group members"
        );
        Ok(members)
    }
}
