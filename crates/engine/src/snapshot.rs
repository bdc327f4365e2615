use std::collections::HashSet;

use api_types::group::Group;

use crate::{Directory, ResultEngine};

/// What a relationship's `memberId` refers to.
///
/// Relationships carry no type tag: an id is a group exactly when it appears
/// among the group ids, and anything else is a terminal member (an account).
/// Group and account ids are assumed to be drawn from disjoint id spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Group,
    Terminal,
}

pub fn classify(id: &str, all_group_ids: &HashSet<String>) -> MemberKind {
    if all_group_ids.contains(id) {
        MemberKind::Group
    } else {
        MemberKind::Terminal
    }
}

/// Point-in-time projection of the group collection.
///
/// A snapshot is meant to back one resolution call: take a fresh one per
/// call and never mutate it while a resolution is using it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupSnapshot {
    all: HashSet<String>,
    active: HashSet<String>,
}

impl GroupSnapshot {
    pub fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = Group>,
    {
        let mut snapshot = GroupSnapshot::default();
        for group in groups {
            if group.active {
                snapshot.active.insert(group.id.clone());
            }
            snapshot.all.insert(group.id);
        }
        snapshot
    }

    /// Fetches the group collection once and derives both id sets from it.
    pub async fn load<D: Directory>(directory: &D) -> ResultEngine<Self> {
        let snapshot = Self::from_groups(directory.groups().await?);
        tracing::debug!(
            groups = snapshot.all.len(),
            active = snapshot.active.len(),
            "group snapshot taken"
        );
        Ok(snapshot)
    }

    pub fn all_group_ids(&self) -> &HashSet<String> {
        &self.all
    }

    pub fn active_group_ids(&self) -> &HashSet<String> {
        &self.active
    }

    pub fn classify(&self, id: &str) -> MemberKind {
        classify(id, &self.all)
    }

    pub fn is_active(&self, group_id: &str) -> bool {
        self.active.contains(group_id)
    }
}
