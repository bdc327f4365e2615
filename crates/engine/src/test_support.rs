//! In-memory [`Directory`] for unit tests.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use api_types::{group::Group, relationship::Relationship};
use client::ClientError;

use crate::{Directory, EngineError, ResultEngine};

#[derive(Debug, Default)]
pub(crate) struct InMemoryDirectory {
    groups: Vec<Group>,
    relationships: Vec<Relationship>,
    failing_id: Option<String>,
    fetches: Mutex<HashMap<String, usize>>,
    relationship_calls: AtomicUsize,
}

impl InMemoryDirectory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn group(mut self, id: &str, active: bool) -> Self {
        self.groups.push(Group {
            id: id.to_string(),
            active,
        });
        self
    }

    /// Adds the edge `member_id` -> `group_id`.
    pub(crate) fn member(mut self, group_id: &str, member_id: &str) -> Self {
        let id = format!("rel{}", self.relationships.len());
        self.relationships.push(Relationship {
            id,
            group_id: Some(group_id.to_string()),
            member_id: Some(member_id.to_string()),
            account_id: None,
            managed_id: None,
        });
        self
    }

    pub(crate) fn manager(mut self, manager_id: &str, managed_id: &str) -> Self {
        let id = format!("rel{}", self.relationships.len());
        self.relationships.push(Relationship {
            id,
            group_id: None,
            member_id: None,
            account_id: Some(manager_id.to_string()),
            managed_id: Some(managed_id.to_string()),
        });
        self
    }

    /// Makes any relationship lookup keyed by `id` fail.
    pub(crate) fn failing_on(mut self, id: &str) -> Self {
        self.failing_id = Some(id.to_string());
        self
    }

    pub(crate) fn relationship_calls(&self) -> usize {
        self.relationship_calls.load(Ordering::SeqCst)
    }

    /// How many times relationships keyed by `id` were fetched.
    pub(crate) fn fetches_of(&self, id: &str) -> usize {
        self.fetches
            .lock()
            .map(|fetches| fetches.get(id).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn record(&self, key: &str) -> ResultEngine<()> {
        self.relationship_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut fetches) = self.fetches.lock() {
            *fetches.entry(key.to_string()).or_default() += 1;
        }
        if self.failing_id.as_deref() == Some(key) {
            return Err(EngineError::Client(ClientError::RetriesExhausted {
                endpoint: "relationships".to_string(),
                attempts: 1,
            }));
        }
        Ok(())
    }

    fn select(&self, keep: impl Fn(&Relationship) -> bool) -> Vec<Relationship> {
        self.relationships
            .iter()
            .filter(|rel| keep(rel))
            .cloned()
            .collect()
    }
}

impl Directory for InMemoryDirectory {
    async fn groups(&self) -> ResultEngine<Vec<Group>> {
        Ok(self.groups.clone())
    }

    async fn relationships_of_member(&self, member_id: &str) -> ResultEngine<Vec<Relationship>> {
        self.record(member_id)?;
        Ok(self.select(|rel| rel.member_id.as_deref() == Some(member_id)))
    }

    async fn relationships_of_group(&self, group_id: &str) -> ResultEngine<Vec<Relationship>> {
        self.record(group_id)?;
        Ok(self.select(|rel| rel.group_id.as_deref() == Some(group_id)))
    }

    async fn manager_of(&self, managed_id: &str) -> ResultEngine<Relationship> {
        let mut found = self.select(|rel| rel.managed_id.as_deref() == Some(managed_id));
        if found.len() != 1 {
            return Err(EngineError::Client(ClientError::NotUnique {
                lookup: format!("manager of {managed_id}"),
                found: found.len(),
            }));
        }
        Ok(found.remove(0))
    }
}
