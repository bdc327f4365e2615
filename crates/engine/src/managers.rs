use std::collections::HashMap;

use api_types::account::Account;

use crate::{Directory, EngineError, ResultEngine};

/// Number of managed accounts per manager id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManagerCounts {
    counts: HashMap<String, usize>,
}

impl ManagerCounts {
    pub fn get(&self, manager_id: &str) -> Option<usize> {
        self.counts.get(manager_id).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Managers ordered by managed count, highest first, ties by id.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(id, count)| (id.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Counts, per manager, how many of `accounts` they manage.
///
/// Every account must have exactly one manager edge; a missing or ambiguous
/// edge fails the whole report.
pub async fn manager_counts<'a, D, I>(directory: &D, accounts: I) -> ResultEngine<ManagerCounts>
where
    D: Directory,
    I: IntoIterator<Item = &'a Account>,
{
    let mut counts = ManagerCounts::default();
    for account in accounts {
        let edge = directory.manager_of(&account.id).await?;
        let manager_id = edge.account_id.ok_or_else(|| {
            EngineError::InvalidRecord(format!("manager edge {} has no accountId", edge.id))
        })?;
        *counts.counts.entry(manager_id).or_default() += 1;
    }
    Ok(counts)
}
