use std::collections::BTreeSet;

use api_types::account::Account;

use crate::{ApiClient, ClientError, Filter, Result};

pub const ACCOUNTS: &str = "accounts";

impl ApiClient {
    pub async fn all_accounts(&self) -> Result<Vec<Account>> {
        self.fetch(ACCOUNTS, None).await
    }

    pub async fn accounts_by_employee_id(&self, employee_id: &str) -> Result<Vec<Account>> {
        self.fetch(ACCOUNTS, Some(&Filter::eq("employeeId", employee_id)))
            .await
    }

    pub async fn accounts_by_first_name(&self, first_name: &str) -> Result<Vec<Account>> {
        self.fetch(ACCOUNTS, Some(&Filter::eq("firstName", first_name)))
            .await
    }

    /// Looks up the single account with `account_id`.
    pub async fn account_by_id(&self, account_id: &str) -> Result<Account> {
        let mut accounts: Vec<Account> = self
            .fetch(ACCOUNTS, Some(&Filter::eq("id", account_id)))
            .await?;
        if accounts.len() != 1 {
            return Err(ClientError::NotUnique {
                lookup: format!("account id {account_id}"),
                found: accounts.len(),
            });
        }
        Ok(accounts.remove(0))
    }

    /// Fetches the active accounts among `account_ids`, ordered by id.
    ///
    /// Ids without a matching account are skipped.
    pub async fn active_accounts_by_ids<'a, I>(&self, account_ids: I) -> Result<Vec<Account>>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let ids: BTreeSet<&String> = account_ids.into_iter().collect();
        let mut active = Vec::new();
        for id in ids {
            let accounts: Vec<Account> = self.fetch(ACCOUNTS, Some(&Filter::eq("id", id))).await?;
            active.extend(accounts.into_iter().filter(|account| account.active));
        }
        Ok(active)
    }
}
