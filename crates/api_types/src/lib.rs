//! Record shapes exchanged with the directory API.
//!
//! Only the fields needed to identify and classify records are modelled;
//! anything else the server sends is ignored on deserialization.

use serde::{Deserialize, Serialize};

pub mod account {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Account {
        pub id: String,
        #[serde(default)]
        pub employee_id: Option<String>,
        #[serde(default)]
        pub first_name: String,
        #[serde(default)]
        pub last_name: String,
        #[serde(default)]
        pub active: bool,
        /// Salary in major units of `salary_currency`.
        #[serde(default)]
        pub salary: i64,
        #[serde(default)]
        pub salary_currency: String,
        /// Employment start, seconds since the Unix epoch.
        #[serde(default)]
        pub employed_since: i64,
    }

    impl Account {
        pub fn full_name(&self) -> String {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

pub mod group {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Group {
        pub id: String,
        #[serde(default)]
        pub active: bool,
    }
}

pub mod relationship {
    use super::*;

    /// An edge of the directory graph.
    ///
    /// Membership edges carry `groupId` (the container) and `memberId` (an
    /// account or another group; the record never says which). Manager edges
    /// carry `accountId` (the manager) and `managedId` instead.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Relationship {
        pub id: String,
        #[serde(default)]
        pub group_id: Option<String>,
        #[serde(default)]
        pub member_id: Option<String>,
        #[serde(default)]
        pub account_id: Option<String>,
        #[serde(default)]
        pub managed_id: Option<String>,
    }

    impl Relationship {
        /// Returns `(group_id, member_id)` when this is a membership edge.
        pub fn membership(&self) -> Option<(&str, &str)> {
            match (self.group_id.as_deref(), self.member_id.as_deref()) {
                (Some(group), Some(member)) => Some((group, member)),
                _ => None,
            }
        }
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthCredentials {
        pub user: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthToken {
        pub token: Option<String>,
    }
}
