use std::{collections::HashSet, time::Duration};

use client::{ApiClient, FetchPolicy};
use engine::{
    GroupSnapshot, MemberResolver, MembershipResolver, employed_between, manager_counts,
    total_salary_in_sek,
};
use fixture_server::{Dataset, Fixture};

use crate::{
    error::{AppError, Result},
    settings::{AppConfig, Command},
};

pub async fn run(settings: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Serve {
            dataset,
            bind,
            port,
            page_limit,
            throttle,
        } => {
            let mut builder = Fixture::builder().dataset(Dataset::from_path(&dataset)?);
            if !settings.username.is_empty() {
                builder = builder.credentials(&settings.username, &settings.password);
            }
            if let Some(limit) = page_limit {
                builder = builder.page_limit(limit);
            }
            let fixture = builder.build();
            fixture.controls().throttle_next(throttle);

            let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
            fixture_server::run_with_listener(fixture, listener).await?;
        }
        Command::Account { employee_id } => {
            let client = connect(settings).await?;
            for account in client.accounts_by_employee_id(&employee_id).await? {
                println!("{}\t{}", account.id, account.full_name());
            }
        }
        Command::DirectGroups { member } => {
            let client = connect(settings).await?;
            let snapshot = GroupSnapshot::load(&client).await?;
            let groups = MembershipResolver::new(&client)
                .direct_groups_of(&snapshot, &member)
                .await?;
            print_sorted(groups);
        }
        Command::AllGroups { member } => {
            let client = connect(settings).await?;
            let snapshot = GroupSnapshot::load(&client).await?;
            let groups = MembershipResolver::new(&client)
                .all_groups_of(&snapshot, &member)
                .await?;
            print_sorted(groups);
        }
        Command::Members { group } => {
            let client = connect(settings).await?;
            let snapshot = GroupSnapshot::load(&client).await?;
            let members = MemberResolver::new(&client)
                .members_of(&snapshot, &group)
                .await?;
            print_sorted(members);
        }
        Command::Salary { group } => {
            let client = connect(settings).await?;
            let snapshot = GroupSnapshot::load(&client).await?;
            let members = MemberResolver::new(&client)
                .members_of(&snapshot, &group)
                .await?;
            let accounts = client.active_accounts_by_ids(&members).await?;
            println!("{}", total_salary_in_sek(&accounts)?);
        }
        Command::Managers { groups, from, to } => {
            if from > to {
                return Err(AppError::Usage(format!("--from {from} is after --to {to}")));
            }
            let client = connect(settings).await?;
            let members = members_of_every(&client, &groups).await?;

            let accounts = client.active_accounts_by_ids(&members).await?;
            let hired = employed_between(&accounts, from, to);
            tracing::info!(
                candidates = accounts.len(),
                hired = hired.len(),
                "filtered accounts by employment date"
            );

            let counts = manager_counts(&client, hired).await?;
            for (manager_id, count) in counts.ranked() {
                let manager = client.account_by_id(manager_id).await?;
                println!("{count}\t{manager_id}\t{}", manager.full_name());
            }
        }
    }

    Ok(())
}

async fn connect(settings: &AppConfig) -> Result<ApiClient> {
    let policy = FetchPolicy {
        page_size: settings.page_size,
        max_attempts: settings.max_attempts,
        retry_delay: Duration::from_millis(settings.retry_delay_ms),
    };
    let client = ApiClient::builder()
        .base_url(&settings.base_url)
        .policy(policy)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;

    if let Some(token) = &settings.token {
        return Ok(client.with_token(token.clone()));
    }
    if settings.username.is_empty() {
        return Err(AppError::Usage(
            "set ORGQUERY_TOKEN or ORGQUERY_USERNAME/ORGQUERY_PASSWORD".to_string(),
        ));
    }

    let token = client
        .authenticate(&settings.username, &settings.password)
        .await?;
    Ok(client.with_token(token))
}

/// Accounts found in all of `groups`.
///
/// Each group is its own resolution and gets a fresh group snapshot.
async fn members_of_every(client: &ApiClient, groups: &[String]) -> Result<HashSet<String>> {
    let resolver = MemberResolver::new(client);
    let mut common: Option<HashSet<String>> = None;
    for group in groups {
        let snapshot = GroupSnapshot::load(client).await?;
        let members = resolver.members_of(&snapshot, group).await?;
        common = Some(match common {
            Some(acc) => acc.intersection(&members).cloned().collect(),
            None => members,
        });
    }
    Ok(common.unwrap_or_default())
}

fn print_sorted(ids: HashSet<String>) {
    let mut ids: Vec<String> = ids.into_iter().collect();
    ids.sort();
    for id in ids {
        println!("{id}");
    }
}

#[cfg(test)]
mod tests {
    use fixture_server::FixtureControls;

    use super::*;

    async fn demo_directory() -> (ApiClient, FixtureControls) {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/directory.json");
        let fixture = Fixture::builder()
            .dataset(Dataset::from_path(path).unwrap())
            .build();
        let controls = fixture.controls();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = fixture_server::spawn_with_listener(fixture, listener).unwrap();

        let settings = AppConfig {
            base_url: format!("http://{addr}/api/"),
            token: Some("fixture-token".to_string()),
            ..AppConfig::default()
        };
        (connect(&settings).await.unwrap(), controls)
    }

    #[tokio::test]
    async fn intersection_of_group_members() {
        let (client, _) = demo_directory().await;
        let groups = ["grp_saljare".to_string(), "grp_sverige".to_string()];

        let members = members_of_every(&client, &groups).await.unwrap();

        let expected: HashSet<String> = ["acc2", "acc7", "acc8"]
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(members, expected);
    }

    #[tokio::test]
    async fn every_group_resolves_against_its_own_snapshot() {
        let (client, controls) = demo_directory().await;
        let groups = ["grp_saljare".to_string(), "grp_sverige".to_string()];

        members_of_every(&client, &groups).await.unwrap();

        // saljare: groups + itself; sverige: groups + itself, malmo, stockholm
        assert_eq!(controls.request_count(), 6);
    }

    #[tokio::test]
    async fn no_groups_means_no_members() {
        let (client, controls) = demo_directory().await;

        let members = members_of_every(&client, &[]).await.unwrap();

        assert!(members.is_empty());
        assert_eq!(controls.request_count(), 0);
    }
}
