use client::{ApiClient, ClientError};
use fixture_server::{Dataset, Fixture};
use serde_json::json;

fn dataset() -> Dataset {
    Dataset {
        accounts: vec![
            json!({"id": "acc1", "employeeId": "1337", "firstName": "Vera", "lastName": "Scope",
                   "active": true, "salary": 40000, "salaryCurrency": "SEK", "employedSince": 1577836800}),
            json!({"id": "acc2", "employeeId": "1338", "firstName": "Vera", "lastName": "Other",
                   "active": false, "salary": 3000, "salaryCurrency": "EUR", "employedSince": 1577836800}),
            json!({"id": "acc3", "employeeId": "1339", "firstName": "Ola", "lastName": "Dup",
                   "active": true, "salary": 1, "salaryCurrency": "DKK", "employedSince": 0}),
            json!({"id": "acc3", "employeeId": "1340", "firstName": "Ola", "lastName": "Dup",
                   "active": true, "salary": 1, "salaryCurrency": "DKK", "employedSince": 0}),
        ],
        groups: vec![
            json!({"id": "grp_malmo", "active": true}),
            json!({"id": "grp_lund", "active": false}),
        ],
        relationships: vec![
            json!({"id": "r1", "groupId": "grp_malmo", "memberId": "acc1"}),
            json!({"id": "r2", "groupId": "grp_lund", "memberId": "acc1"}),
            json!({"id": "r3", "groupId": "grp_malmo", "memberId": "acc2"}),
            json!({"id": "m1", "accountId": "acc43", "managedId": "acc1"}),
            json!({"id": "m2", "accountId": "acc44", "managedId": "acc2"}),
            json!({"id": "m3", "accountId": "acc45", "managedId": "acc2"}),
        ],
    }
}

async fn logged_in() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let fixture = Fixture::builder()
        .dataset(dataset())
        .credentials("api", "secret")
        .token("t0k3n")
        .build();
    let addr = fixture_server::spawn_with_listener(fixture, listener).unwrap();

    let client = ApiClient::builder()
        .base_url(&format!("http://{addr}/api"))
        .build()
        .unwrap();
    let token = client.authenticate("api", "secret").await.unwrap();
    assert_eq!(token, "t0k3n");
    client.with_token(token)
}

#[tokio::test]
async fn authenticate_rejects_bad_credentials() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = fixture_server::spawn_with_listener(Fixture::builder().build(), listener).unwrap();
    let client = ApiClient::builder()
        .base_url(&format!("http://{addr}/api/"))
        .build()
        .unwrap();

    let err = client.authenticate("api", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn accounts_by_employee_and_first_name() {
    let client = logged_in().await;

    let vera = client.accounts_by_employee_id("1337").await.unwrap();
    assert_eq!(vera.len(), 1);
    assert_eq!(vera[0].full_name(), "Vera Scope");

    let named = client.accounts_by_first_name("Vera").await.unwrap();
    assert_eq!(named.len(), 2);
    assert_eq!(client.all_accounts().await.unwrap().len(), 4);
}

#[tokio::test]
async fn account_by_id_requires_exactly_one_match() {
    let client = logged_in().await;

    assert_eq!(client.account_by_id("acc1").await.unwrap().first_name, "Vera");

    let err = client.account_by_id("acc404").await.unwrap_err();
    assert!(matches!(err, ClientError::NotUnique { found: 0, .. }));

    let err = client.account_by_id("acc3").await.unwrap_err();
    assert!(matches!(err, ClientError::NotUnique { found: 2, .. }));
}

#[tokio::test]
async fn active_accounts_by_ids_drops_inactive_and_unknown() {
    let client = logged_in().await;
    let ids = ["acc2".to_string(), "acc1".to_string(), "acc999".to_string()];

    let active = client.active_accounts_by_ids(&ids).await.unwrap();

    let ids: Vec<&str> = active.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["acc1"]);
}

#[tokio::test]
async fn group_id_projections() {
    let client = logged_in().await;

    let all = client.all_group_ids().await.unwrap();
    assert!(all.contains("grp_malmo") && all.contains("grp_lund"));

    let active = client.active_group_ids().await.unwrap();
    assert_eq!(active.len(), 1);
    assert!(active.contains("grp_malmo"));
}

#[tokio::test]
async fn relationships_by_member_and_group() {
    let client = logged_in().await;

    let by_member = client.relationships_by_member_id("acc1").await.unwrap();
    assert_eq!(by_member.len(), 2);

    let by_group = client.relationships_by_group_id("grp_malmo").await.unwrap();
    let members: Vec<&str> = by_group
        .iter()
        .filter_map(|rel| rel.member_id.as_deref())
        .collect();
    assert_eq!(members, ["acc1", "acc2"]);
}

#[tokio::test]
async fn manager_relationship_is_unique() {
    let client = logged_in().await;

    let edge = client.manager_relationship("acc1").await.unwrap();
    assert_eq!(edge.account_id.as_deref(), Some("acc43"));

    let err = client.manager_relationship("acc2").await.unwrap_err();
    assert!(matches!(err, ClientError::NotUnique { found: 2, .. }));
}
