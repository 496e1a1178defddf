mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{list_id, TestUser};

#[tokio::test]
async fn index_with_no_lists_is_empty() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/lists")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "list": [] }));
    Ok(())
}

#[tokio::test]
async fn create_binds_owner_to_caller() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();

    let res = server
        .create_list(&user, json!({ "title": "A", "owner": "evil" }))
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<Value>().await?;
    let list = &body["list"];
    assert_eq!(list["title"], "A");
    assert_eq!(list["owner"], json!(user.id));
    assert_ne!(list["owner"], "evil");
    assert!(list["id"].is_string(), "created list should carry an id: {}", body);
    Ok(())
}

#[tokio::test]
async fn create_then_show_and_index() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();

    let first = server.create_list_ok(&user, json!({ "title": "Groceries", "items": ["milk"] })).await?;
    let second = server.create_list_ok(&user, json!({ "title": "Chores" })).await?;

    let res = server.get_list(&list_id(&first)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let shown = res.json::<Value>().await?;
    assert_eq!(shown["list"], first);
    assert_eq!(shown["list"]["items"], json!(["milk"]));

    let res = server.client.get(server.url("/lists")).send().await?;
    let body = res.json::<Value>().await?;
    let lists = body["list"].as_array().expect("list should be an array");
    assert_eq!(lists.len(), 2);
    assert!(lists.contains(&first));
    assert!(lists.contains(&second));
    Ok(())
}

#[tokio::test]
async fn create_rejects_missing_list_key() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();

    let res = server
        .client
        .post(server.url("/lists"))
        .bearer_auth(&user.token)
        .json(&json!({ "title": "no envelope" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "UNPROCESSABLE_ENTITY");
    Ok(())
}

#[tokio::test]
async fn create_rejects_non_object_list() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();

    let res = server.create_list(&user, json!("just a string")).await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn create_rejects_empty_attribute_name() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();

    let res = server.create_list(&user, json!({ "": "nameless" })).await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert!(body["field_errors"].is_object(), "expected field errors: {}", body);
    Ok(())
}

#[tokio::test]
async fn show_unknown_id_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.get_list(&uuid::Uuid::new_v4().to_string()).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn malformed_id_is_unprocessable() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.get_list("not-an-id").await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn owner_update_merges_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();
    let created = server
        .create_list_ok(&user, json!({ "title": "A", "color": "red" }))
        .await?;
    let id = list_id(&created);

    let res = server
        .update_list(&user, &id, json!({ "title": "B", "pinned": true }))
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let shown = server.get_list(&id).await?.json::<Value>().await?;
    assert_eq!(shown["list"]["title"], "B");
    assert_eq!(shown["list"]["color"], "red");
    assert_eq!(shown["list"]["pinned"], true);
    assert_eq!(shown["list"]["owner"], json!(user.id));
    Ok(())
}

#[tokio::test]
async fn update_cannot_change_owner() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();
    let other = TestUser::new();
    let created = server.create_list_ok(&user, json!({ "title": "A" })).await?;
    let id = list_id(&created);

    let res = server
        .update_list(&user, &id, json!({ "owner": other.id, "title": "B" }))
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let shown = server.get_list(&id).await?.json::<Value>().await?;
    assert_eq!(shown["list"]["owner"], json!(user.id));
    assert_eq!(shown["list"]["title"], "B");
    Ok(())
}

#[tokio::test]
async fn blank_update_leaves_record_unchanged() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();
    let created = server
        .create_list_ok(&user, json!({ "title": "A", "notes": "keep me" }))
        .await?;
    let id = list_id(&created);

    let res = server
        .update_list(&user, &id, json!({ "title": "", "notes": "  ", "owner": "" }))
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let shown = server.get_list(&id).await?.json::<Value>().await?;
    assert_eq!(shown["list"], created);
    Ok(())
}

#[tokio::test]
async fn non_owner_update_is_forbidden() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = TestUser::new();
    let intruder = TestUser::new();
    let created = server.create_list_ok(&owner, json!({ "title": "Mine" })).await?;
    let id = list_id(&created);

    let res = server.update_list(&intruder, &id, json!({ "title": "Yours" })).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "FORBIDDEN");

    let shown = server.get_list(&id).await?.json::<Value>().await?;
    assert_eq!(shown["list"], created);
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();

    let res = server
        .update_list(&user, &uuid::Uuid::new_v4().to_string(), json!({ "title": "B" }))
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn non_owner_delete_is_forbidden() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = TestUser::new();
    let intruder = TestUser::new();
    let created = server.create_list_ok(&owner, json!({ "title": "Mine" })).await?;
    let id = list_id(&created);

    let res = server.delete_list(&intruder, &id).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.get_list(&id).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn owner_delete_removes_list() -> Result<()> {
    let server = common::spawn_server().await?;
    let user = TestUser::new();
    let created = server.create_list_ok(&user, json!({ "title": "Temp" })).await?;
    let id = list_id(&created);

    let res = server.delete_list(&user, &id).await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = server.get_list(&id).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.delete_list(&user, &id).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
