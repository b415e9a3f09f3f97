//! Behaviour tests for path creation and enrolment.
//!
//! Covers the atomic path+character create, name addressing, and the
//! idempotent join semantics over the unique (user, path) pair.

// Shared harness has extra helpers used by other integration suites.
#[allow(dead_code)]
mod support;

use serde_json::json;
use uuid::Uuid;

use support::{TestContext, documents};

async fn create_path(ctx: &TestContext, name: &str, slot: u16) -> serde_json::Value {
    ctx.execute(
        "createPath",
        documents::CREATE_PATH,
        json!({
            "path": { "name": name },
            "character": { "index": slot, "name": "ellie" },
        }),
    )
    .await
    .expect("createPath succeeds")
}

#[actix_rt::test]
async fn creating_a_path_also_creates_exactly_one_character() {
    let mut ctx = TestContext::start().await;
    ctx.signup_workflow("ada@example.com").await;

    create_path(&ctx, "intro-js", 0).await;

    let characters = ctx
        .execute("characters", documents::CHARACTERS, json!({}))
        .await
        .expect("characters resolves");
    let characters = characters.as_array().expect("characters is a list");
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0]["name"], "ellie");
    assert_eq!(characters[0]["index"], 0);
}

#[actix_rt::test]
async fn paths_are_addressable_by_name() {
    let mut ctx = TestContext::start().await;
    ctx.signup_workflow("ada@example.com").await;
    create_path(&ctx, "intro-js", 0).await;

    let path = ctx
        .execute(
            "getPathByName",
            documents::GET_PATH_BY_NAME,
            json!({ "name": "intro-js" }),
        )
        .await
        .expect("lookup succeeds");
    assert_eq!(path["name"], "intro-js");

    let err = ctx
        .execute(
            "getPathByName",
            documents::GET_PATH_BY_NAME,
            json!({ "name": "nonexistent" }),
        )
        .await
        .expect_err("unknown name must fail");
    assert_eq!(err.code.as_deref(), Some("not_found"));
}

#[actix_rt::test]
async fn a_failed_character_write_leaves_no_path_behind() {
    let mut ctx = TestContext::start().await;
    ctx.signup_workflow("ada@example.com").await;

    // Occupy slot 0, then ask createPath to reuse it: the character write
    // fails, so the path must not persist either.
    ctx.execute(
        "createCharacter",
        documents::CREATE_CHARACTER,
        json!({ "character": { "index": 0, "name": "max" } }),
    )
    .await
    .expect("character create succeeds");

    let err = ctx
        .execute(
            "createPath",
            documents::CREATE_PATH,
            json!({
                "path": { "name": "doomed-path" },
                "character": { "index": 0, "name": "ellie" },
            }),
        )
        .await
        .expect_err("createPath must fail");
    assert_eq!(err.code.as_deref(), Some("conflict"));

    let err = ctx
        .execute(
            "getPathByName",
            documents::GET_PATH_BY_NAME,
            json!({ "name": "doomed-path" }),
        )
        .await
        .expect_err("path must be absent");
    assert_eq!(err.code.as_deref(), Some("not_found"));
}

#[actix_rt::test]
async fn invalid_character_payloads_fail_validation_and_persist_nothing() {
    let mut ctx = TestContext::start().await;
    ctx.signup_workflow("ada@example.com").await;

    let err = ctx
        .execute(
            "createPath",
            documents::CREATE_PATH,
            json!({
                "path": { "name": "doomed-path" },
                "character": { "index": 0, "name": "   " },
            }),
        )
        .await
        .expect_err("blank character name must fail");
    assert_eq!(err.code.as_deref(), Some("invalid_request"));

    let err = ctx
        .execute(
            "getPathByName",
            documents::GET_PATH_BY_NAME,
            json!({ "name": "doomed-path" }),
        )
        .await
        .expect_err("path must be absent");
    assert_eq!(err.code.as_deref(), Some("not_found"));
}

#[actix_rt::test]
async fn duplicate_path_names_conflict() {
    let mut ctx = TestContext::start().await;
    ctx.signup_workflow("ada@example.com").await;
    create_path(&ctx, "intro-js", 0).await;

    let err = ctx
        .execute(
            "createPath",
            documents::CREATE_PATH,
            json!({
                "path": { "name": "intro-js" },
                "character": { "index": 1, "name": "max" },
            }),
        )
        .await
        .expect_err("duplicate name must fail");
    assert_eq!(err.code.as_deref(), Some("conflict"));
}

#[actix_rt::test]
async fn joining_twice_is_idempotent_and_both_calls_report_success() {
    let mut creator = TestContext::start().await;
    creator.signup_workflow("ada@example.com").await;
    let path = create_path(&creator, "intro-js", 0).await;
    let path_id = path["id"].as_str().expect("path id").to_owned();

    // A second account joins through the same transport.
    let mut joiner_ctx = creator;
    joiner_ctx.signup_workflow("grace@example.com").await;

    for _ in 0..2 {
        let joined = joiner_ctx
            .execute(
                "joinPath",
                documents::JOIN_PATH,
                json!({ "pathId": path_id }),
            )
            .await
            .expect("join succeeds");
        assert_eq!(joined, json!(true));
    }

    let mine = joiner_ctx
        .execute("myPaths", documents::MY_PATHS, json!({}))
        .await
        .expect("myPaths resolves");
    assert_eq!(mine.as_array().expect("list").len(), 1, "one membership row");
}

#[actix_rt::test]
async fn join_paths_accepts_a_collection() {
    let mut ctx = TestContext::start().await;
    ctx.signup_workflow("ada@example.com").await;
    let first = create_path(&ctx, "intro-js", 0).await;
    let second = create_path(&ctx, "advanced-js", 1).await;

    let mut joiner = ctx;
    joiner.signup_workflow("grace@example.com").await;
    let joined = joiner
        .execute(
            "joinPaths",
            documents::JOIN_PATHS,
            json!({ "paths": [first["id"], second["id"]] }),
        )
        .await
        .expect("joinPaths succeeds");
    assert_eq!(joined, json!(true));

    let mine = joiner
        .execute("myPaths", documents::MY_PATHS, json!({}))
        .await
        .expect("myPaths resolves");
    let names: Vec<&str> = mine
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|path| path["name"].as_str())
        .collect();
    assert_eq!(names, vec!["intro-js", "advanced-js"], "join order preserved");
}

#[actix_rt::test]
async fn joining_an_unknown_path_is_not_found() {
    let mut ctx = TestContext::start().await;
    ctx.signup_workflow("ada@example.com").await;

    let err = ctx
        .execute(
            "joinPath",
            documents::JOIN_PATH,
            json!({ "pathId": Uuid::new_v4() }),
        )
        .await
        .expect_err("unknown path must fail");
    assert_eq!(err.code.as_deref(), Some("not_found"));
}

#[actix_rt::test]
async fn creators_are_enrolled_in_their_own_paths() {
    let mut ctx = TestContext::start().await;
    ctx.signup_workflow("ada@example.com").await;
    create_path(&ctx, "intro-js", 0).await;

    let mine = ctx
        .execute("myPaths", documents::MY_PATHS, json!({}))
        .await
        .expect("myPaths resolves");
    let names: Vec<&str> = mine
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|path| path["name"].as_str())
        .collect();
    assert_eq!(names, vec!["intro-js"]);
}
