use std::fs;

use anyhow::Result;
use paramfetch::{
    cli::{run_flow, FlowError, ScriptedLineSource},
    lib::errors::ProfileError,
    lib::fs::{ENV_OUTPUT_FILE, JSON_OUTPUT_FILE},
};

use crate::common::{environments_tree, StubFetch, StubStore};

#[tokio::test]
async fn full_flow_writes_outputs_in_response_order() -> Result<()> {
    let tree = environments_tree(&[("shop", &["dev", "prod"])])?;
    let store = StubStore::new(
        &["default", "staging"],
        StubStore::parameters(&[
            ("/shop/dev/DB_HOST", "db.internal"),
            ("/shop/dev/DB_PORT", "5432"),
            ("/shop/dev/cache/TTL", "60"),
        ]),
    );
    let mut lines = ScriptedLineSource::new(["2", "1", "1"]);

    run_flow(tree.path(), &store, &mut lines)
        .await
        .expect("flow should complete");

    assert_eq!(
        store.recorded_requests(),
        vec![("staging".to_string(), "/shop/dev/".to_string())]
    );

    let target = tree.path().join("shop/dev");
    let env = fs::read_to_string(target.join(ENV_OUTPUT_FILE))?;
    assert_eq!(env, "DB_HOST=db.internal\nDB_PORT=5432\nTTL=60\n");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(target.join(JSON_OUTPUT_FILE))?)?;
    let object = json.as_object().expect("JSON output should be an object");
    assert_eq!(object.len(), 3);
    assert_eq!(object.get("DB_HOST").and_then(|v| v.as_str()), Some("db.internal"));
    assert_eq!(object.get("DB_PORT").and_then(|v| v.as_str()), Some("5432"));
    assert_eq!(object.get("TTL").and_then(|v| v.as_str()), Some("60"));
    Ok(())
}

#[tokio::test]
async fn json_and_env_outputs_agree_on_every_key() -> Result<()> {
    let tree = environments_tree(&[("billing", &["prod"])])?;
    let store = StubStore::new(
        &["default"],
        StubStore::parameters(&[
            ("/billing/prod/API_KEY", "s3cr3t"),
            ("/billing/prod/ENDPOINT", "https://api.example.com"),
        ]),
    );
    let mut lines = ScriptedLineSource::new(["1", "1", "1"]);

    run_flow(tree.path(), &store, &mut lines)
        .await
        .expect("flow should complete");

    let target = tree.path().join("billing/prod");
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(target.join(JSON_OUTPUT_FILE))?)?;
    let env = fs::read_to_string(target.join(ENV_OUTPUT_FILE))?;
    let env_pairs: Vec<(&str, &str)> = env
        .lines()
        .map(|line| line.split_once('=').expect("env line should contain `=`"))
        .collect();

    let object = json.as_object().expect("JSON output should be an object");
    assert_eq!(object.len(), env_pairs.len());
    for (key, value) in env_pairs {
        assert_eq!(object.get(key).and_then(|v| v.as_str()), Some(value));
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_leaf_names_keep_the_last_value() -> Result<()> {
    let tree = environments_tree(&[("shop", &["dev"])])?;
    let store = StubStore::new(
        &["default"],
        StubStore::parameters(&[
            ("/shop/dev/db/HOST", "db.internal"),
            ("/shop/dev/cache/HOST", "cache.internal"),
        ]),
    );
    let mut lines = ScriptedLineSource::new(["1", "1", "1"]);

    run_flow(tree.path(), &store, &mut lines)
        .await
        .expect("flow should complete");

    let env = fs::read_to_string(tree.path().join("shop/dev").join(ENV_OUTPUT_FILE))?;
    assert_eq!(env, "HOST=cache.internal\n");
    Ok(())
}

#[tokio::test]
async fn fetch_failure_leaves_no_outputs_and_completes_normally() -> Result<()> {
    let tree = environments_tree(&[("shop", &["dev"])])?;
    let store = StubStore::new(&["default"], StubFetch::Failure);
    let mut lines = ScriptedLineSource::new(["1", "1", "1"]);

    run_flow(tree.path(), &store, &mut lines)
        .await
        .expect("a failed fetch must not abort the flow");

    let target = tree.path().join("shop/dev");
    assert!(!target.join(JSON_OUTPUT_FILE).exists());
    assert!(!target.join(ENV_OUTPUT_FILE).exists());
    Ok(())
}

#[tokio::test]
async fn empty_base_directory_ends_the_run_before_the_project_menu() -> Result<()> {
    let tree = environments_tree(&[])?;
    let store = StubStore::new(
        &["default"],
        StubStore::parameters(&[("/unused/unused/KEY", "value")]),
    );
    // Only the profile selection has input; a project prompt would hit EOF
    // and fail the flow.
    let mut lines = ScriptedLineSource::new(["1"]);

    run_flow(tree.path(), &store, &mut lines)
        .await
        .expect("empty base directory is a soft exit");

    assert!(store.recorded_requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_environment_listing_ends_the_run_softly() -> Result<()> {
    let tree = environments_tree(&[("shop", &[])])?;
    let store = StubStore::new(
        &["default"],
        StubStore::parameters(&[("/unused/unused/KEY", "value")]),
    );
    let mut lines = ScriptedLineSource::new(["1", "1"]);

    run_flow(tree.path(), &store, &mut lines)
        .await
        .expect("empty environment listing is a soft exit");

    assert!(store.recorded_requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_profile_list_is_fatal() -> Result<()> {
    let tree = environments_tree(&[("shop", &["dev"])])?;
    let store = StubStore::new(&[], StubFetch::Failure);
    let mut lines = ScriptedLineSource::new(Vec::<String>::new());

    let err = run_flow(tree.path(), &store, &mut lines)
        .await
        .expect_err("zero profiles must abort the run");

    assert!(matches!(
        err,
        FlowError::Profile(ProfileError::NoProfiles)
    ));
    Ok(())
}

#[tokio::test]
async fn rerunning_overwrites_prior_outputs() -> Result<()> {
    let tree = environments_tree(&[("shop", &["dev"])])?;

    let first = StubStore::new(
        &["default"],
        StubStore::parameters(&[("/shop/dev/OLD_KEY", "old")]),
    );
    let mut lines = ScriptedLineSource::new(["1", "1", "1"]);
    run_flow(tree.path(), &first, &mut lines)
        .await
        .expect("first run should complete");

    let second = StubStore::new(
        &["default"],
        StubStore::parameters(&[("/shop/dev/NEW_KEY", "new")]),
    );
    let mut lines = ScriptedLineSource::new(["1", "1", "1"]);
    run_flow(tree.path(), &second, &mut lines)
        .await
        .expect("second run should complete");

    let target = tree.path().join("shop/dev");
    let json = fs::read_to_string(target.join(JSON_OUTPUT_FILE))?;
    let env = fs::read_to_string(target.join(ENV_OUTPUT_FILE))?;
    assert!(!json.contains("OLD_KEY"), "outputs must not merge: {json}");
    assert_eq!(env, "NEW_KEY=new\n");
    Ok(())
}
