//! The admin CLI driven through its parser against a JSON data directory

use clap::Parser;
use pagestore_cli::{Cli, CliError, CommandRouter};
use pagestore_persistence::{BackendConfig, StoreConfig};

async fn run(config: &StoreConfig, args: &[&str]) -> Result<String, CliError> {
    let mut argv = vec!["pagestore"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    CommandRouter::execute(cli, config).await
}

fn json_config(dir: &std::path::Path) -> StoreConfig {
    StoreConfig {
        backend: BackendConfig::Json {
            data_dir: dir.to_path_buf(),
        },
        log_level: None,
    }
}

#[tokio::test]
async fn init_add_rename_remove() {
    let tmp = tempfile::tempdir().unwrap();
    let config = json_config(tmp.path());

    let out = run(&config, &["init"]).await.unwrap();
    assert!(out.starts_with("Seeded 1 route(s)"));

    run(
        &config,
        &["routes", "add", "/about", "About Page", "data/content/about.json"],
    )
    .await
    .unwrap();
    run(&config, &["routes", "rename", "/about", "About Us"])
        .await
        .unwrap();

    let got = run(&config, &["routes", "get", "/about"]).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&got).unwrap();
    assert_eq!(json["name"], "About Us");

    run(&config, &["routes", "remove", "/about"]).await.unwrap();
    let err = run(&config, &["routes", "get", "/about"]).await.unwrap_err();
    assert_eq!(err.user_message(), "Route not found: /about");
}

#[tokio::test]
async fn content_show_reads_seeded_homepage() {
    let tmp = tempfile::tempdir().unwrap();
    let config = json_config(tmp.path());
    run(&config, &["init"]).await.unwrap();

    let out = run(&config, &["content", "show", "homepage"]).await.unwrap();
    assert!(out.contains("Eng Manager"));
    assert!(tmp.path().join("page_content.json").exists());
}

#[tokio::test]
async fn invalid_path_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let config = json_config(tmp.path());

    let err = run(&config, &["routes", "add", "about", "About"])
        .await
        .unwrap_err();
    assert!(err.user_message().contains("about"));
    assert!(!tmp.path().join("routes.json").exists());
}
