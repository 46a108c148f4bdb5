use std::fs;

use clap::Parser;
use tempfile::tempdir;
use vista_core::cli::GlobalCli;
use vista_core::commands::dispatch;
use vista_core::config::{Config, resolve_config_path};

fn run_command(cfg: &Config, args: &[&str]) -> String {
    let cli = GlobalCli::parse_from(std::iter::once("vista").chain(args.iter().copied()));
    let mut out = Vec::new();
    dispatch(cfg, cli.command, &mut out).expect("dispatch");
    String::from_utf8(out).expect("utf8 output")
}

#[test]
fn information_file_is_resolved_next_to_config() {
    let temp = tempdir().expect("tempdir");
    let markup = "<h3>Maintenance</h3>\n<p>Saturday <a href=\"/status\">window</a></p>\n";
    fs::write(temp.path().join("info.html"), markup).expect("write info");
    let cfg_path = temp.path().join("vista.toml");
    fs::write(&cfg_path, "[frontend]\ninformation_file = \"info.html\"\n").expect("write config");

    let cfg = Config::load(Some(cfg_path.as_path())).expect("load config");
    assert_eq!(cfg.loaded_from.as_deref(), Some(cfg_path.as_path()));

    let info = cfg.information().expect("information").expect("present");
    assert_eq!(info.as_str(), markup);

    assert_eq!(run_command(&cfg, &["info"]), markup);
}

#[test]
fn inline_information_wins_over_file() {
    let temp = tempdir().expect("tempdir");
    let cfg_path = temp.path().join("vista.toml");
    fs::write(
        &cfg_path,
        "[frontend]\ninformation = \"<p>inline</p>\"\ninformation_file = \"missing.html\"\n",
    )
    .expect("write config");

    let cfg = Config::load(Some(cfg_path.as_path())).expect("load config");
    let info = cfg.information().expect("information");
    assert_eq!(info.map(|m| m.into_string()), Some("<p>inline</p>".to_string()));
}

#[test]
fn missing_information_file_is_an_error() {
    let temp = tempdir().expect("tempdir");
    let cfg_path = temp.path().join("vista.toml");
    fs::write(&cfg_path, "[frontend]\ninformation_file = \"gone.html\"\n").expect("write config");

    let cfg = Config::load(Some(cfg_path.as_path())).expect("load config");
    let err = cfg.information().expect_err("missing file");
    assert!(format!("{err:#}").contains("gone.html"));
}

#[test]
fn missing_config_file_is_an_error() {
    let temp = tempdir().expect("tempdir");
    let err = Config::load(Some(temp.path().join("nope.toml").as_path())).expect_err("missing config");
    assert!(format!("{err:#}").contains("failed to read"));
}

#[test]
fn explicit_path_wins_resolution() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("custom.toml");
    assert_eq!(resolve_config_path(Some(path.as_path())).expect("resolve"), Some(path));
}

#[test]
fn info_prints_nothing_without_information() {
    let cfg = Config::default();
    assert_eq!(run_command(&cfg, &["info"]), "");
}

#[test]
fn legend_command_replays_from_config() {
    let cfg = Config::from_toml_str(
        "[panel.legend]\nposition = \"bottom\"\nmode = \"table\"\nvalues = [\"sum\", \"min\"]\n",
        None,
    )
    .expect("parse config");

    let out = run_command(&cfg, &["legend", "--from-config", "toggle=sum"]);
    assert_eq!(out, "{\"position\":\"bottom\",\"mode\":\"table\",\"values\":[\"min\"]}\n");

    let out = run_command(&cfg, &["legend", "--from-config", "mode=list"]);
    assert_eq!(out, "{\"position\":\"bottom\",\"mode\":\"list\"}\n");
}

#[test]
fn legend_command_defaults_to_hidden_start() {
    let cfg = Config::default();
    assert_eq!(run_command(&cfg, &["legend"]), "null\n");
    assert_eq!(run_command(&cfg, &["legend", "show"]), "{\"position\":\"bottom\"}\n");
    assert_eq!(
        run_command(&cfg, &["legend", "--from", r#"{"position":"bottom"}"#, "position=right"]),
        "{\"position\":\"right\"}\n"
    );
    assert_eq!(
        run_command(&cfg, &["legend", "--from", r#"{"position":"bottom","mode":"table"}"#, "hide"]),
        "null\n"
    );
}

#[test]
fn legend_command_rejects_bad_actions() {
    let cfg = Config::default();
    let cli = GlobalCli::parse_from(["vista", "legend", "toggle=median"]);
    let mut out = Vec::new();
    let err = dispatch(&cfg, cli.command, &mut out).expect_err("bad action");
    assert!(format!("{err:#}").contains("invalid action `toggle=median`"));
}

#[test]
fn config_command_prints_snapshot() {
    let mut cfg = Config::default();
    cfg.apply_overrides([
        ("frontend.information".to_string(), "<p>hi</p>".to_string()),
        ("panel.legend.position".to_string(), "right".to_string()),
    ])
    .expect("overrides");

    let out = run_command(&cfg, &["config"]);
    let value: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(
        value,
        serde_json::json!({
            "information": "<p>hi</p>",
            "legend": { "position": "right" },
            "loaded_from": null
        })
    );
}
