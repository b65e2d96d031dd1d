// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn parse(argv: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("mqlog").chain(argv.iter().copied())).unwrap()
}

fn no_prompt(_: &str, _: &str) -> Result<String, CliError> {
    panic!("password prompt should not be shown")
}

#[test]
fn defaults_match_reference_logger() {
    let args = parse(&[]);
    assert_eq!(args.host, "127.0.0.1");
    assert_eq!(args.port, 1883);
    assert_eq!(args.team, "u01");
    assert_eq!(args.csv, PathBuf::from("mqtt_log.csv"));
    assert!(args.ssh_host.is_none());
    assert_eq!(args.ssh_cmd, "systemctl is-active mosquitto");
    assert_eq!(args.ssh_expect, "active");
    assert!(!args.require_precheck);
}

#[test]
fn wildcard_team_is_rejected() {
    for bad in ["u01/#", "+", "", "/u01", "u01/"] {
        let result = Args::try_parse_from(["mqlog", "--team", bad]);
        assert!(result.is_err(), "team {:?} should be rejected", bad);
    }
}

#[test]
fn nested_team_prefix_is_allowed() {
    assert_eq!(parse(&["--team", "lab/u01"]).team, "lab/u01");
}

#[test]
fn no_ssh_host_skips_precheck() {
    let args = parse(&["--ssh-user", "pi"]);
    assert!(args.precheck(no_prompt).unwrap().is_none());
}

#[test]
fn supplied_password_is_used_without_prompt() {
    let args = parse(&[
        "--ssh-host",
        "broker.lan",
        "--ssh-user",
        "pi",
        "--ssh-pass",
        "secret",
        "--require-precheck",
    ]);
    let check = args.precheck(no_prompt).unwrap().unwrap();
    assert_eq!(check.target.host, "broker.lan");
    assert_eq!(check.target.user, "pi");
    assert_eq!(check.target.password.as_deref(), Some("secret"));
    assert_eq!(check.policy, PrecheckPolicy::Require);
}

#[test]
fn missing_password_is_prompted() {
    let args = parse(&["--ssh-host", "broker.lan", "--ssh-user", "pi"]);
    let check = args
        .precheck(|user, host| {
            assert_eq!((user, host), ("pi", "broker.lan"));
            Ok("typed".to_string())
        })
        .unwrap()
        .unwrap();
    assert_eq!(check.target.password.as_deref(), Some("typed"));
    assert_eq!(check.policy, PrecheckPolicy::Warn);
}

#[test]
fn empty_prompt_answer_means_key_auth() {
    let args = parse(&["--ssh-host", "broker.lan", "--ssh-user", "pi"]);
    let check = args
        .precheck(|_, _| Ok(String::new()))
        .unwrap()
        .unwrap();
    assert!(check.target.password.is_none());
}
