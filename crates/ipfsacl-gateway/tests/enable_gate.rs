//! Enable gate behaviour.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod fakes;

use fakes::{harness, harness_with, scope, ScriptedPrompt};

use ipfsacl_core::error::AclError;
use ipfsacl_core::model::{EnableOpts, PermissionTarget};
use ipfsacl_gateway::gate::ProxyState;

const PAGE: &str = "https://ipfs.io/app/index.html";

fn cmds(list: &[&str]) -> EnableOpts {
    EnableOpts::with_commands(list.iter().copied())
}

#[tokio::test]
async fn disabled_proxy_fails_before_store_and_prompt() {
    let disabled = [
        ProxyState { proxy_enabled: false, ..ProxyState::enabled() },
        ProxyState { integrations: false, ..ProxyState::enabled() },
        ProxyState { disabled_hosts: vec!["ipfs.io".into()], ..ProxyState::enabled() },
    ];

    for state in disabled {
        let h = harness_with(state, ScriptedPrompt::new(true, false));
        let page = scope(PAGE);

        for opts in [None, Some(cmds(&[])), Some(cmds(&["id"])), Some(cmds(&["config.set"]))] {
            let err = h.gate.enable(&page, opts.as_ref()).await.unwrap_err();
            assert!(matches!(err, AclError::AccessDisabled), "got {err:?}");
        }
        assert_eq!(h.acl.get_count(), 0);
        assert!(h.acl.writes().is_empty());
        assert!(h.prompt.calls().is_empty());
    }
}

#[tokio::test]
async fn no_options_is_a_noop() {
    let h = harness(ScriptedPrompt::new(false, false));
    let page = scope(PAGE);

    h.gate.enable(&page, None).await.unwrap();
    h.gate.enable(&page, Some(&EnableOpts::default())).await.unwrap();

    assert_eq!(h.acl.get_count(), 0);
    assert!(h.acl.writes().is_empty());
    assert!(h.prompt.calls().is_empty());
}

#[tokio::test]
async fn non_whitelisted_command_never_prompts() {
    let h = harness(ScriptedPrompt::new(true, true));
    let page = scope(PAGE);

    let err = h
        .gate
        .enable(&page, Some(&cmds(&["id", "files.add", "config.set", "version"])))
        .await
        .unwrap_err();

    match err {
        AclError::CommandNotWhitelisted(cmd) => assert_eq!(cmd, "config.set"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(h.acl.writes().is_empty());
    assert!(h.prompt.calls().is_empty());
    // Commands after the offending one are not looked up.
    assert_eq!(h.acl.get_count(), 2);
}

#[tokio::test]
async fn prompts_only_for_missing_commands() {
    let h = harness(ScriptedPrompt::new(true, false));
    let page = scope(PAGE);
    h.acl.seed(&page, &["id"], true).await;

    h.gate.enable(&page, Some(&cmds(&["id", "files.add"]))).await.unwrap();

    assert_eq!(h.prompt.calls(), vec![vec!["files.add".to_string()]]);
    assert_eq!(
        h.acl.writes(),
        vec![(page.clone(), PermissionTarget::Commands(vec!["files.add".into()]), true)]
    );
}

#[tokio::test]
async fn prior_denial_wins_over_prompting() {
    let h = harness(ScriptedPrompt::new(true, true));
    let page = scope(PAGE);
    h.acl.seed(&page, &["id"], false).await;

    let err = h
        .gate
        .enable(&page, Some(&cmds(&["id", "files.add"])))
        .await
        .unwrap_err();

    match err {
        AclError::AccessDenied { scope, permissions } => {
            assert_eq!(scope, page);
            assert_eq!(permissions, vec!["id".to_string()]);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(h.prompt.calls().is_empty());
    assert!(h.acl.writes().is_empty());
}

#[tokio::test]
async fn wildcard_grant_writes_single_record() {
    let h = harness(ScriptedPrompt::new(true, true));
    let page = scope(PAGE);

    h.gate
        .enable(&page, Some(&cmds(&["id", "files.add", "pin.add"])))
        .await
        .unwrap();

    assert_eq!(h.prompt.calls().len(), 1);
    assert_eq!(h.prompt.calls()[0].len(), 3);
    assert_eq!(h.acl.writes(), vec![(page.clone(), PermissionTarget::Wildcard, true)]);

    // The wildcard now covers whitelisted commands that were never asked about.
    h.gate.enable(&page, Some(&cmds(&["version"]))).await.unwrap();
    assert_eq!(h.prompt.calls().len(), 1);
}

#[tokio::test]
async fn user_denial_is_persisted_then_reported() {
    let h = harness(ScriptedPrompt::new(false, false));
    let page = scope(PAGE);

    let err = h
        .gate
        .enable(&page, Some(&cmds(&["id", "files.add"])))
        .await
        .unwrap_err();

    match err {
        AclError::AccessDenied { permissions, .. } => {
            assert_eq!(permissions, vec!["id".to_string(), "files.add".to_string()]);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        h.acl.writes(),
        vec![(
            page.clone(),
            PermissionTarget::Commands(vec!["id".into(), "files.add".into()]),
            false
        )]
    );

    // Asking again fails fast on the recorded denial.
    let err = h.gate.enable(&page, Some(&cmds(&["id"]))).await.unwrap_err();
    assert!(matches!(err, AclError::AccessDenied { .. }));
    assert_eq!(h.prompt.calls().len(), 1);
}

#[tokio::test]
async fn granted_commands_are_not_asked_twice() {
    let h = harness(ScriptedPrompt::new(true, false));
    let page = scope(PAGE);

    h.gate.enable(&page, Some(&cmds(&["id"]))).await.unwrap();
    h.gate.enable(&page, Some(&cmds(&["id"]))).await.unwrap();

    assert_eq!(h.prompt.calls(), vec![vec!["id".to_string()]]);
    assert_eq!(h.acl.writes().len(), 1);
}

#[tokio::test]
async fn duplicate_commands_are_asked_once() {
    let h = harness(ScriptedPrompt::new(true, false));
    let page = scope(PAGE);

    h.gate
        .enable(&page, Some(&cmds(&["id", "files.add", "id"])))
        .await
        .unwrap();

    assert_eq!(
        h.prompt.calls(),
        vec![vec!["id".to_string(), "files.add".to_string()]]
    );
}

#[tokio::test]
async fn site_wide_grant_covers_subdirectory_pages() {
    let h = harness(ScriptedPrompt::new(false, false));
    h.acl.seed(&scope("https://ipfs.io/"), &["id"], true).await;

    h.gate.enable(&scope(PAGE), Some(&cmds(&["id"]))).await.unwrap();
    assert!(h.prompt.calls().is_empty());
}

#[tokio::test]
async fn decisions_are_counted() {
    let h = harness(ScriptedPrompt::new(false, false));
    let page = scope(PAGE);

    h.gate.enable(&page, None).await.unwrap();
    let _ = h.gate.enable(&page, Some(&cmds(&["config.set"]))).await;
    let _ = h.gate.enable(&page, Some(&cmds(&["id"]))).await;

    let d = &h.metrics.decisions;
    assert_eq!(d.get(&[("op", "enable"), ("outcome", "ok")]), 1);
    assert_eq!(d.get(&[("op", "enable"), ("outcome", "not_whitelisted")]), 1);
    assert_eq!(d.get(&[("op", "enable"), ("outcome", "denied")]), 1);
}

#[tokio::test]
async fn wildcard_denial_replaces_earlier_grants() {
    let h = harness(ScriptedPrompt::new(false, true));
    let page = scope(PAGE);
    h.acl.seed(&page, &["id"], true).await;

    let err = h
        .gate
        .enable(&page, Some(&cmds(&["id", "files.add", "pin.add"])))
        .await
        .unwrap_err();

    match err {
        AclError::AccessDenied { permissions, .. } => {
            assert_eq!(permissions, vec!["files.add".to_string(), "pin.add".to_string()]);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(h.acl.writes(), vec![(page.clone(), PermissionTarget::Wildcard, false)]);

    // The earlier grant for `id` is gone; the wildcard denial answers without a prompt.
    let err = h.gate.enable(&page, Some(&cmds(&["id"]))).await.unwrap_err();
    match err {
        AclError::AccessDenied { permissions, .. } => assert_eq!(permissions, vec!["id".to_string()]),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(h.prompt.calls().len(), 1);
}

#[tokio::test]
async fn site_denial_holds_after_subdirectory_grant() {
    let h = harness(ScriptedPrompt::new(true, false));
    let page = scope("https://ipfs.io/docs/page.html");
    h.acl.seed(&scope("https://ipfs.io/"), &["id"], false).await;

    let err = h.gate.enable(&page, Some(&cmds(&["id"]))).await.unwrap_err();
    assert!(matches!(err, AclError::AccessDenied { .. }));

    h.gate.enable(&page, Some(&cmds(&["version"]))).await.unwrap();

    let err = h.gate.enable(&page, Some(&cmds(&["id"]))).await.unwrap_err();
    assert!(matches!(err, AclError::AccessDenied { .. }));
    assert_eq!(h.prompt.calls(), vec![vec!["version".to_string()]]);
}
