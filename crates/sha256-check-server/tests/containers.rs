//! Integration test: the container route (`/<profile>/lxc?id=`).

mod common;

use common::fixture::{put, sha, start};
use common::http_client::get_json;
use serde_json::json;
use sha256_check_core::profile::ContainerAccess;
use sha256_check_core::{HostProfile, IdRule, MemoryLog};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn proxmox(home: &Path, ids: IdRule) -> HostProfile {
    HostProfile::new("proxmox-dell", home, &[("storage.cfg", "storage-cfg")]).with_containers(
        ContainerAccess {
            subdir: "lxc".to_string(),
            ids,
        },
    )
}

#[tokio::test]
async fn hashes_newest_file_of_container() {
    let home = tempdir().unwrap();
    let ct = home.path().join("lxc").join("101");
    put(&ct, "101.conf.1", b"hostname: web", 100);
    put(&ct, "101.conf.2", b"hostname: web2", 200);
    let addr = start(vec![proxmox(home.path(), IdRule::Any)], Arc::new(MemoryLog::new())).await;

    let (status, body) = get_json(addr, "/proxmox-dell/lxc?id=101").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"sha256sum": sha(b"hostname: web2")}));
}

#[tokio::test]
async fn empty_id_is_bad_request() {
    let home = tempdir().unwrap();
    let addr = start(vec![proxmox(home.path(), IdRule::Any)], Arc::new(MemoryLog::new())).await;

    for target in ["/proxmox-dell/lxc", "/proxmox-dell/lxc?id="] {
        let (status, body) = get_json(addr, target).await;
        assert_eq!(status, 400);
        assert_eq!(body, json!({"error": "id empty"}));
    }
}

#[tokio::test]
async fn unknown_container_is_server_error() {
    let home = tempdir().unwrap();
    let log = Arc::new(MemoryLog::new());
    let addr = start(vec![proxmox(home.path(), IdRule::Any)], log.clone()).await;

    let (status, body) = get_json(addr, "/proxmox-dell/lxc?id=999").await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "check logs"}));
    assert_eq!(log.lines().len(), 1);
}

#[tokio::test]
async fn default_rule_joins_id_verbatim() {
    // The id is not checked: `..` walks out of <home>/lxc.
    let home = tempdir().unwrap();
    std::fs::create_dir_all(home.path().join("lxc")).unwrap();
    put(&home.path().join("secrets"), "shadow", b"root:x", 10);
    let addr = start(vec![proxmox(home.path(), IdRule::Any)], Arc::new(MemoryLog::new())).await;

    let (status, body) = get_json(addr, "/proxmox-dell/lxc?id=../secrets").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"sha256sum": sha(b"root:x")}));
}

#[tokio::test]
async fn restrictive_rule_rejects_traversal() {
    let home = tempdir().unwrap();
    std::fs::create_dir_all(home.path().join("lxc")).unwrap();
    put(&home.path().join("secrets"), "shadow", b"root:x", 10);
    let log = Arc::new(MemoryLog::new());
    let addr = start(
        vec![proxmox(home.path(), IdRule::SinglePathComponent)],
        log.clone(),
    )
    .await;

    for target in [
        "/proxmox-dell/lxc?id=../secrets",
        "/proxmox-dell/lxc?id=../../etc",
        "/proxmox-dell/lxc?id=..",
    ] {
        let (status, body) = get_json(addr, target).await;
        assert_eq!(status, 400, "{target}");
        assert_eq!(body, json!({"error": "unsupported id"}));
    }
    assert!(log.lines().is_empty());
}

#[tokio::test]
async fn numeric_rule() {
    let home = tempdir().unwrap();
    put(&home.path().join("lxc").join("105"), "105.conf", b"arch: amd64", 10);
    let addr = start(vec![proxmox(home.path(), IdRule::Numeric)], Arc::new(MemoryLog::new())).await;

    let (status, _) = get_json(addr, "/proxmox-dell/lxc?id=105").await;
    assert_eq!(status, 200);
    let (status, body) = get_json(addr, "/proxmox-dell/lxc?id=web").await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "unsupported id"}));
}

#[tokio::test]
async fn repeated_id_key_uses_first_value() {
    let home = tempdir().unwrap();
    put(&home.path().join("lxc").join("1"), "1.conf", b"ct one", 10);
    put(&home.path().join("lxc").join("2"), "2.conf", b"ct two", 10);
    let addr = start(vec![proxmox(home.path(), IdRule::Any)], Arc::new(MemoryLog::new())).await;

    let (status, body) = get_json(addr, "/proxmox-dell/lxc?id=1&id=2").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"sha256sum": sha(b"ct one")}));

    let (status, body) = get_json(addr, "/proxmox-dell/lxc?id=&id=2").await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "id empty"}));
}
