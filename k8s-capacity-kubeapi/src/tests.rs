use std::fs;
use std::path::PathBuf;

use super::*;

fn kubeconfig(name: &str) -> String {
    format!(
        "apiVersion: v1
kind: Config
clusters:
- name: {name}
  cluster:
    server: https://{name}.example.com:6443
contexts:
- name: {name}
  context:
    cluster: {name}
    user: {name}
users:
- name: {name}
  user:
    token: secret
current-context: {name}
"
    )
}

fn write_kubeconfig(name: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("k8s-capacity-kubeapi-{}-{name}.yaml", std::process::id()));
    fs::write(&path, kubeconfig(name)).unwrap();
    path
}

#[test]
fn reads_single_kubeconfig() {
    let path = write_kubeconfig("single");

    let config = read_kubeconfig(Some(&path)).unwrap();

    assert_eq!(config.current_context.as_deref(), Some("single"));
    assert_eq!(config.contexts.len(), 1);
    assert_eq!(config.clusters[0].name, "single");
    fs::remove_file(path).unwrap();
}

#[test]
fn merges_kubeconfig_path_list() {
    let first = write_kubeconfig("first");
    let second = write_kubeconfig("second");
    let paths = PathBuf::from(env::join_paths([&first, &second]).unwrap());

    let config = read_kubeconfig(Some(&paths)).unwrap();

    // The first file sets the current context.
    assert_eq!(config.current_context.as_deref(), Some("first"));
    let contexts = config
        .contexts
        .iter()
        .map(|context| context.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(contexts, ["first", "second"]);
    fs::remove_file(first).unwrap();
    fs::remove_file(second).unwrap();
}

#[test]
fn missing_kubeconfig_is_an_error() {
    let path = env::temp_dir().join("k8s-capacity-kubeapi-does-not-exist.yaml");

    let err = read_kubeconfig(Some(&path)).unwrap_err();

    assert!(matches!(err, KubeconfigError::ReadConfig(..)));
}
