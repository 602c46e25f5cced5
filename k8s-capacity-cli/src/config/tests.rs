use super::*;

fn parse(args: &[&str]) -> Config {
    Config::try_parse_from(std::iter::once("k8s-capacity").chain(args.iter().copied())).unwrap()
}

#[test]
fn defaults() {
    let config = parse(&[]);

    assert_eq!(config.nodelabel, NodeSelector::All);
    assert_eq!(config.interval, Duration::from_secs(300));
    assert_eq!(config.context, None);
    assert_eq!(config.mode(), Mode::Text);
}

#[test]
fn node_label() {
    let config = parse(&["--nodelabel", "pool=x"]);
    assert_eq!(config.nodelabel, NodeSelector::label("pool", "x"));

    let config = parse(&["--node-label=kubernetes.io/os=linux"]);
    assert_eq!(config.nodelabel, NodeSelector::label("kubernetes.io/os", "linux"));
}

#[test]
fn node_label_without_value_is_rejected() {
    let args = ["k8s-capacity", "--nodelabel", "pool"];
    assert!(Config::try_parse_from(args).is_err());
}

#[test]
fn interval() {
    assert_eq!(parse(&["--interval", "90s"]).interval, Duration::from_secs(90));
    assert_eq!(parse(&["--interval", "1h30m"]).interval, Duration::from_secs(5400));
    assert_eq!(
        parse(&["--interval", "1.5s"]).interval,
        Duration::from_millis(1500)
    );
}

#[test]
fn bad_interval_is_rejected() {
    for interval in ["soon", "0s", "-5m"] {
        let args = ["k8s-capacity", "--interval", interval];
        assert!(Config::try_parse_from(args).is_err(), "{interval}");
    }
}

#[test]
fn check_wins() {
    let config = parse(&["--check", "--namespace", "shop", "--daemon", "--json"]);
    assert_eq!(config.mode(), Mode::Check);
}

#[test]
fn namespace_beats_daemon() {
    let config = parse(&["-n", "shop", "--daemon"]);
    assert_eq!(config.mode(), Mode::Namespace("shop"));
}

#[test]
fn empty_namespace_is_cluster_mode() {
    let config = parse(&["--namespace", "", "--json"]);
    assert_eq!(config.mode(), Mode::Json);
}

#[test]
fn daemon_uses_interval() {
    let config = parse(&["--daemon", "--json", "--interval", "30s"]);
    assert_eq!(config.mode(), Mode::Daemon(Duration::from_secs(30)));
}

#[test]
fn context() {
    let config = parse(&["--context", "staging"]);
    assert_eq!(config.context.as_deref(), Some("staging"));
}
