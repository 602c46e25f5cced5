use kube::Resource as _;
use time::ext::NumericalStdDuration as _;

use super::*;

const NODE_METRICS: &str = r#"{
    "metadata": {
        "name": "worker-1",
        "creationTimestamp": "2024-05-01T10:00:00Z"
    },
    "timestamp": "2024-05-01T09:59:51Z",
    "window": "20.05s",
    "usage": {
        "cpu": "257861254n",
        "memory": "2120860Ki"
    }
}"#;

const POD_METRICS: &str = r#"{
    "metadata": {
        "name": "web-7d9c",
        "namespace": "shop"
    },
    "timestamp": "2024-05-01T09:59:48Z",
    "window": "30s",
    "containers": [
        {"name": "app", "usage": {"cpu": "25m", "memory": "64Mi"}},
        {"name": "sidecar", "usage": {"cpu": "1m", "memory": "12Mi"}}
    ]
}"#;

#[test]
fn node_metrics_deserialize() {
    let metrics: NodeMetrics = serde_json::from_str(NODE_METRICS).unwrap();

    assert_eq!(metrics.metadata.name.as_deref(), Some("worker-1"));
    assert_eq!(metrics.usage.cpu.0, "257861254n");
    assert_eq!(metrics.usage.memory.0, "2120860Ki");
    assert_eq!(metrics.window, 20050.std_milliseconds());
    assert!(metrics.timestamp.is_some());
}

#[test]
fn pod_metrics_deserialize() {
    let metrics: PodMetrics = serde_json::from_str(POD_METRICS).unwrap();

    assert_eq!(metrics.metadata.name.as_deref(), Some("web-7d9c"));
    assert_eq!(metrics.metadata.namespace.as_deref(), Some("shop"));
    assert_eq!(metrics.window, 30.std_seconds());
    assert_eq!(metrics.containers.len(), 2);
    assert_eq!(metrics.containers[0], Container::new("app", Usage::new("25m", "64Mi")));
}

#[test]
fn missing_window_and_usage_default() {
    let metrics: NodeMetrics = serde_json::from_str(r#"{"metadata": {"name": "bare"}}"#).unwrap();

    assert_eq!(metrics.window, Duration::ZERO);
    assert_eq!(metrics.usage, Usage::default());
    assert!(metrics.timestamp.is_none());
}

#[test]
fn negative_window_is_rejected() {
    let text = r#"{"metadata": {"name": "bad"}, "window": "-5s"}"#;
    assert!(serde_json::from_str::<NodeMetrics>(text).is_err());
}

#[test]
fn window_serializes_as_go_duration() {
    let metrics = NodeMetrics {
        window: 30.std_seconds(),
        ..NodeMetrics::new("worker-2", Usage::new("100m", "200Mi"))
    };
    let value = serde_json::to_value(&metrics).unwrap();

    assert_eq!(value["window"], "30s");
    assert_eq!(value["usage"]["cpu"], "100m");
    assert!(value.get("timestamp").is_none());
}

#[test]
fn node_metrics_url_path() {
    assert_eq!(
        NodeMetrics::url_path(&(), None),
        "/apis/metrics.k8s.io/v1beta1/nodes"
    );
}

#[test]
fn pod_metrics_url_path() {
    assert_eq!(
        PodMetrics::url_path(&(), Some("shop")),
        "/apis/metrics.k8s.io/v1beta1/namespaces/shop/pods"
    );
    assert_eq!(
        PodMetrics::url_path(&(), None),
        "/apis/metrics.k8s.io/v1beta1/pods"
    );
}

#[test]
fn group_version() {
    assert_eq!(METRICS_API_GROUP_VERSION, "metrics.k8s.io/v1beta1");
    assert_eq!(<NodeMetrics as k8s::Resource>::API_VERSION, METRICS_API_GROUP_VERSION);
    assert_eq!(<PodMetrics as k8s::Resource>::KIND, "PodMetrics");
}
