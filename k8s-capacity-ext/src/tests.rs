use super::*;

fn quantities(pairs: &[(&str, &str)]) -> ResourceList {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), resource::Quantity(value.to_string())))
        .collect()
}

fn pod(phase: Option<&str>, node: Option<&str>) -> corev1::Pod {
    corev1::Pod {
        metadata: metav1::ObjectMeta::with_namespace("web", "shop"),
        spec: Some(corev1::PodSpec {
            node_name: node.map(str::to_string),
            ..default()
        }),
        status: Some(corev1::PodStatus {
            phase: phase.map(str::to_string),
            ..default()
        }),
    }
}

#[test]
fn resource_list_lookup() {
    let list = quantities(&[("cpu", "4"), ("memory", "8Gi"), ("pods", "110")]);

    assert_eq!(list.cpu(), Some(&resource::Quantity("4".to_string())));
    assert_eq!(list.memory(), Some(&resource::Quantity("8Gi".to_string())));
    assert_eq!(list.pods(), Some(&resource::Quantity("110".to_string())));
    assert_eq!(list.quantity(RESOURCE_LIMITS_CPU), None);
}

#[test]
fn optional_resource_list_lookup() {
    let list = quantities(&[("cpu", "250m")]);

    assert_eq!(Some(&list).cpu(), Some(&resource::Quantity("250m".to_string())));
    assert_eq!(None::<&ResourceList>.cpu(), None);
}

#[test]
fn node_labels() {
    let node = corev1::Node {
        metadata: metav1::ObjectMeta::new("worker-1").label("pool", "x"),
        ..default()
    };

    assert!(node.has_label("pool", "x"));
    assert!(!node.has_label("pool", "y"));
    assert!(!node.has_label("zone", "x"));
}

#[test]
fn node_without_status_has_no_allocatable() {
    let node = corev1::Node {
        metadata: metav1::ObjectMeta::new("worker-1"),
        ..default()
    };

    assert!(node.allocatable().is_none());
    assert_eq!(node.allocatable().cpu(), None);
}

#[test]
fn terminal_phases() {
    assert!(pod(Some("Failed"), None).is_terminal());
    assert!(pod(Some("Succeeded"), None).is_terminal());
    assert!(!pod(Some("Running"), None).is_terminal());
    assert!(!pod(Some("Pending"), None).is_terminal());
    assert!(!pod(None, None).is_terminal());
}

#[test]
fn unscheduled_pod_has_no_node() {
    assert_eq!(pod(None, None).node_name(), None);
    assert_eq!(pod(None, Some("")).node_name(), None);
    assert_eq!(pod(None, Some("worker-1")).node_name(), Some("worker-1"));
}

#[test]
fn pod_without_spec_has_no_containers() {
    let pod = corev1::Pod::default();
    assert!(pod.containers().is_empty());
}

#[test]
fn container_resources() {
    let container = corev1::Container {
        name: "app".to_string(),
        resources: Some(corev1::ResourceRequirements {
            requests: Some(quantities(&[("cpu", "100m")])),
            ..default()
        }),
        ..default()
    };

    assert_eq!(
        container.requests().cpu(),
        Some(&resource::Quantity("100m".to_string()))
    );
    assert!(container.limits().is_none());
}

#[test]
fn quota_hard() {
    let quota = corev1::ResourceQuota {
        metadata: metav1::ObjectMeta::with_namespace("compute", "shop"),
        spec: Some(corev1::ResourceQuotaSpec {
            hard: Some(quantities(&[("requests.cpu", "10"), ("pods", "20")])),
            ..default()
        }),
        ..default()
    };

    assert_eq!(
        quota.hard().quantity(RESOURCE_REQUESTS_CPU),
        Some(&resource::Quantity("10".to_string()))
    );
    assert_eq!(quota.hard().quantity(RESOURCE_LIMITS_MEMORY), None);
}
