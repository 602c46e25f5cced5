//! Builders for API objects used across the unit tests.

use k8s::default;
use k8s::metav1;
use k8s::ObjectMetaExt as _;

use super::*;

pub(crate) fn q(text: &str) -> Quantity {
    text.parse().unwrap()
}

pub(crate) fn resource_list(pairs: &[(&str, &str)]) -> ResourceList {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), resource::Quantity(value.to_string())))
        .collect()
}

pub(crate) fn node(name: &str, cpu: &str, memory: &str, pods: &str) -> corev1::Node {
    corev1::Node {
        metadata: metav1::ObjectMeta::new(name),
        status: Some(corev1::NodeStatus {
            allocatable: Some(resource_list(&[
                ("cpu", cpu),
                ("memory", memory),
                ("pods", pods),
            ])),
            ..default()
        }),
        ..default()
    }
}

pub(crate) fn labeled(mut node: corev1::Node, key: &str, value: &str) -> corev1::Node {
    node.metadata = node.metadata.label(key, value);
    node
}

pub(crate) fn container(name: &str, requests: &[(&str, &str)], limits: &[(&str, &str)]) -> corev1::Container {
    let resources = corev1::ResourceRequirements {
        requests: (!requests.is_empty()).then(|| resource_list(requests)),
        limits: (!limits.is_empty()).then(|| resource_list(limits)),
        ..default()
    };
    corev1::Container {
        name: name.to_string(),
        resources: Some(resources),
        ..default()
    }
}

pub(crate) fn pod(
    name: &str,
    node: Option<&str>,
    phase: &str,
    containers: Vec<corev1::Container>,
) -> corev1::Pod {
    corev1::Pod {
        metadata: metav1::ObjectMeta::with_namespace(name, "shop"),
        spec: Some(corev1::PodSpec {
            node_name: node.map(str::to_string),
            containers,
            ..default()
        }),
        status: Some(corev1::PodStatus {
            phase: Some(phase.to_string()),
            ..default()
        }),
    }
}

pub(crate) fn requesting(name: &str, node: &str, phase: &str, cpu: &str, memory: &str) -> corev1::Pod {
    let app = container("app", &[("cpu", cpu), ("memory", memory)], &[]);
    pod(name, Some(node), phase, vec![app])
}

pub(crate) fn node_metrics(name: &str, cpu: &str, memory: &str) -> metricsv1::NodeMetrics {
    metricsv1::NodeMetrics::new(name, metricsv1::Usage::new(cpu, memory))
}

pub(crate) fn quota(namespace: &str, hard: &[(&str, &str)]) -> corev1::ResourceQuota {
    corev1::ResourceQuota {
        metadata: metav1::ObjectMeta::with_namespace("compute", namespace),
        spec: Some(corev1::ResourceQuotaSpec {
            hard: Some(resource_list(hard)),
            ..default()
        }),
        ..default()
    }
}
