use crate::fixtures::*;

use super::*;

#[test]
fn sums_hard_limits() {
    let quotas = [
        quota(
            "shop",
            &[
                ("limits.cpu", "4"),
                ("limits.memory", "8Gi"),
                ("requests.cpu", "2"),
                ("requests.memory", "4Gi"),
                ("pods", "20"),
            ],
        ),
        quota(
            "blog",
            &[
                ("limits.cpu", "500m"),
                ("limits.memory", "512Mi"),
                ("requests.cpu", "250m"),
                ("requests.memory", "256Mi"),
                ("pods", "5"),
            ],
        ),
    ];

    let snapshot = collect_quotas(&quotas).unwrap();

    assert_eq!(snapshot.quotas, 2);
    assert_eq!(snapshot.limits.cpu, q("4500m"));
    assert_eq!(snapshot.limits.memory, q("8704Mi"));
    assert_eq!(snapshot.requests.cpu, q("2250m"));
    assert_eq!(snapshot.requests.memory, q("4352Mi"));
    assert_eq!(snapshot.pods, q("25"));
}

#[test]
fn missing_fields_count_zero() {
    let quotas = [
        quota("shop", &[("requests.memory", "1Gi")]),
        quota("blog", &[("pods", "10"), ("services", "3")]),
    ];

    let snapshot = collect_quotas(&quotas).unwrap();

    assert_eq!(snapshot.quotas, 2);
    assert_eq!(snapshot.limits, Compute::default());
    assert!(snapshot.requests.cpu.is_zero());
    assert_eq!(snapshot.requests.memory, q("1Gi"));
    assert_eq!(snapshot.pods, q("10"));
}

#[test]
fn quota_without_spec() {
    let bare = corev1::ResourceQuota::default();

    let snapshot = collect_quotas(&[bare]).unwrap();

    assert_eq!(snapshot.quotas, 1);
    assert!(snapshot.pods.is_zero());
}

#[test]
fn no_quotas() {
    let snapshot = collect_quotas(&[]).unwrap();
    assert_eq!(snapshot, QuotaSnapshot::default());
}

#[test]
fn malformed_quantity() {
    let quotas = [quota("shop", &[("requests.cpu", "lots")])];

    let err = collect_quotas(&quotas).unwrap_err();

    assert!(
        matches!(err, Error::Quantity { kind: "resourcequota", ref name, .. } if name == "compute")
    );
}
