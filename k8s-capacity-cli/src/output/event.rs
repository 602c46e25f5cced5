use super::*;

const EVENT_KIND: &str = "metric";
const EVENT_MODULE: &str = "k8s_quota";
const EVENT_PROVIDER: &str = "k8s-capacity";
const EVENT_TYPE: &str = "info";
const EVENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One structured log line describing cluster capacity.
///
/// CPU is reported in whole cores and millicores, memory in bytes. Integer
/// readouts round up, except headroom, which rounds a deficit down so that
/// over-commitment of less than one unit is still negative. Factors are exact ratios and zero when their baseline is.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CapacityEvent {
    pub(crate) event_kind: &'static str,
    pub(crate) event_module: &'static str,
    pub(crate) event_provider: &'static str,
    pub(crate) event_type: &'static str,
    pub(crate) event_version: &'static str,
    pub(crate) node_label: String,

    pub(crate) resource_quota_cpu_request_cores: i64,
    pub(crate) resource_quota_cpu_request_milli_cores: i64,
    pub(crate) resource_quota_memory_request: i64,
    pub(crate) resource_quota_memory_limit: i64,
    pub(crate) resource_quota_pods: i64,

    pub(crate) container_resource_cpu_request_cores: i64,
    pub(crate) container_resource_cpu_request_milli_cores: i64,
    pub(crate) container_resource_memory_request: i64,
    pub(crate) container_resource_memory_limit: i64,
    pub(crate) container_resource_pods: i64,

    pub(crate) allocatable_memory_total: i64,
    pub(crate) allocatable_memory_nminusone: i64,
    pub(crate) allocatable_cpu_total: i64,
    pub(crate) allocatable_cpu_nminusone: i64,
    pub(crate) allocatable_pods_total: i64,
    pub(crate) allocatable_pods_nminusone: i64,

    pub(crate) subscription_factor_memory_request_total: f64,
    pub(crate) subscription_factor_memory_request_nminusone: f64,
    pub(crate) subscription_factor_cpu_request_total: f64,
    pub(crate) subscription_factor_cpu_request_nminusone: f64,
    pub(crate) subscription_factor_pods_total: f64,
    pub(crate) subscription_factor_pods_nminusone: f64,

    pub(crate) utilization_factor_pods_total: f64,
    pub(crate) utilization_factor_pods_nminusone: f64,
    pub(crate) utilization_factor_memory_requests_total: f64,
    pub(crate) utilization_factor_memory_requests_nminusone: f64,
    pub(crate) utilization_factor_cpu_requests_total: f64,
    pub(crate) utilization_factor_cpu_requests_nminusone: f64,

    pub(crate) available_memory_request_total: i64,
    pub(crate) available_memory_request_nminusone: i64,
    pub(crate) available_cpu_request_total: i64,
    pub(crate) available_cpu_request_nminusone: i64,
    pub(crate) available_pods_total: i64,
    pub(crate) available_pods_nminusone: i64,

    /// Per node name.
    pub(crate) utilization_factor_pods: BTreeMap<String, f64>,
    pub(crate) utilization_factor_memory_requests: BTreeMap<String, f64>,
    pub(crate) utilization_factor_cpu_requests: BTreeMap<String, f64>,
}

impl CapacityEvent {
    pub(crate) fn new(aggregate: &ClusterAggregate, selector: &NodeSelector) -> Self {
        let quota = &aggregate.quota;
        let per_node = |factor: fn(&Factors) -> f64| -> BTreeMap<String, f64> {
            aggregate
                .node_utilization
                .iter()
                .map(|(name, factors)| (name.clone(), factor(factors)))
                .collect()
        };

        Self {
            event_kind: EVENT_KIND,
            event_module: EVENT_MODULE,
            event_provider: EVENT_PROVIDER,
            event_type: EVENT_TYPE,
            event_version: EVENT_VERSION,
            node_label: selector.to_string(),

            resource_quota_cpu_request_cores: quota.requests.cpu.value(),
            resource_quota_cpu_request_milli_cores: quota.requests.cpu.milli_value(),
            resource_quota_memory_request: quota.requests.memory.value(),
            resource_quota_memory_limit: quota.limits.memory.value(),
            resource_quota_pods: quota.pods.value(),

            container_resource_cpu_request_cores: aggregate.requests.cpu.value(),
            container_resource_cpu_request_milli_cores: aggregate.requests.cpu.milli_value(),
            container_resource_memory_request: aggregate.requests.memory.value(),
            container_resource_memory_limit: aggregate.limits.memory.value(),
            container_resource_pods: aggregate.used_pods,

            allocatable_memory_total: aggregate.allocatable.memory.value(),
            allocatable_memory_nminusone: aggregate.allocatable_nminus_one.memory.value(),
            allocatable_cpu_total: aggregate.allocatable.cpu.value(),
            allocatable_cpu_nminusone: aggregate.allocatable_nminus_one.cpu.value(),
            allocatable_pods_total: aggregate.allocatable.pods.value(),
            allocatable_pods_nminusone: aggregate.allocatable_nminus_one.pods.value(),

            subscription_factor_memory_request_total: aggregate.subscription_total.memory_requests,
            subscription_factor_memory_request_nminusone: aggregate
                .subscription_nminus_one
                .memory_requests,
            subscription_factor_cpu_request_total: aggregate.subscription_total.cpu_requests,
            subscription_factor_cpu_request_nminusone: aggregate.subscription_nminus_one.cpu_requests,
            subscription_factor_pods_total: aggregate.subscription_total.pods,
            subscription_factor_pods_nminusone: aggregate.subscription_nminus_one.pods,

            utilization_factor_pods_total: aggregate.utilization_total.pods,
            utilization_factor_pods_nminusone: aggregate.utilization_nminus_one.pods,
            utilization_factor_memory_requests_total: aggregate.utilization_total.memory_requests,
            utilization_factor_memory_requests_nminusone: aggregate
                .utilization_nminus_one
                .memory_requests,
            utilization_factor_cpu_requests_total: aggregate.utilization_total.cpu_requests,
            utilization_factor_cpu_requests_nminusone: aggregate.utilization_nminus_one.cpu_requests,

            available_memory_request_total: headroom(&aggregate.available_total.memory),
            available_memory_request_nminusone: headroom(&aggregate.available_nminus_one.memory),
            available_cpu_request_total: headroom(&aggregate.available_total.cpu),
            available_cpu_request_nminusone: headroom(&aggregate.available_nminus_one.cpu),
            available_pods_total: headroom(&aggregate.available_total.pods),
            available_pods_nminusone: headroom(&aggregate.available_nminus_one.pods),

            utilization_factor_pods: per_node(|factors| factors.pods),
            utilization_factor_memory_requests: per_node(|factors| factors.memory_requests),
            utilization_factor_cpu_requests: per_node(|factors| factors.cpu_requests),
        }
    }
}

/// Whole units of headroom, rounded away from zero.
fn headroom(available: &Quantity) -> i64 {
    if available.is_negative() {
        -(-*available).value()
    } else {
        available.value()
    }
}
