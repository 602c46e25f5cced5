use super::*;

/// Namespace breakdown as serialized with `--json`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NamespaceReport {
    pub(crate) name: String,
    pub(crate) pods: BTreeMap<String, PodReport>,

    pub(crate) memory_requests: i64,
    #[serde(rename = "memoryRequestsGiB")]
    pub(crate) memory_requests_gib: f64,
    pub(crate) memory_limits: i64,
    #[serde(rename = "memoryLimitsGiB")]
    pub(crate) memory_limits_gib: f64,
    pub(crate) memory_used: i64,
    #[serde(rename = "memoryUsedGiB")]
    pub(crate) memory_used_gib: f64,
    pub(crate) cpu_requests_milli_cores: i64,
    pub(crate) cpu_requests_cores: f64,
    pub(crate) cpu_limits_milli_cores: i64,
    pub(crate) cpu_limits_cores: f64,
    pub(crate) cpu_used_milli_cores: i64,
    pub(crate) cpu_used_cores: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct PodReport {
    pub(crate) containers: BTreeMap<String, ContainerReport>,
}

/// Memory in bytes and MiB, CPU in millicores and cores.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContainerReport {
    pub(crate) name: String,
    pub(crate) pod: String,
    pub(crate) memory_requests: i64,
    #[serde(rename = "memoryRequestsMiB")]
    pub(crate) memory_requests_mib: i64,
    pub(crate) memory_limits: i64,
    #[serde(rename = "memoryLimitsMiB")]
    pub(crate) memory_limits_mib: i64,
    pub(crate) cpu_requests_milli_cores: i64,
    pub(crate) cpu_requests_cores: f64,
    pub(crate) cpu_limits_milli_cores: i64,
    pub(crate) cpu_limits_cores: f64,
    pub(crate) memory_used: i64,
    #[serde(rename = "memoryUsedMiB")]
    pub(crate) memory_used_mib: i64,
    pub(crate) cpu_used_milli_cores: i64,
    pub(crate) cpu_used_cores: f64,
}

impl From<&NamespaceSnapshot> for NamespaceReport {
    fn from(snapshot: &NamespaceSnapshot) -> Self {
        let pods = snapshot
            .pods
            .iter()
            .map(|(name, pod)| {
                let containers = pod
                    .containers
                    .iter()
                    .map(|(name, stat)| (name.clone(), ContainerReport::from(stat)))
                    .collect();
                (name.clone(), PodReport { containers })
            })
            .collect();

        Self {
            name: snapshot.name.clone(),
            pods,
            memory_requests: snapshot.requests.memory.value(),
            memory_requests_gib: gib(&snapshot.requests.memory),
            memory_limits: snapshot.limits.memory.value(),
            memory_limits_gib: gib(&snapshot.limits.memory),
            memory_used: snapshot.used.memory.value(),
            memory_used_gib: gib(&snapshot.used.memory),
            cpu_requests_milli_cores: snapshot.requests.cpu.milli_value(),
            cpu_requests_cores: cores(&snapshot.requests.cpu),
            cpu_limits_milli_cores: snapshot.limits.cpu.milli_value(),
            cpu_limits_cores: cores(&snapshot.limits.cpu),
            cpu_used_milli_cores: snapshot.used.cpu.milli_value(),
            cpu_used_cores: cores(&snapshot.used.cpu),
        }
    }
}

impl From<&ContainerStat> for ContainerReport {
    fn from(stat: &ContainerStat) -> Self {
        Self {
            name: stat.name.clone(),
            pod: stat.pod.clone(),
            memory_requests: stat.requests.memory.value(),
            memory_requests_mib: mib(&stat.requests.memory),
            memory_limits: stat.limits.memory.value(),
            memory_limits_mib: mib(&stat.limits.memory),
            cpu_requests_milli_cores: stat.requests.cpu.milli_value(),
            cpu_requests_cores: cores(&stat.requests.cpu),
            cpu_limits_milli_cores: stat.limits.cpu.milli_value(),
            cpu_limits_cores: cores(&stat.limits.cpu),
            memory_used: stat.used.memory.value(),
            memory_used_mib: mib(&stat.used.memory),
            cpu_used_milli_cores: stat.used.cpu.milli_value(),
            cpu_used_cores: cores(&stat.used.cpu),
        }
    }
}

/// Per-pod container blocks followed by the namespace totals.
#[derive(Debug)]
pub(crate) struct NamespaceText<'a>(pub(crate) &'a NamespaceSnapshot);

impl fmt::Display for NamespaceText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;

        writeln!(f)?;
        writeln!(f, "{SECTION}")?;
        for (name, pod) in &snapshot.pods {
            writeln!(f, "****Pod Name: {name}****")?;
            for stat in pod.containers.values() {
                writeln!(f, "{SECTION}")?;
                writeln!(f, "Container Name: {}", stat.name)?;
                writeln!(f, "{RULE}")?;
                writeln!(f, "CPURequests: {}", cores(&stat.requests.cpu))?;
                writeln!(f, "MemoryRequests: {}MiB", mib(&stat.requests.memory))?;
                writeln!(f, "CPULimits: {}", cores(&stat.limits.cpu))?;
                writeln!(f, "MemoryLimits: {}MiB", mib(&stat.limits.memory))?;
                writeln!(f, "{RULE}")?;
                writeln!(f, "CPU Used: {}m", stat.used.cpu.milli_value())?;
                writeln!(f, "Memory Used: {}MiB", mib(&stat.used.memory))?;
                writeln!(f, "{SECTION}")?;
            }
        }

        writeln!(f, "<><><><><>Sum Total for Namespace: {}<><><><><>", snapshot.name)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Namespace Total CPURequests: {}", cores(&snapshot.requests.cpu))?;
        writeln!(
            f,
            "Namespace Total MemoryRequests: {}MiB ({:.1}GiB)",
            mib(&snapshot.requests.memory),
            gib(&snapshot.requests.memory)
        )?;
        writeln!(f, "Namespace Total CPULimits: {}", cores(&snapshot.limits.cpu))?;
        writeln!(
            f,
            "Namespace Total MemoryLimits: {}MiB ({:.1}GiB)",
            mib(&snapshot.limits.memory),
            gib(&snapshot.limits.memory)
        )?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Namespace Total CPU Used: {}", cores(&snapshot.used.cpu))?;
        writeln!(
            f,
            "Namespace Total Memory Used: {}MiB ({:.1}GiB)",
            mib(&snapshot.used.memory),
            gib(&snapshot.used.memory)
        )
    }
}

fn mib(quantity: &Quantity) -> i64 {
    quantity.scaled_value(Scale::Mebi)
}

fn gib(quantity: &Quantity) -> f64 {
    quantity.scaled_f64(Scale::Gibi)
}
