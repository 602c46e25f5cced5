use super::*;

/// Cluster-wide sum of every ResourceQuota `spec.hard`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaSnapshot {
    /// Number of ResourceQuota objects summed.
    pub quotas: usize,
    /// `limits.cpu` and `limits.memory`.
    pub limits: Compute,
    /// `requests.cpu` and `requests.memory`.
    pub requests: Compute,
    pub pods: Quantity,
}

impl QuotaSnapshot {
    fn add_hard(&mut self, hard: Option<&ResourceList>) -> Result<(), QuantityParseError> {
        let field = |name| resources::quantity(hard.quantity(name));

        self.limits += Compute {
            cpu: field(k8s::RESOURCE_LIMITS_CPU)?,
            memory: field(k8s::RESOURCE_LIMITS_MEMORY)?,
        };
        self.requests += Compute {
            cpu: field(k8s::RESOURCE_REQUESTS_CPU)?,
            memory: field(k8s::RESOURCE_REQUESTS_MEMORY)?,
        };
        self.pods += field(k8s::RESOURCE_PODS)?;
        self.quotas += 1;
        Ok(())
    }
}

/// Sum the hard limits of all `quotas`. Unset fields count as zero.
pub fn collect_quotas(quotas: &[corev1::ResourceQuota]) -> Result<QuotaSnapshot, Error> {
    let mut snapshot = QuotaSnapshot::default();

    for quota in quotas {
        snapshot
            .add_hard(quota.hard())
            .map_err(Error::quantity("resourcequota", quota.metadata.name.as_deref()))?;
    }

    tracing::debug!(quotas = snapshot.quotas, "collected resource quotas");

    Ok(snapshot)
}

#[cfg(test)]
mod tests;
