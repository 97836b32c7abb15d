//! Pod records and health classification

use serde::Serialize;

/// Minimum whitespace-separated fields for a `-o=wide` row to be accepted
const MIN_FIELDS: usize = 6;

/// One row of `kubectl get pods -o=wide`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodRecord {
    pub name: String,
    /// Ready containers as `ready/total`
    pub ready: String,
    pub status: String,
    pub restarts: String,
    pub age: String,
}

impl PodRecord {
    /// Running with every container ready
    pub fn is_healthy(&self) -> bool {
        let containers_ready = match self.ready.split('/').collect::<Vec<_>>().as_slice() {
            [ready, total] => ready == total,
            _ => false,
        };
        containers_ready && self.status == "Running"
    }
}

/// Parse `kubectl get pods -o=wide` output
///
/// The header line and blank lines are skipped. Rows with fewer than six
/// fields are dropped; the first five fields of the rest become the record.
pub fn parse_pods(output: &str) -> Vec<PodRecord> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < MIN_FIELDS {
                return None;
            }
            // With -o=wide the restart column may read "3 (2m ago)"; the
            // record keeps fields positionally.
            Some(PodRecord {
                name: fields[0].to_string(),
                ready: fields[1].to_string(),
                status: fields[2].to_string(),
                restarts: fields[3].to_string(),
                age: fields[4].to_string(),
            })
        })
        .collect()
}

/// Health summary over a set of pods
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthReport {
    pub pods: Vec<PodRecord>,
    pub unhealthy: Vec<String>,
}

impl HealthReport {
    pub fn new(pods: Vec<PodRecord>) -> Self {
        let unhealthy = pods
            .iter()
            .filter(|p| !p.is_healthy())
            .map(|p| p.name.clone())
            .collect();
        Self { pods, unhealthy }
    }

    /// No unhealthy pods
    pub fn is_all_clear(&self) -> bool {
        self.unhealthy.is_empty()
    }

    /// The full table is shown when asked for or when something is wrong
    pub fn show_table(&self, verbose: bool) -> bool {
        verbose || !self.is_all_clear()
    }
}
