use super::{Record, Route53Source, Zone};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

/// In-memory Route53 for tests
pub struct MockRoute53Source {
    zones: HashMap<String, Zone>,
    records: HashMap<String, Vec<Record>>,
    tags: HashMap<String, BTreeMap<String, String>>,
    failing_zones: HashSet<String>,
    failing_tags: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockRoute53Source {
    pub fn new() -> Self {
        Self {
            zones: HashMap::new(),
            records: HashMap::new(),
            tags: HashMap::new(),
            failing_zones: HashSet::new(),
            failing_tags: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register a zone with its record sets. Tags on the zone are served by
    /// `fetch_tags`, not `fetch_zone`.
    pub fn with_zone(mut self, zone: Zone, records: Vec<Record>) -> Self {
        let mut bare = zone.clone();
        bare.tags = BTreeMap::new();
        self.tags.insert(zone.id.clone(), zone.tags);
        self.records.insert(zone.id.clone(), records);
        self.zones.insert(zone.id.clone(), bare);
        self
    }

    /// Every call for this zone id fails as if the API returned an error
    pub fn failing(mut self, zone_id: &str) -> Self {
        self.failing_zones.insert(zone_id.to_string());
        self
    }

    /// Only the tag lookup fails for this zone id
    pub fn failing_tags(mut self, zone_id: &str) -> Self {
        self.failing_tags.insert(zone_id.to_string());
        self
    }

    /// Calls made so far, formatted as `operation:zone_id`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, operation: &str, zone_id: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", operation, zone_id));
        if self.failing_zones.contains(zone_id) {
            anyhow::bail!("AccessDenied: simulated failure for {}", zone_id);
        }
        Ok(())
    }
}

impl Default for MockRoute53Source {
    fn default() -> Self {
        Self::new()
    }
}

impl Route53Source for MockRoute53Source {
    fn fetch_zone(&self, zone_id: &str) -> Result<Zone> {
        self.record_call("get_hosted_zone", zone_id)?;
        self.zones
            .get(zone_id)
            .cloned()
            .with_context(|| format!("NoSuchHostedZone: {}", zone_id))
    }

    fn fetch_records(&self, zone_id: &str) -> Result<Vec<Record>> {
        self.record_call("list_resource_record_sets", zone_id)?;
        self.records
            .get(zone_id)
            .cloned()
            .with_context(|| format!("NoSuchHostedZone: {}", zone_id))
    }

    fn fetch_tags(&self, zone_id: &str) -> Result<BTreeMap<String, String>> {
        self.record_call("list_tags_for_resource", zone_id)?;
        if self.failing_tags.contains(zone_id) {
            anyhow::bail!("ThrottlingException: simulated tag failure for {}", zone_id);
        }
        Ok(self.tags.get(zone_id).cloned().unwrap_or_default())
    }
}
