//! Route53 data source
//!
//! The exporter only ever reads three things from Route53: a hosted zone, its
//! record sets and its tags. [`Route53Source`] is that narrow surface;
//! [`AwsRoute53Source`] talks to the real API and the mock serves tests.

pub mod aws;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use aws::AwsRoute53Source;
#[cfg(test)]
pub use mock::MockRoute53Source;
pub use types::{AliasTarget, GeoLocation, Record, Zone, ZoneVpc, decode_name, normalize_zone_id};

use anyhow::Result;
use std::collections::BTreeMap;

/// Read-only access to hosted zone data
pub trait Route53Source {
    /// Zone name, comment, privacy and VPC associations. Tags are left empty.
    fn fetch_zone(&self, zone_id: &str) -> Result<Zone>;

    /// Every record set of the zone, following pagination to the end
    fn fetch_records(&self, zone_id: &str) -> Result<Vec<Record>>;

    /// Tags attached to the hosted zone
    fn fetch_tags(&self, zone_id: &str) -> Result<BTreeMap<String, String>>;
}
