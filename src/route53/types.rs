use std::collections::BTreeMap;

/// A hosted zone as returned by `GetHostedZone`, with tags attached separately
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    /// Zone apex without the trailing dot
    pub name: String,
    pub comment: String,
    pub private_zone: bool,
    pub vpcs: Vec<ZoneVpc>,
    pub tags: BTreeMap<String, String>,
}

impl Zone {
    /// Key used for the zone in generated maps and module addresses
    pub fn key(&self) -> String {
        if self.private_zone {
            format!("{}_private", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// VPC association of a private hosted zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneVpc {
    pub vpc_id: String,
    pub vpc_region: Option<String>,
}

/// Alias target of a record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
    pub dns_name: String,
    pub hosted_zone_id: String,
    pub evaluate_target_health: bool,
}

/// Geolocation routing attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoLocation {
    pub continent_code: Option<String>,
    pub country_code: Option<String>,
    pub subdivision_code: Option<String>,
}

/// A resource record set as returned by `ListResourceRecordSets`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Name exactly as the API returns it (trailing dot, `\052` escapes)
    pub name: String,
    /// Upper-cased record type
    pub record_type: String,
    pub ttl: Option<i64>,
    /// Values in API order
    pub values: Vec<String>,
    pub alias: Option<AliasTarget>,
    pub set_identifier: Option<String>,
    pub weight: Option<i64>,
    pub region: Option<String>,
    pub geo_location: Option<GeoLocation>,
    pub failover: Option<String>,
    pub multi_value_answer: Option<bool>,
    pub health_check_id: Option<String>,
    pub traffic_policy_instance_id: Option<String>,
}

impl Record {
    /// Fully-qualified hostname used for filtering and rendering: no trailing
    /// dot, wildcard escape decoded
    pub fn hostname(&self) -> String {
        decode_name(&self.name)
    }
}

/// Strip the trailing dot and decode Route53's octal escape for `*`
pub fn decode_name(name: &str) -> String {
    name.trim_end_matches('.').replace("\\052", "*")
}

/// Normalize a configured zone id: Route53 accepts both `Z123` and
/// `/hostedzone/Z123`, generated import ids need the bare form
pub fn normalize_zone_id(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('"');
    trimmed
        .strip_prefix("/hostedzone/")
        .unwrap_or(trimmed)
        .to_string()
}
