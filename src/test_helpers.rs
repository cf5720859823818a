//! Test helpers for building Route53 fixtures

#![cfg(test)]

use crate::route53::{Record, Zone, ZoneVpc};
use std::collections::BTreeMap;

/// Record set with the given API name, type and values
pub fn record(name: &str, record_type: &str, values: &[&str]) -> Record {
    Record {
        name: name.to_string(),
        record_type: record_type.to_string(),
        values: values.iter().map(|value| value.to_string()).collect(),
        ..Default::default()
    }
}

/// Record set with a TTL, the common shape for simple records
pub fn record_with_ttl(name: &str, record_type: &str, ttl: i64, values: &[&str]) -> Record {
    Record {
        ttl: Some(ttl),
        ..record(name, record_type, values)
    }
}

/// Builder for hosted zones
pub struct ZoneBuilder {
    zone: Zone,
}

impl ZoneBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            zone: Zone {
                id: id.to_string(),
                name: name.to_string(),
                comment: String::new(),
                private_zone: false,
                vpcs: Vec::new(),
                tags: BTreeMap::new(),
            },
        }
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.zone.comment = comment.to_string();
        self
    }

    pub fn private(mut self) -> Self {
        self.zone.private_zone = true;
        self
    }

    pub fn vpc(mut self, vpc_id: &str, region: Option<&str>) -> Self {
        self.zone.vpcs.push(ZoneVpc {
            vpc_id: vpc_id.to_string(),
            vpc_region: region.map(str::to_string),
        });
        self
    }

    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.zone.tags.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> Zone {
        self.zone
    }
}

/// A public zone with a typical set of records: apex NS/SOA/MX/TXT, a web
/// host, a mail CNAME and a wildcard
pub fn example_com() -> (Zone, Vec<Record>) {
    let zone = ZoneBuilder::new("Z1EXAMPLE", "example.com")
        .comment("public zone")
        .tag("Owner", "platform")
        .build();

    let records = vec![
        record_with_ttl("example.com.", "NS", 172800, &["ns-1.awsdns-01.org."]),
        record_with_ttl(
            "example.com.",
            "SOA",
            900,
            &["ns-1.awsdns-01.org. awsdns-hostmaster.amazon.com. 1 7200 900 1209600 86400"],
        ),
        record_with_ttl("example.com.", "MX", 300, &["10 mail.example.com."]),
        record_with_ttl("example.com.", "TXT", 300, &["\"v=spf1 -all\""]),
        record_with_ttl("www.example.com.", "A", 300, &["192.0.2.10"]),
        record_with_ttl("mail.example.com.", "CNAME", 300, &["mx.example.net."]),
        record_with_ttl("\\052.example.com.", "CNAME", 60, &["www.example.com."]),
    ];

    (zone, records)
}
