//! Rendering of Route53 data into OpenTofu/Terraform files
//!
//! Everything here is pure: entities in, text out. Ordering is fixed (records
//! by name, type and set identifier; zones, tags, VPCs and imports by key) so
//! unchanged Route53 data always renders to byte-identical files.

use crate::error::{ExportError, ExportResult};
use crate::filter::FilterRules;
use crate::hcl::{self, HclMap, HclValue};
use crate::route53::{Record, Zone};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Local holding the merged record maps of every zone
pub const MERGED_LOCAL: &str = "zone_records";

/// One exported record set
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRecord {
    /// Key inside the zone map, e.g. `a_www` or `cname_star_02`
    pub key: String,
    pub attributes: HclMap,
}

/// One `import` block for a record set
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportEntry {
    pub zone_key: String,
    pub record_key: String,
    pub import_id: String,
}

/// Rendered records of one zone
#[derive(Debug, Clone)]
pub struct ZoneRecords {
    pub zone_key: String,
    /// Name of the per-zone local, e.g. `zone_records_example_com`
    pub local_var: String,
    /// Per-zone file name, e.g. `route53-records-example-com.tf`
    pub file_name: String,
    pub records: Vec<RenderedRecord>,
    pub imports: Vec<ImportEntry>,
}

/// Name of `full_name` relative to the zone apex; empty for the apex itself
pub fn relative_name(full_name: &str, zone_name: &str) -> String {
    let name = full_name.trim_end_matches('.');
    let zone = zone_name.trim_end_matches('.');

    if name.is_empty() || name == zone {
        return String::new();
    }

    if !zone.is_empty() {
        if let Some(prefix) = name.strip_suffix(zone).and_then(|rest| rest.strip_suffix('.')) {
            return prefix.to_string();
        }
    }

    name.to_string()
}

/// Turn a relative name into a key fragment: `*` becomes `star`, runs of
/// other punctuation collapse to `_`, the apex becomes `root`
pub fn sanitize_subdomain(value: &str) -> String {
    if value.is_empty() {
        return "root".to_string();
    }

    let expanded = value.replace("\\052", "star").replace('*', "star").to_lowercase();

    let mut sanitized = String::with_capacity(expanded.len());
    for c in expanded.chars() {
        if c.is_ascii_alphanumeric() {
            sanitized.push(c);
        } else if !sanitized.ends_with('_') {
            sanitized.push('_');
        }
    }

    let trimmed = sanitized.trim_matches('_');
    if trimmed.is_empty() {
        "root".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Identifier the AWS provider accepts when importing `aws_route53_record`
pub fn record_import_id(zone: &Zone, record: &Record) -> String {
    let full_name = record.hostname();
    let name = if full_name.is_empty() {
        zone.name.as_str()
    } else {
        full_name.as_str()
    };

    let mut id = format!("{}_{}_{}", zone.id, name, record.record_type);
    if let Some(set_identifier) = &record.set_identifier {
        id.push('_');
        id.push_str(set_identifier);
    }
    id
}

/// Strip one pair of surrounding quotes from TXT/SPF values
fn unquote_text_value(value: &str) -> String {
    match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\""),
        None => value.to_string(),
    }
}

/// Attributes of one record, in the order the record module expects them
pub fn record_attributes(record: &Record) -> HclMap {
    let mut attributes = HclMap::new();

    attributes.insert("full_name", record.hostname());
    attributes.insert("type", record.record_type.clone());

    if let Some(ttl) = record.ttl {
        attributes.insert("ttl", ttl);
    }

    if !record.values.is_empty() {
        let unquote = matches!(record.record_type.as_str(), "TXT" | "SPF");
        let values = record
            .values
            .iter()
            .map(|value| {
                if unquote {
                    HclValue::String(unquote_text_value(value))
                } else {
                    HclValue::String(value.clone())
                }
            })
            .collect();
        attributes.insert("records", HclValue::List(values));
    }

    if let Some(alias) = &record.alias {
        let mut alias_attributes = HclMap::new();
        let dns_name = crate::route53::decode_name(&alias.dns_name);
        if !dns_name.is_empty() {
            alias_attributes.insert("name", dns_name);
        }
        if !alias.hosted_zone_id.is_empty() {
            alias_attributes.insert("zone_id", alias.hosted_zone_id.clone());
        }
        alias_attributes.insert("evaluate_target_health", alias.evaluate_target_health);
        attributes.insert("alias", alias_attributes);
    }

    for (name, value) in [
        ("set_identifier", &record.set_identifier),
        ("health_check_id", &record.health_check_id),
        ("failover", &record.failover),
        ("traffic_policy_instance_id", &record.traffic_policy_instance_id),
    ] {
        if let Some(value) = value {
            attributes.insert(name, value.clone());
        }
    }

    if let Some(multi_value_answer) = record.multi_value_answer {
        attributes.insert("multivalue_answer", multi_value_answer);
    }

    if let Some(region) = record.region.as_deref().filter(|region| !region.is_empty()) {
        let policy: HclMap = [("region", region)].into_iter().collect();
        attributes.insert("latency_routing_policy", policy);
    }

    if let Some(weight) = record.weight {
        let policy: HclMap = [("weight", weight)].into_iter().collect();
        attributes.insert("weighted_routing_policy", policy);
    }

    if let Some(geo) = &record.geo_location {
        let policy: HclMap = [
            ("continent", &geo.continent_code),
            ("country", &geo.country_code),
            ("subdivision", &geo.subdivision_code),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
        .collect();
        if !policy.is_empty() {
            attributes.insert("geolocation_routing_policy", policy);
        }
    }

    attributes
}

/// Filter, sort and key the records of one zone
pub fn build_zone_records(
    zone: &Zone,
    records: &[Record],
    rules: &FilterRules,
) -> ExportResult<ZoneRecords> {
    let mut exported: Vec<(&Record, String, bool)> = Vec::new();

    for record in records {
        if record.name.trim().is_empty() || record.record_type.trim().is_empty() {
            return Err(ExportError::Render {
                zone_id: zone.id.clone(),
                message: format!(
                    "record set with missing name or type (name: '{}', type: '{}')",
                    record.name, record.record_type
                ),
            });
        }

        let decision = rules.decide(record);
        if decision.exported {
            exported.push((record, record.hostname(), decision.import_eligible));
        }
    }

    exported.sort_by(|(a, a_name, _), (b, b_name, _)| {
        (a_name, &a.record_type, &a.set_identifier).cmp(&(b_name, &b.record_type, &b.set_identifier))
    });

    let zone_key = zone.key();
    let bases: Vec<String> = exported
        .iter()
        .map(|(record, full_name, _)| {
            format!(
                "{}_{}",
                record.record_type.to_lowercase(),
                sanitize_subdomain(&relative_name(full_name, &zone.name))
            )
        })
        .collect();

    // Bare keys belong to their own base; suffixed keys never take one
    let reserved: HashSet<&str> = bases.iter().map(String::as_str).collect();
    let mut assigned: HashSet<String> = HashSet::new();
    let mut rendered = Vec::with_capacity(exported.len());
    let mut imports = Vec::new();

    for ((record, _, import_eligible), base) in exported.into_iter().zip(bases.iter()) {
        let key = if assigned.contains(base) {
            (2..)
                .map(|suffix| format!("{}_{:02}", base, suffix))
                .find(|candidate| {
                    !assigned.contains(candidate) && !reserved.contains(candidate.as_str())
                })
                .unwrap_or_else(|| base.clone())
        } else {
            base.clone()
        };
        assigned.insert(key.clone());

        if import_eligible {
            imports.push(ImportEntry {
                zone_key: zone_key.clone(),
                record_key: key.clone(),
                import_id: record_import_id(zone, record),
            });
        }

        rendered.push(RenderedRecord {
            key,
            attributes: record_attributes(record),
        });
    }

    let mut file_domain = zone.name.replace('.', "-");
    if zone.private_zone {
        file_domain.push_str("-private");
    }

    Ok(ZoneRecords {
        local_var: hcl::sanitize_identifier(&format!("{}_{}", MERGED_LOCAL, zone_key)),
        file_name: format!("route53-records-{}.tf", file_domain),
        zone_key,
        records: rendered,
        imports,
    })
}

fn records_map(records: &[RenderedRecord]) -> HclMap {
    records
        .iter()
        .map(|record| (record.key.clone(), record.attributes.clone()))
        .collect()
}

fn render_locals(name: &str, value: HclValue) -> String {
    let mut lines = vec!["locals {".to_string()];
    hcl::render_attribute(Some(name), &value, 1, &mut lines);
    lines.push("}".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Per-zone records file: `local.<zone local> = { "<zone key>" = { ... } }`
pub fn render_zone_file(zone: &ZoneRecords) -> String {
    let mut by_zone = HclMap::new();
    by_zone.insert(zone.zone_key.clone(), records_map(&zone.records));
    render_locals(&zone.local_var, by_zone.into())
}

/// Single-zone records file: `local.zone_records = { ... }`
pub fn render_single_zone_records(records: &[RenderedRecord]) -> String {
    render_locals(MERGED_LOCAL, records_map(records).into())
}

/// Zone metadata for the zones file
pub fn zone_attributes(zone: &Zone, include_tags: bool) -> HclMap {
    let mut attributes = HclMap::new();
    attributes.insert("name", zone.name.clone());
    attributes.insert("comment", zone.comment.clone());
    attributes.insert("private_zone", zone.private_zone);

    if zone.private_zone && !zone.vpcs.is_empty() {
        let mut vpcs = zone.vpcs.clone();
        vpcs.sort_by(|a, b| (&a.vpc_region, &a.vpc_id).cmp(&(&b.vpc_region, &b.vpc_id)));

        let mut vpc_map = HclMap::new();
        for vpc in vpcs {
            let region = vpc.vpc_region.as_deref().unwrap_or("unknown");
            let mut block = HclMap::new();
            block.insert("vpc_id", vpc.vpc_id.clone());
            if let Some(vpc_region) = &vpc.vpc_region {
                block.insert("vpc_region", vpc_region.clone());
            }
            vpc_map.insert(
                hcl::sanitize_identifier(&format!("{}_{}", region, vpc.vpc_id)),
                block,
            );
        }
        attributes.insert("vpcs", vpc_map);
    }

    let tags: HclMap = if include_tags {
        zone.tags
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    } else {
        HclMap::new()
    };
    attributes.insert("tags", tags);

    attributes
}

/// Zones file: `local.zones`, keyed and sorted by zone key
pub fn render_zones_file(zones: &BTreeMap<String, HclMap>) -> String {
    let map: HclMap = zones
        .iter()
        .map(|(key, attributes)| (key.clone(), attributes.clone()))
        .collect();
    render_locals("zones", map.into())
}

/// Everything that goes into the imports file
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    pub single_zone: bool,
    /// Zone id imported as `module.zone` in single-zone mode
    pub single_zone_id: Option<String>,
    /// (zone key, zone id) pairs imported as `module.zones[...]`
    pub zones: Vec<(String, String)>,
    pub records: Vec<ImportEntry>,
}

fn import_block(to: &str, id: &str) -> String {
    format!(
        "import {{\n  to = {}\n  id = {}\n}}\n",
        to,
        hcl::string_literal(id)
    )
}

/// Imports file: zone imports first, then record imports, all sorted
pub fn render_imports(plan: &ImportPlan) -> String {
    let mut blocks = Vec::new();

    if let Some(zone_id) = &plan.single_zone_id {
        blocks.push(import_block("module.zone.aws_route53_zone.this[0]", zone_id));
    }

    let zones: BTreeSet<&(String, String)> = plan.zones.iter().collect();
    for (zone_key, zone_id) in zones {
        let to = format!(
            "module.zones[{}].aws_route53_zone.this[0]",
            hcl::string_literal(zone_key)
        );
        blocks.push(import_block(&to, zone_id));
    }

    let records: BTreeSet<&ImportEntry> = plan.records.iter().collect();
    for entry in records {
        let to = if plan.single_zone {
            format!(
                "module.zone.aws_route53_record.this[{}]",
                hcl::string_literal(&entry.record_key)
            )
        } else {
            format!(
                "module.zones[{}].aws_route53_record.this[{}]",
                hcl::string_literal(&entry.zone_key),
                hcl::string_literal(&entry.record_key)
            )
        };
        blocks.push(import_block(&to, &entry.import_id));
    }

    blocks.join("\n")
}

/// Body of the merged locals region: `zone_records = merge({}, local.<zone>...)`
pub fn render_merged_locals(local_vars: &[String]) -> String {
    let unique: BTreeSet<&String> = local_vars.iter().collect();

    let mut lines = vec!["locals {".to_string()];
    if unique.is_empty() {
        lines.push(format!("  {} = {{}}", MERGED_LOCAL));
    } else {
        lines.push(format!("  {} = merge(", MERGED_LOCAL));
        lines.push("    {},".to_string());
        let count = unique.len();
        for (index, local_var) in unique.into_iter().enumerate() {
            let separator = if index + 1 < count { "," } else { "" };
            lines.push(format!("    local.{}{}", local_var, separator));
        }
        lines.push("  )".to_string());
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// Body of the single-zone locals region describing the primary zone
pub fn render_single_zone_locals(zone_name: &str) -> String {
    [
        "locals {".to_string(),
        "  zone = {".to_string(),
        format!("    name    = {}", hcl::string_literal(zone_name)),
        format!(
            "    comment = {}",
            hcl::string_literal(&format!("Primary {} zone", zone_name))
        ),
        "    tags    = {}".to_string(),
        "  }".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route53::{AliasTarget, GeoLocation, ZoneVpc};
    use crate::test_helpers::{ZoneBuilder, record};

    fn zone() -> Zone {
        ZoneBuilder::new("Z1", "example.com").build()
    }

    #[test]
    fn test_relative_name() {
        assert_eq!(relative_name("example.com", "example.com"), "");
        assert_eq!(relative_name("www.example.com", "example.com"), "www");
        assert_eq!(relative_name("a.b.example.com.", "example.com."), "a.b");
        assert_eq!(relative_name("other.org", "example.com"), "other.org");
        // Suffix match must fall on a label boundary
        assert_eq!(relative_name("badexample.com", "example.com"), "badexample.com");
    }

    #[test]
    fn test_sanitize_subdomain() {
        assert_eq!(sanitize_subdomain(""), "root");
        assert_eq!(sanitize_subdomain("www"), "www");
        assert_eq!(sanitize_subdomain("*"), "star");
        assert_eq!(sanitize_subdomain("*.API"), "star_api");
        assert_eq!(sanitize_subdomain("_dmarc"), "dmarc");
        assert_eq!(sanitize_subdomain("a--b..c"), "a_b_c");
        assert_eq!(sanitize_subdomain("--"), "root");
    }

    #[test]
    fn test_record_import_id() {
        let zone = zone();
        let apex = record("example.com.", "MX", &["10 mail.example.com."]);
        assert_eq!(record_import_id(&zone, &apex), "Z1_example.com_MX");

        let mut weighted = record("api.example.com.", "A", &["192.0.2.1"]);
        weighted.set_identifier = Some("blue".to_string());
        assert_eq!(record_import_id(&zone, &weighted), "Z1_api.example.com_A_blue");
    }

    #[test]
    fn test_record_attributes_order_and_types() {
        let mut r = record("www.example.com.", "A", &["192.0.2.2", "192.0.2.1"]);
        r.ttl = Some(300);
        r.set_identifier = Some("eu".to_string());
        r.region = Some("eu-west-1".to_string());
        r.weight = Some(10);
        r.multi_value_answer = Some(true);

        let attributes = record_attributes(&r);
        let keys: Vec<&str> = attributes.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "full_name",
                "type",
                "ttl",
                "records",
                "set_identifier",
                "multivalue_answer",
                "latency_routing_policy",
                "weighted_routing_policy",
            ]
        );
        assert_eq!(attributes.get("ttl"), Some(&HclValue::Number(300)));
        assert_eq!(
            attributes.get("records"),
            Some(&HclValue::List(vec!["192.0.2.2".into(), "192.0.2.1".into()]))
        );
    }

    #[test]
    fn test_txt_values_are_unquoted() {
        let r = record("example.com.", "TXT", &["\"v=spf1 include:\\\"x\\\" -all\"", "bare"]);
        let attributes = record_attributes(&r);
        assert_eq!(
            attributes.get("records"),
            Some(&HclValue::List(vec![
                "v=spf1 include:\"x\" -all".into(),
                "bare".into()
            ]))
        );
    }

    #[test]
    fn test_alias_and_geolocation_attributes() {
        let mut r = record("\\052.example.com.", "A", &[]);
        r.alias = Some(AliasTarget {
            dns_name: "dualstack.lb-1.eu-west-1.elb.amazonaws.com.".to_string(),
            hosted_zone_id: "Z32O12XQLNTSW2".to_string(),
            evaluate_target_health: false,
        });
        r.geo_location = Some(GeoLocation {
            continent_code: None,
            country_code: Some("DE".to_string()),
            subdivision_code: Some(String::new()),
        });

        let attributes = record_attributes(&r);
        assert_eq!(
            attributes.get("full_name"),
            Some(&HclValue::String("*.example.com".to_string()))
        );
        assert!(attributes.get("records").is_none());

        let Some(HclValue::Map(alias)) = attributes.get("alias") else {
            panic!("alias should be a map");
        };
        assert_eq!(
            alias.get("name"),
            Some(&HclValue::String("dualstack.lb-1.eu-west-1.elb.amazonaws.com".to_string()))
        );
        assert_eq!(alias.get("evaluate_target_health"), Some(&HclValue::Bool(false)));

        let Some(HclValue::Map(geo)) = attributes.get("geolocation_routing_policy") else {
            panic!("geolocation policy should be a map");
        };
        assert_eq!(geo.len(), 1);
        assert_eq!(geo.get("country"), Some(&HclValue::String("DE".to_string())));
    }

    #[test]
    fn test_build_zone_records_sorts_filters_and_dedupes_keys() {
        let zone = zone();
        let mut blue = record("api.example.com.", "A", &["192.0.2.1"]);
        blue.set_identifier = Some("blue".to_string());
        let mut green = record("api.example.com.", "A", &["192.0.2.2"]);
        green.set_identifier = Some("green".to_string());

        let records = vec![
            record("www.example.com.", "A", &["192.0.2.10"]),
            green,
            record("example.com.", "NS", &["ns-1.awsdns-01.org."]),
            blue,
            record("example.com.", "MX", &["10 mail.example.com."]),
        ];

        let built = build_zone_records(&zone, &records, &FilterRules::default()).unwrap();

        let keys: Vec<&str> = built.records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["a_api", "a_api_02", "mx_root", "a_www"]);
        assert_eq!(built.zone_key, "example.com");
        assert_eq!(built.local_var, "zone_records_example_com");
        assert_eq!(built.file_name, "route53-records-example-com.tf");
        assert_eq!(built.imports.len(), 4);
        assert_eq!(built.imports[0].import_id, "Z1_api.example.com_A_blue");
        assert_eq!(built.imports[1].import_id, "Z1_api.example.com_A_green");
    }

    #[test]
    fn test_build_zone_records_suffix_never_reuses_a_key() {
        let zone = zone();
        let mut blue = record("www.example.com.", "A", &["192.0.2.1"]);
        blue.set_identifier = Some("blue".to_string());
        let mut green = record("www.example.com.", "A", &["192.0.2.2"]);
        green.set_identifier = Some("green".to_string());
        let records = vec![blue, green, record("www-02.example.com.", "A", &["192.0.2.3"])];

        let built = build_zone_records(&zone, &records, &FilterRules::default()).unwrap();

        let keys: Vec<&str> = built.records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["a_www_02", "a_www", "a_www_03"]);

        let targets: BTreeSet<&str> = built.imports.iter().map(|i| i.record_key.as_str()).collect();
        assert_eq!(targets.len(), 3);

        let rendered = render_zone_file(&built);
        for value in ["192.0.2.1", "192.0.2.2", "192.0.2.3"] {
            assert!(rendered.contains(value), "{} missing from zone file", value);
        }
    }

    #[test]
    fn test_build_zone_records_private_zone_names() {
        let zone = ZoneBuilder::new("Z2", "corp.internal").private().build();
        let built = build_zone_records(&zone, &[], &FilterRules::default()).unwrap();

        assert_eq!(built.zone_key, "corp.internal_private");
        assert_eq!(built.local_var, "zone_records_corp_internal_private");
        assert_eq!(built.file_name, "route53-records-corp-internal-private.tf");
    }

    #[test]
    fn test_build_zone_records_rejects_malformed_record() {
        let zone = zone();
        let records = vec![record("", "A", &["192.0.2.1"])];

        let err = build_zone_records(&zone, &records, &FilterRules::default()).unwrap_err();
        assert!(matches!(err, ExportError::Render { .. }));
        assert_eq!(err.zone_id(), Some("Z1"));
    }

    #[test]
    fn test_render_zone_file() {
        let zone = zone();
        let mut www = record("www.example.com.", "A", &["192.0.2.10"]);
        www.ttl = Some(300);
        let built = build_zone_records(&zone, &[www], &FilterRules::default()).unwrap();

        let expected = "\
locals {
  zone_records_example_com = {
    \"example.com\" = {
      a_www = {
        full_name = \"www.example.com\"
        type = \"A\"
        ttl = 300
        records = [
          \"192.0.2.10\",
        ]
      }
    }
  }
}
";
        assert_eq!(render_zone_file(&built), expected);
    }

    #[test]
    fn test_render_single_zone_records() {
        let zone = zone();
        let built = build_zone_records(
            &zone,
            &[record("example.com.", "TXT", &["\"hello\""])],
            &FilterRules::default(),
        )
        .unwrap();

        let expected = "\
locals {
  zone_records = {
    txt_root = {
      full_name = \"example.com\"
      type = \"TXT\"
      records = [
        \"hello\",
      ]
    }
  }
}
";
        assert_eq!(render_single_zone_records(&built.records), expected);
    }

    #[test]
    fn test_zone_attributes_private_with_vpcs_and_tags() {
        let zone = ZoneBuilder::new("Z3", "corp.internal")
            .comment("internal names")
            .private()
            .vpc("vpc-bbb", Some("us-east-1"))
            .vpc("vpc-aaa", Some("eu-west-1"))
            .tag("Team", "platform")
            .tag("Env", "prod")
            .build();

        let mut zones = BTreeMap::new();
        zones.insert(zone.key(), zone_attributes(&zone, true));

        let expected = "\
locals {
  zones = {
    \"corp.internal_private\" = {
      name = \"corp.internal\"
      comment = \"internal names\"
      private_zone = true
      vpcs = {
        eu_west_1_vpc_aaa = {
          vpc_id = \"vpc-aaa\"
          vpc_region = \"eu-west-1\"
        }
        us_east_1_vpc_bbb = {
          vpc_id = \"vpc-bbb\"
          vpc_region = \"us-east-1\"
        }
      }
      tags = {
        Env = \"prod\"
        Team = \"platform\"
      }
    }
  }
}
";
        assert_eq!(render_zones_file(&zones), expected);
    }

    #[test]
    fn test_zone_attributes_without_tags() {
        let zone = ZoneBuilder::new("Z1", "example.com").tag("Team", "x").build();
        let attributes = zone_attributes(&zone, false);

        assert_eq!(attributes.get("tags"), Some(&HclValue::Map(HclMap::new())));
        assert!(attributes.get("vpcs").is_none());
    }

    #[test]
    fn test_public_zone_ignores_vpcs() {
        let mut zone = zone();
        zone.vpcs.push(ZoneVpc {
            vpc_id: "vpc-1".to_string(),
            vpc_region: None,
        });
        assert!(zone_attributes(&zone, true).get("vpcs").is_none());
    }

    #[test]
    fn test_render_imports_multi_zone() {
        let plan = ImportPlan {
            single_zone: false,
            single_zone_id: None,
            zones: vec![("example.com".to_string(), "Z1".to_string())],
            records: vec![
                ImportEntry {
                    zone_key: "example.com".to_string(),
                    record_key: "a_www".to_string(),
                    import_id: "Z1_www.example.com_A".to_string(),
                },
                ImportEntry {
                    zone_key: "example.com".to_string(),
                    record_key: "a_api".to_string(),
                    import_id: "Z1_api.example.com_A".to_string(),
                },
                ImportEntry {
                    zone_key: "example.com".to_string(),
                    record_key: "a_api".to_string(),
                    import_id: "Z1_api.example.com_A".to_string(),
                },
            ],
        };

        let expected = "\
import {
  to = module.zones[\"example.com\"].aws_route53_zone.this[0]
  id = \"Z1\"
}

import {
  to = module.zones[\"example.com\"].aws_route53_record.this[\"a_api\"]
  id = \"Z1_api.example.com_A\"
}

import {
  to = module.zones[\"example.com\"].aws_route53_record.this[\"a_www\"]
  id = \"Z1_www.example.com_A\"
}
";
        assert_eq!(render_imports(&plan), expected);
    }

    #[test]
    fn test_render_imports_single_zone() {
        let plan = ImportPlan {
            single_zone: true,
            single_zone_id: Some("Z1".to_string()),
            zones: Vec::new(),
            records: vec![ImportEntry {
                zone_key: "example.com".to_string(),
                record_key: "mx_root".to_string(),
                import_id: "Z1_example.com_MX".to_string(),
            }],
        };

        let rendered = render_imports(&plan);
        assert!(rendered.starts_with("import {\n  to = module.zone.aws_route53_zone.this[0]\n"));
        assert!(rendered.contains("  to = module.zone.aws_route53_record.this[\"mx_root\"]\n"));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_render_imports_empty() {
        assert_eq!(render_imports(&ImportPlan::default()), "");
    }

    #[test]
    fn test_render_merged_locals() {
        let vars = vec![
            "zone_records_b_com".to_string(),
            "zone_records_a_com".to_string(),
            "zone_records_b_com".to_string(),
        ];
        assert_eq!(
            render_merged_locals(&vars),
            "locals {\n  zone_records = merge(\n    {},\n    local.zone_records_a_com,\n    local.zone_records_b_com\n  )\n}"
        );
        assert_eq!(
            render_merged_locals(&[]),
            "locals {\n  zone_records = {}\n}"
        );
    }

    #[test]
    fn test_render_single_zone_locals() {
        assert_eq!(
            render_single_zone_locals("example.com"),
            "locals {\n  zone = {\n    name    = \"example.com\"\n    comment = \"Primary example.com zone\"\n    tags    = {}\n  }\n}"
        );
    }
}
