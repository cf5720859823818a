use super::{AliasTarget, GeoLocation, Record, Route53Source, Zone, ZoneVpc};
use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{ResourceRecordSet, RrType, TagResourceType};
use std::collections::BTreeMap;

/// Route53 is a global service; the SDK still needs a region to resolve the
/// endpoint when none is configured.
const FALLBACK_REGION: &str = "us-east-1";

/// Route53 access through the AWS SDK
///
/// Credentials come from the standard AWS chain (environment, shared config
/// and credentials files, SSO, instance metadata). When a profile is given it
/// selects the shared-config profile, exactly like `AWS_PROFILE`.
///
/// The SDK is async while the exporter is sequential, so the source owns a
/// current-thread runtime and blocks on each request.
pub struct AwsRoute53Source {
    runtime: tokio::runtime::Runtime,
    client: aws_sdk_route53::Client,
}

impl AwsRoute53Source {
    /// Build a client for the given credential profile
    pub fn new(profile: Option<&str>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;

        let region = RegionProviderChain::default_provider().or_else(FALLBACK_REGION);
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }

        let sdk_config = runtime.block_on(loader.load());
        let client = aws_sdk_route53::Client::new(&sdk_config);

        Ok(Self { runtime, client })
    }

    fn list_record_page(
        &self,
        zone_id: &str,
        start_name: Option<String>,
        start_type: Option<RrType>,
        start_identifier: Option<String>,
    ) -> Result<aws_sdk_route53::operation::list_resource_record_sets::ListResourceRecordSetsOutput>
    {
        self.runtime
            .block_on(
                self.client
                    .list_resource_record_sets()
                    .hosted_zone_id(zone_id)
                    .set_start_record_name(start_name)
                    .set_start_record_type(start_type)
                    .set_start_record_identifier(start_identifier)
                    .send(),
            )
            .map_err(|err| anyhow::anyhow!("{}", DisplayErrorContext(&err)))
            .with_context(|| format!("ListResourceRecordSets failed for {}", zone_id))
    }
}

impl Route53Source for AwsRoute53Source {
    fn fetch_zone(&self, zone_id: &str) -> Result<Zone> {
        let response = self
            .runtime
            .block_on(self.client.get_hosted_zone().id(zone_id).send())
            .map_err(|err| anyhow::anyhow!("{}", DisplayErrorContext(&err)))
            .with_context(|| format!("GetHostedZone failed for {}", zone_id))?;

        let hosted_zone = response
            .hosted_zone()
            .with_context(|| format!("GetHostedZone returned no zone for {}", zone_id))?;

        let name = hosted_zone.name().trim_end_matches('.');
        let (comment, private_zone) = match hosted_zone.config() {
            Some(config) => (
                config.comment().unwrap_or_default().to_string(),
                config.private_zone(),
            ),
            None => (String::new(), false),
        };

        let vpcs = response
            .vpcs()
            .iter()
            .filter_map(|vpc| {
                let vpc_id = vpc.vpc_id()?;
                Some(ZoneVpc {
                    vpc_id: vpc_id.to_string(),
                    vpc_region: vpc.vpc_region().map(|region| region.as_str().to_string()),
                })
            })
            .collect();

        Ok(Zone {
            id: zone_id.to_string(),
            name: if name.is_empty() {
                zone_id.to_string()
            } else {
                name.to_string()
            },
            comment,
            private_zone,
            vpcs,
            tags: BTreeMap::new(),
        })
    }

    fn fetch_records(&self, zone_id: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut page = self.list_record_page(zone_id, None, None, None)?;

        loop {
            records.extend(page.resource_record_sets().iter().map(convert_record));

            if !page.is_truncated() {
                break;
            }

            // Record set listing continues from a (name, type, identifier)
            // triple rather than an opaque marker
            page = self.list_record_page(
                zone_id,
                page.next_record_name().map(str::to_string),
                page.next_record_type().cloned(),
                page.next_record_identifier().map(str::to_string),
            )?;
        }

        Ok(records)
    }

    fn fetch_tags(&self, zone_id: &str) -> Result<BTreeMap<String, String>> {
        let response = self
            .runtime
            .block_on(
                self.client
                    .list_tags_for_resource()
                    .resource_type(TagResourceType::Hostedzone)
                    .resource_id(zone_id)
                    .send(),
            )
            .map_err(|err| anyhow::anyhow!("{}", DisplayErrorContext(&err)))
            .with_context(|| format!("ListTagsForResource failed for {}", zone_id))?;

        let mut tags = BTreeMap::new();
        if let Some(tag_set) = response.resource_tag_set() {
            for tag in tag_set.tags() {
                if let Some(key) = tag.key().filter(|key| !key.is_empty()) {
                    tags.insert(key.to_string(), tag.value().unwrap_or_default().to_string());
                }
            }
        }

        Ok(tags)
    }
}

fn convert_record(record: &ResourceRecordSet) -> Record {
    Record {
        name: record.name().to_string(),
        record_type: record.r#type().as_str().to_uppercase(),
        ttl: record.ttl(),
        values: record
            .resource_records()
            .iter()
            .map(|entry| entry.value().to_string())
            .collect(),
        alias: record.alias_target().map(|alias| AliasTarget {
            dns_name: alias.dns_name().to_string(),
            hosted_zone_id: alias.hosted_zone_id().to_string(),
            evaluate_target_health: alias.evaluate_target_health(),
        }),
        set_identifier: record.set_identifier().map(str::to_string),
        weight: record.weight(),
        region: record.region().map(|region| region.as_str().to_string()),
        geo_location: record.geo_location().map(|geo| GeoLocation {
            continent_code: geo.continent_code().map(str::to_string),
            country_code: geo.country_code().map(str::to_string),
            subdivision_code: geo.subdivision_code().map(str::to_string),
        }),
        failover: record.failover().map(|failover| failover.as_str().to_string()),
        multi_value_answer: record.multi_value_answer(),
        health_check_id: record.health_check_id().map(str::to_string),
        traffic_policy_instance_id: record.traffic_policy_instance_id().map(str::to_string),
    }
}
