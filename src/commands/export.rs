use crate::config::ExportConfig;
use crate::context::Context;
use crate::error::{ExportError, ExportResult};
use crate::hcl::HclMap;
use crate::render::{self, ImportEntry, ImportPlan, ZoneRecords};
use crate::route53::{Route53Source, Zone};
use crate::writer::{self, PRIMARY_ZONE_MARKERS, RECORDS_MARKERS};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub struct ExportCommand;

/// Outcome of a run that got past configuration and file writing
#[derive(Debug, Default)]
pub struct ExportReport {
    pub zones_requested: usize,
    pub zones_exported: usize,
    /// Per-zone fetch and render failures, in zone order
    pub failures: Vec<ExportError>,
    /// Every file written, in write order
    pub written: Vec<PathBuf>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.zones_exported == self.zones_requested
    }

    /// 0 when every zone was exported, 2 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_complete() { 0 } else { 2 }
    }
}

/// What one successfully exported zone contributes to the shared files
#[derive(Default)]
struct ZoneContribution {
    messages: Vec<String>,
    local_var: Option<String>,
    imports: Vec<ImportEntry>,
    zone_config: Option<(String, HclMap)>,
    zone_import: Option<(String, String)>,
}

impl ExportCommand {
    /// Export every configured zone and write the shared files
    ///
    /// Fetch and render failures are recorded per zone and the run carries
    /// on; configuration and write failures end the run with an error.
    pub fn execute(
        ctx: &Context,
        source: &dyn Route53Source,
        config: &ExportConfig,
    ) -> ExportResult<ExportReport> {
        ctx.output.section("Route53 export");
        ctx.output
            .key_value("Zones", &config.zone_ids.len().to_string());
        ctx.output
            .key_value("Mode", if config.single_zone { "single zone" } else { "multi zone" });
        ctx.output.blank();

        let mut report = ExportReport {
            zones_requested: config.zone_ids.len(),
            ..Default::default()
        };

        if config.single_zone {
            Self::export_single_zone(ctx, source, config, &mut report)?;
        } else {
            Self::export_zones(ctx, source, config, &mut report)?;
        }

        ctx.output.blank();
        for path in &report.written {
            ctx.output.dimmed(&format!("  wrote {}", path.display()));
        }
        Self::print_summary(ctx, config, &report);

        Ok(report)
    }

    fn export_zones(
        ctx: &Context,
        source: &dyn Route53Source,
        config: &ExportConfig,
        report: &mut ExportReport,
    ) -> ExportResult<()> {
        let include_records = config.export_target.includes_records();
        if include_records {
            writer::ensure_dir(&*ctx.fs, &config.output_dir)?;
        }

        let mut local_vars = Vec::new();
        let mut zone_configs: BTreeMap<String, HclMap> = BTreeMap::new();
        let mut plan = ImportPlan::default();

        for zone_id in &config.zone_ids {
            let contribution = match Self::export_zone(ctx, source, config, zone_id, report) {
                Ok(contribution) => contribution,
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    ctx.output.error(&err.to_string());
                    report.failures.push(err);
                    continue;
                }
            };

            report.zones_exported += 1;
            ctx.output.success(&format!(
                "Exported {}: {}",
                zone_id,
                contribution.messages.join(", ")
            ));

            local_vars.extend(contribution.local_var);
            plan.records.extend(contribution.imports);
            plan.zones.extend(contribution.zone_import);
            if let Some((zone_key, attributes)) = contribution.zone_config {
                zone_configs.insert(zone_key, attributes);
            }
        }

        if include_records {
            writer::update_marked_file(
                &*ctx.fs,
                &config.locals_file,
                &RECORDS_MARKERS,
                &render::render_merged_locals(&local_vars),
            )?;
            report.written.push(config.locals_file.clone());
            ctx.output.info(&format!(
                "Updated {} with generated zone record locals",
                config.locals_file.display()
            ));
        }

        if config.zone_export_enabled() {
            if zone_configs.is_empty() {
                ctx.output
                    .warning("No zone configurations were generated; skipping zones file update.");
            } else {
                writer::write_file(
                    &*ctx.fs,
                    &config.zones_file,
                    &render::render_zones_file(&zone_configs),
                )?;
                report.written.push(config.zones_file.clone());
                ctx.output.info(&format!(
                    "Wrote zone configuration to {}",
                    config.zones_file.display()
                ));
            }
        }

        Self::write_imports(ctx, config, &plan, report)
    }

    /// Fetch, filter, render and write one zone of a multi-zone export
    fn export_zone(
        ctx: &Context,
        source: &dyn Route53Source,
        config: &ExportConfig,
        zone_id: &str,
        report: &mut ExportReport,
    ) -> ExportResult<ZoneContribution> {
        let zone = Self::fetch_zone(ctx, source, config, zone_id)?;
        let mut contribution = ZoneContribution::default();
        let mut zone_key = zone.key();

        if config.export_target.includes_records() {
            let zone_records = Self::collect_records(source, config, &zone)?;
            let path = config.zone_records_path(&zone_records.file_name);

            writer::write_file(&*ctx.fs, &path, &render::render_zone_file(&zone_records))?;
            report.written.push(path.clone());

            contribution
                .messages
                .push(format!("records -> {}", path.display()));
            zone_key = zone_records.zone_key;
            contribution.local_var = Some(zone_records.local_var);
            contribution.imports = zone_records.imports;
        }

        if config.zone_export_enabled() {
            contribution.zone_import = Some((zone_key.clone(), zone.id.clone()));
            contribution.zone_config = Some((
                zone_key,
                render::zone_attributes(&zone, !config.skip_zone_tags),
            ));
            contribution.messages.push("zone config prepared".to_string());
        }

        Ok(contribution)
    }

    fn export_single_zone(
        ctx: &Context,
        source: &dyn Route53Source,
        config: &ExportConfig,
        report: &mut ExportReport,
    ) -> ExportResult<()> {
        let mut plan = ImportPlan {
            single_zone: true,
            ..Default::default()
        };

        if config.export_target.includes_zones() {
            ctx.output
                .warning("Zone export is not supported in single_zone mode; skipping zone output.");
        }

        if config.export_target.includes_records() {
            if let Some(zone_id) = config.zone_ids.first() {
                match Self::export_primary_zone(ctx, source, config, zone_id, report) {
                    Ok(imports) => {
                        report.zones_exported += 1;
                        plan.records = imports;
                        plan.single_zone_id = Some(zone_id.clone());
                        ctx.output.success(&format!(
                            "Exported {} -> {}",
                            zone_id,
                            config.single_zone_records_file.display()
                        ));
                    }
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        ctx.output.error(&err.to_string());
                        report.failures.push(err);
                    }
                }
            }
        }

        Self::write_imports(ctx, config, &plan, report)
    }

    /// Records of the only zone go to one file; the locals file describes the
    /// zone itself
    fn export_primary_zone(
        ctx: &Context,
        source: &dyn Route53Source,
        config: &ExportConfig,
        zone_id: &str,
        report: &mut ExportReport,
    ) -> ExportResult<Vec<ImportEntry>> {
        let zone = Self::fetch_zone(ctx, source, config, zone_id)?;
        let zone_records = Self::collect_records(source, config, &zone)?;

        writer::write_file(
            &*ctx.fs,
            &config.single_zone_records_file,
            &render::render_single_zone_records(&zone_records.records),
        )?;
        report.written.push(config.single_zone_records_file.clone());

        writer::update_marked_file(
            &*ctx.fs,
            &config.locals_file,
            &PRIMARY_ZONE_MARKERS,
            &render::render_single_zone_locals(&zone.name),
        )?;
        report.written.push(config.locals_file.clone());

        Ok(zone_records.imports)
    }

    fn fetch_zone(
        ctx: &Context,
        source: &dyn Route53Source,
        config: &ExportConfig,
        zone_id: &str,
    ) -> ExportResult<Zone> {
        let mut zone = source
            .fetch_zone(zone_id)
            .map_err(|err| ExportError::fetch(zone_id, err))?;

        if config.fetch_zone_tags() {
            match source.fetch_tags(zone_id) {
                Ok(tags) => zone.tags = tags,
                Err(err) => ctx.output.warning(&format!(
                    "Failed to fetch tags for {}: {:#}; exporting the zone without tags",
                    zone_id, err
                )),
            }
        }

        Ok(zone)
    }

    fn collect_records(
        source: &dyn Route53Source,
        config: &ExportConfig,
        zone: &Zone,
    ) -> ExportResult<ZoneRecords> {
        let records = source
            .fetch_records(&zone.id)
            .map_err(|err| ExportError::fetch(&zone.id, err))?;

        render::build_zone_records(zone, &records, &config.filter)
    }

    fn write_imports(
        ctx: &Context,
        config: &ExportConfig,
        plan: &ImportPlan,
        report: &mut ExportReport,
    ) -> ExportResult<()> {
        writer::write_file(&*ctx.fs, &config.imports_file, &render::render_imports(plan))?;
        report.written.push(config.imports_file.clone());
        ctx.output.info(&format!(
            "Wrote import statements to {}",
            config.imports_file.display()
        ));
        Ok(())
    }

    fn print_summary(ctx: &Context, config: &ExportConfig, report: &ExportReport) {
        if !report.is_complete() {
            ctx.output.warning(&format!(
                "Completed with partial success: {}/{} zones exported.",
                report.zones_exported, report.zones_requested
            ));
            return;
        }

        let mut actions = Vec::new();
        let mut destinations = Vec::new();

        if config.export_target.includes_records() {
            actions.push("records");
            let destination = if config.single_zone {
                &config.single_zone_records_file
            } else {
                &config.output_dir
            };
            destinations.push(format!("records -> {}", destination.display()));
        }
        if config.zone_export_enabled() {
            actions.push("zones");
            destinations.push(format!("zones -> {}", config.zones_file.display()));
        }

        let noun = if report.zones_exported == 1 { "zone" } else { "zones" };
        ctx.output.success(&format!(
            "Exported {} for {} {} ({})",
            actions.join(" and "),
            report.zones_exported,
            noun,
            destinations.join("; ")
        ));
    }
}
