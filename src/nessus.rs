//! Markdown report from a Nessus XML export (`.nessus`).
//!
//! Both the upper case attribute names of older exports (`PLUGIN_ID`,
//! `SEVERITY`, `NAME`) and the ones of the v2 format (`pluginID`,
//! `severity`, `name`) are understood.

use anyhow::{Context as _, Result};
use std::{fmt, fs, path::Path};
use vulnboard_entities::time::Timestamp;

use crate::report::{self, SeverityCounts};

const DESCRIPTION_MAX_CHARS: usize = 300;

const NOT_AVAILABLE: &str = "N/A";

/// Findings below this level are counted but not listed.
const MIN_LISTED_SEVERITY: Severity = Severity::Medium;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Nessus risk levels 0 (info) to 4 (critical).
    pub fn from_level(level: &str) -> Option<Self> {
        let severity = match level.trim() {
            "0" => Self::Info,
            "1" => Self::Low,
            "2" => Self::Medium,
            "3" => Self::High,
            "4" => Self::Critical,
            _ => return None,
        };
        Some(severity)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub plugin_id: String,
    pub plugin_name: String,
    /// Raw risk level as exported
    pub level: String,
    pub severity: Option<Severity>,
    pub description: Option<String>,
    pub solution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub policy: Option<String>,
    pub report_name: Option<String>,
    pub targets: Vec<String>,
    pub hosts: Vec<Host>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub info: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

fn attribute(node: roxmltree::Node<'_, '_>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| node.attribute(*name))
        .map(ToOwned::to_owned)
}

fn child_text(node: roxmltree::Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(ToOwned::to_owned)
}

impl ScanReport {
    pub fn load(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        xml.parse()
            .with_context(|| format!("Invalid Nessus export {}", path.display()))
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.hosts.iter().flat_map(|h| h.findings.iter())
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for severity in self.findings().filter_map(|f| f.severity) {
            let count = match severity {
                Severity::Info => &mut tally.info,
                Severity::Low => &mut tally.low,
                Severity::Medium => &mut tally.medium,
                Severity::High => &mut tally.high,
                Severity::Critical => &mut tally.critical,
            };
            *count += 1;
        }
        tally
    }

    /// Counts for [`report::write_summary`].
    pub fn normalized_counts(&self) -> SeverityCounts {
        report::count_normalized(self.findings().map(|f| f.severity.map(Severity::as_str)))
    }

    pub const fn to_markdown(&self, generated_at: Timestamp) -> Markdown<'_> {
        Markdown {
            report: self,
            generated_at,
        }
    }
}

impl std::str::FromStr for ScanReport {
    type Err = roxmltree::Error;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        let doc = roxmltree::Document::parse(xml)?;
        let policy = doc
            .descendants()
            .filter(|n| n.has_tag_name("Policy"))
            .find_map(|n| child_text(n, "PolicyName"));
        let report_name = doc
            .descendants()
            .filter(|n| n.has_tag_name("Report"))
            .find_map(|n| child_text(n, "ReportName").or_else(|| attribute(n, &["name"])));
        let targets = doc
            .descendants()
            .filter(|n| n.has_tag_name("ReportTarget"))
            .filter_map(|n| n.text().map(ToOwned::to_owned))
            .collect();
        let hosts = doc
            .descendants()
            .filter(|n| n.has_tag_name("ReportHost"))
            .map(|host| {
                let name = attribute(host, &["NAME", "name"]).unwrap_or_else(|| "Unknown".into());
                let findings = host
                    .descendants()
                    .filter(|n| n.has_tag_name("ReportItem"))
                    .map(|item| {
                        let level = attribute(item, &["SEVERITY", "severity"])
                            .unwrap_or_else(|| "0".into());
                        let severity = Severity::from_level(&level);
                        if severity.is_none() {
                            log::warn!("Unknown risk level '{level}' on host {name}");
                        }
                        Finding {
                            plugin_id: attribute(item, &["PLUGIN_ID", "pluginID"])
                                .unwrap_or_else(|| NOT_AVAILABLE.into()),
                            plugin_name: attribute(item, &["PLUGIN_NAME", "pluginName"])
                                .unwrap_or_else(|| NOT_AVAILABLE.into()),
                            level,
                            severity,
                            description: child_text(item, "description"),
                            solution: child_text(item, "solution"),
                        }
                    })
                    .collect();
                Host { name, findings }
            })
            .collect();
        Ok(Self {
            policy,
            report_name,
            targets,
            hosts,
        })
    }
}

fn shorten(text: &str) -> String {
    let mut chars = text.chars();
    let mut short: String = chars.by_ref().take(DESCRIPTION_MAX_CHARS).collect();
    if chars.next().is_some() {
        short.push_str("...");
    }
    short
}

pub struct Markdown<'a> {
    report: &'a ScanReport,
    generated_at: Timestamp,
}

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            report,
            generated_at,
        } = self;
        let targets = if report.targets.is_empty() {
            NOT_AVAILABLE.to_owned()
        } else {
            report.targets.join(", ")
        };
        let tally = report.tally();

        writeln!(f, "# Reporte de Escaneo Nessus")?;
        writeln!(f)?;
        writeln!(
            f,
            "**Política:** {}  ",
            report.policy.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        writeln!(
            f,
            "**Fecha de Inicio:** {}  ",
            report.report_name.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        writeln!(f, "**Targets:** {targets}  ")?;
        writeln!(f, "**Generado:** {generated_at}  ")?;
        writeln!(f)?;
        writeln!(f, "## Resumen de Severidades")?;
        writeln!(f)?;
        writeln!(f, "- Info: {}", tally.info)?;
        writeln!(f, "- Low: {}", tally.low)?;
        writeln!(f, "- Medium: {}", tally.medium)?;
        writeln!(f, "- High: {}", tally.high)?;
        writeln!(f, "- Critical: {}", tally.critical)?;
        writeln!(f)?;
        writeln!(f, "## Vulnerabilidades por Host")?;

        for host in &report.hosts {
            writeln!(f)?;
            writeln!(f, "### Host: {}", host.name)?;
            writeln!(f)?;
            let listed = host
                .findings
                .iter()
                .filter(|i| i.severity.is_some_and(|s| s >= MIN_LISTED_SEVERITY));
            for finding in listed {
                let Finding {
                    plugin_id,
                    plugin_name,
                    level,
                    description,
                    solution,
                    ..
                } = finding;
                let description = description
                    .as_deref()
                    .map(shorten)
                    .unwrap_or_else(|| "Sin descripción.".into());
                let solution = solution.as_deref().unwrap_or("No disponible.");
                writeln!(
                    f,
                    "- **Plugin ID: {plugin_id} - {plugin_name}** (Severidad: {level})  "
                )?;
                writeln!(f, "  **Descripción:** {description}  ")?;
                writeln!(f, "  **Solución:** {solution}  ")?;
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
