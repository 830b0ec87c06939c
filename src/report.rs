//! Quality gate over the severity summary of a vulnerability scan.
//!
//! The summary is a JSON object that maps severity names to counts,
//! e.g. `{"critical": 0, "high": 2, "low": 7}`. The counts may also be
//! nested in a `severities` object, as written by [`crate::nessus`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fs, io, path::Path};
use thiserror::Error;

pub const DEFAULT_BLOCKING_SEVERITIES: &[&str] = &["critical", "major", "high"];

pub const EXIT_CODE_PASSED: i32 = 0;
pub const EXIT_CODE_BLOCKED: i32 = 1;
pub const EXIT_CODE_ERROR: i32 = 2;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("The summary is not a JSON object")]
    NotAnObject,
    #[error("Invalid count of '{severity}': {value}")]
    InvalidCount { severity: String, value: Value },
    #[error("The total of blocking findings is out of range")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary(Map<String, Value>);

impl Summary {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path)?;
        json.parse()
    }

    /// Missing severities count as zero.
    pub fn count(&self, severity: &str) -> Result<i64, Error> {
        let Some(value) = self.0.get(severity) else {
            return Ok(0);
        };
        let count = match value {
            Value::Number(n) => n.as_i64().or_else(|| integral_f64_to_i64(n.as_f64()?)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        count.ok_or_else(|| Error::InvalidCount {
            severity: severity.to_owned(),
            value: value.clone(),
        })
    }

    pub fn total<S: AsRef<str>>(&self, severities: &[S]) -> Result<i64, Error> {
        severities.iter().try_fold(0i64, |total, s| {
            total.checked_add(self.count(s.as_ref())?).ok_or(Error::Overflow)
        })
    }
}

fn integral_f64_to_i64(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64, the bound is exclusive
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-BOUND..BOUND).contains(&f)).then_some(f as i64)
}

impl std::str::FromStr for Summary {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Value::Object(mut map) = serde_json::from_str::<Value>(s)? else {
            return Err(Error::NotAnObject);
        };
        match map.remove("severities") {
            Some(Value::Object(severities)) => Ok(Self(severities)),
            Some(_) => Err(Error::NotAnObject),
            None => Ok(Self(map)),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

/// Severity names of a written summary.
pub const NORMALIZED_SEVERITIES: &[&str] = &["critical", "major", "minor", "info"];

/// Map a scanner specific severity onto [`NORMALIZED_SEVERITIES`].
pub fn normalize_severity(severity: Option<&str>) -> &'static str {
    let Some(severity) = severity else {
        return "info";
    };
    let s = severity.trim().to_lowercase();
    match s.as_str() {
        "blocker" | "critical" | "crit" => "critical",
        "major" | "high" => "major",
        "minor" | "medium" | "med" => "minor",
        "info" | "informational" | "i" => "info",
        _ if s.contains("block") || s.contains("crit") => "critical",
        _ if s.contains("high") || s.contains("major") => "major",
        _ if s.contains("low") || s.contains("min") => "minor",
        _ => "info",
    }
}

pub type SeverityCounts = BTreeMap<&'static str, u64>;

pub fn count_normalized<'a, I>(severities: I) -> SeverityCounts
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: SeverityCounts = NORMALIZED_SEVERITIES.iter().map(|s| (*s, 0)).collect();
    for severity in severities {
        *counts.entry(normalize_severity(severity)).or_default() += 1;
    }
    counts
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    severities: &'a SeverityCounts,
    generated_at: i64,
}

/// Replace the summary file at `path`.
pub fn write_summary(
    path: &Path,
    counts: &SeverityCounts,
    generated_at: i64,
) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(&SummaryFile {
        severities: counts,
        generated_at,
    })?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::info!("Wrote severity summary to {}", path.display());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Blocked { total: i64 },
}

impl Verdict {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Passed => EXIT_CODE_PASSED,
            Self::Blocked { .. } => EXIT_CODE_BLOCKED,
        }
    }
}

pub fn evaluate<S: AsRef<str>>(summary: &Summary, blocking: &[S]) -> Result<Verdict, Error> {
    let total = summary.total(blocking)?;
    if total > 0 {
        Ok(Verdict::Blocked { total })
    } else {
        Ok(Verdict::Passed)
    }
}

/// Check the summary file and return the process exit code.
pub fn check_report<S: AsRef<str>>(path: &Path, blocking: &[S]) -> i32 {
    let blocking_names: Vec<_> = blocking.iter().map(AsRef::as_ref).collect();
    let summary = match Summary::load(path) {
        Ok(summary) => summary,
        Err(err) => {
            log::error!("Unable to read summary {}: {err}", path.display());
            println!("ERROR leyendo summary: {err}");
            return EXIT_CODE_ERROR;
        }
    };
    println!("Resumen de severidades encontrado: {summary}");
    match evaluate(&summary, blocking) {
        Ok(Verdict::Blocked { total }) => {
            println!(
                "Vulnerabilidades bloqueantes detectadas: {total} (severidades: {blocking_names:?})"
            );
            EXIT_CODE_BLOCKED
        }
        Ok(Verdict::Passed) => {
            println!("No se han detectado vulnerabilidades bloqueantes. OK para desplegar.");
            EXIT_CODE_PASSED
        }
        Err(err) => {
            log::error!("Invalid summary {}: {err}", path.display());
            println!("ERROR leyendo summary: {err}");
            EXIT_CODE_ERROR
        }
    }
}
