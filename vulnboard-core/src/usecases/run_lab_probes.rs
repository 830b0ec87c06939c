use super::prelude::*;
use crate::lab::{self, DebugNote};

/// Optional lab parameters of a request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabProbes {
    /// Account name for the concatenated user lookup.
    pub user: Option<String>,
    /// Raise and expose an internal exception.
    pub force_error: bool,
}

/// Run the vulnerable lab snippets and collect their diagnostic output.
///
/// Probe failures never abort the request, they are turned into notes
/// that carry the raw error message.
pub fn run_lab_probes<R>(repo: &R, probes: &LabProbes) -> Vec<DebugNote>
where
    R: LabProbeRepository,
{
    let mut notes = Vec::new();

    if let Some(user) = probes.user.as_deref().filter(|u| !u.is_empty()) {
        if let Err(err) = repo.probe_user_lookup(user) {
            log::warn!("Lab user lookup failed: {err}");
            notes.push(DebugNote::new(format!("SQL error: {err}")));
        }
    }

    notes.push(DebugNote::new(format!(
        "lab account: {} / md5:{}",
        lab::LAB_DB_USER,
        lab::weak_password_digest(lab::LAB_PLAIN_PASSWORD)
    )));

    if probes.force_error {
        let err = anyhow::anyhow!(lab::FORCED_ERROR_MESSAGE);
        notes.push(DebugNote::new(format!("DEBUG EXCEPTION: {err}")));
    }

    notes.push(DebugNote::new(format!(
        "Token prueba (débil): {}",
        lab::weak_token()
    )));

    notes
}
