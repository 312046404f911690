use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use staffdir_core::dates::parse_flexible_date;
use staffdir_core::permissions::{Capability, PermissionSnapshot, can_perform, has_capability};
use staffdir_models::{BranchDirectory, TenureClassification, classify_dates};

/// Parses a `--now` override; `None` means today.
pub fn resolve_now(now: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match now {
        None => Ok(today),
        Some(raw) => parse_flexible_date(raw).ok_or_else(|| anyhow!("Unrecognised date: {}", raw)),
    }
}

pub fn describe_tenure(tenure: &TenureClassification) -> String {
    match (tenure.reference_kind, tenure.reference_date, tenure.elapsed_text()) {
        (Some(kind), Some(date), Some(elapsed)) => format!(
            "{} (since {} {}: {})",
            tenure.category.label(),
            kind.label(),
            date.format("%d/%m/%Y"),
            elapsed
        ),
        _ => format!("{} (no date on record)", tenure.category.label()),
    }
}

pub fn classify(increment: &str, joining: &str, now: NaiveDate) -> String {
    describe_tenure(&classify_dates(increment, joining, now))
}

/// Evaluates one capability against a snapshot given as JSON. With a branch
/// the branch scope is checked as well.
pub fn check(snapshot_json: &str, capability: &str, branch: Option<&str>) -> Result<bool> {
    let snapshot: PermissionSnapshot =
        serde_json::from_str(snapshot_json).context("Snapshot is not valid JSON")?;
    let capability: Capability = capability.parse()?;

    Ok(match branch {
        Some(branch) => can_perform(Some(&snapshot), capability, branch),
        None => has_capability(Some(&snapshot), capability),
    })
}

/// Searches one branch of a `getInitialData` payload. Accepts either the bare
/// `data` array or the whole reply envelope.
pub fn search(data_json: &str, branch: &str, term: &str, now: NaiveDate) -> Result<Vec<String>> {
    let value: serde_json::Value =
        serde_json::from_str(data_json).context("Directory data is not valid JSON")?;
    let data = value.get("data").unwrap_or(&value);
    let directory = BranchDirectory::from_remote(data);

    if directory.find_branch(branch).is_none() {
        return Err(anyhow!(
            "No branch named \"{}\". Known branches: {}",
            branch,
            directory.branch_names().join(", ")
        ));
    }

    Ok(directory
        .search(branch, term, now)
        .into_iter()
        .map(|hit| {
            let former = if hit.staff.is_former { " [former]" } else { "" };
            format!(
                "#{} {} - {}{}: {}",
                hit.staff.row_index,
                hit.staff.full_name(),
                hit.staff.designation(),
                former,
                describe_tenure(&hit.tenure)
            )
        })
        .collect())
}
