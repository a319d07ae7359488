//! Label selector command.
//!
//! ```bash
//! mta-config criteria --exists mta_id --absent mta_namespace
//! mta-config criteria --equals tier=backend
//! mta-config criteria --mta-id com.acme.shop --namespace blue
//! ```

use clap::Args;
use mta_metadata::{labels, MtaMetadataCriteria, MtaMetadataCriteriaBuilder};
use tracing::{debug, instrument};

use crate::errors::Error;
use crate::parse_key_val;

#[cfg(test)]
#[path = "criteria_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone, Default)]
pub struct CriteriaArgs {
    /// Label that must be present
    #[arg(long)]
    pub exists: Vec<String>,

    /// Label that must be absent
    #[arg(long)]
    pub absent: Vec<String>,

    /// Label that must have a value (KEY=VALUE)
    #[arg(long, value_parser = parse_key_val)]
    pub equals: Vec<(String, String)>,

    /// Select the entities of a deployed MTA
    #[arg(long, conflicts_with_all = ["exists", "absent", "equals"])]
    pub mta_id: Option<String>,

    /// Namespace of the deployed MTA
    #[arg(long, requires = "mta_id")]
    pub namespace: Option<String>,
}

/// Build the selector described by `args` and return its query string.
///
/// # Errors
///
/// Returns `Error::InvalidArguments` when no criterion is given and
/// `Error::Criteria` when a key or value is not a valid label.
#[instrument]
pub fn execute(args: &CriteriaArgs) -> Result<String, Error> {
    let criteria = build_criteria(args)?;
    debug!(criteria = %criteria, "Built label selector");
    Ok(criteria.query())
}

fn build_criteria(args: &CriteriaArgs) -> Result<MtaMetadataCriteria, Error> {
    if let Some(mta_id) = &args.mta_id {
        return Ok(labels::deployed_mta(mta_id, args.namespace.as_deref())?);
    }

    let mut builder = MtaMetadataCriteriaBuilder::builder();
    let mut last = None;
    for key in &args.exists {
        let step = builder.label(key)?.exists();
        builder = step.and();
        last = Some(step);
    }
    for key in &args.absent {
        let step = builder.label(key)?.does_not_exist();
        builder = step.and();
        last = Some(step);
    }
    for (key, value) in &args.equals {
        let step = builder.label(key)?.has_value(value)?;
        builder = step.and();
        last = Some(step);
    }

    last.map(|step| step.build()).ok_or_else(|| {
        Error::InvalidArguments(
            "at least one of --exists, --absent, --equals or --mta-id is required".to_string(),
        )
    })
}
