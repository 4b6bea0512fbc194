// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ordered removal of a utility's cloud storage.

use crate::aws::StorageBackend;
use crate::error::{ProvisionerError, Result, TeardownStep};
use crate::identity::ResourceIdentity;
use tracing::{info, instrument};

/// Delete the bucket, the table and the events table, in that order.
///
/// Stops at the first failure and reports that step; anything after it is
/// left for the next call, which is safe since every deletion tolerates an
/// already-missing resource.
#[instrument(skip(storage), fields(identity = %identity.name()))]
pub async fn destroy_storage(
    storage: &dyn StorageBackend,
    identity: &ResourceIdentity,
) -> Result<()> {
    let name = identity.name();
    let events_table = identity.events_table_name();

    storage
        .ensure_bucket_deleted(&name)
        .await
        .map_err(|e| teardown_error(TeardownStep::Bucket, &name, e))?;

    storage
        .ensure_table_deleted(&name)
        .await
        .map_err(|e| teardown_error(TeardownStep::Table, &name, e))?;

    storage
        .ensure_table_deleted(&events_table)
        .await
        .map_err(|e| teardown_error(TeardownStep::EventsTable, &events_table, e))?;

    info!("Storage for {} removed", name);
    Ok(())
}

fn teardown_error(
    step: TeardownStep,
    resource: &str,
    source: ProvisionerError,
) -> ProvisionerError {
    ProvisionerError::TeardownError {
        step,
        resource: resource.to_string(),
        source: Box::new(source),
    }
}
