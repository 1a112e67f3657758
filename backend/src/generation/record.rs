use crate::clients::projects::ProjectStore;
use common::model::project::NewProject;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Inserts the project row on its own task.
///
/// The handle always resolves to `Some(id)` or `None`: insert errors, an insert that
/// returns no row, and a panicking store are all logged here and never reach the
/// response being built by the caller.
pub fn spawn_record_writer(
    store: Arc<dyn ProjectStore>,
    project: NewProject,
) -> JoinHandle<Option<String>> {
    tokio::spawn(async move {
        match store.insert(&project).await {
            Ok(Some(row)) => {
                info!("saved project record {}", row.id);
                Some(row.id)
            }
            Ok(None) => {
                warn!("project insert returned no row");
                None
            }
            Err(e) => {
                error!("failed to save project record: {}", e);
                None
            }
        }
    })
}

/// Waits for the writer, treating a crashed task like a failed insert.
pub async fn record_id(handle: JoinHandle<Option<String>>) -> Option<String> {
    match handle.await {
        Ok(id) => id,
        Err(join_err) => {
            error!("project record task failed: {}", join_err);
            None
        }
    }
}
