pub mod admin;
pub mod candidates;
pub mod root;

use std::{future::Future, time::Duration};

use crate::error::{BoxError, DeadlineExceeded};

/// Run an external call under `deadline`, boxing its error.
pub(crate) async fn within<T, E>(
  deadline: Duration,
  call:     impl Future<Output = Result<T, E>>,
) -> Result<T, BoxError>
where
  E: std::error::Error + Send + Sync + 'static,
{
  match tokio::time::timeout(deadline, call).await {
    Ok(result) => result.map_err(|e| Box::new(e) as BoxError),
    Err(_) => Err(Box::new(DeadlineExceeded(deadline))),
  }
}
