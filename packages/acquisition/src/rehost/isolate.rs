use std::future::Future;

use crate::types::report::RehostReport;

/// Run `step` over every item in order, one at a time, recording each
/// outcome. A failing item never stops the batch and never propagates.
pub async fn process_isolated<T, F, Fut>(items: impl IntoIterator<Item = T>, mut step: F) -> RehostReport
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    let mut report = RehostReport::default();

    for item in items {
        match step(item).await {
            Ok(()) => report.record_success(),
            Err(error) => {
                tracing::warn!(error = %error, "Batch item failed");
                report.record_failure(error);
            }
        }
    }

    report
}
