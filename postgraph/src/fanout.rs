use std::future::Future;

use tokio::task::JoinSet;

use crate::error::PipelineError;

/// Runs `task` for every input on its own tokio task and gathers the results
/// in input order. The first failure aborts the tasks still in flight and is
/// returned; no partial results escape.
pub(crate) async fn gather_ordered<I, T, F, Fut>(
    stage: &'static str,
    inputs: Vec<I>,
    task: F,
) -> Result<Vec<T>, PipelineError>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T, PipelineError>> + Send + 'static,
{
    let total = inputs.len();
    let mut tasks = JoinSet::new();
    for (index, input) in inputs.into_iter().enumerate() {
        let fetch = task(input);
        tasks.spawn(async move { (index, fetch.await) });
    }

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(total).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(value))) => slots[index] = Some(value),
            Ok((index, Err(err))) => {
                tracing::warn!(
                    stage,
                    index,
                    in_flight = tasks.len(),
                    error = %err,
                    "fetch failed, aborting stage"
                );
                tasks.abort_all();
                return Err(err);
            }
            Err(join_err) => {
                tracing::warn!(stage, error = %join_err, "fetch task died, aborting stage");
                tasks.abort_all();
                return Err(PipelineError::Task(join_err));
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| {
                PipelineError::consistency(format!("{stage} task {index} produced no result"))
            })
        })
        .collect()
}
