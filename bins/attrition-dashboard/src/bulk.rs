//! Bulk evaluation: score every row of a labelled dataset against the
//! service and summarise the outcome.

use std::sync::Arc;

use anyhow::{Context, Result};
use attrition_rs::dataset::LabeledDataset;
use attrition_rs::metrics::{ClassificationReport, ConfusionCounts};
use attrition_rs::Attrition;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::client::ApiClient;

#[derive(Debug)]
pub struct Evaluation {
    /// Predicted label per row, in dataset order.
    pub predictions: Vec<Attrition>,
    pub report: ClassificationReport,
}

/// Score every row and compute metrics.
///
/// With `concurrency <= 1` rows are scored strictly in order. Any failing
/// row aborts the whole evaluation and no metrics are produced.
pub async fn evaluate(
    client: &ApiClient,
    dataset: &LabeledDataset,
    concurrency: usize,
) -> Result<Evaluation> {
    info!(rows = dataset.len(), concurrency, "starting bulk evaluation");

    let predictions = if concurrency <= 1 {
        score_sequential(client, dataset).await?
    } else {
        score_concurrent(client, dataset, concurrency).await?
    };

    let truth = dataset.truth_binary();
    let predicted: Vec<u8> = predictions.iter().map(|p| p.as_binary()).collect();
    let counts = ConfusionCounts::from_binary(&truth, &predicted)
        .context("prediction count does not match dataset rows")?;

    Ok(Evaluation {
        predictions,
        report: counts.report(),
    })
}

async fn score_sequential(client: &ApiClient, dataset: &LabeledDataset) -> Result<Vec<Attrition>> {
    let mut predictions = Vec::with_capacity(dataset.len());
    for (i, row) in dataset.rows.iter().enumerate() {
        let label = client
            .predict(&row.features)
            .await
            .with_context(|| format!("row {} failed", i + 1))?;
        debug!(row = i + 1, label = %label, "row scored");
        predictions.push(label);
    }
    Ok(predictions)
}

async fn score_concurrent(
    client: &ApiClient,
    dataset: &LabeledDataset,
    concurrency: usize,
) -> Result<Vec<Attrition>> {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();
    let mut predictions: Vec<Option<Attrition>> = vec![None; dataset.len()];

    for (i, row) in dataset.rows.iter().enumerate() {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .context("request semaphore closed")?;

        // stop feeding work as soon as any finished row has failed
        while let Some(joined) = tasks.try_join_next() {
            store(&mut predictions, joined)?;
        }

        let client = client.clone();
        let payload = row.features.clone();
        tasks.spawn(async move {
            let result = client.predict(&payload).await;
            drop(permit);
            (i, result)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        store(&mut predictions, joined)?;
    }

    predictions
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .context("a row finished without a prediction")
}

fn store(
    predictions: &mut [Option<Attrition>],
    joined: Result<(usize, Result<Attrition>), tokio::task::JoinError>,
) -> Result<()> {
    let (i, result) = joined.context("prediction task failed")?;
    let label = result.with_context(|| format!("row {} failed", i + 1))?;
    debug!(row = i + 1, label = %label, "row scored");
    predictions[i] = Some(label);
    Ok(())
}
