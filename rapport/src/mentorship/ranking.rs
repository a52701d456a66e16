//! Top-K mentor ranking

use super::compatibility::{CompatibilityResult, CompatibilityScorer};
use super::profile::AgentProfile;
use crate::{RapportError, Result};
use futures::future::join_all;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// Pools smaller than this are scored on the calling task
const MIN_PARALLEL_POOL: usize = 64;

impl CompatibilityScorer {
    /// Score every candidate against `mentee` and keep the best `k`.
    ///
    /// The mentee itself and candidates without an id are skipped. `None`
    /// uses the configured default.
    pub fn rank(
        &self,
        mentee: &AgentProfile,
        candidates: &[AgentProfile],
        k: Option<usize>,
    ) -> Result<Vec<CompatibilityResult>> {
        mentee.validate()?;
        let k = k.unwrap_or(self.config().default_top_k);

        let mut results = self.score_pool(mentee, candidates);
        sort_and_truncate(&mut results, k);

        debug!(mentee = %mentee.id, candidates = candidates.len(), returned = results.len(), "Ranked mentors");
        Ok(results)
    }

    fn score_pool(&self, mentee: &AgentProfile, candidates: &[AgentProfile]) -> Vec<CompatibilityResult> {
        candidates
            .iter()
            .filter(|candidate| candidate.id != mentee.id)
            .filter_map(|candidate| match self.score(candidate, mentee) {
                Ok(result) => Some(result),
                Err(err) => {
                    warn!(mentor = %candidate.id, error = %err, "Skipping mentor candidate");
                    None
                }
            })
            .collect()
    }
}

/// Rank mentors for a mentee with the default weights
pub fn rank_mentors(
    mentee: &AgentProfile,
    candidates: &[AgentProfile],
    k: Option<usize>,
) -> Result<Vec<CompatibilityResult>> {
    CompatibilityScorer::default().rank(mentee, candidates, k)
}

/// Rank mentors across blocking worker threads.
///
/// Candidates are split into one chunk per available core; each chunk is
/// scored independently and the partial results are merged with the same
/// ordering as [`rank_mentors`].
pub async fn rank_mentors_concurrent(
    scorer: Arc<CompatibilityScorer>,
    mentee: Arc<AgentProfile>,
    candidates: Vec<AgentProfile>,
    k: Option<usize>,
) -> Result<Vec<CompatibilityResult>> {
    mentee.validate()?;
    let k = k.unwrap_or(scorer.config().default_top_k);

    if candidates.len() < MIN_PARALLEL_POOL {
        let mut results = scorer.score_pool(&mentee, &candidates);
        sort_and_truncate(&mut results, k);
        return Ok(results);
    }

    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let chunk_size = candidates.len().div_ceil(workers);

    let tasks = candidates
        .chunks(chunk_size)
        .map(|chunk| {
            let scorer = Arc::clone(&scorer);
            let mentee = Arc::clone(&mentee);
            let chunk = chunk.to_vec();
            tokio::task::spawn_blocking(move || {
                let mut partial = scorer.score_pool(&mentee, &chunk);
                // Only the best k of each chunk can survive the merge
                sort_and_truncate(&mut partial, k);
                partial
            })
        })
        .collect::<Vec<_>>();

    let mut results = Vec::new();
    for joined in join_all(tasks).await {
        let partial = joined.map_err(|e| RapportError::Other(format!("Ranking worker failed: {}", e)))?;
        results.extend(partial);
    }

    sort_and_truncate(&mut results, k);
    debug!(mentee = %mentee.id, workers, returned = results.len(), "Ranked mentors concurrently");
    Ok(results)
}

/// Descending overall score, ties broken by ascending mentor id
fn compare_results(a: &CompatibilityResult, b: &CompatibilityResult) -> Ordering {
    b.overall_score
        .total_cmp(&a.overall_score)
        .then_with(|| a.mentor_id.cmp(&b.mentor_id))
}

fn sort_and_truncate(results: &mut Vec<CompatibilityResult>, k: usize) {
    results.sort_by(compare_results);
    results.truncate(k);
}
