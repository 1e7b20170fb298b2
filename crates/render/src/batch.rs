//! Parallel rendering of many seeds to many files.
//!
//! Images are independent: each job builds its own source and encoder and
//! owns its buffers, and the CRC table is a compile-time static, so jobs run
//! on the rayon pool with no coordination. A failing job is reported in its
//! own [`BatchOutcome`] and never stops the others.

use crate::error::RenderError;
use crate::seed::ImageSeed;
use crate::snapshot::write_atomic;
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// One image to render and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchJob {
    pub seed: ImageSeed,
    pub path: PathBuf,
}

/// Result of one job.
#[derive(Debug)]
pub struct BatchOutcome {
    pub path: PathBuf,
    pub seed: u64,
    /// Bytes written on success.
    pub result: Result<usize, RenderError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// File name for the `index`-th image of a batch.
pub fn output_name(prefix: &str, index: usize, seed: u64) -> String {
    format!("{prefix}-{index:04}-{seed}.png")
}

/// Plans `count` jobs from `template`, with consecutive seeds starting at
/// `first_seed` and files named by [`output_name`] inside `out_dir`.
pub fn plan_batch(
    template: &ImageSeed,
    count: usize,
    first_seed: u64,
    out_dir: &Path,
    prefix: &str,
) -> Vec<BatchJob> {
    (0..count)
        .map(|i| {
            let seed = first_seed.wrapping_add(i as u64);
            BatchJob {
                seed: template.with_seed(seed),
                path: out_dir.join(output_name(prefix, i, seed)),
            }
        })
        .collect()
}

/// Renders every job in parallel. Outcomes come back in job order.
pub fn render_batch(jobs: &[BatchJob]) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = jobs
        .par_iter()
        .map(|job| {
            let result = job.seed.render().and_then(|png| {
                write_atomic(&job.path, &png)?;
                Ok(png.len())
            });
            if let Err(e) = &result {
                warn!("seed {} -> {}: {e}", job.seed.seed, job.path.display());
            }
            BatchOutcome {
                path: job.path.clone(),
                seed: job.seed.seed,
                result,
            }
        })
        .collect();

    let ok = outcomes.iter().filter(|o| o.is_ok()).count();
    info!("batch finished: {ok}/{} images written", outcomes.len());
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_name_is_zero_padded() {
        assert_eq!(output_name("avatar", 7, 42), "avatar-0007-42.png");
    }

    #[test]
    fn plan_uses_consecutive_seeds() {
        let template = ImageSeed::new("gradient", 8, 8, 0);
        let jobs = plan_batch(&template, 3, 100, Path::new("out"), "img");
        let seeds: Vec<u64> = jobs.iter().map(|j| j.seed.seed).collect();
        assert_eq!(seeds, [100, 101, 102]);
        assert_eq!(jobs[2].path, Path::new("out").join("img-0002-102.png"));
        assert!(jobs.iter().all(|j| j.seed.width == 8));
    }

    #[test]
    fn batch_writes_every_image() {
        let dir = tempfile::tempdir().unwrap();
        let template = ImageSeed::new("gradient", 12, 10, 0);
        let jobs = plan_batch(&template, 6, 1, dir.path(), "g");

        let outcomes = render_batch(&jobs);
        assert_eq!(outcomes.len(), 6);
        for (job, outcome) in jobs.iter().zip(&outcomes) {
            assert_eq!(outcome.path, job.path);
            let written = *outcome.result.as_ref().unwrap();
            assert_eq!(std::fs::read(&job.path).unwrap(), job.seed.render().unwrap());
            assert_eq!(std::fs::metadata(&job.path).unwrap().len() as usize, written);
        }
    }

    #[test]
    fn one_failed_image_does_not_affect_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let mut bad = ImageSeed::new("gradient", 8, 8, 5);
        bad.params = json!({"hash": "not-a-hash"});
        let jobs = vec![
            BatchJob {
                seed: ImageSeed::new("gradient", 8, 8, 4),
                path: dir.path().join("a.png"),
            },
            BatchJob {
                seed: bad,
                path: dir.path().join("b.png"),
            },
            BatchJob {
                seed: ImageSeed::new("checker", 8, 8, 6),
                path: dir.path().join("c.png"),
            },
        ];

        let outcomes = render_batch(&jobs);
        assert!(outcomes[0].is_ok());
        assert!(matches!(outcomes[1].result, Err(RenderError::Gradient(_))));
        assert!(outcomes[2].is_ok());
        assert!(dir.path().join("a.png").exists());
        assert!(!dir.path().join("b.png").exists());
        assert!(dir.path().join("c.png").exists());
    }

    #[test]
    fn empty_batch_is_empty() {
        assert!(render_batch(&[]).is_empty());
    }
}
