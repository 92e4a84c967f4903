//! K-means clustering of image mean colors
//!
//! The classifier only depends on the [`Clusterer`] trait; [`KMeans`] is the
//! default implementation, seeded with k-means++ and restarted a fixed number
//! of times, keeping the most compact result.

use log::debug;
use ndarray::{Array2, ArrayView1};
use rand::Rng;

use crate::analysis::color::MeanColor;
use crate::io::configuration::{CLUSTERING_ATTEMPTS, KMEANS_EPSILON, KMEANS_MAX_ITERATIONS};
use crate::io::error::{Result, clustering_error};

/// Cluster membership for every sample plus one centroid per cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    centroids: Vec<MeanColor>,
    compactness: f64,
}

impl ClusterAssignment {
    /// Build an assignment, validating that every label names a centroid
    ///
    /// # Errors
    ///
    /// Returns a clustering error if there are no centroids or a label is out
    /// of range
    pub fn new(labels: Vec<usize>, centroids: Vec<MeanColor>, compactness: f64) -> Result<Self> {
        if centroids.is_empty() {
            return Err(clustering_error(&"assignment has no centroids"));
        }
        if let Some(&label) = labels.iter().find(|&&label| label >= centroids.len()) {
            return Err(clustering_error(&format!(
                "label {label} exceeds cluster count {}",
                centroids.len()
            )));
        }
        Ok(Self {
            labels,
            centroids,
            compactness,
        })
    }

    /// Cluster id of each sample, in sample order
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Centroid color of each cluster, indexed by cluster id
    pub fn centroids(&self) -> &[MeanColor] {
        &self.centroids
    }

    /// Number of clusters, including any left without members
    pub const fn cluster_count(&self) -> usize {
        self.centroids.len()
    }

    /// Number of samples
    pub const fn sample_count(&self) -> usize {
        self.labels.len()
    }

    /// Sum of squared distances from each sample to its centroid
    pub const fn compactness(&self) -> f64 {
        self.compactness
    }

    /// Centroid color of the cluster a sample belongs to
    pub fn centroid_of(&self, sample: usize) -> Option<MeanColor> {
        self.labels
            .get(sample)
            .and_then(|&label| self.centroids.get(label))
            .copied()
    }

    /// Member count of every cluster, indexed by cluster id
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.centroids.len()];
        for &label in &self.labels {
            if let Some(count) = counts.get_mut(label) {
                *count += 1;
            }
        }
        counts
    }
}

/// Partitions color samples into a fixed number of groups
pub trait Clusterer {
    /// Cluster `samples` into `cluster_count` groups
    ///
    /// # Errors
    ///
    /// Returns a clustering error for degenerate input or if the method fails
    fn cluster(&mut self, samples: &[MeanColor], cluster_count: usize)
    -> Result<ClusterAssignment>;
}

/// Lloyd's k-means with k-means++ seeding and multiple attempts
pub struct KMeans<R: Rng> {
    rng: R,
    attempts: usize,
    max_iterations: usize,
    epsilon: f64,
}

impl<R: Rng> KMeans<R> {
    /// Create a k-means clusterer drawing seeds from `rng`
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            attempts: CLUSTERING_ATTEMPTS,
            max_iterations: KMEANS_MAX_ITERATIONS,
            epsilon: KMEANS_EPSILON,
        }
    }

    /// Override the number of independent attempts
    #[must_use]
    pub const fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Override the per-attempt iteration cap
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn run_attempt(&mut self, samples: &Array2<f64>, k: usize) -> (Vec<usize>, Array2<f64>) {
        let mut centroids = self.seed_centroids(samples, k);
        let mut labels = vec![0; samples.nrows()];

        for _ in 0..self.max_iterations {
            assign_labels(samples, &centroids, &mut labels);
            let updated = update_centroids(samples, &mut labels, &centroids);

            let max_shift = updated
                .rows()
                .into_iter()
                .zip(centroids.rows())
                .map(|(new, old)| distance_sq(new, old))
                .fold(0.0, f64::max);
            centroids = updated;

            if max_shift <= self.epsilon * self.epsilon {
                break;
            }
        }

        (labels, centroids)
    }

    // k-means++: each further seed is drawn with probability proportional to
    // its squared distance from the nearest seed chosen so far
    fn seed_centroids(&mut self, samples: &Array2<f64>, k: usize) -> Array2<f64> {
        let n = samples.nrows();
        let mut centroids = Array2::zeros((k, samples.ncols()));
        let mut nearest = vec![f64::INFINITY; n];

        let mut chosen = self.rng.random_range(0..n);
        for cluster in 0..k {
            centroids.row_mut(cluster).assign(&samples.row(chosen));

            for (sample, best) in samples.rows().into_iter().zip(nearest.iter_mut()) {
                *best = best.min(distance_sq(sample, centroids.row(cluster)));
            }

            let total: f64 = nearest.iter().sum();
            chosen = if total > 0.0 {
                let mut target = self.rng.random::<f64>() * total;
                nearest
                    .iter()
                    .position(|&weight| {
                        target -= weight;
                        target <= 0.0 && weight > 0.0
                    })
                    .or_else(|| nearest.iter().rposition(|&weight| weight > 0.0))
                    .unwrap_or(n - 1)
            } else {
                self.rng.random_range(0..n)
            };
        }

        centroids
    }
}

impl<R: Rng> Clusterer for KMeans<R> {
    fn cluster(
        &mut self,
        samples: &[MeanColor],
        cluster_count: usize,
    ) -> Result<ClusterAssignment> {
        if samples.is_empty() {
            return Err(clustering_error(&"no samples to cluster"));
        }
        if cluster_count == 0 {
            return Err(clustering_error(&"cluster count must be positive"));
        }
        if cluster_count > samples.len() {
            return Err(clustering_error(&format!(
                "cannot form {cluster_count} clusters from {} samples",
                samples.len()
            )));
        }
        if self.attempts == 0 {
            return Err(clustering_error(&"at least one attempt is required"));
        }

        let data = Array2::from_shape_fn((samples.len(), 3), |(row, channel)| {
            samples
                .get(row)
                .and_then(|color| color.to_f64().get(channel).copied())
                .unwrap_or(0.0)
        });

        let mut best: Option<(f64, Vec<usize>, Array2<f64>)> = None;
        for attempt in 0..self.attempts {
            let (labels, centroids) = self.run_attempt(&data, cluster_count);
            let score = compactness(&data, &labels, &centroids);
            debug!("k-means attempt {attempt}: compactness {score:.3}");

            if !score.is_finite() {
                return Err(clustering_error(&format!(
                    "attempt {attempt} produced non-finite compactness"
                )));
            }
            if best.as_ref().is_none_or(|(best_score, _, _)| score < *best_score) {
                best = Some((score, labels, centroids));
            }
        }

        let (score, labels, centroids) =
            best.ok_or_else(|| clustering_error(&"no attempt completed"))?;
        let colors = centroids
            .rows()
            .into_iter()
            .map(|row| {
                MeanColor::from_f64(std::array::from_fn(|channel| {
                    row.get(channel).copied().unwrap_or(0.0)
                }))
            })
            .collect();

        ClusterAssignment::new(labels, colors, score)
    }
}

fn distance_sq(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

// Ties go to the lowest cluster id
fn assign_labels(samples: &Array2<f64>, centroids: &Array2<f64>, labels: &mut [usize]) {
    for (sample, label) in samples.rows().into_iter().zip(labels.iter_mut()) {
        let mut best_distance = f64::INFINITY;
        for (cluster, centroid) in centroids.rows().into_iter().enumerate() {
            let distance = distance_sq(sample, centroid);
            if distance < best_distance {
                best_distance = distance;
                *label = cluster;
            }
        }
    }
}

// An empty cluster takes over the sample farthest from its centroid, provided
// that sample's cluster keeps at least one member
fn update_centroids(
    samples: &Array2<f64>,
    labels: &mut [usize],
    centroids: &Array2<f64>,
) -> Array2<f64> {
    let k = centroids.nrows();
    let mut counts = vec![0usize; k];
    for &label in labels.iter() {
        if let Some(count) = counts.get_mut(label) {
            *count += 1;
        }
    }

    for cluster in 0..k {
        if counts.get(cluster).copied().unwrap_or(0) > 0 {
            continue;
        }
        let donor = labels
            .iter()
            .zip(samples.rows())
            .enumerate()
            .filter(|(_, (label, _))| counts.get(**label).copied().unwrap_or(0) > 1)
            .map(|(index, (&label, sample))| (index, distance_sq(sample, centroids.row(label))))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((index, _)) = donor {
            if let Some(label) = labels.get_mut(index) {
                if let Some(count) = counts.get_mut(*label) {
                    *count -= 1;
                }
                *label = cluster;
            }
            if let Some(count) = counts.get_mut(cluster) {
                *count = 1;
            }
        }
    }

    let mut sums: Array2<f64> = Array2::zeros(centroids.raw_dim());
    for (&label, sample) in labels.iter().zip(samples.rows()) {
        let mut row = sums.row_mut(label);
        row += &sample;
    }
    for (cluster, &count) in counts.iter().enumerate() {
        let mut row = sums.row_mut(cluster);
        if count > 0 {
            row /= count as f64;
        } else {
            row.assign(&centroids.row(cluster));
        }
    }
    sums
}

fn compactness(samples: &Array2<f64>, labels: &[usize], centroids: &Array2<f64>) -> f64 {
    labels
        .iter()
        .zip(samples.rows())
        .map(|(&label, sample)| distance_sq(sample, centroids.row(label)))
        .sum()
}
