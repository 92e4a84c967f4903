//! Primary/secondary classification of images by cluster distinctiveness
//!
//! Images are clustered on their mean colors. The cluster whose centroid lies
//! farthest from the overall average color, among those with at least
//! `log2(N)` members, is the distinctive one; its images form the primary pool
//! and everything else the secondary pool.

use log::{debug, info, warn};
use rand::Rng;

use crate::analysis::clustering::{ClusterAssignment, Clusterer, KMeans};
use crate::analysis::color::{MeanColor, average_color, color_distance};
use crate::io::configuration::MIN_CLUSTER_COUNT;
use crate::io::error::{Result, clustering_error};

/// Size and distinctiveness of one cluster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterRank {
    /// Cluster id
    pub id: usize,
    /// Number of images in the cluster
    pub count: usize,
    /// Distance from the cluster centroid to the global average color
    pub distance: f64,
}

/// Partition of image indices into primary and secondary pools
#[derive(Debug, Clone)]
pub struct Classification {
    primary: Vec<usize>,
    secondary: Vec<usize>,
    included_cluster: Option<usize>,
    global_average: Option<MeanColor>,
    ranking: Vec<ClusterRank>,
    assignment: Option<ClusterAssignment>,
}

impl Classification {
    /// Indices of images placed on filled cells, ascending
    pub fn primary(&self) -> &[usize] {
        &self.primary
    }

    /// Indices of images placed on empty cells, ascending
    pub fn secondary(&self) -> &[usize] {
        &self.secondary
    }

    /// Whether the image at `index` is in the primary pool
    pub fn is_primary(&self, index: usize) -> bool {
        self.primary.binary_search(&index).is_ok()
    }

    /// The distinctive cluster, `None` when no clustering was needed
    pub const fn included_cluster(&self) -> Option<usize> {
        self.included_cluster
    }

    /// Centroid-weighted average color of all images
    pub const fn global_average(&self) -> Option<MeanColor> {
        self.global_average
    }

    /// Populated clusters ordered by ascending distance from the average
    pub fn ranking(&self) -> &[ClusterRank] {
        &self.ranking
    }

    /// The clustering the classification was derived from
    pub const fn assignment(&self) -> Option<&ClusterAssignment> {
        self.assignment.as_ref()
    }

    /// Split `items` into primary and secondary references by index
    ///
    /// Items beyond the classified range are ignored.
    pub fn partition<'a, T>(&self, items: &'a [T]) -> (Vec<&'a T>, Vec<&'a T>) {
        let pick = |indices: &[usize]| {
            indices
                .iter()
                .filter_map(|&index| items.get(index))
                .collect::<Vec<_>>()
        };
        (pick(&self.primary), pick(&self.secondary))
    }
}

/// Number of clusters for `image_count` images: `max(2, floor(log2(N)))`
pub fn cluster_count_for(image_count: usize) -> usize {
    image_count
        .checked_ilog2()
        .map_or(0, |bits| bits as usize)
        .max(MIN_CLUSTER_COUNT)
}

/// Minimum member count for a cluster to be considered distinctive
pub fn minimum_cluster_size(image_count: usize) -> f64 {
    (image_count as f64).log2()
}

/// Rank populated clusters by distance from the centroid-weighted average
///
/// The average accumulates each image's cluster centroid (not its own mean
/// color) and divides per channel with truncation. Ties in distance keep
/// ascending cluster id order.
pub fn rank_clusters(assignment: &ClusterAssignment) -> Option<(MeanColor, Vec<ClusterRank>)> {
    let average = average_color(
        (0..assignment.sample_count()).filter_map(|sample| assignment.centroid_of(sample)),
    )?;

    let mut ranking: Vec<ClusterRank> = assignment
        .counts()
        .into_iter()
        .zip(assignment.centroids())
        .enumerate()
        .filter(|(_, (count, _))| *count > 0)
        .map(|(id, (count, &centroid))| ClusterRank {
            id,
            count,
            distance: color_distance(centroid, average),
        })
        .collect();
    ranking.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    Some((average, ranking))
}

/// Pick the distinctive cluster from an ascending ranking
///
/// Scans from the farthest cluster inward and returns the first with at least
/// `log2(image_count)` members, falling back to the farthest cluster.
pub fn select_distinctive_cluster(ranking: &[ClusterRank], image_count: usize) -> Option<usize> {
    let threshold = minimum_cluster_size(image_count);
    let qualified = ranking
        .iter()
        .rev()
        .find(|rank| rank.count as f64 >= threshold);

    match qualified {
        Some(rank) => Some(rank.id),
        None => {
            let fallback = ranking.last().map(|rank| rank.id);
            if let Some(id) = fallback {
                warn!("No cluster reaches {threshold:.2} images; using farthest cluster {id}");
            }
            fallback
        }
    }
}

/// Classify images by mean color using k-means seeded from `rng`
///
/// # Errors
///
/// Returns a clustering error if `colors` is empty or clustering fails
pub fn classify<R: Rng>(colors: &[MeanColor], rng: &mut R) -> Result<Classification> {
    let mut clusterer = KMeans::new(rng);
    classify_with(colors, &mut clusterer)
}

/// Classify images by mean color with a caller-supplied clustering method
///
/// # Errors
///
/// Returns a clustering error if `colors` is empty, the clusterer fails, or
/// its assignment does not cover every image
pub fn classify_with<C: Clusterer>(colors: &[MeanColor], clusterer: &mut C) -> Result<Classification> {
    let image_count = colors.len();
    match image_count {
        0 => return Err(clustering_error(&"no images to classify")),
        1 => {
            return Ok(Classification {
                primary: vec![0],
                secondary: Vec::new(),
                included_cluster: None,
                global_average: colors.first().copied(),
                ranking: Vec::new(),
                assignment: None,
            });
        }
        _ => {}
    }

    let cluster_count = cluster_count_for(image_count);
    let assignment = clusterer.cluster(colors, cluster_count)?;
    if assignment.sample_count() != image_count {
        return Err(clustering_error(&format!(
            "assignment covers {} of {image_count} images",
            assignment.sample_count()
        )));
    }

    let (average, ranking) = rank_clusters(&assignment)
        .ok_or_else(|| clustering_error(&"assignment has no samples"))?;
    for rank in &ranking {
        debug!(
            "cluster {}: {} images, distance {:.2}",
            rank.id, rank.count, rank.distance
        );
    }

    let included = select_distinctive_cluster(&ranking, image_count)
        .ok_or_else(|| clustering_error(&"no populated clusters"))?;

    let (primary, secondary): (Vec<usize>, Vec<usize>) = (0..image_count)
        .partition(|&index| assignment.labels().get(index) == Some(&included));

    info!(
        "Cluster {included} selected: {} primary, {} secondary images",
        primary.len(),
        secondary.len()
    );

    Ok(Classification {
        primary,
        secondary,
        included_cluster: Some(included),
        global_average: Some(average),
        ranking,
        assignment: Some(assignment),
    })
}
