//! Translate partitions between permuted and original vertex indexing

use crate::cluster::Partition;
use crate::graph::Permutation;

/// Bring a partition computed on the permuted graph back to original indices.
///
/// `P[v] = P'[σ(v)]` for every original vertex `v`. With the identity
/// permutation the partition is returned unchanged.
pub fn remap_partition(permuted: &Partition, permutation: &Permutation) -> Partition {
    debug_assert_eq!(permuted.len(), permutation.len());

    let membership = (0..permutation.len())
        .map(|v| permuted.community(permutation.apply(v)))
        .collect();
    Partition::new(membership)
}

/// Express a partition over original indices in permuted indexing,
/// `P'[σ(v)] = P[v]`. Exact inverse of [`remap_partition`].
pub fn permute_partition(original: &Partition, permutation: &Permutation) -> Partition {
    debug_assert_eq!(original.len(), permutation.len());

    let membership = (0..permutation.len())
        .map(|i| original.community(permutation.invert(i)))
        .collect();
    Partition::new(membership)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::permutation::trial_rng;

    #[test]
    fn identity_is_a_no_op() {
        let p = Partition::new(vec![3, 1, 3, 0]);
        assert_eq!(remap_partition(&p, &Permutation::identity(4)), p);
    }

    #[test]
    fn follows_sigma() {
        // σ = [2, 0, 1]: vertex 0 sits at 2, vertex 1 at 0, vertex 2 at 1.
        let sigma = Permutation::from_vec(vec![2, 0, 1]).unwrap();
        let on_permuted = Partition::new(vec![10, 20, 30]);
        let original = remap_partition(&on_permuted, &sigma);
        assert_eq!(original.membership(), &[30, 10, 20]);
    }

    #[test]
    fn round_trip_recovers_the_permuted_partition() {
        for trial in 0..20 {
            let mut rng = trial_rng(2024, trial);
            let sigma = Permutation::random(37, &mut rng);
            let permuted = Partition::new((0..37).map(|i| (i * 7 + trial) % 5).collect());

            let original = remap_partition(&permuted, &sigma);
            assert_eq!(permute_partition(&original, &sigma), permuted);
            assert_eq!(remap_partition(&permute_partition(&original, &sigma), &sigma), original);
        }
    }

    #[test]
    fn empty() {
        let p = Partition::new(Vec::new());
        assert!(remap_partition(&p, &Permutation::identity(0)).is_empty());
    }
}
