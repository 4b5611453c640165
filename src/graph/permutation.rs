//! Random vertex permutations, one independent draw per trial

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Generator type owned by a single trial
pub type TrialRng = Pcg64;

/// A bijection over vertex indices `[0, N)`
///
/// `forward[i]` holds σ(i), the position vertex `i` takes in the permuted
/// graph. The inverse is kept alongside so results can be translated back
/// without recomputing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// The permutation that leaves every vertex in place
    pub fn identity(len: usize) -> Self {
        let forward: Vec<usize> = (0..len).collect();
        Self {
            inverse: forward.clone(),
            forward,
        }
    }

    /// Draw a uniformly random permutation of `[0, len)` from `rng`
    pub fn random<R: rand::Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut forward: Vec<usize> = (0..len).collect();
        forward.shuffle(rng);
        Self::from_forward_unchecked(forward)
    }

    /// Build a permutation from an explicit σ, rejecting anything that is not
    /// a bijection on `[0, len)`
    pub fn from_vec(forward: Vec<usize>) -> Option<Self> {
        if !is_bijection(&forward) {
            return None;
        }
        Some(Self::from_forward_unchecked(forward))
    }

    fn from_forward_unchecked(forward: Vec<usize>) -> Self {
        let mut inverse = vec![0; forward.len()];
        for (original, &permuted) in forward.iter().enumerate() {
            inverse[permuted] = original;
        }
        Self { forward, inverse }
    }

    /// Number of vertices covered
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// σ(v): index of original vertex `v` in the permuted graph
    #[inline]
    pub fn apply(&self, vertex: usize) -> usize {
        self.forward[vertex]
    }

    /// σ⁻¹(i): original vertex sitting at permuted index `i`
    #[inline]
    pub fn invert(&self, vertex: usize) -> usize {
        self.inverse[vertex]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.forward
    }

    pub fn inverse_slice(&self) -> &[usize] {
        &self.inverse
    }

    pub fn is_identity(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &p)| i == p)
    }
}

/// Check that `values` contains every index in `[0, values.len())` exactly once
pub fn is_bijection(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    for &v in values {
        if v >= values.len() || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Derive the seed of one trial from the invocation's base seed.
///
/// SplitMix64 finalizer over (base, index) so neighbouring trial indices get
/// uncorrelated streams.
#[inline]
pub fn seed_for_trial(base_seed: u64, trial_index: usize) -> u64 {
    let mut z = base_seed ^ (trial_index as u64).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fresh generator for one trial, never shared with another trial
pub fn trial_rng(base_seed: u64, trial_index: usize) -> TrialRng {
    Pcg64::seed_from_u64(seed_for_trial(base_seed, trial_index))
}
