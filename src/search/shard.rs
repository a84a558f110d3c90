//! Work split for one round.
//!
//! A round over `n` inputs builds every pair `(k, j)` with `k < j`. Row `k`
//! of that upper triangle holds `n - k - 1` pairs. Rows are split across
//! workers in contiguous ranges of `n / workers` rows, the remainder going
//! to the last worker:
//!
//! ```text
//! n = 5, 2 workers          global index of (k, j) = offset(k) + (j - k - 1)
//!
//!   k=0: (0,1) (0,2) (0,3) (0,4)    worker 0, indices 0..4
//!   k=1: (1,2) (1,3) (1,4)          worker 0, indices 4..7
//!   k=2: (2,3) (2,4)                worker 1, indices 7..9
//!   k=3: (3,4)                      worker 1, index 9
//!   k=4:                            worker 1
//! ```
//!
//! `offset(k) = Σ_{i<k} (n - i - 1)`, so indices never collide across
//! workers and together cover `0..n(n-1)/2`.

use std::ops::Range;

/// One worker's share of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    pub worker: usize,
    /// Pair rows `k` assigned to this worker.
    pub rows: Range<usize>,
    /// Global index of the shard's first pair.
    pub first_index: usize,
}

impl Shard {
    /// `(index, k, j)` for every pair in this shard, in index order.
    pub fn pairs(&self, n_inputs: usize) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let first = self.first_index;
        self.rows
            .clone()
            .flat_map(move |k| (k + 1..n_inputs).map(move |j| (k, j)))
            .enumerate()
            .map(move |(offset, (k, j))| (first + offset, k, j))
    }

    /// Number of pairs in this shard.
    pub fn n_pairs(&self, n_inputs: usize) -> usize {
        triangular_offset(n_inputs, self.rows.end) - triangular_offset(n_inputs, self.rows.start)
    }
}

/// Contiguous split of a round's pair rows over workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardPlan {
    n_inputs: usize,
    shards: Vec<Shard>,
}

impl ShardPlan {
    /// Split the pairs of `n_inputs` inputs over `n_workers` workers.
    ///
    /// `n_workers == 0` is treated as one worker.
    pub fn new(n_inputs: usize, n_workers: usize) -> Self {
        let n_workers = n_workers.max(1);
        let per_worker = n_inputs / n_workers;

        let shards = (0..n_workers)
            .map(|worker| {
                let start = worker * per_worker;
                let end = if worker + 1 == n_workers {
                    n_inputs
                } else {
                    start + per_worker
                };
                Shard {
                    worker,
                    rows: start..end,
                    first_index: triangular_offset(n_inputs, start),
                }
            })
            .collect();

        Self { n_inputs, shards }
    }

    #[inline]
    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    #[inline]
    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    /// Total number of pairs, `n(n-1)/2`.
    #[inline]
    pub fn n_pairs(&self) -> usize {
        triangular_offset(self.n_inputs, self.n_inputs)
    }
}

/// Number of pairs in rows `0..start` of the upper triangle over `n` inputs.
#[inline]
pub fn triangular_offset(n: usize, start: usize) -> usize {
    let start = start.min(n);
    if start == 0 {
        return 0;
    }
    start * (2 * n - start - 1) / 2
}
