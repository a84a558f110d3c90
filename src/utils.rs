//! Common utilities used across the crate.
//!
//! Parallelism configuration and thread pool set-up for the search.

use rayon::prelude::*;

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Parallelism strategy for a search.
///
/// The search splits each round into one shard per thread, so the thread
/// count doubles as the worker count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Strictly sequential execution on the calling thread.
    #[default]
    Sequential,
    /// Parallel execution with `n` threads.
    ///
    /// If `n <= 1`, this is equivalent to `Sequential`.
    Parallel(usize),
}

impl Parallelism {
    /// Create a parallelism hint from a thread count.
    ///
    /// - `0` → rayon's current thread count
    /// - `1` → sequential
    /// - `n > 1` → parallel with n threads
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        match n_threads {
            0 => Self::Parallel(rayon::current_num_threads()),
            1 => Self::Sequential,
            n => Self::Parallel(n),
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn allows_parallel(self) -> bool {
        matches!(self, Self::Parallel(n) if n > 1)
    }

    /// Returns the thread count (1 for sequential).
    #[inline]
    pub fn n_threads(self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel(n) => n.max(1),
        }
    }

    /// Map `f` over `iter`, in parallel when allowed.
    ///
    /// Output order always follows input order.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.allows_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use all available cores)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
///
/// # Example
///
/// ```
/// use gmdh::run_with_threads;
///
/// let sum = run_with_threads(2, |parallelism| {
///     parallelism.maybe_par_map(vec![1, 2, 3], |x| x * 2).into_iter().sum::<i32>()
/// })
/// .unwrap();
/// assert_eq!(sum, 12);
/// ```
pub fn run_with_threads<T: Send>(
    n_threads: usize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T, rayon::ThreadPoolBuildError> {
    let parallelism = Parallelism::from_threads(n_threads);

    match parallelism {
        Parallelism::Sequential => Ok(f(Parallelism::Sequential)),
        Parallelism::Parallel(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(|| f(parallelism)))
        }
    }
}
