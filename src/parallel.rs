//! Parallel batch building on the rayon pool
//!
//! Each worker tokenizes a disjoint chunk of pairs into its own `IndexData`;
//! the partial results are then binary-merged on the calling thread. Merge is
//! associative and commutative, so the result matches `build_batch`.

use crate::index::{binary_merge, build_batch, IndexData};
use rayon::prelude::*;
use tracing::debug;

/// Build one batch `IndexData` from `pairs` using the rayon pool
pub fn build_batch_parallel<T, I>(pairs: &[(T, I)], chunk_size: usize) -> IndexData
where
    T: AsRef<str> + Sync,
    I: AsRef<str> + Sync,
{
    let chunk_size = chunk_size.max(1);

    let partials: Vec<IndexData> = pairs
        .par_chunks(chunk_size)
        .map(|chunk| build_batch(chunk))
        .collect();

    debug!(
        pairs = pairs.len(),
        workers = partials.len(),
        "combining parallel partial indexes"
    );

    binary_merge(partials)
}
