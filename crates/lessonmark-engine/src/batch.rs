//! Parallel compilation.

use rayon::prelude::*;

use crate::{
    error::CompileError,
    parsing::{CompileOptions, CompiledDocument, compile_document},
};

/// Compiles every source on the rayon pool.
///
/// Results come back in input order. Each document gets its own
/// [`CompileContext`](crate::parsing::CompileContext), so the output is the
/// same as compiling them one by one.
pub fn compile_all<S>(
    sources: &[S],
    options: &CompileOptions,
) -> Vec<Result<CompiledDocument, CompileError>>
where
    S: AsRef<str> + Sync,
{
    sources
        .par_iter()
        .map(|source| compile_document(source.as_ref(), options))
        .collect()
}
