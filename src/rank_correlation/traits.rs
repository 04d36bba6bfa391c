//! Interchangeable numerator algorithms.
//!
//! - [`NumeratorAlgorithm`]: shared interface of the merge-sort engine and
//!   the O(N²) reference, so tests and callers can run either one over the
//!   same validated sample.
//!
//! Convention: implementors return the tau-b numerator S as `i64`; they may
//! differ only where an engine's tie rule is documented to diverge.
use crate::rank_correlation::{
    data::PairedSample, engine::KendallEngine, errors::KTauResult, naive::NaivePairCounter,
    options::MergeTieRule,
};

/// A way of computing the Kendall tau-b numerator of a paired sample.
///
/// Required:
/// - `name() -> &'static str`: short label for logs and test messages.
/// - `numerator(&PairedSample) -> KTauResult<i64>`: compute S.
pub trait NumeratorAlgorithm: Send + Sync {
    fn name(&self) -> &'static str;
    fn numerator(&self, sample: &PairedSample) -> KTauResult<i64>;
}

impl NumeratorAlgorithm for KendallEngine {
    fn name(&self) -> &'static str {
        match self.tie_rule() {
            MergeTieRule::Inclusive => "merge-inclusive",
            MergeTieRule::Strict => "merge-strict",
        }
    }

    fn numerator(&self, sample: &PairedSample) -> KTauResult<i64> {
        Ok(self.compute(sample)?.numerator)
    }
}

impl NumeratorAlgorithm for NaivePairCounter {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn numerator(&self, sample: &PairedSample) -> KTauResult<i64> {
        Ok(self.count(sample))
    }
}
