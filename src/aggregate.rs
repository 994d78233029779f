use crate::probe::ProbeVerdict;
use crate::search::ProbeBatch;

/// Deterministic presentation order: by service name, then URL, then `found`.
/// Nothing is filtered out.
pub fn normalize(batch: ProbeBatch) -> Vec<ProbeVerdict> {
    let mut verdicts = batch.into_vec();
    // stable sort so equal keys keep their relative order
    verdicts.sort();
    verdicts
}

/// Only the verdicts that found an account, keeping order.
pub fn found_only(verdicts: &[ProbeVerdict]) -> Vec<&ProbeVerdict> {
    verdicts.iter().filter(|v| v.found).collect()
}
