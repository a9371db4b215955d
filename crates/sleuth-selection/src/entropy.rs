//! Shannon entropy in bits.

/// `H(c1, …) = -Σ (ci/total)·log2(ci/total)` over the nonzero counts.
/// Zero when the total is zero.
pub fn entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}
