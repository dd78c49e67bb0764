//! Payload complexity measures.

/// Shannon entropy of the bytes of `text`, in bits per byte, scaled to [0, 1].
pub fn normalized_entropy(text: &str) -> f64 {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return 0.0;
    }
    let mut counts = [0usize; 256];
    for b in bytes {
        counts[*b as usize] += 1;
    }
    let len = bytes.len() as f64;
    let bits: f64 = counts
        .iter()
        .filter(|c| **c > 0)
        .map(|c| {
            let p = *c as f64 / len;
            -p * p.log2()
        })
        .sum();
    (bits / 8.0).clamp(0.0, 1.0)
}

/// Size pressure: line count relative to a budget, capped at 1.
pub fn line_factor(text: &str, line_budget: usize) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let lines = text.lines().count().max(1) as f64;
    (lines / line_budget.max(1) as f64).min(1.0)
}
