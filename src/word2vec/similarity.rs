// similarity.rs - Vector math for word2vec queries.

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn l2_norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Cosine similarity in -1..1 given precomputed norms. Zero vectors score 0.0 against
/// everything.
pub fn cosine_with_norms(a: &[f32], norm_a: f32, b: &[f32], norm_b: f32) -> f32 {
    let denom = norm_a * norm_b;
    // Also catches NaN norms.
    if !(denom > f32::EPSILON) {
        return 0.0;
    }
    dot(a, b) / denom
}

/// Mean of the unit-length versions of `vectors`. Zero vectors contribute nothing.
pub fn mean_of_unit_vectors(vectors: &[&[f32]], dims: usize) -> Vec<f32> {
    let mut mean = vec![0.0f32; dims];
    if vectors.is_empty() {
        return mean;
    }
    for v in vectors {
        let norm = l2_norm(v);
        if norm <= f32::EPSILON {
            continue;
        }
        for (m, x) in mean.iter_mut().zip(v.iter()) {
            *m += x / norm;
        }
    }
    let n = vectors.len() as f32;
    mean.iter_mut().for_each(|m| *m /= n);
    mean
}
