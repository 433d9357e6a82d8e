//! Vector space and all-pairs cosine similarity over the catalog.

use ndarray::{Array2, ArrayView1};

use super::stopwords::StopWordsFilter;
use super::vectorizer::{CountVectorizer, SparseCounts};

/// Cosine similarity of two sparse count vectors.
///
/// Either vector being all zeros gives 0.0.
pub fn cosine_similarity(a: &SparseCounts, b: &SparseCounts) -> f64 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot(a, b) as f64 / (norm_a * norm_b)
}

fn dot(a: &SparseCounts, b: &SparseCounts) -> u64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0u64;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 as u64 * b[j].1 as u64;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

fn norm(v: &SparseCounts) -> f64 {
    (v.iter().map(|&(_, c)| c as u64 * c as u64).sum::<u64>() as f64).sqrt()
}

/// Immutable similarity index built once from every movie's tag document.
///
/// Row `i` of [`Self::matrix`] and vector `i` belong to document `i` of the input.
#[derive(Debug)]
pub struct SimilarityIndex {
    vectorizer: CountVectorizer,
    vectors: Vec<SparseCounts>,
    matrix: Array2<f64>,
}

impl SimilarityIndex {
    pub fn build<S: AsRef<str>>(
        documents: &[S],
        max_vocabulary_size: usize,
        stop_words: StopWordsFilter,
    ) -> Self {
        let mut vectorizer = CountVectorizer::new(max_vocabulary_size, stop_words);
        let vectors = vectorizer.fit_transform(documents);
        let matrix = Self::pairwise(&vectors, vectorizer.vocabulary().len());

        Self {
            vectorizer,
            vectors,
            matrix,
        }
    }

    /// Dense N×N cosine matrix.
    ///
    /// Each row accumulates integer dot products through an inverted index, and
    /// only the upper triangle is computed so the mirrored entries are identical.
    fn pairwise(vectors: &[SparseCounts], dimensions: usize) -> Array2<f64> {
        let n = vectors.len();
        let mut matrix = Array2::<f64>::zeros((n, n));

        let mut postings: Vec<Vec<(usize, u32)>> = vec![Vec::new(); dimensions];
        for (doc, counts) in vectors.iter().enumerate() {
            for &(column, count) in counts {
                postings[column as usize].push((doc, count));
            }
        }
        let norms: Vec<f64> = vectors.iter().map(norm).collect();

        let mut dots = vec![0u64; n];
        for i in 0..n {
            matrix[[i, i]] = 1.0;
            if norms[i] == 0.0 {
                continue;
            }

            dots.iter_mut().for_each(|d| *d = 0);
            for &(column, count) in &vectors[i] {
                for &(j, other) in &postings[column as usize] {
                    if j > i {
                        dots[j] += count as u64 * other as u64;
                    }
                }
            }

            for j in (i + 1)..n {
                if dots[j] == 0 {
                    continue;
                }
                let sim = dots[j] as f64 / (norms[i] * norms[j]);
                matrix[[i, j]] = sim;
                matrix[[j, i]] = sim;
            }
        }

        matrix
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vocabulary(&self) -> &[String] {
        self.vectorizer.vocabulary()
    }

    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        self.matrix[[i, j]]
    }

    /// Similarities of movie `i` to every movie, in table order
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.matrix.row(i)
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }
}
