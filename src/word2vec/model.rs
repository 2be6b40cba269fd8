// model.rs - In-memory word2vec text model with similarity queries.
//
// Format: header "<count> <dims>", then one "<token> <v1> ... <v_dims>" line per vector.

use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;
use std::path::Path;

use crate::convert::info::{next_line, open_input};
use crate::error::{ConvertError, Result};
use crate::word2vec::similarity;

/// A loaded word2vec text file. Rows keep file order.
#[derive(Debug, Clone)]
pub struct Word2VecModel {
    words: Vec<String>,
    index: HashMap<String, usize>,
    /// Row-major, `words.len() * dims` values.
    vectors: Vec<f32>,
    norms: Vec<f32>,
    dims: usize,
}

impl Word2VecModel {
    /// Load a word2vec text file (header + vectors).
    pub fn load(path: &Path) -> Result<Self> {
        let reader = open_input(path)?;
        let model = Self::parse(reader, path)?;
        log::info!("Loaded {} from {}", model, path.display());
        Ok(model)
    }

    fn parse<R: BufRead>(mut reader: R, path: &Path) -> Result<Self> {
        let mut buf = Vec::new();

        if !next_line(&mut reader, &mut buf).map_err(|e| ConvertError::read(path, e))? {
            return Err(ConvertError::malformed(path, 1, "missing header line"));
        }
        let header = String::from_utf8_lossy(&buf);
        let (count, dims) = parse_header(&header).ok_or_else(|| {
            ConvertError::malformed(path, 1, format!("expected \"<count> <dims>\", got {:?}", header.trim_end()))
        })?;

        // Header counts are untrusted; let the buffers grow with the data.
        let mut model = Self {
            words: Vec::new(),
            index: HashMap::new(),
            vectors: Vec::new(),
            norms: Vec::new(),
            dims,
        };

        let mut line_no = 1;
        let mut rows = 0usize;
        let mut row = Vec::new();
        while next_line(&mut reader, &mut buf).map_err(|e| ConvertError::read(path, e))? {
            line_no += 1;
            let line = String::from_utf8_lossy(&buf);
            // Fields are separated by single ASCII spaces; other whitespace belongs to the token.
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split(' ');
            let Some(word) = parts.next() else {
                continue;
            };

            row.clear();
            for part in parts {
                let value: f32 = part.parse().map_err(|_| {
                    ConvertError::malformed(path, line_no, format!("invalid number {part:?} for {word:?}"))
                })?;
                row.push(value);
            }
            if row.len() != dims {
                return Err(ConvertError::malformed(
                    path,
                    line_no,
                    format!("expected {} values for {:?}, got {}", dims, word, row.len()),
                ));
            }

            rows += 1;
            if model.index.contains_key(word) {
                log::warn!("Duplicate word {:?} at line {}, keeping first occurrence", word, line_no);
                continue;
            }
            model.index.insert(word.to_string(), model.words.len());
            model.words.push(word.to_string());
            model.norms.push(similarity::l2_norm(&row));
            model.vectors.extend_from_slice(&row);
        }

        if rows != count {
            return Err(ConvertError::malformed(
                path,
                line_no,
                format!("header declares {count} vectors, found {rows}"),
            ));
        }

        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    fn row(&self, i: usize) -> &[f32] {
        &self.vectors[i * self.dims..(i + 1) * self.dims]
    }

    fn lookup(&self, word: &str) -> Result<usize> {
        self.index
            .get(word)
            .copied()
            .ok_or_else(|| ConvertError::UnknownWord(word.to_string()))
    }

    /// Cosine similarity between two words.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        let ia = self.lookup(a)?;
        let ib = self.lookup(b)?;
        Ok(similarity::cosine_with_norms(
            self.row(ia),
            self.norms[ia],
            self.row(ib),
            self.norms[ib],
        ))
    }

    /// Words closest to the mean of the unit-normalized `positive` vectors, best first.
    /// Query words are excluded from the result.
    pub fn most_similar(&self, positive: &[&str], topn: usize) -> Result<Vec<(String, f32)>> {
        if positive.is_empty() {
            return Ok(Vec::new());
        }

        let ids = positive
            .iter()
            .map(|w| self.lookup(w))
            .collect::<Result<Vec<_>>>()?;
        let rows: Vec<&[f32]> = ids.iter().map(|&i| self.row(i)).collect();
        let query = similarity::mean_of_unit_vectors(&rows, self.dims);
        let query_norm = similarity::l2_norm(&query);

        let mut scored: Vec<(usize, f32)> = (0..self.words.len())
            .filter(|i| !ids.contains(i))
            .map(|i| {
                let score = similarity::cosine_with_norms(&query, query_norm, self.row(i), self.norms[i]);
                (i, score)
            })
            .collect();

        // Stable sort: ties keep vocabulary order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(topn);

        Ok(scored
            .into_iter()
            .map(|(i, score)| (self.words[i].clone(), score))
            .collect())
    }
}

impl fmt::Display for Word2VecModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word2VecModel(vocab={}, dims={})", self.len(), self.dims())
    }
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let count = parts.next()?.parse().ok()?;
    let dims = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((count, dims))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::convert::{convert, HeaderDims};

    fn model_from(content: &str) -> Result<Word2VecModel> {
        Word2VecModel::parse(content.as_bytes(), Path::new("test.txt"))
    }

    fn vector<'a>(model: &'a Word2VecModel, word: &str) -> Option<&'a [f32]> {
        model.index.get(word).map(|&i| model.row(i))
    }

    const ROYALS: &str = "5 3\n\
        king 0.9 0.8 0.1\n\
        queen 0.85 0.82 0.15\n\
        man 0.5 0.1 0.05\n\
        woman 0.45 0.15 0.1\n\
        apple -0.2 0.1 0.9\n";

    #[test]
    fn test_load_basic() {
        let model = model_from(ROYALS).unwrap();
        assert_eq!(model.len(), 5);
        assert_eq!(model.dims(), 3);
        assert!(!model.is_empty());
        assert!(vector(&model, "queen").is_some());
        assert_eq!(vector(&model, "man"), Some(&[0.5f32, 0.1, 0.05][..]));
        assert_eq!(model.to_string(), "Word2VecModel(vocab=5, dims=3)");
    }

    #[test]
    fn test_most_similar_ranks_neighbours() {
        let model = model_from(ROYALS).unwrap();
        let top = model.most_similar(&["king"], 10).unwrap();

        assert_eq!(top.len(), 4);
        assert_eq!(top[0].0, "queen");
        assert_eq!(top.last().unwrap().0, "apple");
        assert!(top.iter().all(|(w, _)| w != "king"));
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));

        let top1 = model.most_similar(&["king"], 1).unwrap();
        assert_eq!(top1.len(), 1);
        assert!(model.most_similar(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_similarity() {
        let model = model_from(ROYALS).unwrap();
        let s = model.similarity("woman", "man").unwrap();
        assert!(s > 0.9 && s <= 1.0 + 1e-6);
        assert!((model.similarity("king", "king").unwrap() - 1.0).abs() < 1e-6);
        assert!(model.similarity("king", "apple").unwrap() < s);
    }

    #[test]
    fn test_unknown_word() {
        let model = model_from(ROYALS).unwrap();
        assert!(matches!(model.similarity("king", "emperor"), Err(ConvertError::UnknownWord(w)) if w == "emperor"));
        assert!(matches!(model.most_similar(&["emperor"], 3), Err(ConvertError::UnknownWord(_))));
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(model_from(""), Err(ConvertError::Malformed { line: 1, .. })));
        assert!(matches!(model_from("abc 2\n"), Err(ConvertError::Malformed { line: 1, .. })));
        assert!(matches!(model_from("1 2\nx 0.1\n"), Err(ConvertError::Malformed { line: 2, .. })));
        assert!(matches!(model_from("1 2\nx 0.1 nope\n"), Err(ConvertError::Malformed { line: 2, .. })));
        assert!(matches!(model_from("2 2\nx 0.1 0.2\n"), Err(ConvertError::Malformed { .. })));
    }

    #[test]
    fn test_token_with_non_breaking_space() {
        let model = model_from("2 2\na\u{a0}b 0.1 0.2\nc 0.3 0.4\r\n").unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(vector(&model, "a\u{a0}b"), Some(&[0.1f32, 0.2][..]));
        assert_eq!(vector(&model, "c"), Some(&[0.3f32, 0.4][..]));
    }

    #[test]
    fn test_nan_vectors_do_not_break_ranking() {
        let model = model_from("3 2\na 1.0 0.0\nb nan nan\nc 0.9 0.1\n").unwrap();
        let top = model.most_similar(&["a"], 10).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "c");
        assert_eq!(top[1], ("b".to_string(), 0.0));
    }

    #[test]
    fn test_duplicates_keep_first() {
        let model = model_from("2 2\nx 1.0 0.0\nx 0.0 1.0\n").unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(vector(&model, "x"), Some(&[1.0f32, 0.0][..]));
    }

    #[test]
    fn test_loads_converted_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("glove.txt");
        let output = dir.path().join("w2v.txt");
        std::fs::write(&input, "the 0.1 0.2\ncat 0.3 0.4\ndog 0.5 0.6\n").unwrap();

        convert(&input, &output, HeaderDims::Computed).unwrap();
        let model = Word2VecModel::load(&output).unwrap();
        assert_eq!(model.len(), 3);
        assert_eq!(model.dims(), 2);
        assert!(model.similarity("cat", "dog").unwrap() > 0.9);
    }

    #[test]
    fn test_legacy_header_rejected_for_small_dims() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("glove.txt");
        let output = dir.path().join("w2v.txt");
        std::fs::write(&input, "the 0.1 0.2\ncat 0.3 0.4\n").unwrap();

        convert(&input, &output, HeaderDims::legacy()).unwrap();
        let err = Word2VecModel::load(&output).unwrap_err();
        assert!(matches!(err, ConvertError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Word2VecModel::load(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ConvertError::NotFound { .. }));
    }
}
