// word2vec/ - Loader for the word2vec text format.
//
// Used by `--check` to confirm a converted file loads and answers queries.

pub mod model;
pub mod similarity;

pub use model::Word2VecModel;
