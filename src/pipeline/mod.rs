//! The content pipeline: multi-source extraction merge and the asset URL
//! rewriting pass applied after images move to stable storage.

pub mod merge;
pub mod rewrite;
