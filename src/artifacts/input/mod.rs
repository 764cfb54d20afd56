//! Producing-run input
//!
//! - `article_list`: the pipe-delimited list of articles to snapshot

pub mod article_list;
