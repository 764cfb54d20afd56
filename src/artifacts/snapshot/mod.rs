//! Snapshot records
//!
//! - `article_title`: validated title newtype used as the identity key
//! - `record`: one archived article and its front-matter text form

pub mod article_title;
pub mod record;
