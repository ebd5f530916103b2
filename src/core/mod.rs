//! Core filtering pipeline.
//!
//! Data flows leaf-first: raw source lines are split into (content, comment)
//! by [`comment`], the content is tokenized into directive tokens by
//! [`scanner`], and [`engine`] drives the scope-stack state machine that
//! decides what reaches the output. [`conditions`] is the caller-supplied
//! table the engine consults; [`expand`] is the optional `\input{}` pre-pass.

pub mod comment;
pub mod conditions;
pub mod engine;
pub mod expand;
pub mod scanner;
