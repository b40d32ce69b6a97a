//! Sentiment scoring for collected mentions.
//!
//! Strips platform noise (URLs, @-handles, hashtag markers) out of a copy
//! of the text, then scores the cleaned copy against a general-purpose
//! lexicon to produce polarity, subjectivity, and a three-way label. The
//! text shown to users is never altered; only the scorer's input is.

pub mod clean;
pub mod scorer;

pub use clean::clean_for_sentiment;
pub use scorer::{analyze, label_for_polarity};
