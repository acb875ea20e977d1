//! BETH feature engineering: declarative column rules and the dataset transformer.

mod pipeline;
pub mod rules;
mod transform;

pub use pipeline::{FeaturePipeline, PipelineOutcome};
pub use rules::{FeatureRule, Rule, BETH_RULES, REQUIRED_COLUMNS, TARGET_COLUMN};
pub use transform::{output_columns, ErrorMode, FeatureTransformer, TransformOptions};
