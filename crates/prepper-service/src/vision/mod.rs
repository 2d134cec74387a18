//! Product recognition from photos with a vision-capable language model.

pub mod client;
pub mod parse;
pub mod prompt;
pub mod service;

pub use client::{AnthropicVision, ImageInput, VisionModel};
pub use parse::{AnalysisResult, parse_analysis};
pub use prompt::build_prompt;
pub use service::{AnalysisService, AnalyzeRequest, parse_date};
