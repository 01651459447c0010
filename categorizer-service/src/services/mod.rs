pub mod analysis;
pub mod metrics;
pub mod providers;

pub use analysis::{analyze_statement, strip_markdown_fences, AnalyzeInput};
pub use metrics::{Metrics, UpstreamOutcome};
pub use providers::{ProviderError, ProviderResponse, TextProvider};
