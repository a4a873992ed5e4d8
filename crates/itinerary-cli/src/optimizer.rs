//! File-backed stand-in for the optimization service.

use std::path::PathBuf;

use async_trait::async_trait;
use itinerary_core::{
    models::{OptimizationRequest, OptimizationResult},
    ItineraryError, Optimizer, Result,
};
use log::debug;

/// Answers optimize requests with a JSON result read from disk.
///
/// The file holds the service's response body: `suggestions`, `reasoning`
/// and the optional estimates, in camelCase.
pub struct FileOptimizer {
    path: PathBuf,
}

impl FileOptimizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Optimizer for FileOptimizer {
    async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationResult> {
        debug!(
            "Reading {} result for trip {} from {}",
            request.mode.as_str(),
            request.trip_id,
            self.path.display()
        );

        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ItineraryError::OptimizationUnavailable {
                message: format!("cannot read {}: {e}", self.path.display()),
            })?;

        serde_json::from_str(&body).map_err(|e| ItineraryError::OptimizationUnavailable {
            message: format!("malformed optimizer response in {}: {e}", self.path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use itinerary_core::models::{OptimizationMode, SuggestionKind};
    use tempfile::NamedTempFile;

    use super::*;

    fn request() -> OptimizationRequest {
        OptimizationRequest {
            trip_id: "trip-1".to_string(),
            mode: OptimizationMode::OptimizeOnly,
            constraints: None,
        }
    }

    #[tokio::test]
    async fn test_reads_result_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(
            file,
            r#"{{"suggestions":[{{"type":"remove","itemId":"a","reasoning":"Closed"}}],"reasoning":"Trim","estimatedTimeSaved":15}}"#
        )
        .expect("Failed to write result");

        let result = FileOptimizer::new(file.path())
            .optimize(&request())
            .await
            .expect("Failed to read result");

        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].kind, SuggestionKind::Remove);
        assert_eq!(result.estimated_time_saved, Some(15));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_file_is_unavailable() {
        let missing = FileOptimizer::new("/nonexistent/result.json")
            .optimize(&request())
            .await;
        assert!(matches!(
            missing,
            Err(ItineraryError::OptimizationUnavailable { .. })
        ));

        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "not json").expect("Failed to write result");
        let malformed = FileOptimizer::new(file.path()).optimize(&request()).await;
        assert!(matches!(
            malformed,
            Err(ItineraryError::OptimizationUnavailable { .. })
        ));
    }
}
