use crate::errors::NlpError;
use crate::models::Document;

/// Tokenization, tagging, lemmatization, dependency parsing and sentence
/// segmentation over one text.
///
/// Must be deterministic: identical input yields an identical `Document`.
pub trait NlpAnalyzer: Send + Sync {
    /// Name of the loaded model.
    fn model_name(&self) -> &str;

    /// Analyse `text`.
    fn analyze(&self, text: &str) -> Result<Document, NlpError>;
}
