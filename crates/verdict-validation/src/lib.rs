//! # verdict-validation
//!
//! Multi-pass validation of grammar/style errors flagged by an upstream rule
//! engine. Each pass judges the same error through one lens and returns
//! ACCEPT, REJECT or UNCERTAIN with weighted evidence.
//!
//! ## Passes
//! 1. **Morphological**: POS tags, dependency relations, ambiguity and
//!    cross-verification around the flagged token
//! 2. **Context**: negative evidence (quotes, code, legacy markers),
//!    coreference, discourse flow, semantic and register fit
//! 3. **Domain**: rule applicability, terminology, style and audience for
//!    the detected domain
//! 4. **Cross-rule**: conflicts, coherence, consolidation and net
//!    improvement across every rule and error in the pass

pub mod analysis;
pub mod base;
pub mod confidence;
pub mod context;
pub mod cross_rule;
pub mod domain;
pub mod introspection;
pub mod knowledge;
pub mod morphological;
pub mod text;

pub use base::{PassValidator, ValidatorCore};
pub use confidence::HeuristicConfidenceCalculator;
pub use context::ContextValidator;
pub use cross_rule::{CoherenceLevel, CrossRuleValidator, ImprovementType};
pub use domain::DomainValidator;
pub use introspection::{AnalysisStatistics, PerformanceSummary, ValidationStatistics, ValidatorInfo};
pub use knowledge::{ConflictSeverity, KnowledgeBase};
pub use morphological::MorphologicalValidator;
