//! Configuration errors. Generation itself never fails once a
//! [`BuildingClassifier`](crate::BuildingClassifier) has been built.

use thiserror::Error;

use crate::classifier::BuildingKind;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid {kind} class: {reason}")]
    InvalidClass { kind: BuildingKind, reason: String },

    #[error("invalid floor height {0}: must be positive and finite")]
    InvalidFloorHeight(f32),

    #[error("invalid block geometry: {0}")]
    InvalidBlock(String),

    #[error("invalid world layout: {0}")]
    InvalidWorld(String),

    #[error("invalid height envelope: {0}")]
    InvalidEnvelope(String),
}
