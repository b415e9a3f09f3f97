//! Concept data model.
//!
//! A concept is a discrete skill or topic a user can mark as learned. The
//! many-to-many relationship is recorded through [`LearnedConcept`] join
//! records, unique on the (user, concept) pair.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Validation errors returned by the concept constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for ConceptValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "concept name must not be empty"),
        }
    }
}

impl std::error::Error for ConceptValidationError {}

/// A discrete skill or topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    id: Uuid,
    name: String,
    description: String,
}

/// Validated payload for creating a concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptDraft {
    /// Concept name, trimmed.
    pub name: String,
    /// Free-form description; may be empty.
    pub description: String,
}

impl ConceptDraft {
    /// Validate raw concept fields into a draft.
    pub fn new(name: &str, description: &str) -> Result<Self, ConceptValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConceptValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            description: description.trim().to_owned(),
        })
    }
}

impl Concept {
    /// Build a [`Concept`] from validated components.
    pub fn new(id: Uuid, draft: ConceptDraft) -> Self {
        let ConceptDraft { name, description } = draft;
        Self {
            id,
            name,
            description,
        }
    }

    /// Stable concept identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Concept name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Join record marking a concept learned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnedConcept {
    id: Uuid,
    user_id: UserId,
    concept_id: Uuid,
    learned_at: DateTime<Utc>,
}

impl LearnedConcept {
    /// Build a learned-concept record from storage fields.
    pub const fn new(
        id: Uuid,
        user_id: UserId,
        concept_id: Uuid,
        learned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            concept_id,
            learned_at,
        }
    }

    /// Join record identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Learning user.
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Learned concept.
    pub const fn concept_id(&self) -> Uuid {
        self.concept_id
    }

    /// Timestamp the concept was marked learned.
    pub const fn learned_at(&self) -> DateTime<Utc> {
        self.learned_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn drafts_trim_fields() {
        let draft = ConceptDraft::new(" closures ", " Functions capturing scope. ")
            .expect("valid draft");
        assert_eq!(draft.name, "closures");
        assert_eq!(draft.description, "Functions capturing scope.");
    }

    #[rstest]
    fn empty_descriptions_are_allowed() {
        let draft = ConceptDraft::new("recursion", "").expect("valid draft");
        assert_eq!(draft.description, "");
    }

    #[rstest]
    fn blank_names_are_rejected() {
        let err = ConceptDraft::new("  ", "desc").expect_err("blank name must fail");
        assert_eq!(err, ConceptValidationError::EmptyName);
    }
}
