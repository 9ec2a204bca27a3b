//! Reference-data collaborators: question catalogs, norm tables, and the
//! career catalog. The engine only sees the traits; the in-memory
//! implementations are populated from exported CSV reference files by the
//! loaders in [`loader`].

pub mod domain;
pub mod loader;

use crate::assessment::domain::{AgeGroup, Dimension, ModuleCode, Region};
use domain::{CareerProfile, NormRecord, Question};

/// Ordered active questions per module and age group.
pub trait QuestionCatalog: Send + Sync {
    fn questions_for(&self, module: ModuleCode, age_group: AgeGroup) -> Vec<Question>;
}

/// Statistical norms keyed by (module, age group, dimension, region).
/// Callers are expected to retry with the Global region themselves; the
/// table answers exact segment lookups only.
pub trait NormTable: Send + Sync {
    fn lookup(
        &self,
        module: ModuleCode,
        age_group: AgeGroup,
        dimension: Dimension,
        region: &Region,
    ) -> Option<NormRecord>;
}

/// Full career catalog with required trait profiles.
pub trait CareerCatalog: Send + Sync {
    fn all(&self) -> Vec<CareerProfile>;
}

/// Question catalog backed by a vector, preserving authoring order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryQuestionCatalog {
    questions: Vec<Question>,
}

impl InMemoryQuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionCatalog for InMemoryQuestionCatalog {
    fn questions_for(&self, module: ModuleCode, age_group: AgeGroup) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|question| question.module == module && question.age_group == age_group)
            .cloned()
            .collect()
    }
}

/// Norm table backed by a vector; catalogs hold tens of segments, a linear
/// scan is sufficient.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNormTable {
    records: Vec<NormRecord>,
}

impl InMemoryNormTable {
    pub fn new(records: Vec<NormRecord>) -> Self {
        Self { records }
    }
}

impl NormTable for InMemoryNormTable {
    fn lookup(
        &self,
        module: ModuleCode,
        age_group: AgeGroup,
        dimension: Dimension,
        region: &Region,
    ) -> Option<NormRecord> {
        self.records
            .iter()
            .find(|record| {
                record.module == module
                    && record.age_group == age_group
                    && record.dimension == dimension
                    && record.region.matches(region)
            })
            .cloned()
    }
}

/// Career catalog backed by a vector.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCareerCatalog {
    careers: Vec<CareerProfile>,
}

impl InMemoryCareerCatalog {
    pub fn new(careers: Vec<CareerProfile>) -> Self {
        Self { careers }
    }
}

impl CareerCatalog for InMemoryCareerCatalog {
    fn all(&self) -> Vec<CareerProfile> {
        self.careers.clone()
    }
}
