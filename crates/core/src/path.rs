#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Index(i64),
    Key(String),
}

impl PathStep {
    pub fn index(value: i64) -> Self {
        Self::Index(value)
    }

    pub fn key(value: impl Into<String>) -> Self {
        Self::Key(value.into())
    }
}

/// Ordered steps into a JSON document. Full-path accessors require at
/// least one step; emptiness is a caller contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    steps: Vec<PathStep>,
}

impl JsonPath {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<Vec<PathStep>> for JsonPath {
    fn from(steps: Vec<PathStep>) -> Self {
        Self::new(steps)
    }
}

impl FromIterator<PathStep> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
