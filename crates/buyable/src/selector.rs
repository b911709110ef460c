use crate::model::Spec;
use uuid::Uuid;

/// Picks which persisted spec single-value reads resolve against.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecSelector {
    /// Use this record as-is
    Record(Spec),
    /// First loaded spec with this id
    Id(Uuid),
    /// First loaded spec with this name
    Name(String),
}

impl SpecSelector {
    pub fn resolve(&self, specs: &[Spec]) -> Option<Spec> {
        match self {
            SpecSelector::Record(spec) => Some(spec.clone()),
            SpecSelector::Id(id) => specs.iter().find(|s| s.id == *id).cloned(),
            SpecSelector::Name(name) => specs.iter().find(|s| &s.name == name).cloned(),
        }
    }
}

impl std::fmt::Display for SpecSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecSelector::Record(spec) => write!(f, "\"{}\" ({})", spec.name, spec.id),
            SpecSelector::Id(id) => write!(f, "{}", id),
            SpecSelector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

impl From<Spec> for SpecSelector {
    fn from(spec: Spec) -> Self {
        SpecSelector::Record(spec)
    }
}

impl From<&Spec> for SpecSelector {
    fn from(spec: &Spec) -> Self {
        SpecSelector::Record(spec.clone())
    }
}

impl From<Uuid> for SpecSelector {
    fn from(id: Uuid) -> Self {
        SpecSelector::Id(id)
    }
}

impl From<&str> for SpecSelector {
    fn from(name: &str) -> Self {
        SpecSelector::Name(name.to_string())
    }
}

impl From<String> for SpecSelector {
    fn from(name: String) -> Self {
        SpecSelector::Name(name)
    }
}
