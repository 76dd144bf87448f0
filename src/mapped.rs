use crate::codec::LabelSpec;
use crate::value::{CypherValue, Properties};

/// Anything that can stand in for a node pattern: labels plus a property map.
pub trait MappedNode {
    fn labels(&self) -> LabelSpec;
    fn properties(&self) -> Properties;
}

/// Anything that can stand in for a relationship pattern.
pub trait MappedRelationship {
    fn relationship_type(&self) -> String;
    fn properties(&self) -> Properties;
}

impl<'a, N> MappedNode for &'a N
where
    N: MappedNode + ?Sized,
{
    fn labels(&self) -> LabelSpec {
        (*self).labels()
    }

    fn properties(&self) -> Properties {
        (*self).properties()
    }
}

impl<'a, R> MappedRelationship for &'a R
where
    R: MappedRelationship + ?Sized,
{
    fn relationship_type(&self) -> String {
        (*self).relationship_type()
    }

    fn properties(&self) -> Properties {
        (*self).properties()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
    pub labels: Vec<String>,
    pub properties: Properties,
}

impl GraphNode {
    pub fn new<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_property<K: Into<String>, V: Into<CypherValue>>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl MappedNode for GraphNode {
    fn labels(&self) -> LabelSpec {
        LabelSpec::Many(self.labels.clone())
    }

    fn properties(&self) -> Properties {
        self.properties.clone()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphRelationship {
    pub relationship_type: String,
    pub properties: Properties,
}

impl GraphRelationship {
    pub fn new<T: Into<String>>(relationship_type: T) -> Self {
        Self {
            relationship_type: relationship_type.into(),
            ..Self::default()
        }
    }

    pub fn with_property<K: Into<String>, V: Into<CypherValue>>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl MappedRelationship for GraphRelationship {
    fn relationship_type(&self) -> String {
        self.relationship_type.clone()
    }

    fn properties(&self) -> Properties {
        self.properties.clone()
    }
}
