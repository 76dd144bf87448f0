//! Memgraph traversal quantifiers embedded inside a relationship pattern.
//!
//! ```rust
//! use cyphergraph::BreadthFirstSearch;
//!
//! let bfs = BreadthFirstSearch::new()
//!     .bounds(1, 15)
//!     .condition("r.x > 12 AND n.y < 3");
//! assert_eq!(bfs.to_string(), "*BFS 1..15 (r, n | r.x > 12 AND n.y < 3)");
//! ```

use std::fmt;

pub const DEFAULT_TOTAL_WEIGHT: &str = "total_weight";
pub const DEFAULT_WEIGHT_PROPERTY: &str = "r.weight";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreadthFirstSearch {
    pub lower_bound: Option<u64>,
    pub upper_bound: Option<u64>,
    pub condition: Option<String>,
}

impl BreadthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, lower: u64, upper: u64) -> Self {
        self.lower_bound = Some(lower);
        self.upper_bound = Some(upper);
        self
    }

    pub fn lower_bound(mut self, lower: u64) -> Self {
        self.lower_bound = Some(lower);
        self
    }

    pub fn upper_bound(mut self, upper: u64) -> Self {
        self.upper_bound = Some(upper);
        self
    }

    pub fn condition<T: Into<String>>(mut self, condition: T) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepthFirstSearch {
    pub lower_bound: Option<u64>,
    pub upper_bound: Option<u64>,
    pub condition: Option<String>,
}

impl DepthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, lower: u64, upper: u64) -> Self {
        self.lower_bound = Some(lower);
        self.upper_bound = Some(upper);
        self
    }

    pub fn lower_bound(mut self, lower: u64) -> Self {
        self.lower_bound = Some(lower);
        self
    }

    pub fn upper_bound(mut self, upper: u64) -> Self {
        self.upper_bound = Some(upper);
        self
    }

    pub fn condition<T: Into<String>>(mut self, condition: T) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// Shared shape of `*WSHORTEST` and `*ALLSHORTEST`.
///
/// Memgraph only accepts an upper bound for weighted traversals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedTraversal {
    pub upper_bound: Option<u64>,
    pub condition: Option<String>,
    pub total_weight_var: String,
    pub weight_property: String,
}

impl Default for WeightedTraversal {
    fn default() -> Self {
        Self {
            upper_bound: None,
            condition: None,
            total_weight_var: DEFAULT_TOTAL_WEIGHT.to_string(),
            weight_property: DEFAULT_WEIGHT_PROPERTY.to_string(),
        }
    }
}

impl WeightedTraversal {
    /// Weight expression with a bare property name qualified as `r.<name>`.
    pub fn weight_expression(&self) -> String {
        if self.weight_property.contains('.') {
            self.weight_property.clone()
        } else {
            format!("r.{}", self.weight_property)
        }
    }

    fn render(&self, keyword: &str) -> String {
        let mut parts = vec![keyword.to_string()];
        if let Some(upper) = self.upper_bound {
            parts.push(upper.to_string());
        }
        parts.push(format!("(r, n | {})", self.weight_expression()));
        parts.push(self.total_weight_var.clone());
        if let Some(condition) = &self.condition {
            parts.push(filter_lambda(condition));
        }
        parts.join(" ")
    }
}

macro_rules! weighted_algorithm {
    ($name:ident) => {
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name(pub WeightedTraversal);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn upper_bound(mut self, upper: u64) -> Self {
                self.0.upper_bound = Some(upper);
                self
            }

            pub fn condition<T: Into<String>>(mut self, condition: T) -> Self {
                self.0.condition = Some(condition.into());
                self
            }

            pub fn total_weight_var<T: Into<String>>(mut self, variable: T) -> Self {
                self.0.total_weight_var = variable.into();
                self
            }

            pub fn weight_property<T: Into<String>>(mut self, property: T) -> Self {
                self.0.weight_property = property.into();
                self
            }
        }
    };
}

weighted_algorithm!(WeightedShortestPath);
weighted_algorithm!(AllShortestPath);

fn render_bounds(lower: Option<u64>, upper: Option<u64>) -> Option<String> {
    if lower.is_none() && upper.is_none() {
        return None;
    }
    let side = |bound: Option<u64>| bound.map(|b| b.to_string()).unwrap_or_default();
    Some(format!("{}..{}", side(lower), side(upper)))
}

fn filter_lambda(condition: &str) -> String {
    format!("(r, n | {condition})")
}

fn render_unweighted(
    keyword: &str,
    lower: Option<u64>,
    upper: Option<u64>,
    condition: Option<&str>,
) -> String {
    let mut parts = vec![keyword.to_string()];
    parts.extend(render_bounds(lower, upper));
    parts.extend(condition.map(filter_lambda));
    parts.join(" ")
}

impl fmt::Display for BreadthFirstSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_unweighted(
            "*BFS",
            self.lower_bound,
            self.upper_bound,
            self.condition.as_deref(),
        ))
    }
}

impl fmt::Display for DepthFirstSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_unweighted(
            "*",
            self.lower_bound,
            self.upper_bound,
            self.condition.as_deref(),
        ))
    }
}

impl fmt::Display for WeightedShortestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.render("*WSHORTEST"))
    }
}

impl fmt::Display for AllShortestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.render("*ALLSHORTEST"))
    }
}

/// Any traversal quantifier accepted by a relationship pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntegratedAlgorithm {
    BreadthFirst(BreadthFirstSearch),
    DepthFirst(DepthFirstSearch),
    WeightedShortest(WeightedShortestPath),
    AllShortest(AllShortestPath),
}

impl fmt::Display for IntegratedAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegratedAlgorithm::BreadthFirst(algo) => fmt::Display::fmt(algo, f),
            IntegratedAlgorithm::DepthFirst(algo) => fmt::Display::fmt(algo, f),
            IntegratedAlgorithm::WeightedShortest(algo) => fmt::Display::fmt(algo, f),
            IntegratedAlgorithm::AllShortest(algo) => fmt::Display::fmt(algo, f),
        }
    }
}

impl From<BreadthFirstSearch> for IntegratedAlgorithm {
    fn from(algo: BreadthFirstSearch) -> Self {
        IntegratedAlgorithm::BreadthFirst(algo)
    }
}

impl From<DepthFirstSearch> for IntegratedAlgorithm {
    fn from(algo: DepthFirstSearch) -> Self {
        IntegratedAlgorithm::DepthFirst(algo)
    }
}

impl From<WeightedShortestPath> for IntegratedAlgorithm {
    fn from(algo: WeightedShortestPath) -> Self {
        IntegratedAlgorithm::WeightedShortest(algo)
    }
}

impl From<AllShortestPath> for IntegratedAlgorithm {
    fn from(algo: AllShortestPath) -> Self {
        IntegratedAlgorithm::AllShortest(algo)
    }
}
