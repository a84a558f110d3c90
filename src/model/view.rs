//! Human-readable views of a model tree.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{CombinationModel, ModelId, ModelInputs};

/// The distinct nodes of one round within a model tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundView {
    pub round: usize,
    /// `(id, formula)` ordered by index.
    pub nodes: Vec<(ModelId, String)>,
}

impl CombinationModel {
    /// Names of the two inputs: `x{i+1}` for raw predictors, model ids
    /// otherwise.
    pub fn input_names(&self) -> (String, String) {
        match self.inputs() {
            ModelInputs::Leaf { first, second } => (format!("x{}", first + 1), format!("x{}", second + 1)),
            ModelInputs::Internal { left, right } => (left.id().to_string(), right.id().to_string()),
        }
    }

    /// The fitted form with its input names, e.g.
    /// `m0_2 = 2 + 3*x1 - 1*x3 + 0.5*x1*x3 + 0*x1^2 + 0*x3^2`.
    pub fn formula(&self) -> String {
        let (u, v) = self.input_names();
        let [b0, b1, b2, b3, b4, b5] = *self.coefficients().values();
        let terms = [
            (b1, u.clone()),
            (b2, v.clone()),
            (b3, format!("{u}*{v}")),
            (b4, format!("{u}^2")),
            (b5, format!("{v}^2")),
        ];

        let mut out = format!("{} = {}", self.id(), fmt_coefficient(b0));
        for (b, name) in terms {
            let sign = if b.is_sign_negative() { '-' } else { '+' };
            out.push_str(&format!(" {sign} {}*{name}", fmt_coefficient(b.abs())));
        }
        out
    }

    /// Every distinct node of the tree grouped by round, highest round
    /// first.
    pub fn rounds(&self) -> Vec<RoundView> {
        let mut by_round: BTreeMap<usize, BTreeMap<usize, String>> = BTreeMap::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            let id = node.id();
            let level = by_round.entry(id.round).or_default();
            if level.contains_key(&id.index) {
                continue;
            }
            level.insert(id.index, node.formula());
            if let Some((left, right)) = node.children() {
                stack.push(right);
                stack.push(left);
            }
        }

        by_round
            .into_iter()
            .rev()
            .map(|(round, nodes)| RoundView {
                round,
                nodes: nodes
                    .into_iter()
                    .map(|(index, formula)| (ModelId::new(round, index), formula))
                    .collect(),
            })
            .collect()
    }
}

fn fmt_coefficient(value: f64) -> String {
    format!("{value:.6}")
}
