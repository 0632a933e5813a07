#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VarKind {
    Binary,
    Continuous { lower: f64, upper: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Ge,
    Le,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values.get(var.index()).copied().unwrap_or(0.0))
            .sum()
    }

    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.relation {
            Relation::Eq => (lhs - self.rhs).abs() <= tolerance,
            Relation::Ge => lhs >= self.rhs - tolerance,
            Relation::Le => lhs <= self.rhs + tolerance,
        }
    }
}

/// A minimization problem over binary and continuous variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpModel {
    kinds: Vec<VarKind>,
    objective: Vec<f64>,
    initial: Vec<Option<f64>>,
    constraints: Vec<LinearConstraint>,
}

impl MilpModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_binary(&mut self) -> VarId {
        self.add_var(VarKind::Binary)
    }

    pub fn add_continuous(&mut self, lower: f64, upper: f64) -> VarId {
        self.add_var(VarKind::Continuous { lower, upper })
    }

    fn add_var(&mut self, kind: VarKind) -> VarId {
        self.kinds.push(kind);
        self.objective.push(0.0);
        self.initial.push(None);
        VarId(self.kinds.len() - 1)
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            relation,
            rhs,
        });
    }

    /// Replaces the objective. Variables not mentioned get coefficient 0.
    pub fn minimize(&mut self, terms: impl IntoIterator<Item = (VarId, f64)>) {
        self.objective.iter_mut().for_each(|coef| *coef = 0.0);
        for (var, coef) in terms {
            self.objective[var.index()] += coef;
        }
    }

    pub fn set_initial(&mut self, var: VarId, value: f64) {
        self.initial[var.index()] = Some(value);
    }

    pub fn num_vars(&self) -> usize {
        self.kinds.len()
    }

    pub fn kind(&self, var: VarId) -> VarKind {
        self.kinds[var.index()]
    }

    pub fn vars(&self) -> impl Iterator<Item = (VarId, VarKind, f64)> + '_ {
        self.kinds
            .iter()
            .zip(self.objective.iter())
            .enumerate()
            .map(|(index, (&kind, &coef))| (VarId(index), kind, coef))
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn objective_terms(&self) -> Vec<(VarId, f64)> {
        self.objective
            .iter()
            .enumerate()
            .filter(|(_, &coef)| coef != 0.0)
            .map(|(index, &coef)| (VarId(index), coef))
            .collect()
    }

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values.iter())
            .map(|(coef, value)| coef * value)
            .sum()
    }

    pub fn has_initial_values(&self) -> bool {
        self.initial.iter().any(Option::is_some)
    }

    /// The initial values as a full assignment, or `None` if nothing was seeded
    /// or the seeded values violate a bound or constraint. Unset variables take
    /// their lower bound.
    pub fn initial_solution(&self, tolerance: f64) -> Option<Vec<f64>> {
        if !self.has_initial_values() {
            return None;
        }
        let values: Vec<f64> = self
            .kinds
            .iter()
            .zip(self.initial.iter())
            .map(|(kind, initial)| match (initial, kind) {
                (Some(value), _) => *value,
                (None, VarKind::Binary) => 0.0,
                (None, VarKind::Continuous { lower, .. }) => *lower,
            })
            .collect();
        self.is_feasible(&values, tolerance).then_some(values)
    }

    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.num_vars() {
            return false;
        }
        let within_bounds = self.kinds.iter().zip(values.iter()).all(|(kind, &value)| match kind {
            VarKind::Binary => value.abs() <= tolerance || (value - 1.0).abs() <= tolerance,
            VarKind::Continuous { lower, upper } => {
                value >= lower - tolerance && value <= upper + tolerance
            }
        });
        within_bounds
            && self
                .constraints
                .iter()
                .all(|constraint| constraint.is_satisfied(values, tolerance))
    }
}
