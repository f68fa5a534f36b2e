use std::fmt::Display;

/// An LP-format document: objective, named constraints, variable bounds and
/// binary declarations, rendered in the section order the solver expects.
#[derive(Default)]
pub struct Model {
    objective: Expr,
    constrs: Vec<Constr>,
    bounds: Vec<String>,
    binaries: Vec<String>,
}

/// Linear expression. Terms render in insertion order, so the emitted text is
/// byte-stable across runs.
#[derive(Default)]
pub struct Expr(Vec<(i64, String)>);

pub enum RelOp {
    Equal,
    LessEqual,
    GreaterEqual,
}

pub struct Constr {
    pub name: String,
    #[cfg(feature = "commented-model")]
    pub desc: Option<String>,
    pub expr: Expr,
    pub op: RelOp,
    pub rhs: i64,
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Minimize")?;
        writeln!(f, "    {}", self.objective)?;
        writeln!(f, "Subject to")?;
        for constr in &self.constrs {
            #[cfg(feature = "commented-model")]
            if let Some(desc) = &constr.desc {
                writeln!(f, "\\ {desc}")?
            }
            writeln!(
                f,
                "    {}: {} {} {}",
                constr.name, constr.expr, constr.op, constr.rhs
            )?
        }
        writeln!(f, "Bounds")?;
        for name in &self.bounds {
            writeln!(f, "    {name} >= 0")?
        }
        writeln!(f, "Binaries")?;
        for name in &self.binaries {
            writeln!(f, "    {name}")?
        }
        write!(f, "End")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (coe, name)) in self.0.iter().enumerate() {
            if index == 0 {
                match coe {
                    1 => write!(f, "{name}")?,
                    -1 => write!(f, "- {name}")?,
                    _ => write!(f, "{coe} {name}")?,
                }
            } else {
                let sign = if *coe < 0 { '-' } else { '+' };
                match coe.abs() {
                    1 => write!(f, " {sign} {name}")?,
                    magnitude => write!(f, " {sign} {magnitude} {name}")?,
                }
            }
        }
        Ok(())
    }
}

impl Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            RelOp::Equal => "=",
            RelOp::LessEqual => "<=",
            RelOp::GreaterEqual => ">=",
        };
        write!(f, "{op}")
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_objective(&mut self, objective: Expr) {
        self.objective = objective
    }

    pub fn add_constr(&mut self, constr: Constr) -> anyhow::Result<()> {
        // a term-less row is not representable in the LP grammar
        anyhow::ensure!(
            !constr.expr.0.is_empty(),
            "constraint {} has no terms",
            constr.name
        );
        self.constrs.push(constr);
        Ok(())
    }

    pub fn add_bound(&mut self, var: impl Display) {
        self.bounds.push(var.to_string())
    }

    pub fn add_binary(&mut self, var: impl Display) {
        self.binaries.push(var.to_string())
    }

    pub fn constr_count(&self) -> usize {
        self.constrs.len()
    }

    pub fn bound_count(&self) -> usize {
        self.bounds.len()
    }

    pub fn binary_count(&self) -> usize {
        self.binaries.len()
    }
}

impl Expr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coe: i64, var: impl Display) {
        self.0.push((coe, var.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_elides_unit_coefficients() {
        let mut expr = Expr::new();
        expr.push(1, "xS1T1D1");
        expr.push(1, "xS1T1D2");
        expr.push(-1, "r");
        assert_eq!(expr.to_string(), "xS1T1D1 + xS1T1D2 - r");
    }

    #[test]
    fn expr_keeps_larger_coefficients() {
        let mut expr = Expr::new();
        expr.push(3, "xS1T2D1");
        expr.push(-3, "uS1T2D1");
        assert_eq!(expr.to_string(), "3 xS1T2D1 - 3 uS1T2D1");
    }

    #[test]
    fn empty_constraint_rejected() {
        let mut model = Model::new();
        let result = model.add_constr(Constr {
            name: "r1".into(),
            #[cfg(feature = "commented-model")]
            desc: None,
            expr: Expr::new(),
            op: RelOp::LessEqual,
            rhs: 0,
        });
        assert!(result.is_err())
    }

    #[test]
    fn section_order() {
        let mut model = Model::new();
        let mut objective = Expr::new();
        objective.push(1, "r");
        model.set_objective(objective);
        let mut expr = Expr::new();
        expr.push(1, "xS1T1D1");
        expr.push(-1, "r");
        model
            .add_constr(Constr {
                name: "r1".into(),
                #[cfg(feature = "commented-model")]
                desc: None,
                expr,
                op: RelOp::LessEqual,
                rhs: 0,
            })
            .unwrap();
        model.add_bound("xS1T1D1");
        model.add_binary("uS1T1D1");
        assert_eq!(
            model.to_string(),
            "Minimize\n    r\nSubject to\n    r1: xS1T1D1 - r <= 0\n\
             Bounds\n    xS1T1D1 >= 0\nBinaries\n    uS1T1D1\nEnd"
        );
    }
}
