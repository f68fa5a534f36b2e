use std::fmt::Display;

use crate::model::{Constr, Expr, Model, RelOp};

/// Node counts of the three-tier network.
#[derive(Debug, Clone, Copy)]
pub struct Dims {
    pub source: u32,
    pub transit: u32,
    pub dest: u32,
}

/// A source -> transit -> destination route, rendered `S{i}T{k}D{j}`.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub source: u32,
    pub transit: u32,
    pub dest: u32,
}

pub enum Var {
    /// Continuous flow along a route.
    Flow(Route),
    /// Binary selection of a route's transit node.
    Select(Route),
    /// Aggregate flow on a source-transit link.
    SourceLink { source: u32, transit: u32 },
    /// Aggregate flow on a transit-destination link.
    DestLink { transit: u32, dest: u32 },
    /// Minimax transit load, the objective.
    Load,
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}T{}D{}", self.source, self.transit, self.dest)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Var::Flow(route) => write!(f, "x{route}"),
            Var::Select(route) => write!(f, "u{route}"),
            Var::SourceLink { source, transit } => write!(f, "yS{source}T{transit}"),
            Var::DestLink { transit, dest } => write!(f, "yT{transit}D{dest}"),
            Var::Load => write!(f, "r"),
        }
    }
}

/// Demand volume between source `i` and destination `j`.
fn demand(source: u32, dest: u32) -> i64 {
    i64::from(source) + i64::from(dest)
}

/// Builds the load-balancing model: minimize the worst transit-node load `r`
/// subject to demand, linearization, link-capacity and path-count constraints.
/// Dimensions are checked up front so nothing is emitted for a bad network.
pub fn build(dims: Dims, paths: u32) -> anyhow::Result<Model> {
    anyhow::ensure!(
        dims.source >= 1 && dims.transit >= 1 && dims.dest >= 1,
        "node counts must be positive: {dims:?}"
    );
    anyhow::ensure!(paths >= 1, "path count must be positive");

    let mut model = Model::new();
    let mut objective = Expr::new();
    objective.push(1, Var::Load);
    model.set_objective(objective);

    // load balancing: total flow through transit k may not exceed r
    for k in 1..=dims.transit {
        let mut expr = Expr::new();
        for i in 1..=dims.source {
            for j in 1..=dims.dest {
                expr.push(1, Var::Flow(route(i, k, j)))
            }
        }
        expr.push(-1, Var::Load);
        model.add_constr(Constr {
            name: format!("r{k}"),
            #[cfg(feature = "commented-model")]
            desc: Some(format!("load through transit {k} dominated by r")),
            expr,
            op: RelOp::LessEqual,
            rhs: 0,
        })?
    }

    // demand volume: flow from i to j across all transit nodes sums to i + j
    for i in 1..=dims.source {
        for j in 1..=dims.dest {
            let mut expr = Expr::new();
            for k in 1..=dims.transit {
                expr.push(1, Var::Flow(route(i, k, j)))
            }
            model.add_constr(Constr {
                name: format!("hS{i}D{j}"),
                #[cfg(feature = "commented-model")]
                desc: Some(format!("demand between source {i} and destination {j}")),
                expr,
                op: RelOp::Equal,
                rhs: demand(i, j),
            })?
        }
    }

    // demand flow: x = (u * h) / n, linearized as n*x - h*u = 0
    for i in 1..=dims.source {
        for j in 1..=dims.dest {
            for k in 1..=dims.transit {
                let mut expr = Expr::new();
                expr.push(i64::from(paths), Var::Flow(route(i, k, j)));
                expr.push(-demand(i, j), Var::Select(route(i, k, j)));
                model.add_constr(Constr {
                    name: format!("df{}", route(i, k, j)),
                    #[cfg(feature = "commented-model")]
                    desc: Some(format!("equal split of demand {} over selected paths", demand(i, j))),
                    expr,
                    op: RelOp::Equal,
                    rhs: 0,
                })?
            }
        }
    }

    // source capacity: flow leaving source i through transit k loads link S{i}T{k}
    for i in 1..=dims.source {
        for k in 1..=dims.transit {
            let mut expr = Expr::new();
            for j in 1..=dims.dest {
                expr.push(1, Var::Flow(route(i, k, j)))
            }
            expr.push(-1, Var::SourceLink { source: i, transit: k });
            model.add_constr(Constr {
                name: format!("cS{i}T{k}"),
                #[cfg(feature = "commented-model")]
                desc: Some(format!("aggregate flow on link S{i}-T{k}")),
                expr,
                op: RelOp::Equal,
                rhs: 0,
            })?
        }
    }

    // destination capacity: flow entering destination j via transit k loads link T{k}D{j}
    for j in 1..=dims.dest {
        for k in 1..=dims.transit {
            let mut expr = Expr::new();
            for i in 1..=dims.source {
                expr.push(1, Var::Flow(route(i, k, j)))
            }
            expr.push(-1, Var::DestLink { transit: k, dest: j });
            model.add_constr(Constr {
                name: format!("dT{k}D{j}"),
                #[cfg(feature = "commented-model")]
                desc: Some(format!("aggregate flow on link T{k}-D{j}")),
                expr,
                op: RelOp::Equal,
                rhs: 0,
            })?
        }
    }

    // path count: each demand selects exactly `paths` transit nodes
    for i in 1..=dims.source {
        for j in 1..=dims.dest {
            let mut expr = Expr::new();
            for k in 1..=dims.transit {
                expr.push(1, Var::Select(route(i, k, j)))
            }
            model.add_constr(Constr {
                name: format!("uS{i}D{j}"),
                #[cfg(feature = "commented-model")]
                desc: Some(format!("source {i} to destination {j} uses {paths} paths")),
                expr,
                op: RelOp::Equal,
                rhs: i64::from(paths),
            })?
        }
    }

    for i in 1..=dims.source {
        for j in 1..=dims.dest {
            for k in 1..=dims.transit {
                model.add_bound(Var::Flow(route(i, k, j)))
            }
        }
    }
    for i in 1..=dims.source {
        for k in 1..=dims.transit {
            model.add_bound(Var::SourceLink { source: i, transit: k })
        }
    }
    for j in 1..=dims.dest {
        for k in 1..=dims.transit {
            model.add_bound(Var::DestLink { transit: k, dest: j })
        }
    }
    model.add_bound(Var::Load);

    for i in 1..=dims.source {
        for j in 1..=dims.dest {
            for k in 1..=dims.transit {
                model.add_binary(Var::Select(route(i, k, j)))
            }
        }
    }

    Ok(model)
}

fn route(source: u32, transit: u32, dest: u32) -> Route {
    Route {
        source,
        transit,
        dest,
    }
}
