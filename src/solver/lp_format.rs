//! CPLEX LP rendering of a model.
//!
//! Used by `Display for Model`. Variables are written under their own names
//! and constraints as `c0, c1, ...` in insertion order.

use std::collections::HashMap;
use std::fmt::{self, Write};

use crate::constraints::Relation;
use crate::expr::{Expression, VariableId};
use crate::model::{Model, Sense};

struct Names<'a>(HashMap<VariableId, &'a str>);

impl<'a> Names<'a> {
    fn new(model: &'a Model) -> Self {
        Names(model.variables().iter().map(|v| (v.id(), v.name())).collect())
    }

    fn write<W: Write>(&self, out: &mut W, id: VariableId) -> fmt::Result {
        match self.0.get(&id) {
            Some(name) => out.write_str(name),
            None => write!(out, "v{}", id.raw()),
        }
    }
}

/// Write `model` in CPLEX LP format.
///
/// The objective's constant is not representable and is written as a comment.
pub fn write_lp<W: Write>(out: &mut W, model: &Model) -> fmt::Result {
    let names = Names::new(model);
    let filler = model.variables().first().map_or("x0", |v| v.name());

    match model.objective() {
        Some(objective) => {
            let keyword = match objective.sense() {
                Sense::Minimize => "Minimize",
                Sense::Maximize => "Maximize",
            };
            writeln!(out, "{keyword}")?;
            out.write_str(" obj: ")?;
            write_expr(out, objective.expression(), &names, filler, true)?;
            out.write_char('\n')?;
            let offset = objective.expression().constant();
            if offset != 0.0 {
                writeln!(out, "\\ objective constant: {offset}")?;
            }
        }
        None => {
            writeln!(out, "\\ no objective")?;
            writeln!(out, "Minimize")?;
            writeln!(out, " obj: 0 {filler}")?;
        }
    }

    writeln!(out, "Subject To")?;
    for constraint in model.constraints() {
        let (lhs, rhs) = constraint.normalized();
        write!(out, " c{}: ", constraint.id().index())?;
        write_expr(out, &lhs, &names, filler, false)?;
        writeln!(
            out,
            " {} {}",
            relation_symbol(constraint.relation()),
            Num(rhs)
        )?;
    }

    writeln!(out, "Bounds")?;
    for var in model.variables() {
        let name = var.name();
        let b = var.bounds().effective(var.domain());
        if b.lower == b.upper {
            writeln!(out, " {name} = {}", Num(b.lower))?;
            continue;
        }
        match (b.lower.is_finite(), b.upper.is_finite()) {
            (true, false) => writeln!(out, " {name} >= {}", Num(b.lower))?,
            (false, false) => writeln!(out, " {name} free")?,
            (false, true) => writeln!(out, " -inf <= {name} <= {}", Num(b.upper))?,
            (true, true) => writeln!(out, " {} <= {name} <= {}", Num(b.lower), Num(b.upper))?,
        }
    }

    let mut integral = model.variables().iter().filter(|v| v.is_integral()).peekable();
    if integral.peek().is_some() {
        out.write_str("General\n")?;
        for var in integral {
            write!(out, " {}", var.name())?;
        }
        out.write_char('\n')?;
    }

    out.write_str("End\n")
}

fn relation_symbol(relation: Relation) -> &'static str {
    match relation {
        Relation::LessEqual => "<=",
        Relation::GreaterEqual => ">=",
        Relation::Equal => "=",
    }
}

/// Variable terms of `expr`; the constant is ignored. Quadratic terms use the
/// bracket syntax, doubled and divided by two in the objective.
fn write_expr<W: Write>(
    out: &mut W,
    expr: &Expression,
    names: &Names<'_>,
    filler: &str,
    objective: bool,
) -> fmt::Result {
    let mut first = true;
    for (var, coeff) in expr.linear_terms() {
        write_sign(out, coeff, first)?;
        write_coeff(out, coeff)?;
        names.write(out, var)?;
        first = false;
    }

    let scale = if objective { 2.0 } else { 1.0 };
    let mut quad = expr.quadratic_terms().peekable();
    if quad.peek().is_some() {
        out.write_str(if first { "[ " } else { " + [ " })?;
        let mut first_quad = true;
        for (a, b, coeff) in quad {
            let coeff = scale * coeff;
            write_sign(out, coeff, first_quad)?;
            write_coeff(out, coeff)?;
            names.write(out, a)?;
            if a == b {
                out.write_str(" ^ 2")?;
            } else {
                out.write_str(" * ")?;
                names.write(out, b)?;
            }
            first_quad = false;
        }
        out.write_str(" ]")?;
        if objective {
            out.write_str(" / 2")?;
        }
        first = false;
    }

    if first {
        write!(out, "0 {filler}")?;
    }
    Ok(())
}

fn write_sign<W: Write>(out: &mut W, coeff: f64, first: bool) -> fmt::Result {
    match (first, coeff < 0.0) {
        (true, true) => out.write_str("- "),
        (true, false) => Ok(()),
        (false, true) => out.write_str(" - "),
        (false, false) => out.write_str(" + "),
    }
}

fn write_coeff<W: Write>(out: &mut W, coeff: f64) -> fmt::Result {
    let magnitude = coeff.abs();
    if magnitude != 1.0 {
        write!(out, "{} ", Num(magnitude))?;
    }
    Ok(())
}

/// Number in LP syntax: infinities as `inf`/`-inf`.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == f64::INFINITY {
            f.write_str("inf")
        } else if self.0 == f64::NEG_INFINITY {
            f.write_str("-inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
