//! Pre-order tree walks and the roll-provenance reports built on them.
//!
//! Both walks visit a node before its operands and operands left to right;
//! `enumerate_die_roll_results` depends on that order to report rolls in
//! the order they happened.

use crate::common::UInt;
use crate::eval::{ExpressionResult, ResultNode};
use crate::parse::ast::Expression;

pub fn walk_expression<'a, F>(expr: &'a Expression, visit: &mut F)
where
    F: FnMut(&'a Expression),
{
    visit(expr);
    match expr {
        Expression::Constant(_) | Expression::Die(_) => {}
        Expression::Array(items) => {
            for item in items {
                walk_expression(item, visit);
            }
        }
        Expression::Binary(_, lhs, rhs) => {
            walk_expression(lhs, visit);
            walk_expression(rhs, visit);
        }
        Expression::Unary(_, operand) => walk_expression(operand, visit),
        Expression::Group(inner) => walk_expression(inner, visit),
        Expression::FunctionCall(call) => {
            for arg in &call.args {
                walk_expression(arg, visit);
            }
        }
    }
}

pub fn walk_result<'a, F>(result: &'a ExpressionResult, visit: &mut F)
where
    F: FnMut(&'a ExpressionResult),
{
    visit(result);
    match result {
        ExpressionResult::Constant(_) | ExpressionResult::Die(_) => {}
        ExpressionResult::Array(a) => {
            for element in &a.elements {
                walk_result(element, visit);
            }
        }
        ExpressionResult::Binary(b) => {
            walk_result(&b.left, visit);
            walk_result(&b.right, visit);
        }
        ExpressionResult::Unary(u) => walk_result(&u.operand, visit),
        ExpressionResult::Group(g) => walk_result(&g.inner, visit),
        ExpressionResult::FunctionCall(call) => {
            for arg in &call.args {
                walk_result(arg, visit);
            }
        }
    }
}

/// Side counts of every die an expression would roll, ascending.
///
/// Each `roll(count, die)` call contributes its die's side count `count`
/// times.
pub fn enumerate_dice(expr: &Expression) -> Vec<UInt> {
    let mut sides = Vec::new();
    walk_expression(expr, &mut |node| {
        if let Expression::FunctionCall(call) = node {
            if call.name != "roll" {
                return;
            }
            if let [Expression::Constant(count), Expression::Die(die)] = call.args.as_slice() {
                sides.extend(std::iter::repeat(die.sides()).take(*count as usize));
            }
        }
    });
    sides.sort_unstable();
    sides
}

/// One die roll extracted from a result tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DieRoll {
    pub sides: UInt,
    pub value: UInt,
}

/// Every individual roll outcome in a result tree, in roll order.
pub fn enumerate_die_roll_results(result: &ExpressionResult) -> Vec<DieRoll> {
    let mut rolls = Vec::new();
    walk_result(result, &mut |node| {
        let call = match node {
            ExpressionResult::FunctionCall(call) if call.name == "roll" => call,
            _ => return,
        };
        let die = call.args.get(1).and_then(|arg| arg.value().as_die());
        let outcomes = call.value().as_list();
        if let (Some(die), Some(outcomes)) = (die, outcomes) {
            for outcome in outcomes {
                if let Some(value) = outcome.as_number() {
                    rolls.push(DieRoll {
                        sides: die.sides(),
                        value: value as UInt,
                    });
                }
            }
        }
    });
    rolls
}
