use crate::common::Float;
use crate::dice::Die;
use crate::eval::EvalError;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type FnResult = Result<Value, EvalError>;

/// A callable bound into a [`FunctionCall`](crate::Expression) node at
/// parse time. Built-ins are plain functions; user functions may be any
/// closure over `&[Value]`.
#[derive(Clone)]
pub struct Function(Rc<dyn Fn(&[Value]) -> FnResult>);

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> FnResult + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> FnResult {
        (self.0)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function(..)")
    }
}

/// User-defined functions, keyed by the name they are called with.
/// Entries shadow built-ins of the same name.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    map: HashMap<String, Function>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, function: Function) {
        self.map.insert(name.into(), function);
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.map.get(name)
    }
}

/// Looks up a built-in by its dice-notation name.
pub(crate) fn builtin(name: &str) -> Option<Function> {
    let f: fn(&[Value]) -> FnResult = match name {
        "ceil" => ceil,
        "floor" => floor,
        "round" => round,
        "trunc" => trunc,
        "roll" => roll,
        "sum" => sum,
        "cloneHighestRolls" => clone_highest_rolls,
        "cloneLowestRolls" => clone_lowest_rolls,
        "dropHighestRolls" => drop_highest_rolls,
        "dropLowestRolls" => drop_lowest_rolls,
        _ => return None,
    };
    Some(Function::new(f))
}

fn expect_args(name: &'static str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::WrongArgumentCount {
            name,
            expected,
            got: args.len(),
        })
    }
}

fn number_arg(name: &'static str, args: &[Value], index: usize) -> Result<Float, EvalError> {
    args[index]
        .as_number()
        .ok_or(EvalError::ExpectedNumber { name, index })
}

fn die_arg<'a>(name: &'static str, args: &'a [Value], index: usize) -> Result<&'a Die, EvalError> {
    args[index]
        .as_die()
        .ok_or(EvalError::ExpectedDie { name, index })
}

fn rolls_arg(name: &'static str, args: &[Value], index: usize) -> Result<Vec<Float>, EvalError> {
    args[index]
        .as_list()
        .and_then(|values| {
            values
                .iter()
                .map(Value::as_number)
                .collect::<Option<Vec<_>>>()
        })
        .ok_or(EvalError::ExpectedRolls { name, index })
}

macro_rules! rounding_fn {
    ($fn_name:ident, $name:literal) => {
        fn $fn_name(args: &[Value]) -> FnResult {
            expect_args($name, args, 1)?;
            let x = number_arg($name, args, 0)?;
            Ok(Value::Number(x.$fn_name()))
        }
    };
}

rounding_fn!(ceil, "ceil");
rounding_fn!(floor, "floor");
rounding_fn!(round, "round");
rounding_fn!(trunc, "trunc");

/// `roll(count, die)`: `count` individual rolls of `die`, in roll order.
fn roll(args: &[Value]) -> FnResult {
    expect_args("roll", args, 2)?;
    let count = number_arg("roll", args, 0)?;
    let die = die_arg("roll", args, 1)?;
    // the comparison is written to also reject NaN
    if !(count >= 1.0) {
        return Err(EvalError::NonPositiveCount {
            name: "roll",
            got: count,
        });
    }
    let rolls = (0..count as usize)
        .map(|_| Value::Number(die.roll() as Float))
        .collect();
    Ok(Value::List(rolls))
}

fn sum(args: &[Value]) -> FnResult {
    expect_args("sum", args, 1)?;
    let rolls = rolls_arg("sum", args, 0)?;
    if rolls.is_empty() {
        return Err(EvalError::EmptyRolls { name: "sum" });
    }
    Ok(Value::Number(rolls.iter().sum()))
}

#[derive(Debug, Copy, Clone)]
enum Extreme {
    Highest,
    Lowest,
}

/// Index of the extreme value, chosen by a strict left-to-right scan so the
/// earliest occurrence always wins ties.
fn select_extreme(rolls: &[Float], extreme: Extreme) -> Option<usize> {
    let mut best: Option<(usize, Float)> = None;
    for (i, &v) in rolls.iter().enumerate() {
        let better = match best {
            None => true,
            Some((_, b)) => match extreme {
                Extreme::Highest => v > b,
                Extreme::Lowest => v < b,
            },
        };
        if better {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

fn modifier_count(name: &'static str, args: &[Value]) -> Result<usize, EvalError> {
    let count = number_arg(name, args, 1)?;
    if !(count >= 0.0) {
        return Err(EvalError::NegativeCount { name, got: count });
    }
    Ok(count as usize)
}

fn clone_extreme_rolls(name: &'static str, args: &[Value], extreme: Extreme) -> FnResult {
    expect_args(name, args, 2)?;
    let rolls = rolls_arg(name, args, 0)?;
    let count = modifier_count(name, args)?;

    // each pass clones the extreme remaining in the working copy, then
    // removes it, so repeated extremes are cloned once per occurrence
    let mut working = rolls.clone();
    let mut out = rolls;
    for _ in 0..count {
        match select_extreme(&working, extreme) {
            Some(i) => out.push(working.remove(i)),
            None => break,
        }
    }
    Ok(Value::List(out.into_iter().map(Value::Number).collect()))
}

fn drop_extreme_rolls(name: &'static str, args: &[Value], extreme: Extreme) -> FnResult {
    expect_args(name, args, 2)?;
    let mut working = rolls_arg(name, args, 0)?;
    let count = modifier_count(name, args)?;

    for _ in 0..count {
        match select_extreme(&working, extreme) {
            Some(i) => {
                working.remove(i);
            }
            None => break,
        }
    }
    Ok(Value::List(working.into_iter().map(Value::Number).collect()))
}

fn clone_highest_rolls(args: &[Value]) -> FnResult {
    clone_extreme_rolls("cloneHighestRolls", args, Extreme::Highest)
}

fn clone_lowest_rolls(args: &[Value]) -> FnResult {
    clone_extreme_rolls("cloneLowestRolls", args, Extreme::Lowest)
}

fn drop_highest_rolls(args: &[Value]) -> FnResult {
    drop_extreme_rolls("dropHighestRolls", args, Extreme::Highest)
}

fn drop_lowest_rolls(args: &[Value]) -> FnResult {
    drop_extreme_rolls("dropLowestRolls", args, Extreme::Lowest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{DiceBag, StepSource};
    use proptest::prelude::*;

    fn rolls(xs: &[i32]) -> Value {
        Value::List(xs.iter().map(|&x| Value::Number(x as Float)).collect())
    }

    fn check(actual: FnResult, expected: &[i32]) {
        assert_eq!(actual.unwrap(), rolls(expected));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(ceil(&[Value::Number(1.2)]), Ok(Value::Number(2.0)));
        assert_eq!(floor(&[Value::Number(1.8)]), Ok(Value::Number(1.0)));
        assert_eq!(round(&[Value::Number(1.5)]), Ok(Value::Number(2.0)));
        assert_eq!(trunc(&[Value::Number(-1.8)]), Ok(Value::Number(-1.0)));
        assert_eq!(
            ceil(&[rolls(&[1])]),
            Err(EvalError::ExpectedNumber {
                name: "ceil",
                index: 0
            })
        );
    }

    #[test]
    fn test_roll() {
        let bag = DiceBag::new(StepSource::new(1, 1));
        let die = Value::Die(bag.d(3).unwrap());
        check(roll(&[Value::Number(4.0), die.clone()]), &[1, 2, 3, 1]);

        assert_eq!(
            roll(&[Value::Number(0.0), die.clone()]),
            Err(EvalError::NonPositiveCount {
                name: "roll",
                got: 0.0
            })
        );
        assert_eq!(
            roll(&[Value::Number(1.0), Value::Number(6.0)]),
            Err(EvalError::ExpectedDie {
                name: "roll",
                index: 1
            })
        );
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&[rolls(&[1, 2, 3, 1])]), Ok(Value::Number(7.0)));
        assert_eq!(
            sum(&[rolls(&[])]),
            Err(EvalError::EmptyRolls { name: "sum" })
        );
        assert_eq!(
            sum(&[Value::Number(3.0)]),
            Err(EvalError::ExpectedRolls {
                name: "sum",
                index: 0
            })
        );
        assert_eq!(
            sum(&[]),
            Err(EvalError::WrongArgumentCount {
                name: "sum",
                expected: 1,
                got: 0
            })
        );
    }

    #[test]
    fn test_clone_rolls() {
        check(clone_highest_rolls(&[rolls(&[2, 1, 3]), Value::Number(1.0)]), &[2, 1, 3, 3]);
        check(clone_highest_rolls(&[rolls(&[2, 1, 3]), Value::Number(2.0)]), &[2, 1, 3, 3, 2]);
        check(clone_lowest_rolls(&[rolls(&[2, 1, 3]), Value::Number(1.0)]), &[2, 1, 3, 1]);
        // more clones requested than rolls available: stops early
        check(clone_highest_rolls(&[rolls(&[5]), Value::Number(3.0)]), &[5, 5]);
    }

    #[test]
    fn test_drop_rolls() {
        check(drop_highest_rolls(&[rolls(&[3, 3, 1, 3]), Value::Number(2.0)]), &[1, 3]);
        check(drop_lowest_rolls(&[rolls(&[2, 1, 1]), Value::Number(2.0)]), &[2]);
        check(drop_highest_rolls(&[rolls(&[1, 2]), Value::Number(5.0)]), &[]);
    }

    #[test]
    fn test_ties_resolve_to_earliest_index() {
        check(drop_lowest_rolls(&[rolls(&[2, 1, 1, 2]), Value::Number(3.0)]), &[2]);
        check(clone_highest_rolls(&[rolls(&[4, 4, 4]), Value::Number(2.0)]), &[4, 4, 4, 4, 4]);
    }

    #[test]
    fn test_zero_count_is_noop() {
        check(clone_highest_rolls(&[rolls(&[3, 1]), Value::Number(0.0)]), &[3, 1]);
        check(drop_lowest_rolls(&[rolls(&[3, 1]), Value::Number(0.0)]), &[3, 1]);
        assert_eq!(
            drop_lowest_rolls(&[rolls(&[3, 1]), Value::Number(-1.0)]),
            Err(EvalError::NegativeCount {
                name: "dropLowestRolls",
                got: -1.0
            })
        );
    }

    fn as_floats(value: Value) -> Vec<Float> {
        match value {
            Value::List(values) => values
                .into_iter()
                .map(|v| v.as_number().unwrap())
                .collect(),
            other => panic!("expected a list, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_drop_shrinks_by_count(xs in prop::collection::vec(0u8..100, 0..20), count in 0usize..30) {
            let input = rolls(&xs.iter().map(|&x| x as i32).collect::<Vec<_>>());
            let out = as_floats(drop_highest_rolls(&[input, Value::Number(count as Float)]).unwrap());
            prop_assert_eq!(out.len(), xs.len().saturating_sub(count));

            // surviving rolls are a sub-multiset of the input
            let mut pool: Vec<Float> = xs.iter().map(|&x| x as Float).collect();
            for v in &out {
                let at = pool.iter().position(|p| p == v);
                prop_assert!(at.is_some());
                pool.remove(at.unwrap());
            }
        }

        #[test]
        fn prop_clone_preserves_input_prefix(xs in prop::collection::vec(0u8..100, 0..20), count in 0usize..30) {
            let expected: Vec<Float> = xs.iter().map(|&x| x as Float).collect();
            let input = rolls(&xs.iter().map(|&x| x as i32).collect::<Vec<_>>());
            let out = as_floats(clone_lowest_rolls(&[input, Value::Number(count as Float)]).unwrap());
            prop_assert_eq!(out.len(), xs.len() + count.min(xs.len()));
            prop_assert_eq!(&out[..xs.len()], &expected[..]);
        }
    }
}
