use crate::common::{NonZeroUInt, UInt};
use rand::Rng;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Supplies a uniformly distributed integer in `[1, sides]`.
///
/// Implemented for every [`rand::Rng`], so `ThreadRng` works out of the box
/// and a seeded `StdRng` gives deterministic replay of an expression's rolls.
pub trait RandomSource {
    fn random(&mut self, sides: NonZeroUInt) -> UInt;
}

impl<R: Rng> RandomSource for R {
    fn random(&mut self, sides: NonZeroUInt) -> UInt {
        self.gen_range(1..=sides.get())
    }
}

type SharedSource = Rc<RefCell<dyn RandomSource>>;

#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
#[error("a die must have at least one side")]
pub struct InvalidSides;

/// Binds one random source to every [`Die`] it creates.
#[derive(Clone)]
pub struct DiceBag {
    source: SharedSource,
}

impl DiceBag {
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self {
            source: Rc::new(RefCell::new(source)),
        }
    }

    /// Creates a die with `sides` sides. No die with fewer than one side
    /// can ever exist.
    pub fn d(&self, sides: UInt) -> Result<Die, InvalidSides> {
        NonZeroUInt::new(sides)
            .map(|sides| self.die(sides))
            .ok_or(InvalidSides)
    }

    pub fn die(&self, sides: NonZeroUInt) -> Die {
        Die {
            sides,
            source: Rc::clone(&self.source),
        }
    }
}

impl Default for DiceBag {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl fmt::Debug for DiceBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiceBag").finish_non_exhaustive()
    }
}

/// An immutable side count bound to its bag's random source.
#[derive(Clone)]
pub struct Die {
    sides: NonZeroUInt,
    source: SharedSource,
}

impl Die {
    pub fn sides(&self) -> UInt {
        self.sides.get()
    }

    /// Rolls the die. Each call queries the bound source anew, so repeated
    /// rolls of the same die may differ.
    ///
    /// # Panics
    ///
    /// Panics if the bound source returns a value outside `[1, sides]`;
    /// that is a broken [`RandomSource`] contract, never clamped.
    pub fn roll(&self) -> UInt {
        let value = self.source.borrow_mut().random(self.sides);
        assert!(
            (1..=self.sides.get()).contains(&value),
            "random source returned {} for a d{}",
            value,
            self.sides,
        );
        value
    }
}

impl PartialEq for Die {
    fn eq(&self, other: &Self) -> bool {
        self.sides == other.sides
    }
}

impl fmt::Debug for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Die")
            .field("sides", &self.sides)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides)
    }
}

#[cfg(test)]
pub(crate) use sources::{MaxSource, StepSource};

#[cfg(test)]
mod sources {
    use super::*;

    /// Yields `initial, initial + step, ...`, folded into `[1, sides]`.
    pub(crate) struct StepSource {
        current: UInt,
        step: UInt,
    }

    impl StepSource {
        pub fn new(initial: UInt, step: UInt) -> Self {
            Self {
                current: initial,
                step,
            }
        }
    }

    impl RandomSource for StepSource {
        fn random(&mut self, sides: NonZeroUInt) -> UInt {
            let ret = (self.current - 1) % sides.get() + 1;
            self.current += self.step;
            ret
        }
    }

    /// Always rolls the maximum face.
    pub(crate) struct MaxSource;

    impl RandomSource for MaxSource {
        fn random(&mut self, sides: NonZeroUInt) -> UInt {
            sides.get()
        }
    }
}
