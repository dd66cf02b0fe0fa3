use crate::dice::DiceBag;
use crate::functions::{self, Function, FunctionTable};

/// Everything the parser needs beyond the text itself: the bag that rolls
/// dice for this expression, and the user-defined function table.
#[derive(Debug, Clone, Default)]
pub struct Context {
    bag: DiceBag,
    functions: FunctionTable,
}

impl Context {
    pub fn new(bag: DiceBag, functions: FunctionTable) -> Self {
        Self { bag, functions }
    }

    pub fn bag(&self) -> &DiceBag {
        &self.bag
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut FunctionTable {
        &mut self.functions
    }

    /// User-defined names shadow built-ins of the same name.
    pub(crate) fn resolve_function(&self, name: &str) -> Option<Function> {
        self.functions
            .get(name)
            .cloned()
            .or_else(|| functions::builtin(name))
    }
}
