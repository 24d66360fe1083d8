pub mod builtins;
pub mod math;
pub mod stats;

use crate::error::{CalcError, Result};
use crate::token::{Arity, Callable, Scalar};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Constants and functions an expression may refer to by name.
///
/// Registering a name a second time replaces the earlier entry, so modules
/// loaded later override earlier ones.
#[derive(Debug, Clone, Default)]
pub struct NameTables {
    constants: HashMap<String, Scalar>,
    functions: HashMap<String, Arc<Callable>>,
}

impl NameTables {
    pub fn new(
        constants: HashMap<String, Scalar>,
        functions: HashMap<String, Arc<Callable>>,
    ) -> Self {
        Self {
            constants,
            functions,
        }
    }

    /// Builtins and `math`, followed by each named module in order.
    pub fn with_modules<I, S>(modules: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tables = Self::default();
        register_defaults(&mut tables);
        for module in modules {
            load_module(module.as_ref(), &mut tables)?;
        }
        Ok(tables)
    }

    pub fn register_constant(&mut self, name: &str, value: impl Into<Scalar>) {
        self.constants.insert(name.to_string(), value.into());
    }

    pub fn register_function<F>(&mut self, name: &str, arity: Arity, function: F)
    where
        F: Fn(&[Scalar]) -> Result<Scalar> + Send + Sync + 'static,
    {
        self.functions
            .insert(name.to_string(), Arc::new(Callable::new(name, arity, function)));
    }

    pub fn constant(&self, name: &str) -> Option<Scalar> {
        self.constants.get(name).copied()
    }

    pub fn function(&self, name: &str) -> Option<&Arc<Callable>> {
        self.functions.get(name)
    }
}

/// The modules every evaluation starts with.
pub fn register_defaults(tables: &mut NameTables) {
    builtins::register(tables);
    math::register(tables);
}

/// Registers the constants and functions of a built-in module.
pub fn load_module(name: &str, tables: &mut NameTables) -> Result<()> {
    debug!("Loading module: {name}");
    match name {
        "builtins" => builtins::register(tables),
        "math" => math::register(tables),
        "stats" => stats::register(tables),
        _ => return Err(CalcError::UnknownModule(name.to_string())),
    }
    Ok(())
}
