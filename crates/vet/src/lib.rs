// cmpvet checks
//
// Type checks a parsed program and runs the registered vet rules over it.

pub mod constant;
pub mod diagnostic;
pub mod error;
pub mod error_report;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod typeck;
pub mod types;

pub use diagnostic::{Diagnostic, Position};
pub use error::{TypeError, VetError, VetResult};
pub use registry::Registry;
pub use rule::{NodeKind, Pass, Rule};
pub use types::{BasicKind, Type, TypeTable};

use log::debug;
use parser::ParseFailure;
use parser::ast::Program;

/// Everything vetting one program produced
#[derive(Debug, Clone, Default)]
pub struct VetReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Problems the type checker worked around
    pub type_errors: Vec<TypeError>,
}

/// Type check `program` and run every rule in `registry` over it
pub fn vet_program(program: &Program, registry: &Registry) -> VetReport {
    let info = typeck::check_program(program);
    for error in &info.errors {
        debug!("type error at {:?}: {}", error.span(), error);
    }

    VetReport {
        diagnostics: registry.run(program, &info.types),
        type_errors: info.errors,
    }
}

/// Parse and vet a source string
pub fn vet_source(source: &str, registry: &Registry) -> Result<VetReport, ParseFailure> {
    let program = parser::parse(source)?;
    Ok(vet_program(&program, registry))
}

#[cfg(test)]
mod tests;
