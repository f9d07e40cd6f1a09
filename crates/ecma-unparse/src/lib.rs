//! ECMAScript 2017 code generation.
//!
//! Turns a Shift-format AST back into source text that parses to the same
//! tree. [`codegen`] renders compactly; [`codegen_with`] takes
//! [`CodegenOptions`] for pretty printing, web-safe escaping and numeric
//! literal policy.
//!
//! ```ignore
//! let program = Program::from_json(&json)?;
//! let source = ecma_unparse::codegen(&program);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::too_many_arguments)]

pub mod ast;
pub mod code_rep;
pub mod codegen;
pub mod d2a;
pub mod literal;
pub mod monoidal;
pub mod operators;
pub mod reducer;
pub mod token_stream;
pub mod version;

pub use ast::Program;
pub use code_rep::{CodeRep, Flags, RepKind};
pub use codegen::{codegen, codegen_expression, codegen_with, Codegen, CodegenError, CodegenOptions};
pub use d2a::{d2a, short_d2a};
pub use monoidal::{Monoid, Monoidal, MonoidalReducer};
pub use operators::Precedence;
pub use reducer::{fold_program, Reducer};
pub use token_stream::TokenStream;
pub use version::VERSION;
