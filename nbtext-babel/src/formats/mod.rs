//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the Notebook model and its text representations.

pub mod common;
pub mod ipynb;
pub mod pyscript;
pub mod rmd;
pub mod rscript;

pub use ipynb::IpynbFormat;
pub use pyscript::PyScriptFormat;
pub use rmd::RmdFormat;
pub use rscript::RScriptFormat;
