/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Everything above the matrix library: logging setup, configuration,
//! and the demo walkthrough behind the `lazymat-demo` binary.

#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;

mod logging;
mod config;
mod demo;
pub mod entry_points;

pub use crate::config::{Settings, Benchmark, YamlRead};
pub use crate::demo::run_demo;
pub use crate::logging::{GlobalLogger, ColorizedLevel};

pub type FailResult<T> = Result<T, failure::Error>;
