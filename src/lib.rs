#![doc = include_str!("../README.md")]

#[macro_use]
extern crate static_assertions;

pub use self::{
    dialect::Capabilities,
    error::{Error, Result},
    exec::{Executor, execute},
    value::Value,
};

pub mod error;

mod dialect;
mod exec;
mod sql;
mod value;
