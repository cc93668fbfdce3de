//! CLI command implementations.

mod build;
mod copy;
mod demo;
mod posts;

pub(crate) use build::BuildArgs;
pub(crate) use copy::CopyArgs;
pub(crate) use demo::DemoArgs;
pub(crate) use posts::PostsArgs;
