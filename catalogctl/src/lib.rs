//! Library interface for the `catalogctl` command-line tool.
//!
//! The binary is a thin shell over these modules: [`cli`] defines the
//! arguments, [`config`] merges them with the configuration file and the
//! environment, and [`commands`] drives a [`locale_catalog::Locale`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
