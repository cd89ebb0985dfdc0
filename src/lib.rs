//! Bookstore Application Library
//!
//! This library provides the catalog and favorites modules mounted by
//! the bookstore server.

pub mod modules;
