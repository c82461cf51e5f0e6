//! specdiff - pnpmfile hook inspection library
//!
//! This library compares the dependency specification a package declares
//! with the one pnpm sees after the pnpmfile `readPackage` hook ran:
//! - `compare`: the pure spec comparator
//! - `inspector`: fetches both manifests and the hook text, then compares
//! - `view` and `output`: annotated rows for text and JSON output

pub mod cli;
pub mod compare;
pub mod domain;
pub mod error;
pub mod inspector;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod source;
pub mod view;
