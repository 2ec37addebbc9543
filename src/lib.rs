//! # quire
//!
//! Assemble an ordered set of named text sections into a single EPUB file.
//!
//! ## Pipeline
//!
//! A build takes a [`Book`] through these stages:
//!
//! 1. [`Book::validate`] rejects empty books and unrepresentable text
//! 2. [`epub::content`] renders each section as an XHTML page
//! 3. [`epub::ncx`] writes the navigation map in section order
//! 4. [`epub::opf`] writes metadata, manifest and spine
//! 5. [`epub::container`] points readers at the package document
//! 6. [`epub::packager`] zips everything behind the stored `mimetype` marker
//! 7. a [`Deliver`] target saves the named [`Artifact`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use quire::{Book, Deliver, DirectoryTarget, EpubBuilder};
//!
//! let book = Book::new("My Book")
//!     .with_author("Author Name")
//!     .with_section("Intro", "Hello & welcome")
//!     .with_section("", "More text");
//!
//! let artifact = EpubBuilder::new().package(&book)?;
//! DirectoryTarget::new(".").deliver(&artifact)?;
//! # Ok::<(), quire::Error>(())
//! ```

pub mod book;
pub mod build;
pub mod config;
pub mod deliver;
pub mod epub;
pub mod error;
pub mod markup;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use book::{Book, Section};
pub use build::{Artifact, BuildStamp, EpubBuilder};
pub use config::{BodyPolicy, EpubConfig};
pub use deliver::{Deliver, DirectoryTarget, suggested_file_name};
pub use epub::GeneratedDocument;
pub use error::{Error, Result};
