//! Build orchestration: book model in, named EPUB artifact out.
//!
//! # Example
//!
//! ```
//! use quire::{Book, EpubBuilder};
//!
//! let book = Book::new("My Book")
//!     .with_author("Me")
//!     .with_section("Intro", "Hello & welcome");
//!
//! let artifact = EpubBuilder::new().package(&book)?;
//! assert_eq!(artifact.file_name, "My Book.epub");
//! # Ok::<(), quire::Error>(())
//! ```

pub mod ident;

use crate::book::Book;
use crate::config::{DEFAULT_COMPRESSION_LEVEL, EpubConfig};
use crate::deliver::suggested_file_name;
use crate::epub::opf::PackageMetadata;
use crate::epub::{GeneratedDocument, OPF_PATH, container, content, ncx, opf, packager};
use crate::error::Result;

pub use ident::BuildStamp;

/// A finished EPUB, ready to hand to a [`Deliver`](crate::Deliver) target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name, derived from the book title.
    pub file_name: String,
    /// Book identifier embedded in this archive.
    pub identifier: String,
    pub bytes: Vec<u8>,
}

/// Turns a [`Book`] into an EPUB archive.
#[derive(Debug, Clone, Default)]
pub struct EpubBuilder {
    config: EpubConfig,
}

impl EpubBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the builder with custom settings.
    pub fn with_config(mut self, config: EpubConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EpubConfig {
        &self.config
    }

    /// Validate, generate and package `book` on the current thread.
    ///
    /// Validation happens before any document is generated; nothing is
    /// returned unless the whole archive was written.
    #[tracing::instrument(skip_all, fields(sections = book.sections.len()))]
    pub fn package(&self, book: &Book) -> Result<Artifact> {
        book.validate()?;
        content::check_bodies(book, self.config.body_policy)?;

        let stamp = BuildStamp::mint(&self.config);
        let documents = self.documents(book, &stamp)?;
        let level = self
            .config
            .compression_level
            .unwrap_or(DEFAULT_COMPRESSION_LEVEL);
        let bytes = packager::package(&documents, level)?;

        let artifact = Artifact {
            file_name: suggested_file_name(&book.title),
            identifier: stamp.identifier,
            bytes,
        };
        tracing::info!(
            file_name = %artifact.file_name,
            identifier = %artifact.identifier,
            bytes = artifact.bytes.len(),
            "packaged book"
        );
        Ok(artifact)
    }

    /// Generate every document of the archive, in archive order: container,
    /// package document, navigation document, then one page per section.
    ///
    /// Does not validate `book`; see [`EpubBuilder::package`].
    pub fn documents(&self, book: &Book, stamp: &BuildStamp) -> Result<Vec<GeneratedDocument>> {
        let pages = content::render_all(book, &self.config);

        let points = ncx::nav_points(&book.sections, &pages);
        let ncx = ncx::generate(&book.title, &stamp.identifier, &points);

        let metadata = PackageMetadata {
            identifier: &stamp.identifier,
            modified: &stamp.modified,
            language: &self.config.language,
            title: &book.title,
            author: &book.author,
        };
        let opf = opf::generate(&metadata, &pages, &ncx)?;

        let mut documents = Vec::with_capacity(pages.len() + 3);
        documents.push(container::generate(OPF_PATH));
        documents.push(opf);
        documents.push(ncx);
        documents.extend(pages);
        Ok(documents)
    }

    /// Package `book` off the calling thread.
    ///
    /// The book is snapshotted when this is called, so later edits do not
    /// affect the build. The returned future resolves once with the artifact
    /// or the error, and must be polled inside a Tokio runtime.
    #[cfg(feature = "async")]
    pub fn build(
        &self,
        book: &Book,
    ) -> impl std::future::Future<Output = Result<Artifact>> + Send + 'static {
        let book = book.clone();
        let builder = self.clone();

        async move {
            let result = tokio::task::spawn_blocking(move || builder.package(&book))
                .await
                .map_err(|e| crate::Error::BuildTask(e.to_string()))
                .and_then(|r| r);
            if let Err(ref e) = result {
                tracing::warn!(error = %e, "build failed");
            }
            result
        }
    }
}
