use crate::error::{GenError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Adapter over `syn` turning source files into syntax trees.
///
/// The parser keeps comments that matter to the generator: `///` and `/** */` doc
/// comments are attached to their item as `#[doc = "..."]` attributes.
///
/// # Example
///
/// ```no_run
/// use routegen::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("src/api/users.rs")).unwrap();
/// println!("Parsed {} items", parsed.syntax_tree.items.len());
/// ```
pub struct AstParser;

/// A successfully parsed Rust file with its syntax tree.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// The parsed syntax tree
    pub syntax_tree: syn::File,
}

impl AstParser {
    /// Parses a single Rust source file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid Rust syntax
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;

        let syntax_tree = syn::parse_file(&content).map_err(|e| GenError::Parse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(ParsedFile {
            path: path.to_path_buf(),
            syntax_tree,
        })
    }

    /// Parses files in order, stopping at the first one that fails.
    ///
    /// A tree with a broken file cannot produce a trustworthy route table, so there
    /// is no partial result.
    pub fn parse_files(paths: &[PathBuf]) -> Result<Vec<ParsedFile>> {
        debug!("Parsing {} files", paths.len());

        paths.iter().map(|path| Self::parse_file(path)).collect()
    }
}
