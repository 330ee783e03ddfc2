use std::path::{Path, PathBuf};

use eyre::Result;

/// Header placed at the top of every generated source file.
pub const GENERATED_HEADER: &str = "// This file is generated by daogen. Do not edit by hand.";

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the output directory
    fn relative_path(&self) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    /// Render the file content (without header)
    fn render(&self) -> String;

    /// Render the file content, prefixed with the header from the rules
    fn render_with_header(&self) -> String {
        let content = self.render();
        match self.rules().header {
            Some(header) => format!("{}\n\n{}", header, content),
            None => content,
        }
    }

    /// Write the file below `base`
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = base.join(self.relative_path());
        let rules = self.rules();

        match rules.overwrite {
            Overwrite::Always => {
                write_file(&path, &self.render_with_header())?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if path.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&path, &self.render_with_header())?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// A rendered file ready to be written, with a path relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: always overwrite)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules.
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Get the relative file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl GeneratedFile for File {
    fn relative_path(&self) -> PathBuf {
        self.path.clone()
    }

    fn rules(&self) -> FileRules {
        self.rules.clone()
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
    pub header: Option<&'static str>,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    Always,
    /// Only create if file doesn't exist (user-owned stubs)
    IfMissing,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::Always,
            header: None,
        }
    }
}

impl FileRules {
    /// Rules for fully generated sources: always overwrite, with the generated header.
    pub fn generated() -> Self {
        Self {
            overwrite: Overwrite::Always,
            header: Some(GENERATED_HEADER),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.rs");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("mod.rs"), "original").unwrap();

        let file = File::new("mod.rs", "updated");
        let result = file.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("mod.rs")).unwrap(),
            "updated"
        );
    }

    #[test]
    fn test_file_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("existing.rs"), "original").unwrap();

        let file = File::new("existing.rs", "should not write").with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
            header: None,
        });
        let result = file.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(
            fs::read_to_string(temp.path().join("existing.rs")).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_generated_rules_prepend_header() {
        let file = File::new("tables/mod.rs", "pub mod something;\n")
            .with_rules(FileRules::generated());

        let rendered = file.render_with_header();
        assert!(rendered.starts_with(GENERATED_HEADER));
        assert!(rendered.ends_with("pub mod something;\n"));
    }
}
