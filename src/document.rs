//! Config document loading, mutation and serialization
//!
//! This module owns the in-memory representation of a `NuGet.config` file: an
//! ordered XML tree with a single `<configuration>` root and up to three
//! well-known sections (`packageSources`, `packageSourceCredentials`,
//! `packageSourceMapping`). Sections are created lazily on first write and
//! persist thereafter.
//!
//! The mutation operations mirror what the package manager itself understands:
//!
//! - Source entries (`<add key value/>`) are appended in call order. Keys are
//!   never deduplicated; lookups resolve collisions by first match in
//!   document order.
//! - Credential entries replace the whole per-source element on every write.
//! - Mapping patterns accumulate under a per-source element that is found or
//!   created by key.
//!
//! Serialization always fully rewrites the target file with stable 2-space
//! indentation, creating missing parent directories first.

use std::fs;
use std::path::Path;

use xot::output::xml::Parameters;
use xot::{Node, Xot};

use crate::error::{Error, Result};

/// Root element name; anything else in an existing file is a parse error.
const ROOT_ELEMENT: &str = "configuration";

const PACKAGE_SOURCES: &str = "packageSources";
const PACKAGE_SOURCE_CREDENTIALS: &str = "packageSourceCredentials";
const PACKAGE_SOURCE_MAPPING: &str = "packageSourceMapping";

const EMPTY_DOCUMENT: &str = "<configuration/>";

/// A (key, URL) pair registered under `packageSources`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Human identifier of the source, unique by convention only.
    pub key: String,
    /// Remote feed URL.
    pub url: String,
}

/// An owned, order-preserving config document.
///
/// The document is held exclusively by the operation editing it; there are no
/// concurrent holders within a process. Loading and saving are full-file
/// operations, so a failed invocation leaves the previous on-disk state
/// untouched.
#[derive(Debug)]
pub struct ConfigDocument {
    xot: Xot,
    document: Node,
    configuration: Node,
}

impl ConfigDocument {
    /// Create an empty document containing only the `<configuration>` root.
    pub fn empty() -> Self {
        Self::from_xml(Path::new(""), EMPTY_DOCUMENT).expect("empty document template parses")
    }

    /// Parse a document from XML text, attributing errors to `path`.
    pub fn from_xml(path: &Path, xml: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let document = xot.parse(xml).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let configuration = xot.document_element(document).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let root_name = xot.add_name(ROOT_ELEMENT);
        let is_configuration = xot
            .element(configuration)
            .is_some_and(|element| element.name() == root_name);
        if !is_configuration {
            return Err(Error::Parse {
                path: path.to_path_buf(),
                message: format!("root element is not <{}>", ROOT_ELEMENT),
            });
        }

        Ok(Self {
            xot,
            document,
            configuration,
        })
    }

    /// Load the document at `path`.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` when the file does not exist
    /// - `Error::Io` for any other read failure
    /// - `Error::Parse` for malformed XML or an unexpected root element
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Self::from_xml(path, &content)
    }

    /// Load the document at `path`, or synthesize an empty one when the file
    /// does not exist. The flag reports whether the file was there.
    pub fn load_or_empty(path: &Path) -> Result<(Self, bool)> {
        match Self::load(path) {
            Ok(document) => Ok((document, true)),
            Err(error) if error.is_not_found() => Ok((Self::empty(), false)),
            Err(error) => Err(error),
        }
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_xml(&mut self) -> Result<String> {
        let mut xml = self
            .xot
            .serialize_xml_string(
                Parameters {
                    indentation: Some(Default::default()),
                    ..Default::default()
                },
                self.document,
            )
            .map_err(|e| Error::Document {
                message: e.to_string(),
            })?;

        if !xml.ends_with('\n') {
            xml.push('\n');
        }
        Ok(xml)
    }

    /// Write the document to `path`, creating missing parent directories.
    ///
    /// The target file is always fully rewritten; there are no partial or
    /// append writes.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let xml = self.to_xml()?;
        fs::write(path, xml).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Append a source entry under `packageSources`.
    ///
    /// No duplicate check: adding the same key twice leaves two entries
    /// sharing that key, and lookups resolve to the first in document order.
    pub fn add_source(&mut self, name: &str, url: &str) -> Result<()> {
        let sources = self.section_mut(PACKAGE_SOURCES)?;
        let entry = self.new_add_entry(name, url);
        self.append(sources, entry)
    }

    /// Replace the credentials stored for `name`.
    ///
    /// The per-source element is found or created, then its previous content
    /// is discarded entirely and exactly two entries are written: `Username`
    /// followed by `ClearTextPassword`. The password is stored in clear text,
    /// matching the format the package manager reads.
    pub fn set_credentials(&mut self, name: &str, username: &str, password: &str) -> Result<()> {
        let credentials = self.section_mut(PACKAGE_SOURCE_CREDENTIALS)?;

        let holder = match self.child_element_named(credentials, name) {
            Some(existing) => existing,
            None => {
                let name_id = self.xot.add_name(name);
                let element = self.xot.new_element(name_id);
                self.append(credentials, element)?;
                element
            }
        };

        self.clear_children(holder)?;

        let username_entry = self.new_add_entry("Username", username);
        self.append(holder, username_entry)?;
        let password_entry = self.new_add_entry("ClearTextPassword", password);
        self.append(holder, password_entry)
    }

    /// Append a mapping pattern for `name` under `packageSourceMapping`.
    ///
    /// The `<packageSource>` element for the key is found or created; patterns
    /// accumulate in call order and are never deduplicated.
    pub fn add_mapping(&mut self, name: &str, pattern: &str) -> Result<()> {
        let mappings = self.section_mut(PACKAGE_SOURCE_MAPPING)?;

        let source = match self.mapping_element(mappings, name) {
            Some(existing) => existing,
            None => {
                let name_id = self.xot.add_name("packageSource");
                let element = self.xot.new_element(name_id);
                self.set_attribute(element, "key", name);
                self.append(mappings, element)?;
                element
            }
        };

        let name_id = self.xot.add_name("package");
        let entry = self.xot.new_element(name_id);
        self.set_attribute(entry, "pattern", pattern);
        self.append(source, entry)
    }

    /// All source entries in document order.
    ///
    /// Entries missing the `key` or `value` attribute are skipped; a missing
    /// `packageSources` section yields an empty list.
    pub fn sources(&self) -> Vec<SourceEntry> {
        let Some(sources) = self.section(PACKAGE_SOURCES) else {
            return Vec::new();
        };

        self.child_elements_named(sources, "add")
            .into_iter()
            .filter_map(|entry| {
                let key = self.attribute(entry, "key")?;
                let url = self.attribute(entry, "value")?;
                Some(SourceEntry { key, url })
            })
            .collect()
    }

    // Tree helpers

    /// Find a top-level section by name.
    fn section(&self, name: &str) -> Option<Node> {
        self.child_element_named(self.configuration, name)
    }

    /// Find a top-level section by name, creating it if it does not exist.
    fn section_mut(&mut self, name: &str) -> Result<Node> {
        if let Some(existing) = self.section(name) {
            return Ok(existing);
        }

        let name_id = self.xot.add_name(name);
        let element = self.xot.new_element(name_id);
        self.append(self.configuration, element)?;
        Ok(element)
    }

    /// First child element of `parent` with the given tag name.
    fn child_element_named(&self, parent: Node, name: &str) -> Option<Node> {
        let name_id = self.xot.name(name)?;
        self.xot.children(parent).find(|&child| {
            self.xot
                .element(child)
                .is_some_and(|element| element.name() == name_id)
        })
    }

    /// All child elements of `parent` with the given tag name, in order.
    fn child_elements_named(&self, parent: Node, name: &str) -> Vec<Node> {
        let Some(name_id) = self.xot.name(name) else {
            return Vec::new();
        };
        self.xot
            .children(parent)
            .filter(|&child| {
                self.xot
                    .element(child)
                    .is_some_and(|element| element.name() == name_id)
            })
            .collect()
    }

    /// The `<packageSource>` child of `parent` whose `key` attribute equals
    /// `name`.
    fn mapping_element(&self, parent: Node, name: &str) -> Option<Node> {
        self.child_elements_named(parent, "packageSource")
            .into_iter()
            .find(|&child| self.attribute(child, "key").as_deref() == Some(name))
    }

    /// Build an `<add key="..." value="..."/>` entry, attributes in that
    /// order.
    fn new_add_entry(&mut self, key: &str, value: &str) -> Node {
        let name_id = self.xot.add_name("add");
        let entry = self.xot.new_element(name_id);
        self.set_attribute(entry, "key", key);
        self.set_attribute(entry, "value", value);
        entry
    }

    fn attribute(&self, node: Node, name: &str) -> Option<String> {
        let name_id = self.xot.name(name)?;
        self.xot
            .attributes(node)
            .get(name_id)
            .map(|value| value.to_string())
    }

    fn set_attribute(&mut self, node: Node, name: &str, value: &str) {
        let name_id = self.xot.add_name(name);
        self.xot.attributes_mut(node).insert(name_id, value.to_string());
    }

    fn append(&mut self, parent: Node, child: Node) -> Result<()> {
        self.xot.append(parent, child).map_err(|e| Error::Document {
            message: e.to_string(),
        })
    }

    /// Remove every child of `node`, text nodes included.
    fn clear_children(&mut self, node: Node) -> Result<()> {
        let children: Vec<Node> = self.xot.children(node).collect();
        for child in children {
            self.xot.remove(child).map_err(|e| Error::Document {
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(xml: &str) -> ConfigDocument {
        ConfigDocument::from_xml(Path::new("test.config"), xml).unwrap()
    }

    mod structure_tests {
        use super::*;

        #[test]
        fn test_empty_document_serializes_to_bare_root() {
            let mut doc = ConfigDocument::empty();
            assert_eq!(doc.to_xml().unwrap(), "<configuration/>\n");
        }

        #[test]
        fn test_sections_created_lazily() {
            let mut doc = ConfigDocument::empty();
            doc.add_source("feed", "https://feed.example.com/v3/index.json")
                .unwrap();

            let xml = doc.to_xml().unwrap();
            assert!(xml.contains("<packageSources>"));
            assert!(!xml.contains("packageSourceCredentials"));
            assert!(!xml.contains("packageSourceMapping"));
        }

        #[test]
        fn test_section_reused_on_second_write() {
            let mut doc = ConfigDocument::empty();
            doc.add_source("a", "https://a.example.com").unwrap();
            doc.add_source("b", "https://b.example.com").unwrap();

            let xml = doc.to_xml().unwrap();
            assert_eq!(xml.matches("<packageSources>").count(), 1);
        }

        #[test]
        fn test_two_space_indentation() {
            let mut doc = ConfigDocument::empty();
            doc.add_source("feed", "https://feed.example.com").unwrap();

            let xml = doc.to_xml().unwrap();
            assert!(xml.contains("\n  <packageSources>"));
            assert!(xml.contains("\n    <add "));
        }

        #[test]
        fn test_attribute_order_key_then_value() {
            let mut doc = ConfigDocument::empty();
            doc.add_source("feed", "https://feed.example.com").unwrap();

            let xml = doc.to_xml().unwrap();
            assert!(xml.contains(r#"<add key="feed" value="https://feed.example.com"/>"#));
        }

        #[test]
        fn test_round_trip_preserves_tree() {
            let mut doc = ConfigDocument::empty();
            doc.add_source("first", "https://first.example.com").unwrap();
            doc.add_source("second", "https://second.example.com").unwrap();
            doc.set_credentials("first", "user", "secret").unwrap();
            doc.add_mapping("second", "Contoso.*").unwrap();

            let first_pass = doc.to_xml().unwrap();
            let mut reloaded = parse(&first_pass);
            let second_pass = reloaded.to_xml().unwrap();
            assert_eq!(first_pass, second_pass);
        }
    }

    mod source_tests {
        use super::*;

        #[test]
        fn test_add_source_appends_after_existing() {
            let mut doc = parse(
                r#"<configuration>
  <packageSources>
    <add key="existing" value="https://old.example.com"/>
  </packageSources>
</configuration>"#,
            );
            doc.add_source("new", "https://new.example.com").unwrap();

            let sources = doc.sources();
            assert_eq!(sources.len(), 2);
            assert_eq!(sources[0].key, "existing");
            assert_eq!(sources[1].key, "new");
            assert_eq!(sources[1].url, "https://new.example.com");
        }

        #[test]
        fn test_duplicate_keys_accumulate() {
            let mut doc = ConfigDocument::empty();
            doc.add_source("feed", "https://one.example.com").unwrap();
            doc.add_source("feed", "https://two.example.com").unwrap();

            let sources = doc.sources();
            assert_eq!(sources.len(), 2);
            assert_eq!(sources[0].url, "https://one.example.com");
            assert_eq!(sources[1].url, "https://two.example.com");
        }

        #[test]
        fn test_sources_empty_without_section() {
            let doc = parse("<configuration/>");
            assert!(doc.sources().is_empty());
        }

        #[test]
        fn test_sources_skip_entries_missing_attributes() {
            let doc = parse(
                r#"<configuration>
  <packageSources>
    <add key="orphan"/>
    <add key="full" value="https://full.example.com"/>
    <clear/>
  </packageSources>
</configuration>"#,
            );

            let sources = doc.sources();
            assert_eq!(sources.len(), 1);
            assert_eq!(sources[0].key, "full");
        }
    }

    mod credential_tests {
        use super::*;

        #[test]
        fn test_set_credentials_writes_username_then_password() {
            let mut doc = ConfigDocument::empty();
            doc.set_credentials("feed", "alice", "hunter2").unwrap();

            let xml = doc.to_xml().unwrap();
            assert!(xml.contains("<packageSourceCredentials>"));
            assert!(xml.contains("<feed>"));
            let username_at = xml.find(r#"key="Username" value="alice""#).unwrap();
            let password_at = xml.find(r#"key="ClearTextPassword" value="hunter2""#).unwrap();
            assert!(username_at < password_at);
        }

        #[test]
        fn test_set_credentials_replaces_previous_content() {
            let mut doc = ConfigDocument::empty();
            doc.set_credentials("feed", "alice", "old-secret").unwrap();
            doc.set_credentials("feed", "bob", "new-secret").unwrap();

            let xml = doc.to_xml().unwrap();
            assert_eq!(xml.matches("<feed>").count(), 1);
            assert!(xml.contains(r#"value="bob""#));
            assert!(xml.contains(r#"value="new-secret""#));
            assert!(!xml.contains("alice"));
            assert!(!xml.contains("old-secret"));
        }

        #[test]
        fn test_credentials_for_different_sources_coexist() {
            let mut doc = ConfigDocument::empty();
            doc.set_credentials("first", "alice", "a").unwrap();
            doc.set_credentials("second", "bob", "b").unwrap();

            let xml = doc.to_xml().unwrap();
            assert!(xml.contains("<first>"));
            assert!(xml.contains("<second>"));
            assert_eq!(xml.matches("<packageSourceCredentials>").count(), 1);
        }
    }

    mod mapping_tests {
        use super::*;

        #[test]
        fn test_add_mapping_creates_keyed_element() {
            let mut doc = ConfigDocument::empty();
            doc.add_mapping("feed", "Contoso.*").unwrap();

            let xml = doc.to_xml().unwrap();
            assert!(xml.contains(r#"<packageSource key="feed">"#));
            assert!(xml.contains(r#"<package pattern="Contoso.*"/>"#));
        }

        #[test]
        fn test_patterns_accumulate_in_call_order() {
            let mut doc = ConfigDocument::empty();
            doc.add_mapping("feed", "Contoso.*").unwrap();
            doc.add_mapping("feed", "Fabrikam.*").unwrap();

            let xml = doc.to_xml().unwrap();
            assert_eq!(xml.matches(r#"<packageSource key="feed">"#).count(), 1);
            let first = xml.find("Contoso.*").unwrap();
            let second = xml.find("Fabrikam.*").unwrap();
            assert!(first < second);
        }

        #[test]
        fn test_identical_patterns_are_not_deduplicated() {
            let mut doc = ConfigDocument::empty();
            doc.add_mapping("feed", "*").unwrap();
            doc.add_mapping("feed", "*").unwrap();

            let xml = doc.to_xml().unwrap();
            assert_eq!(xml.matches(r#"<package pattern="*"/>"#).count(), 2);
        }

        #[test]
        fn test_mappings_keyed_separately_per_source() {
            let mut doc = ConfigDocument::empty();
            doc.add_mapping("first", "A.*").unwrap();
            doc.add_mapping("second", "B.*").unwrap();

            let xml = doc.to_xml().unwrap();
            assert!(xml.contains(r#"<packageSource key="first">"#));
            assert!(xml.contains(r#"<packageSource key="second">"#));
        }
    }

    mod io_tests {
        use super::*;

        #[test]
        fn test_load_missing_file_is_not_found() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("NuGet.config");

            let error = ConfigDocument::load(&path).unwrap_err();
            assert!(error.is_not_found());
        }

        #[test]
        fn test_load_or_empty_reports_existence() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("NuGet.config");

            let (_, existed) = ConfigDocument::load_or_empty(&path).unwrap();
            assert!(!existed);

            std::fs::write(&path, "<configuration/>").unwrap();
            let (_, existed) = ConfigDocument::load_or_empty(&path).unwrap();
            assert!(existed);
        }

        #[test]
        fn test_load_malformed_xml_is_parse_error() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("NuGet.config");
            std::fs::write(&path, "<configuration><unclosed></configuration>").unwrap();

            let error = ConfigDocument::load(&path).unwrap_err();
            let display = format!("{}", error);
            assert!(display.contains("Config parse error"));
        }

        #[test]
        fn test_load_wrong_root_is_parse_error() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("NuGet.config");
            std::fs::write(&path, "<settings/>").unwrap();

            let error = ConfigDocument::load(&path).unwrap_err();
            let display = format!("{}", error);
            assert!(display.contains("root element is not <configuration>"));
        }

        #[test]
        fn test_save_creates_parent_directories() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("deeply").join("nested").join("NuGet.config");

            let mut doc = ConfigDocument::empty();
            doc.add_source("feed", "https://feed.example.com").unwrap();
            doc.save(&path).unwrap();

            assert!(path.exists());
            let reloaded = ConfigDocument::load(&path).unwrap();
            assert_eq!(reloaded.sources().len(), 1);
        }

        #[test]
        fn test_save_fully_rewrites_file() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("NuGet.config");
            std::fs::write(&path, "stale content that is not XML").unwrap();

            let mut doc = ConfigDocument::empty();
            doc.save(&path).unwrap();

            let content = std::fs::read_to_string(&path).unwrap();
            assert_eq!(content, "<configuration/>\n");
        }

        #[test]
        fn test_save_load_round_trip() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("NuGet.config");

            let mut doc = ConfigDocument::empty();
            doc.add_source("feed", "https://feed.example.com/v3/index.json")
                .unwrap();
            doc.set_credentials("feed", "alice", "secret").unwrap();
            doc.add_mapping("feed", "*").unwrap();
            doc.save(&path).unwrap();

            let mut reloaded = ConfigDocument::load(&path).unwrap();
            let expected = doc.to_xml().unwrap();
            assert_eq!(reloaded.to_xml().unwrap(), expected);
        }
    }
}
