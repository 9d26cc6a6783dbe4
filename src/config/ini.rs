//! Scenario files read through `configparser`
//!
//! The reader is created case-sensitive with multiline values enabled, so an
//! indented line continues the value of the key above it. Delimiters are `=`
//! and `:`, comments start with `;` or `#`. Keys of the `[DEFAULT]` section
//! (and keys written before any header) are inherited by every other section
//! that does not define them itself; `DEFAULT` is never reported as a section.

use configparser::ini::Ini;

use super::ConfigError;

/// Name of the section whose keys are inherited by all others
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// One `[name]` block with its entries
///
/// A key written without a delimiter has no value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniSection {
    pub name: String,
    pub entries: Vec<(String, Option<String>)>,
}

impl IniSection {
    /// Value of `key`, if present and given a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }
}

/// Parsed scenario file, sections in file order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    /// Parse INI text
    ///
    /// # Example
    ///
    /// ```rust
    /// use geodesic_rs::config::IniDocument;
    ///
    /// let doc = IniDocument::parse("[ORBIT]\nL = 4.02\nGR: 1\n")?;
    /// let section = &doc.sections()[0];
    ///
    /// assert_eq!(section.name, "ORBIT");
    /// assert_eq!(section.get("GR"), Some("1"));
    /// # Ok::<(), geodesic_rs::config::ConfigError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut reader = Ini::new_cs();
        reader.set_multiline(true);
        reader.set_default_section(DEFAULT_SECTION);

        let map = reader.read(text.to_string()).map_err(ConfigError::Parse)?;
        let defaults = map.get(DEFAULT_SECTION).cloned().unwrap_or_default();

        let sections = map
            .into_iter()
            .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
            .map(|(name, values)| {
                let mut section = IniSection {
                    name,
                    entries: values.into_iter().collect(),
                };
                for (key, value) in &defaults {
                    if !section.contains_key(key) {
                        section.entries.push((key.clone(), value.clone()));
                    }
                }
                section
            })
            .collect();

        Ok(Self { sections })
    }

    /// Sections in file order, `DEFAULT` excluded
    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_and_delimiters() {
        let text = "\
# scenario file
[HYPERBOLIC]
L= 4.02
phi_0 : 0.
; comment
[ELLIPTIC]
L = 10.02
";
        let doc = IniDocument::parse(text).unwrap();
        assert_eq!(doc.sections().len(), 2);

        let hyperbolic = doc.section("HYPERBOLIC").unwrap();
        assert_eq!(hyperbolic.get("L"), Some("4.02"));
        assert_eq!(hyperbolic.get("phi_0"), Some("0."));
        assert_eq!(doc.section("ELLIPTIC").unwrap().get("L"), Some("10.02"));
    }

    #[test]
    fn test_sections_keep_file_order() {
        let doc = IniDocument::parse("[ZETA]\nL = 1\n[ALPHA]\nL = 2\n[MID]\nL = 3\n").unwrap();
        let names: Vec<&str> = doc.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["ZETA", "ALPHA", "MID"]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let doc = IniDocument::parse("[A]\nGR = 1\ngr = 0\n").unwrap();
        let a = doc.section("A").unwrap();
        assert_eq!(a.get("GR"), Some("1"));
        assert_eq!(a.get("gr"), Some("0"));
    }

    #[test]
    fn test_default_section_is_inherited() {
        let doc = IniDocument::parse("[DEFAULT]\nt_max = 1e3\nGR = 1\n[A]\nGR = 0\n[B]\n").unwrap();
        assert_eq!(doc.sections().len(), 2);

        let a = doc.section("A").unwrap();
        assert_eq!(a.get("GR"), Some("0"));
        assert_eq!(a.get("t_max"), Some("1e3"));
        assert_eq!(doc.section("B").unwrap().get("GR"), Some("1"));
        assert!(doc.section(DEFAULT_SECTION).is_none());
    }

    #[test]
    fn test_indented_line_continues_value() {
        let doc = IniDocument::parse("[HYPERBOLIC]\nL = 4.02\nt_max =\n    2e3\n").unwrap();
        let value = doc.section("HYPERBOLIC").unwrap().get("t_max").unwrap();
        assert_eq!(value.trim(), "2e3");
    }

    #[test]
    fn test_key_without_delimiter_has_no_value() {
        let doc = IniDocument::parse("[A]\nL = 1\nflag\n").unwrap();
        let a = doc.section("A").unwrap();
        assert!(a.contains_key("flag"));
        assert_eq!(a.get("flag"), None);
    }

    #[test]
    fn test_unclosed_header_is_error() {
        let err = IniDocument::parse("[A]\nL = 1\n[BROKEN\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_document() {
        assert!(IniDocument::parse("").unwrap().sections().is_empty());
        assert!(IniDocument::parse("# only a comment\n").unwrap().sections().is_empty());
    }
}
