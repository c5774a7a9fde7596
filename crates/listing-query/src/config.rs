//! Listing configuration.
//!
//! [`ListingConfig`] is an immutable snapshot of every tunable the compiler
//! reads: pagination defaults, the disjunction sentinel, the OR-to-IN
//! threshold, operator symbols and words, wildcard tokens, sort markers and
//! boolean tokens. It is passed explicitly into every entry point.
//!
//! The snapshot can be loaded from TOML. Every key is optional and falls back
//! to the built-in default:
//!
//! ```toml
//! default_limit = 25
//! or_limit = 20
//!
//! [operators.and]
//! symbol = "&"
//! word = "AND"
//!
//! [wildcards]
//! many = "*"
//! one = "?"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML or a value has the wrong type.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not usable (e.g. an empty operator symbol).
    #[error("invalid config: {0}")]
    Invalid(String),

    /// No home or XDG directory to look for a configuration file in.
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// An operator with a symbol form and an optional word form.
///
/// Word forms are configured bare (`"AND"`) and padded with blanks where
/// they are matched: prefix operators as `"NOT "`, infix operators as
/// `" AND "`. An empty word disables the word form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Symbol form, e.g. `&`.
    pub symbol: String,
    /// Word form without padding, e.g. `AND`.
    #[serde(default)]
    pub word: String,
}

impl Operator {
    /// Creates an operator from its symbol and word forms.
    pub fn new(symbol: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            word: word.into(),
        }
    }

    /// Word form as a prefix (`"NOT "`), if configured.
    pub fn prefix_word(&self) -> Option<String> {
        (!self.word.is_empty()).then(|| format!("{} ", self.word))
    }

    /// Word form as an infix (`" AND "`), if configured.
    pub fn infix_word(&self) -> Option<String> {
        (!self.word.is_empty()).then(|| format!(" {} ", self.word))
    }

    /// Strips this operator from the start of `value`, symbol first.
    ///
    /// Returns the trimmed remainder, or `None` if `value` does not start
    /// with either form.
    pub fn strip_prefix<'a>(&self, value: &'a str) -> Option<&'a str> {
        if let Some(rest) = value.strip_prefix(self.symbol.as_str()) {
            return Some(rest.trim());
        }
        let word = self.prefix_word()?;
        value.strip_prefix(word.as_str()).map(str::trim)
    }

    /// Returns true if `value` contains the symbol or the infix word form.
    pub fn is_contained_in(&self, value: &str) -> bool {
        value.contains(self.symbol.as_str())
            || self
                .infix_word()
                .is_some_and(|word| value.contains(word.as_str()))
    }

    /// Splits `value` on this operator.
    ///
    /// The infix word form is normalized to the symbol first so that both
    /// forms split uniformly. Segments are trimmed and blank segments dropped.
    pub fn split(&self, value: &str) -> Vec<String> {
        let normalized = match self.infix_word() {
            Some(word) => value.replace(word.as_str(), &self.symbol),
            None => value.to_string(),
        };
        normalized
            .split(self.symbol.as_str())
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Operator table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operators {
    pub not: Operator,
    pub or: Operator,
    pub and: Operator,
    pub like: Operator,
    pub lt: Operator,
    pub gt: Operator,
    pub to: Operator,
    /// Token that matches a missing value.
    pub null: String,
}

impl Default for Operators {
    fn default() -> Self {
        Self {
            not: Operator::new("!", "NOT"),
            or: Operator::new("|", "OR"),
            and: Operator::new("&", "AND"),
            like: Operator::new("~", "LIKE"),
            lt: Operator::new("<", "LT"),
            gt: Operator::new(">", "GT"),
            to: Operator::new("-", "TO"),
            null: "NULL".to_string(),
        }
    }
}

/// Wildcard tokens accepted in string filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wildcards {
    /// Matches any run of characters.
    pub many: String,
    /// Matches exactly one character.
    pub one: String,
}

impl Default for Wildcards {
    fn default() -> Self {
        Self {
            many: "*".to_string(),
            one: "?".to_string(),
        }
    }
}

/// Sort direction markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortMarkers {
    pub asc: String,
    pub desc: String,
}

impl Default for SortMarkers {
    fn default() -> Self {
        Self {
            asc: "+".to_string(),
            desc: "-".to_string(),
        }
    }
}

/// Tokens matched (case-insensitively) against boolean attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanTokens {
    #[serde(rename = "true")]
    pub true_token: String,
    #[serde(rename = "false")]
    pub false_token: String,
}

impl Default for BooleanTokens {
    fn default() -> Self {
        Self {
            true_token: "true".to_string(),
            false_token: "false".to_string(),
        }
    }
}

/// Immutable listing configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Offset used when neither index nor page is usable.
    pub default_index: usize,
    /// Page reported when it cannot be derived.
    pub default_page: usize,
    /// Page size when none is given (`0` = unbounded).
    pub default_limit: usize,
    /// Filter-map key that switches the top-level group to OR.
    pub disjunction_key: String,
    /// OR fan-out above which a filter is rewritten as a single IN leaf.
    pub or_limit: usize,
    /// Accepted decimal separators for float/double literals.
    pub decimal_separators: Vec<String>,
    /// Whether the NULL token must match case-sensitively.
    pub null_case_sensitive: bool,
    pub operators: Operators,
    pub wildcards: Wildcards,
    pub sort: SortMarkers,
    pub boolean: BooleanTokens,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_index: 0,
            default_page: 1,
            default_limit: 10,
            disjunction_key: "Filter-Type-Disjunction".to_string(),
            or_limit: 10,
            decimal_separators: vec![".".to_string(), ",".to_string()],
            null_case_sensitive: true,
            operators: Operators::default(),
            wildcards: Wildcards::default(),
            sort: SortMarkers::default(),
            boolean: BooleanTokens::default(),
        }
    }
}

impl ListingConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or mistyped values
    /// (e.g. a non-numeric `or_limit`), `ConfigError::Invalid` if validation
    /// fails.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: ListingConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, otherwise see
    /// [`ListingConfig::from_toml_str`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded listing configuration");
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Checks that every token the grammar depends on is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        let ops = &self.operators;
        let symbols = [
            ("operators.not.symbol", &ops.not.symbol),
            ("operators.or.symbol", &ops.or.symbol),
            ("operators.and.symbol", &ops.and.symbol),
            ("operators.like.symbol", &ops.like.symbol),
            ("operators.lt.symbol", &ops.lt.symbol),
            ("operators.gt.symbol", &ops.gt.symbol),
            ("operators.to.symbol", &ops.to.symbol),
            ("operators.null", &ops.null),
            ("wildcards.many", &self.wildcards.many),
            ("wildcards.one", &self.wildcards.one),
            ("sort.asc", &self.sort.asc),
            ("sort.desc", &self.sort.desc),
            ("boolean.true", &self.boolean.true_token),
            ("boolean.false", &self.boolean.false_token),
            ("disjunction_key", &self.disjunction_key),
        ];
        if let Some((key, _)) = symbols.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("'{key}' must not be empty")));
        }
        if ops.and.symbol == ops.or.symbol {
            return Err(ConfigError::Invalid(
                "'operators.and.symbol' and 'operators.or.symbol' must differ".to_string(),
            ));
        }
        if self.sort.asc == self.sort.desc {
            return Err(ConfigError::Invalid(
                "'sort.asc' and 'sort.desc' must differ".to_string(),
            ));
        }
        if self
            .boolean
            .true_token
            .eq_ignore_ascii_case(&self.boolean.false_token)
        {
            return Err(ConfigError::Invalid(
                "'boolean.true' and 'boolean.false' must differ".to_string(),
            ));
        }
        if self.decimal_separators.iter().any(|sep| sep.is_empty()) {
            return Err(ConfigError::Invalid(
                "'decimal_separators' must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if `value` is the NULL token under the configured case rule.
    pub fn is_null_token(&self, value: &str) -> bool {
        if self.null_case_sensitive {
            value == self.operators.null
        } else {
            value.eq_ignore_ascii_case(&self.operators.null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ListingConfig::default();
        assert_eq!(config.default_index, 0);
        assert_eq!(config.default_page, 1);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.or_limit, 10);
        assert_eq!(config.disjunction_key, "Filter-Type-Disjunction");
        assert_eq!(config.operators.not.symbol, "!");
        assert_eq!(config.operators.to.word, "TO");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_word_forms_are_padded() {
        let and = Operator::new("&", "AND");
        assert_eq!(and.infix_word().as_deref(), Some(" AND "));
        assert_eq!(and.prefix_word().as_deref(), Some("AND "));

        let bare = Operator::new("&", "");
        assert!(bare.infix_word().is_none());
    }

    #[test]
    fn test_operator_split_normalizes_word_form() {
        let and = Operator::new("&", "AND");
        assert_eq!(and.split("a AND b&c"), vec!["a", "b", "c"]);
        assert_eq!(and.split(" a & & b "), vec!["a", "b"]);
    }

    #[test]
    fn test_operator_word_needs_padding() {
        let and = Operator::new("&", "AND");
        assert!(!and.is_contained_in("BRANDON"));
        assert!(and.is_contained_in("x AND y"));
    }

    #[test]
    fn test_operator_strip_prefix() {
        let lt = Operator::new("<", "LT");
        assert_eq!(lt.strip_prefix("<5"), Some("5"));
        assert_eq!(lt.strip_prefix("LT 5"), Some("5"));
        assert_eq!(lt.strip_prefix("LT5"), None);
        assert_eq!(lt.strip_prefix("5"), None);
    }

    #[test]
    fn test_from_toml_partial_override() {
        let config = ListingConfig::from_toml_str(
            r#"
            default_limit = 50
            or_limit = 3

            [operators.and]
            symbol = "+"
            word = "UND"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_limit, 50);
        assert_eq!(config.or_limit, 3);
        assert_eq!(config.operators.and.symbol, "+");
        assert_eq!(config.operators.and.word, "UND");
        // Untouched keys keep defaults
        assert_eq!(config.operators.or.symbol, "|");
        assert_eq!(config.default_page, 1);
    }

    #[test]
    fn test_from_toml_non_numeric_is_error() {
        let result = ListingConfig::from_toml_str(r#"or_limit = "many""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_empty_symbol() {
        let result = ListingConfig::from_toml_str(
            r#"
            [operators.not]
            symbol = ""
            "#,
        );
        match result {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("operators.not.symbol")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_equal_sort_markers() {
        let mut config = ListingConfig::default();
        config.sort.asc = "-".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_null_token_case_rule() {
        let mut config = ListingConfig::default();
        assert!(config.is_null_token("NULL"));
        assert!(!config.is_null_token("null"));

        config.null_case_sensitive = false;
        assert!(config.is_null_token("null"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "default_page = 0").unwrap();
        writeln!(file, "[boolean]").unwrap();
        writeln!(file, r#"true = "yes""#).unwrap();
        writeln!(file, r#"false = "no""#).unwrap();

        let config = ListingConfig::load(&path).unwrap();
        assert_eq!(config.default_page, 0);
        assert_eq!(config.boolean.true_token, "yes");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ListingConfig::load(Path::new("/nonexistent/listing.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ListingConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(ListingConfig::from_toml_str(&text).unwrap(), config);
    }
}
