//! Environment variable substitution
//!
//! Config values may reference the environment as `{{ env.NAME }}`, optionally
//! with a fallback: `{{ env.NAME | fallback value }}`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use todos_core::TodoError;

/// Regex pattern for placeholders: {{ env.VAR_NAME }} or {{ env.VAR_NAME | default }}
static ENV_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*env\.([A-Za-z_][A-Za-z0-9_]*)\s*(?:\|\s*([^}]*?)\s*)?\}\}").unwrap()
});

/// Environment variable substitutor
pub struct EnvSubstitutor {
    /// Whether to fail on missing environment variables without a fallback
    strict: bool,
}

impl EnvSubstitutor {
    /// Create a new substitutor with strict mode (fails on missing vars)
    pub fn new() -> Self {
        Self { strict: true }
    }

    /// Create a new substitutor with lenient mode (leaves placeholders for missing vars).
    ///
    /// Used when the value behind a placeholder is about to be overridden anyway.
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Substitute environment variables in the given content.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn substitute(&self, content: &str) -> Result<String, TodoError> {
        let _ = dotenvy::dotenv();
        self.substitute_with(content, |name| std::env::var(name).ok())
    }

    /// Substitute placeholders using `lookup` instead of the process environment
    pub fn substitute_with<F>(&self, content: &str, lookup: F) -> Result<String, TodoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing: BTreeSet<String> = BTreeSet::new();

        let result = ENV_PATTERN.replace_all(content, |cap: &Captures<'_>| {
            let name = &cap[1];
            match (lookup(name), cap.get(2)) {
                (Some(value), _) => value,
                (None, Some(fallback)) => fallback.as_str().to_string(),
                (None, None) => {
                    if self.strict {
                        missing.insert(name.to_string());
                    }
                    cap[0].to_string()
                }
            }
        });

        if !missing.is_empty() {
            let names: Vec<String> = missing.into_iter().collect();
            return Err(TodoError::EnvVarNotFound(names.join(", ")));
        }

        Ok(result.into_owned())
    }
}

impl Default for EnvSubstitutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "MONGODB_URL" => Some("mongodb://db:27017".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_substitute_present_var() {
        let result = EnvSubstitutor::new()
            .substitute_with("url: {{ env.MONGODB_URL }}", lookup)
            .unwrap();
        assert_eq!(result, "url: mongodb://db:27017");
    }

    #[test]
    fn test_present_var_wins_over_fallback() {
        let result = EnvSubstitutor::new()
            .substitute_with("port: {{ env.PORT | 5000 }}", lookup)
            .unwrap();
        assert_eq!(result, "port: 8080");
    }

    #[test]
    fn test_fallback_used_for_missing_var() {
        let result = EnvSubstitutor::new()
            .substitute_with("db: {{ env.TODOS_DB | todos_dev }}", lookup)
            .unwrap();
        assert_eq!(result, "db: todos_dev");
    }

    #[test]
    fn test_substitute_missing_var_strict() {
        let result = EnvSubstitutor::new().substitute_with("{{ env.NONEXISTENT_VAR_12345 }}", lookup);
        match result {
            Err(TodoError::EnvVarNotFound(names)) => assert_eq!(names, "NONEXISTENT_VAR_12345"),
            other => panic!("expected EnvVarNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_vars_reported_once_each() {
        let content = "{{ env.TODOS_B }} {{ env.TODOS_A }} {{ env.TODOS_B }}";
        match EnvSubstitutor::new().substitute_with(content, lookup) {
            Err(TodoError::EnvVarNotFound(names)) => assert_eq!(names, "TODOS_A, TODOS_B"),
            other => panic!("expected EnvVarNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_substitute_missing_var_lenient() {
        let result = EnvSubstitutor::lenient()
            .substitute_with("{{ env.NONEXISTENT_VAR_12345 }}", lookup)
            .unwrap();
        assert_eq!(result, "{{ env.NONEXISTENT_VAR_12345 }}");
    }

    #[test]
    fn test_substitute_reads_process_env() {
        std::env::set_var("TODOS_PARSER_TEST_VAR", "from_env");
        let result = EnvSubstitutor::new()
            .substitute("value: {{ env.TODOS_PARSER_TEST_VAR }}")
            .unwrap();
        assert_eq!(result, "value: from_env");
        std::env::remove_var("TODOS_PARSER_TEST_VAR");
    }
}
