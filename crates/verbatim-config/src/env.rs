use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// An optional fallback can be given as `{{ env.VAR | default("value") }}`;
/// it is used when the variable is unset. Placeholders on TOML comment
/// lines are left untouched. Expansion happens on the raw text before
/// deserialization, so config structs use plain `String`/`SecretString`.
pub fn expand_env(input: &str) -> Result<String, String> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

    let placeholder = PLACEHOLDER.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    });

    let mut lines = Vec::with_capacity(input.lines().count());

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut missing: Option<String> = None;
        let expanded = placeholder.replace_all(line, |caps: &Captures<'_>| {
            let var = &caps[1];
            match std::env::var(var) {
                Ok(value) => value,
                Err(_) => match caps.get(2) {
                    Some(fallback) => fallback.as_str().to_string(),
                    None => {
                        missing.get_or_insert_with(|| var.to_string());
                        String::new()
                    }
                },
            }
        });

        if let Some(var) = missing {
            return Err(format!("environment variable not found: `{var}`"));
        }

        lines.push(expanded.into_owned());
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_without_placeholders() {
        let input = "model = \"nova-3\"";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_set_variable() {
        temp_env::with_var("VERBATIM_TEST_KEY", Some("dg_secret"), || {
            let result = expand_env("api_key = \"{{ env.VERBATIM_TEST_KEY }}\"").unwrap();
            assert_eq!(result, "api_key = \"dg_secret\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("VERBATIM_TEST_MISSING", || {
            let err = expand_env("api_key = \"{{ env.VERBATIM_TEST_MISSING }}\"").unwrap_err();
            assert!(err.contains("VERBATIM_TEST_MISSING"));
        });
    }

    #[test]
    fn default_fills_in_for_unset_variable() {
        temp_env::with_var_unset("VERBATIM_TEST_PORT", || {
            let result = expand_env("listen = \"0.0.0.0:{{ env.VERBATIM_TEST_PORT | default(\"8081\") }}\"").unwrap();
            assert_eq!(result, "listen = \"0.0.0.0:8081\"");
        });
    }

    #[test]
    fn set_variable_beats_default() {
        temp_env::with_var("VERBATIM_TEST_PORT", Some("9000"), || {
            let result = expand_env("listen = \"0.0.0.0:{{ env.VERBATIM_TEST_PORT | default(\"8081\") }}\"").unwrap();
            assert_eq!(result, "listen = \"0.0.0.0:9000\"");
        });
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("VERBATIM_TEST_MISSING", || {
            let input = "# api_key = \"{{ env.VERBATIM_TEST_MISSING }}\"\nmodel = \"nova-3\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }

    #[test]
    fn trailing_newline_is_preserved() {
        let input = "model = \"nova-3\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }
}
