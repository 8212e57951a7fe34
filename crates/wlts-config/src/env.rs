use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// An optional fallback is supported via `{{ env.VAR | default("value") }}`;
/// without one, an unset variable is an error. Expansion runs on the raw
/// TOML before deserialization so config structs stay plain
/// String/SecretString. TOML comment lines are left untouched.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // Group 1: scoped variable name, group 2: optional default value
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("must be valid regex")
        })
    }

    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut cursor = 0;

        for captures in placeholder().captures_iter(line) {
            let matched = captures.get(0).expect("capture 0 always present");
            output.push_str(&line[cursor..matched.start()]);
            cursor = matched.end();

            let scoped = captures.get(1).expect("group 1 is not optional").as_str();
            let Some(var) = scoped.strip_prefix("env.").filter(|v| !v.contains('.')) else {
                return Err(format!("only variables scoped with 'env.' are supported: `{scoped}`"));
            };

            match std::env::var(var) {
                Ok(value) => output.push_str(&value),
                Err(_) => match captures.get(2) {
                    Some(fallback) => output.push_str(fallback.as_str()),
                    None => return Err(format!("environment variable not found: `{var}`")),
                },
            }
        }

        output.push_str(&line[cursor..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
