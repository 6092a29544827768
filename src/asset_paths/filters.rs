use regex::Regex;

/// Glob matched by hashed JavaScript chunks emitted by the bundler.
pub const SCRIPT_PATTERN: &str = "**/*-*.js";
/// Glob matched by hashed stylesheets emitted by the bundler.
pub const STYLESHEET_PATTERN: &str = "**/*-*.css";

fn output_filters() -> &'static (Regex, Regex) {
    use std::sync::OnceLock;

    static FILTERS: OnceLock<(Regex, Regex)> = OnceLock::new();
    FILTERS.get_or_init(|| {
        (
            compile_glob(SCRIPT_PATTERN).expect("invalid script glob"),
            compile_glob(STYLESHEET_PATTERN).expect("invalid stylesheet glob"),
        )
    })
}

/// Returns `true` for hashed script chunks such as `assets/index-a1b2.js`.
///
/// Unhashed or externally copied scripts never match, so they are left out of preloading.
pub fn is_script(file_name: &str) -> bool {
    output_filters().0.is_match(file_name)
}

/// Returns `true` for hashed stylesheets such as `assets/index-c3d4.css`.
pub fn is_stylesheet(file_name: &str) -> bool {
    output_filters().1.is_match(file_name)
}

/// Compile a path glob into an anchored regular expression.
///
/// `**/` matches any number of leading directories (including none), `**` matches
/// anything, `*` and `?` never cross a `/`. Every other character is literal.
pub fn compile_glob(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::with_capacity(pattern.len() * 2 + 2);
    source.push('^');

    let mut rest = pattern;
    while let Some(ch) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("**/") {
            source.push_str("(?:.*/)?");
            rest = tail;
            continue;
        }
        if let Some(tail) = rest.strip_prefix("**") {
            source.push_str(".*");
            rest = tail;
            continue;
        }

        match ch {
            '*' => source.push_str("[^/]*"),
            '?' => source.push_str("[^/]"),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
        rest = &rest[ch.len_utf8()..];
    }

    source.push('$');
    Regex::new(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_hashed_scripts_at_any_depth() {
        assert!(is_script("index-a1b2.js"));
        assert!(is_script("assets/vendor-c3d4.js"));
        assert!(is_script("nested/dir/chunk-x.y-z.js"));
    }

    #[test]
    fn rejects_unhashed_or_foreign_scripts() {
        assert!(!is_script("index.js"));
        assert!(!is_script("my-dir/index.js"));
        assert!(!is_script("index-a1b2.js.map"));
        assert!(!is_script("index-a1b2.mjs"));
    }

    #[test]
    fn matches_hashed_stylesheets_only() {
        assert!(is_stylesheet("assets/index-e5f6.css"));
        assert!(!is_stylesheet("assets/index.css"));
        assert!(!is_stylesheet("assets/index-e5f6.js"));
        assert!(!is_script("assets/index-e5f6.css"));
    }

    #[test]
    fn single_star_stays_within_a_segment() {
        let glob = compile_glob("assets/*.js").unwrap();
        assert!(glob.is_match("assets/a.js"));
        assert!(!glob.is_match("assets/deep/a.js"));

        let deep = compile_glob("assets/**").unwrap();
        assert!(deep.is_match("assets/deep/a.js"));
    }

    #[test]
    fn escapes_regex_metacharacters() {
        let glob = compile_glob("legacy+polyfills-?.js").unwrap();
        assert!(glob.is_match("legacy+polyfills-1.js"));
        assert!(!glob.is_match("legacyyypolyfills-1.js"));
    }
}
