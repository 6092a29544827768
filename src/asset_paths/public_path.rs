/// Maps emitted output file names onto the public paths the browser requests.
///
/// The base path is fixed at construction so the resolver can be shared freely between
/// documents of the same build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicPathResolver {
    base: String,
}

impl PublicPathResolver {
    /// Create a resolver that prefixes every file name with `base`.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Configured base path.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Produce the served path for an output file name: `{base}/{file_name}`.
    ///
    /// The file name is treated as an opaque string; callers pass names taken from the
    /// bundle manifest.
    pub fn to_public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.base, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::PublicPathResolver;

    #[test]
    fn defaults_to_root_relative_paths() {
        let resolver = PublicPathResolver::default();
        assert_eq!(resolver.to_public_path("index-a1b2.js"), "/index-a1b2.js");
    }

    #[test]
    fn prefixes_configured_base() {
        let resolver = PublicPathResolver::new("/app");
        assert_eq!(
            resolver.to_public_path("assets/vendor-c3d4.js"),
            "/app/assets/vendor-c3d4.js"
        );
    }

    #[test]
    fn concatenates_without_normalising() {
        let resolver = PublicPathResolver::new("/");
        assert_eq!(resolver.to_public_path("a-1.js"), "//a-1.js");
    }
}
