//! Frame selection rules for the call-site tracer

/// Which frames the tracer keeps and where it stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFilter {
    /// Function-path prefixes of the library itself
    pub library_prefixes: Vec<String>,
    /// Function-path prefixes of the language runtime and test harness
    pub runtime_prefixes: Vec<String>,
    /// Source-path fragments of the toolchain's own library sources
    pub runtime_paths: Vec<String>,
    /// File names that are always kept, even inside the library
    pub boundary_files: Vec<String>,
    /// Test-entry naming prefixes
    pub entry_prefixes: Vec<String>,
}

impl Default for TraceFilter {
    fn default() -> Self {
        Self {
            library_prefixes: strings(&["verity_core::", "verity_core_types::"]),
            runtime_prefixes: strings(&["std::", "core::", "alloc::", "test::"]),
            runtime_paths: strings(&["/rustc/", "/lib/rustlib/src/rust/library/"]),
            boundary_files: strings(&["mock_tests.rs"]),
            entry_prefixes: strings(&["test", "bench", "Test", "Benchmark", "Example"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl TraceFilter {
    /// Whether a frame running `function` is library or runtime internals
    pub fn is_internal(&self, function: &str) -> bool {
        let path = function.trim_start_matches('<');
        self.library_prefixes
            .iter()
            .chain(&self.runtime_prefixes)
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Whether `file` is a toolchain library source, such as the shim behind
    /// `<fn() as core::ops::FnOnce<()>>::call_once`
    pub fn is_runtime_file(&self, file: &str) -> bool {
        self.runtime_paths.iter().any(|p| file.contains(p.as_str()))
    }

    /// Whether `file_name` is an embedding boundary
    pub fn is_boundary(&self, file_name: &str) -> bool {
        self.boundary_files.iter().any(|f| f == file_name)
    }

    /// Whether `function` is a test entry point under any known prefix
    pub fn is_test_entry(&self, function: &str) -> bool {
        let name = entry_name(function);
        self.entry_prefixes
            .iter()
            .any(|prefix| is_test_entry(name, prefix))
    }
}

/// Test-entry naming convention: `name` is exactly `prefix`, or starts with
/// `prefix` followed by a character that is not lowercase.
///
/// `test_equal`, `TestEqual` and `test` match the `test`/`Test` prefixes.
/// `testing` and `tested` do not.
pub fn is_test_entry(name: &str, prefix: &str) -> bool {
    match name.strip_prefix(prefix) {
        None => false,
        Some(rest) => rest.chars().next().map_or(true, |c| !c.is_lowercase()),
    }
}

/// Symbol path without its generic argument list or trailing hash.
///
/// `test::__rust_begin_short_backtrace::<(), fn()>` becomes
/// `test::__rust_begin_short_backtrace`.
pub fn symbol_path(function: &str) -> &str {
    let path = function.split("::<").next().unwrap_or(function);
    match path.rsplit_once("::") {
        Some((head, last)) if is_hash(last) => head,
        _ => path,
    }
}

/// Final path segment of a symbol, ignoring closure segments and the
/// trailing symbol hash
fn entry_name(function: &str) -> &str {
    symbol_path(function)
        .rsplit("::")
        .find(|segment| !segment.is_empty() && !is_closure(segment) && !is_hash(segment))
        .unwrap_or(function)
}

/// `{{closure}}` (legacy mangling) or `{closure#0}` (v0 mangling)
fn is_closure(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}') && segment.contains("closure")
}

fn is_hash(segment: &str) -> bool {
    segment.len() == 17
        && segment.starts_with('h')
        && segment[1..].chars().all(|c| c.is_ascii_hexdigit())
}
