//! Recognized code extensions and their language labels.

/// Extensions accepted as code files (lowercase, without the dot).
pub const CODE_EXTENSIONS: &[&str] = &[
    // JavaScript / TypeScript
    "js", "jsx", "mjs", "cjs", "ts", "tsx",
    // Python
    "py", "pyw",
    // JVM
    "java", "kt", "kts", "scala", "groovy",
    // C family
    "c", "h", "cpp", "cc", "cxx", "hpp", "cs",
    // Systems
    "go", "rs", "swift",
    // Scripting
    "rb", "php", "pl", "lua", "r", "dart",
    // Functional
    "ex", "exs", "hs", "clj", "elm",
    // Shell
    "sh", "bash", "zsh", "ps1",
    // Data
    "sql",
    // Markup and components
    "html", "htm", "vue", "svelte", "md",
    // Stylesheets
    "css", "scss", "sass", "less",
    // Structured config
    "json", "yaml", "yml", "toml", "xml", "ini",
];

/// Returns whether `ext` (lowercase, without the dot) is a recognized code extension.
#[must_use]
pub fn is_code_extension(ext: &str) -> bool {
    CODE_EXTENSIONS.contains(&ext)
}

/// Maps a recognized extension to its language label.
///
/// Accepted extensions without a language of their own (config formats,
/// markdown) return `None`.
#[must_use]
pub fn language_for(ext: &str) -> Option<&'static str> {
    let language = match ext {
        "js" | "jsx" | "mjs" | "cjs" => "JavaScript",
        "ts" | "tsx" => "TypeScript",
        "py" | "pyw" => "Python",
        "java" => "Java",
        "kt" | "kts" => "Kotlin",
        "scala" => "Scala",
        "groovy" => "Groovy",
        "c" | "h" => "C",
        "cpp" | "cc" | "cxx" | "hpp" => "C++",
        "cs" => "C#",
        "go" => "Go",
        "rs" => "Rust",
        "swift" => "Swift",
        "rb" => "Ruby",
        "php" => "PHP",
        "pl" => "Perl",
        "lua" => "Lua",
        "r" => "R",
        "dart" => "Dart",
        "ex" | "exs" => "Elixir",
        "hs" => "Haskell",
        "clj" => "Clojure",
        "elm" => "Elm",
        "sh" | "bash" | "zsh" => "Shell",
        "ps1" => "PowerShell",
        "sql" => "SQL",
        "html" | "htm" => "HTML",
        "vue" => "Vue",
        "svelte" => "Svelte",
        "css" => "CSS",
        "scss" | "sass" => "SCSS",
        "less" => "Less",
        _ => return None,
    };
    Some(language)
}
