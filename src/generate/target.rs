//! Chooses the implementation language and test framework for generated tests.
//!
//! Both the prompt builder and the response side call [`detect_target`], so
//! the label embedded in a prompt always matches the label returned with the
//! generated code.

use serde::Serialize;

use crate::classify::extension_of;

/// Framework label for plain unit tests.
pub const UNIT_FRAMEWORK: &str = "Jest";
/// Framework label for UI component tests.
pub const UI_FRAMEWORK: &str = "Jest + React Testing Library";
/// Framework label for Python tests.
pub const PYTHON_FRAMEWORK: &str = "pytest";

/// Language and test framework that generated tests should target.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TestTarget {
    /// Implementation language of the tests.
    pub language: &'static str,
    /// Test framework label.
    pub framework: &'static str,
}

fn mentions_ui_framework(content: &str) -> bool {
    content.contains("react") || content.contains("React")
}

/// Derives the test target from the file name and its source text.
///
/// Depends only on its inputs, never on model output.
#[must_use]
pub fn detect_target(filename: &str, content: &str) -> TestTarget {
    let ui = mentions_ui_framework(content);
    match extension_of(filename).as_deref() {
        Some("py") => TestTarget { language: "Python", framework: PYTHON_FRAMEWORK },
        Some("ts" | "tsx") => TestTarget {
            language: "TypeScript",
            framework: if ui { UI_FRAMEWORK } else { UNIT_FRAMEWORK },
        },
        _ if ui => TestTarget { language: "JavaScript", framework: UI_FRAMEWORK },
        _ => TestTarget { language: "JavaScript", framework: UNIT_FRAMEWORK },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_files_use_pytest() {
        let target = detect_target("app/models.py", "import React  # not really");
        assert_eq!(target, TestTarget { language: "Python", framework: "pytest" });
    }

    #[test]
    fn typescript_depends_on_ui_marker() {
        let plain = detect_target("src/math.ts", "export const add = (a, b) => a + b;");
        assert_eq!(plain, TestTarget { language: "TypeScript", framework: UNIT_FRAMEWORK });

        let ui = detect_target("src/App.tsx", "import React from 'react';");
        assert_eq!(ui, TestTarget { language: "TypeScript", framework: UI_FRAMEWORK });
    }

    #[test]
    fn javascript_with_ui_marker_uses_ui_framework() {
        let target = detect_target("Button.jsx", "import { useState } from 'react';");
        assert_eq!(target, TestTarget { language: "JavaScript", framework: UI_FRAMEWORK });
    }

    #[test]
    fn everything_else_defaults_to_javascript_unit_tests() {
        for name in ["index.js", "main.go", "Makefile", ""] {
            let target = detect_target(name, "fn main() {}");
            assert_eq!(target, TestTarget { language: "JavaScript", framework: UNIT_FRAMEWORK });
        }
    }

    #[test]
    fn extension_match_ignores_case() {
        assert_eq!(detect_target("SCRIPT.PY", "").language, "Python");
    }

    #[test]
    fn detection_is_deterministic() {
        let content = "import React from 'react';\nexport default function App() {}";
        let first = detect_target("App.tsx", content);
        for _ in 0..10 {
            assert_eq!(detect_target("App.tsx", content), first);
        }
    }
}
