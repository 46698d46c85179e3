//! Dependency fragments declared by the React Stack generator
//!
//! Declaration order is part of the contract: base, then the preprocessor
//! fragment, then the stylelint fragment.

use super::{merge, DependencyFragment, Manifest, OptionalFragment};
use crate::answers::{AnswerSet, CssPreprocessor};

const BASE: DependencyFragment = DependencyFragment {
    name: "base",
    dependencies: &[
        ("body-parser", "^1.18.2"),
        ("chalk", "^2.3.2"),
        ("compression", "^1.7.1"),
        ("connect-mongo", "^2.0.1"),
        ("dotenv", "^6.0.0"),
        ("express", "^4.16.2"),
        ("express-session", "^1.15.6"),
        ("helmet", "^3.13.0"),
        ("mongoose", "^5.2.12"),
        ("path", "^0.12.7"),
        ("react", "^16.2.0"),
        ("react-dom", "^16.2.0"),
        ("react-router-dom", "^4.2.2"),
    ],
    dev_dependencies: &[
        ("@babel/core", "^7.1.2"),
        ("@babel/node", "^7.0.0"),
        ("@babel/preset-env", "^7.1.0"),
        ("@babel/preset-react", "^7.0.0"),
        ("autoprefixer", "^9.3.1"),
        ("babel-loader", "^8.0.4"),
        ("concurrently", "^4.0.1"),
        ("css-loader", "^1.0.1"),
        ("cssnano", "^4.1.7"),
        ("eslint", "^5.8.0"),
        ("eslint-loader", "^2.1.1"),
        ("eslint-plugin-react", "^7.5.1"),
        ("html-webpack-plugin", "^3.2.0"),
        ("node-sass", "^4.9.2"),
        ("nodemon", "^1.12.5"),
        ("optimize-css-assets-webpack-plugin", "^5.0.1"),
        ("postcss-loader", "^3.0.0"),
        ("style-loader", "^0.23.1"),
        ("uglifyjs-webpack-plugin", "^2.0.1"),
        ("webpack", "^4.23.1"),
        ("webpack-cli", "^3.1.2"),
        ("webpack-dev-server", "^3.1.10"),
        ("webpackbar", "^2.6.1"),
    ],
};

const SCSS: DependencyFragment = DependencyFragment {
    name: "scss",
    dependencies: &[],
    dev_dependencies: &[("sass-loader", "^7.1.0")],
};

const LESS: DependencyFragment = DependencyFragment {
    name: "less",
    dependencies: &[],
    dev_dependencies: &[("less-loader", "^4.1.0")],
};

const STYLELINT: DependencyFragment = DependencyFragment {
    name: "stylelint",
    dependencies: &[],
    dev_dependencies: &[
        ("stylelint", "^9.7.1"),
        ("stylelint-order", "^1.0.0"),
        ("stylelint-webpack-plugin", "^0.10.5"),
    ],
};

static OPTIONAL: [OptionalFragment; 3] = [
    OptionalFragment {
        when: uses_scss,
        fragment: SCSS,
    },
    OptionalFragment {
        when: uses_less,
        fragment: LESS,
    },
    OptionalFragment {
        when: uses_stylelint,
        fragment: STYLELINT,
    },
];

fn uses_scss(answers: &AnswerSet) -> bool {
    answers.css_preprocessor == CssPreprocessor::Scss
}

fn uses_less(answers: &AnswerSet) -> bool {
    answers.css_preprocessor == CssPreprocessor::Less
}

fn uses_stylelint(answers: &AnswerSet) -> bool {
    answers.stylelint
}

/// Dependencies every generated project gets
pub fn base_fragment() -> &'static DependencyFragment {
    &BASE
}

/// Optional fragments in merge order
pub fn optional_fragments() -> &'static [OptionalFragment] {
    &OPTIONAL
}

/// The manifest for a given answer set
pub fn resolve_manifest(answers: &AnswerSet) -> Manifest {
    merge(base_fragment(), optional_fragments(), answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLELINT_KEYS: [&str; 3] = ["stylelint", "stylelint-order", "stylelint-webpack-plugin"];

    fn answers(css: CssPreprocessor, stylelint: bool) -> AnswerSet {
        AnswerSet {
            css_preprocessor: css,
            stylelint,
            ..AnswerSet::default()
        }
    }

    #[test]
    fn test_plain_without_stylelint_is_base_only() {
        let manifest = resolve_manifest(&answers(CssPreprocessor::Css, false));

        assert_eq!(manifest.dependencies.len(), BASE.dependencies.len());
        assert_eq!(manifest.dev_dependencies.len(), BASE.dev_dependencies.len());
        for key in STYLELINT_KEYS {
            assert!(!manifest.contains(key), "unexpected {}", key);
        }
        assert!(!manifest.contains("sass-loader"));
        assert!(!manifest.contains("less-loader"));
    }

    #[test]
    fn test_less_with_stylelint() {
        let manifest = resolve_manifest(&answers(CssPreprocessor::Less, true));

        assert_eq!(manifest.dev_dependencies["less-loader"], "^4.1.0");
        assert!(!manifest.contains("sass-loader"));
        for key in STYLELINT_KEYS {
            assert!(manifest.dev_dependencies.contains_key(key));
        }
        assert_eq!(
            manifest.len(),
            BASE.dependencies.len() + BASE.dev_dependencies.len() + 4
        );
    }

    #[test]
    fn test_scss_adds_sass_loader_only() {
        let manifest = resolve_manifest(&answers(CssPreprocessor::Scss, false));
        assert_eq!(manifest.get("sass-loader"), Some("^7.1.0"));
        assert!(!manifest.contains("less-loader"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for css in CssPreprocessor::ALL {
            for stylelint in [false, true] {
                let a = answers(css, stylelint);
                let first = serde_json::to_string(&resolve_manifest(&a)).unwrap();
                let second = serde_json::to_string(&resolve_manifest(&a)).unwrap();
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_declaration_order() {
        let names: Vec<&str> = optional_fragments()
            .iter()
            .map(|f| f.fragment.name)
            .collect();
        assert_eq!(names, vec!["scss", "less", "stylelint"]);
    }
}
