use scaffolder_core::scaffold::{self, ScaffoldPlan, Step};
use scaffolder_core::templates::TemplateTree;
use scaffolder_core::{AnswerSet, CssPreprocessor, InstallOutcome, TemplateSource};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const STYLELINT_KEYS: [&str; 3] = ["stylelint", "stylelint-order", "stylelint-webpack-plugin"];

const PLAIN_WEBPACK: &str = "module.exports = { rules: ['css'] }; // <%= repoName %>\n";
const SCSS_WEBPACK: &str = "module.exports = { rules: ['css', 'scss'] };\n";
const LESS_WEBPACK: &str = "module.exports = { rules: ['css', 'less'] };\n";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small template tree shaped like the bundled one
fn fixture_templates() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "template.yaml", "name: Fixture\nversion: 0.1.0\n");
    write(
        root,
        "package.json",
        r#"{
  "version": "1.0.0",
  "scripts": { "dev": "webpack-dev-server" }
}
"#,
    );
    write(
        root,
        "app.json",
        r#"{ "title": "<%= description %>", "owner": "<%= name %> <<%= email %>>" }
"#,
    );
    write(root, "README.md", "# <%= repoName %>\n");
    write(root, ".gitignore", "node_modules/\n");
    write(root, "src/main/index.jsx", "// <%= repoName %> entry\n");
    write(root, "webpack/default/_webpack.config.js", PLAIN_WEBPACK);
    write(root, "webpack/scss/_webpack.config.js", SCSS_WEBPACK);
    write(root, "webpack/less/_webpack.config.js", LESS_WEBPACK);
    dir
}

async fn load(dir: &TempDir) -> TemplateTree {
    TemplateTree::load(&TemplateSource::local(dir.path().to_path_buf()))
        .await
        .unwrap()
}

fn answers(css: CssPreprocessor, stylelint: bool) -> AnswerSet {
    AnswerSet {
        repo_name: "acme-portal".to_string(),
        description: "Customer portal".to_string(),
        author_name: "Robin Doe".to_string(),
        author_email: "robin@example.com".to_string(),
        github_username: "robindoe".to_string(),
        css_preprocessor: css,
        stylelint,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn walk_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                files.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();
    files
}

#[tokio::test]
async fn plain_css_without_stylelint() {
    let templates = fixture_templates();
    let tree = load(&templates).await;
    let out = tempfile::tempdir().unwrap();

    let (report, outcome) = scaffold::scaffold(
        &tree,
        out.path(),
        &answers(CssPreprocessor::Css, false),
        None,
    )
    .await
    .unwrap();

    assert!(matches!(outcome, InstallOutcome::Skipped(_)));

    let package = read_json(&out.path().join("package.json"));
    let dev = package["devDependencies"].as_object().unwrap();
    for key in STYLELINT_KEYS {
        assert!(!dev.contains_key(key), "stylelint key {} present", key);
    }
    assert!(!dev.contains_key("sass-loader"));
    assert!(!dev.contains_key("less-loader"));
    assert_eq!(dev.len(), report.plan.manifest.dev_dependencies.len());
    assert_eq!(
        package["dependencies"].as_object().unwrap().len(),
        report.plan.manifest.dependencies.len()
    );

    // Variant copied verbatim: its marker is not substituted
    let webpack = fs::read_to_string(out.path().join("webpack.config.js")).unwrap();
    assert_eq!(webpack, PLAIN_WEBPACK);
}

#[tokio::test]
async fn less_with_stylelint() {
    let templates = fixture_templates();
    let tree = load(&templates).await;
    let out = tempfile::tempdir().unwrap();

    scaffold::scaffold(
        &tree,
        out.path(),
        &answers(CssPreprocessor::Less, true),
        None,
    )
    .await
    .unwrap();

    let package = read_json(&out.path().join("package.json"));
    let dev = &package["devDependencies"];
    assert_eq!(dev["less-loader"], "^4.1.0");
    assert!(dev.get("sass-loader").is_none());
    for key in STYLELINT_KEYS {
        assert!(dev.get(key).is_some(), "missing {}", key);
    }

    let webpack = fs::read_to_string(out.path().join("webpack.config.js")).unwrap();
    assert_eq!(webpack, LESS_WEBPACK);
}

#[tokio::test]
async fn tokens_substituted_verbatim() {
    let templates = fixture_templates();
    let tree = load(&templates).await;
    let out = tempfile::tempdir().unwrap();

    scaffold::scaffold(
        &tree,
        out.path(),
        &answers(CssPreprocessor::Scss, false),
        None,
    )
    .await
    .unwrap();

    let readme = fs::read_to_string(out.path().join("README.md")).unwrap();
    assert_eq!(readme, "# acme-portal\n");

    let entry = fs::read_to_string(out.path().join("src/main/index.jsx")).unwrap();
    assert!(!entry.contains("<%="));

    let package = read_json(&out.path().join("package.json"));
    assert_eq!(package["name"], "acme-portal");
    assert_eq!(package["author"], "Robin Doe <robin@example.com>");
    assert_eq!(package["scripts"]["dev"], "webpack-dev-server");
    assert_eq!(package["devDependencies"]["sass-loader"], "^7.1.0");
}

#[tokio::test]
async fn answers_with_template_syntax_keep_json_valid() {
    let templates = fixture_templates();
    let tree = load(&templates).await;
    let out = tempfile::tempdir().unwrap();

    let mut a = answers(CssPreprocessor::Css, false);
    a.description = r#"The "best" shop \ <%= name %>"#.to_string() + "\nsecond line";
    a.author_name = r#"Robin "Bobby" Doe"#.to_string();

    scaffold::scaffold(&tree, out.path(), &a, None).await.unwrap();

    let package = read_json(&out.path().join("package.json"));
    assert_eq!(package["description"], a.description.as_str());
    assert_eq!(package["author"], r#"Robin "Bobby" Doe <robin@example.com>"#);

    let app = read_json(&out.path().join("app.json"));
    assert_eq!(app["title"], a.description.as_str());
    assert_eq!(app["owner"], r#"Robin "Bobby" Doe <robin@example.com>"#);
}

#[tokio::test]
async fn broken_package_json_fails_at_step_two_after_writing() {
    let templates = tempfile::tempdir().unwrap();
    write(templates.path(), "template.yaml", "name: Bare\nversion: 0.1.0\n");
    write(templates.path(), "README.md", "# <%= repoName %>\n");
    write(templates.path(), "webpack/default/_webpack.config.js", PLAIN_WEBPACK);
    let tree = load(&templates).await;

    let out = tempfile::tempdir().unwrap();
    write(out.path(), "package.json", "{ not json");

    let err = scaffold::scaffold(
        &tree,
        out.path(),
        &answers(CssPreprocessor::Css, false),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(err.step, Step::ComputeManifest);
    assert_eq!(err.to_string(), "failed during step 2 (compute dependency manifest)");
    // Steps 4 and 5 already ran
    assert!(out.path().join("README.md").exists());
    assert!(out.path().join("webpack.config.js").exists());
}

#[tokio::test]
async fn variant_sources_emitted_once_at_destination() {
    let templates = fixture_templates();
    let tree = load(&templates).await;
    let out = tempfile::tempdir().unwrap();

    let (report, _) = scaffold::scaffold(
        &tree,
        out.path(),
        &answers(CssPreprocessor::Scss, true),
        None,
    )
    .await
    .unwrap();

    let files = walk_files(out.path());
    assert_eq!(
        files,
        vec![
            ".gitignore",
            "README.md",
            "app.json",
            "package.json",
            "src/main/index.jsx",
            "webpack.config.js",
        ]
    );
    assert!(report.rendered.iter().all(|f| !f.contains("_webpack")));
    assert_eq!(report.placed, vec!["webpack.config.js".to_string()]);
    assert_eq!(report.file_count(), 6);
}

#[tokio::test]
async fn existing_package_json_is_extended() {
    let templates = tempfile::tempdir().unwrap();
    write(templates.path(), "template.yaml", "name: Bare\nversion: 0.1.0\n");
    write(templates.path(), "webpack/default/_webpack.config.js", PLAIN_WEBPACK);
    let tree = load(&templates).await;

    let out = tempfile::tempdir().unwrap();
    write(
        out.path(),
        "package.json",
        r#"{"name":"keep-me","private":true,"dependencies":{"lodash":"^4.17.21","react":"^15.0.0"}}"#,
    );

    scaffold::scaffold(
        &tree,
        out.path(),
        &answers(CssPreprocessor::Css, false),
        None,
    )
    .await
    .unwrap();

    let package = read_json(&out.path().join("package.json"));
    assert_eq!(package["name"], "keep-me");
    assert_eq!(package["private"], true);
    assert_eq!(package["dependencies"]["lodash"], "^4.17.21");
    assert_eq!(package["dependencies"]["react"], "^16.2.0");
}

#[tokio::test]
async fn missing_variant_source_fails_at_step_five() {
    let templates = tempfile::tempdir().unwrap();
    write(templates.path(), "template.yaml", "name: Broken\nversion: 0.1.0\n");
    write(templates.path(), "README.md", "# <%= repoName %>\n");
    let tree = load(&templates).await;
    let out = tempfile::tempdir().unwrap();

    let err = scaffold::scaffold(
        &tree,
        out.path(),
        &answers(CssPreprocessor::Less, false),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(err.step, Step::PlaceVariants);
    assert_eq!(err.to_string(), "failed during step 5 (place variant files)");
    // Already-rendered files stay behind
    assert!(out.path().join("README.md").exists());
    assert!(!out.path().join("package.json").exists());
}

#[tokio::test]
async fn manifests_identical_across_runs() {
    let a = answers(CssPreprocessor::Less, true);
    let first = serde_json::to_string(&ScaffoldPlan::from_answers(&a).manifest).unwrap();
    let second = serde_json::to_string(&ScaffoldPlan::from_answers(&a).manifest).unwrap();
    assert_eq!(first, second);

    let templates = fixture_templates();
    let tree = load(&templates).await;
    let out_a = tempfile::tempdir().unwrap();
    let out_b = tempfile::tempdir().unwrap();
    scaffold::scaffold(&tree, out_a.path(), &a, None).await.unwrap();
    scaffold::scaffold(&tree, out_b.path(), &a, None).await.unwrap();

    assert_eq!(
        fs::read(out_a.path().join("package.json")).unwrap(),
        fs::read(out_b.path().join("package.json")).unwrap()
    );
}
