mod common;

use common::TestWorkspace;
use phpdoc_annotator::composer::{
    normalise_path, parse_composer_json, resolve_class_path, source_directories,
};

#[test]
fn test_parse_basic_psr4() {
    let ws = TestWorkspace::with_composer(
        r#"{
            "autoload": {
                "psr-4": {
                    "Klarna\\": "src/Klarna/"
                }
            }
        }"#,
    );

    let mappings = parse_composer_json(ws.root());
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].prefix, "Klarna\\");
    assert_eq!(mappings[0].base_path, "src/Klarna/");
}

#[test]
fn test_parse_autoload_dev() {
    let ws = TestWorkspace::with_composer(
        r#"{
            "autoload": {
                "psr-4": {
                    "Klarna\\": "src/Klarna/"
                }
            },
            "autoload-dev": {
                "psr-4": {
                    "Klarna\\Rest\\Tests\\": "tests/"
                }
            }
        }"#,
    );

    let mappings = parse_composer_json(ws.root());
    assert_eq!(mappings.len(), 2);

    // Longest prefix first
    assert_eq!(mappings[0].prefix, "Klarna\\Rest\\Tests\\");
    assert_eq!(mappings[0].base_path, "tests/");
    assert_eq!(mappings[1].prefix, "Klarna\\");
}

#[test]
fn test_parse_array_paths() {
    let ws = TestWorkspace::with_composer(
        r#"{
            "autoload": {
                "psr-4": {
                    "App\\": ["src/", "lib/"]
                }
            }
        }"#,
    );

    let mappings = parse_composer_json(ws.root());
    assert_eq!(mappings.len(), 2);
    assert_eq!(mappings[0].base_path, "src/");
    assert_eq!(mappings[1].base_path, "lib/");
}

#[test]
fn test_parse_no_composer_json() {
    let ws = TestWorkspace::new();
    assert!(parse_composer_json(ws.root()).is_empty());
}

#[test]
fn test_parse_invalid_json() {
    let ws = TestWorkspace::with_composer("not valid json {{{");
    assert!(parse_composer_json(ws.root()).is_empty());
}

#[test]
fn test_parse_no_psr4_section() {
    let ws = TestWorkspace::with_composer(
        r#"{
            "name": "vendor/project",
            "autoload": {
                "classmap": ["src/"]
            }
        }"#,
    );

    assert!(parse_composer_json(ws.root()).is_empty());
}

#[test]
fn test_prefix_without_trailing_backslash() {
    let ws = TestWorkspace::with_composer(
        r#"{ "autoload": { "psr-4": { "App": "src" } } }"#,
    );

    let mappings = parse_composer_json(ws.root());
    assert_eq!(mappings[0].prefix, "App\\");
    assert_eq!(mappings[0].base_path, "src/");
}

#[test]
fn test_resolve_nested_namespace() {
    let ws = TestWorkspace::with_composer(common::APP_COMPOSER_JSON);
    ws.write_file("src/Models/Page.php", "<?php\nnamespace App\\Models;\nclass Page {}\n");

    let mappings = parse_composer_json(ws.root());
    let path = resolve_class_path(&mappings, ws.root(), "App\\Models\\Page");
    assert_eq!(path, Some(ws.path("src/Models/Page.php")));

    let with_backslash = resolve_class_path(&mappings, ws.root(), "\\App\\Models\\Page");
    assert_eq!(with_backslash, Some(ws.path("src/Models/Page.php")));
}

#[test]
fn test_resolve_nonexistent_file_returns_none() {
    let ws = TestWorkspace::with_composer(common::APP_COMPOSER_JSON);
    let mappings = parse_composer_json(ws.root());
    assert!(resolve_class_path(&mappings, ws.root(), "App\\Missing").is_none());
}

#[test]
fn test_resolve_no_matching_prefix() {
    let ws = TestWorkspace::with_composer(common::APP_COMPOSER_JSON);
    ws.write_file("src/Page.php", "<?php\n");
    let mappings = parse_composer_json(ws.root());
    assert!(resolve_class_path(&mappings, ws.root(), "Other\\Page").is_none());
}

#[test]
fn test_resolve_longest_prefix_wins() {
    let ws = TestWorkspace::with_composer(
        r#"{
            "autoload": {
                "psr-4": {
                    "App\\": "src/",
                    "App\\Models\\": "models/"
                }
            }
        }"#,
    );
    ws.write_file("src/Models/Page.php", "<?php\n");
    ws.write_file("models/Page.php", "<?php\n");

    let mappings = parse_composer_json(ws.root());
    let path = resolve_class_path(&mappings, ws.root(), "App\\Models\\Page");
    assert_eq!(path, Some(ws.path("models/Page.php")));
}

#[test]
fn test_resolve_array_paths_first_existing_match() {
    let ws = TestWorkspace::with_composer(
        r#"{ "autoload": { "psr-4": { "App\\": ["src/", "lib/"] } } }"#,
    );
    ws.write_file("lib/Page.php", "<?php\n");

    let mappings = parse_composer_json(ws.root());
    let path = resolve_class_path(&mappings, ws.root(), "App\\Page");
    assert_eq!(path, Some(ws.path("lib/Page.php")));
}

#[test]
fn test_source_directories_skip_missing() {
    let ws = TestWorkspace::with_composer(
        r#"{
            "autoload": { "psr-4": { "App\\": ["src/", "lib/"] } },
            "autoload-dev": { "psr-4": { "App\\Tests\\": "src/" } }
        }"#,
    );
    ws.write_file("src/Page.php", "<?php\n");

    let mappings = parse_composer_json(ws.root());
    assert_eq!(source_directories(&mappings, ws.root()), vec![ws.path("src/")]);
}

#[test]
fn test_normalise_path_adds_trailing_slash() {
    assert_eq!(normalise_path("src"), "src/");
    assert_eq!(normalise_path("src/"), "src/");
    assert_eq!(normalise_path(""), "");
}

#[test]
fn test_normalise_path_converts_backslashes() {
    assert_eq!(normalise_path("src\\Models"), "src/Models/");
}
