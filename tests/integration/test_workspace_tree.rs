//! Integration tests for workspace tree flows
//!
//! These exercise path-addressed navigation and mutation sequences the
//! way a file explorer drives them: expand/collapse, create, delete,
//! and the visible-row projection a renderer consumes.

use codedeck::{Config, Error, NodeKind, WorkspaceTree};

fn seeded() -> WorkspaceTree {
    WorkspaceTree::from_config(&Config::default().workspace)
}

fn visible_names(tree: &WorkspaceTree) -> Vec<String> {
    tree.visible_rows()
        .iter()
        .map(|row| tree.node(row.id).unwrap().name.clone())
        .collect()
}

#[test]
fn test_expand_collapse_navigation() {
    let mut tree = seeded();

    // Collapse src: its children disappear from the projection
    assert!(tree.toggle(&["src"]));
    assert_eq!(
        visible_names(&tree),
        vec!["src", "tests", "README.md", "requirements.txt"]
    );

    // Expand tests: its child appears
    assert!(tree.toggle(&["tests"]));
    assert_eq!(
        visible_names(&tree),
        vec!["src", "tests", "test_main.py", "README.md", "requirements.txt"]
    );
}

#[test]
fn test_toggle_twice_is_identity() {
    let mut tree = seeded();
    let before = visible_names(&tree);

    tree.toggle(&["src"]);
    tree.toggle(&["src"]);

    assert_eq!(visible_names(&tree), before);
}

#[test]
fn test_toggle_misses_and_files_change_nothing() {
    let mut tree = seeded();
    let before = visible_names(&tree);

    assert!(!tree.toggle(&["src", "main.py"]));
    assert!(!tree.toggle(&["ghost"]));
    assert!(!tree.toggle(&["src", "missing", "deep"]));

    assert_eq!(visible_names(&tree), before);
}

#[test]
fn test_create_then_remove_restores_sibling_set() {
    let mut tree = seeded();
    let src = tree.resolve(&["src"]).unwrap();
    let before: Vec<_> = tree
        .children(src)
        .iter()
        .map(|id| tree.node(*id).unwrap().name.clone())
        .collect();

    tree.create(&["src"], "scratch.py", NodeKind::File).unwrap();
    tree.remove(&["src", "scratch.py"]).unwrap();

    let after: Vec<_> = tree
        .children(src)
        .iter()
        .map(|id| tree.node(*id).unwrap().name.clone())
        .collect();
    assert_eq!(after, before);
}

#[test]
fn test_create_nested_directory_and_populate() {
    let mut tree = seeded();

    tree.create(&["src"], "lib", NodeKind::Directory).unwrap();
    tree.create(&["src", "lib"], "helpers.py", NodeKind::File)
        .unwrap();

    let id = tree.resolve(&["src", "lib", "helpers.py"]).unwrap();
    assert_eq!(tree.path_of(id), vec!["src", "lib", "helpers.py"]);

    // New directories start closed, so the new file is not visible yet
    assert!(!visible_names(&tree).contains(&"helpers.py".to_string()));
    tree.toggle(&["src", "lib"]);
    assert!(visible_names(&tree).contains(&"helpers.py".to_string()));
}

#[test]
fn test_duplicate_create_fails_with_no_mutation() {
    let mut tree = seeded();
    let before = tree.len();

    let result = tree.create::<&str>(&[], "README.md", NodeKind::File);
    assert!(matches!(result, Err(Error::DuplicateName { .. })));
    assert_eq!(tree.len(), before);

    // Same name is fine in a different sibling group
    assert!(tree.create(&["src"], "README.md", NodeKind::File).is_ok());
}

#[test]
fn test_invalid_names_rejected() {
    let mut tree = seeded();

    for name in ["", "a/b", "a\\b"] {
        let result = tree.create::<&str>(&[], name, NodeKind::File);
        assert!(matches!(result, Err(Error::InvalidName { .. })), "name {:?}", name);
    }
}

#[test]
fn test_remove_directory_destroys_subtree() {
    let mut tree = seeded();

    tree.create(&["src"], "pkg", NodeKind::Directory).unwrap();
    tree.create(&["src", "pkg"], "mod.py", NodeKind::File)
        .unwrap();
    let total = tree.len();

    tree.remove(&["src", "pkg"]).unwrap();

    assert_eq!(tree.len(), total - 2);
    assert!(tree.resolve(&["src", "pkg"]).is_none());
    assert!(tree.resolve(&["src", "pkg", "mod.py"]).is_none());
}

#[test]
fn test_remove_missing_path_is_surfaced() {
    let mut tree = seeded();

    assert!(matches!(
        tree.remove(&["src", "ghost.py"]),
        Err(Error::NodeNotFound { .. })
    ));
}

#[test]
fn test_open_state_survives_sibling_mutations() {
    let mut tree = seeded();
    tree.toggle(&["tests"]); // open it

    tree.create::<&str>(&[], "docs", NodeKind::Directory).unwrap();
    tree.remove(&["README.md"]).unwrap();

    let tests_dir = tree.resolve(&["tests"]).unwrap();
    assert!(tree.node(tests_dir).unwrap().is_open);
}

#[test]
fn test_empty_tree_supports_building_from_scratch() {
    let mut tree = WorkspaceTree::new();
    assert!(tree.is_empty());

    tree.create::<&str>(&[], "workspace", NodeKind::Directory)
        .unwrap();
    tree.create(&["workspace"], "main.rs", NodeKind::File)
        .unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(visible_names(&tree), vec!["workspace"]);
}
