//! The file system tree as a consumer of names and contract errors.

use hiername::domain::{ErrorKind, Name, StringName};
use hiername::files::{sample_tree, FileState, FileTree, NodeKind};
use hiername::util::testing;

// ============================================================
// Full names
// ============================================================

#[test]
fn given_sample_tree_when_finding_ls_then_full_name_is_path() {
    testing::init_test_setup();
    let tree = sample_tree(false).unwrap();
    let matches = tree.find_nodes(tree.root(), "ls").unwrap();
    assert_eq!(matches.len(), 1);

    let full_name = tree.full_name(matches[0]).unwrap();
    assert_eq!(full_name.as_string(None).unwrap(), "/usr/bin/ls");
    assert!(full_name.is_equal(&StringName::new("/usr/bin/ls", Some("/")).unwrap()));
    assert_eq!(full_name.no_components().unwrap(), 4);
    assert_eq!(full_name.component(3).unwrap(), "ls");
}

#[test]
fn given_deep_nesting_when_finding_then_descends_all_levels() {
    let mut tree = FileTree::new();
    let mut parent = tree.root();
    for level in ["level1", "level2", "level3", "level4"] {
        parent = tree.add_directory(level, parent).unwrap();
    }
    let needle = tree.add_file("needle", parent).unwrap();

    let matches = tree.find_nodes(tree.root(), "needle").unwrap();
    assert_eq!(matches, vec![needle]);
    assert_eq!(
        tree.full_name(needle).unwrap().as_string(Some("/")).unwrap(),
        "/level1/level2/level3/level4/needle"
    );
}

#[test]
fn given_matches_in_several_branches_when_finding_then_returns_all() {
    let mut tree = FileTree::new();
    let etc = tree.add_directory("etc", tree.root()).unwrap();
    let var = tree.add_directory("var", tree.root()).unwrap();
    let log = tree.add_directory("log", var).unwrap();
    let nginx = tree.add_file("config", etc).unwrap();
    let syslog = tree.add_file("config", log).unwrap();

    let matches = tree.find_nodes(tree.root(), "config").unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.contains(&nginx));
    assert!(matches.contains(&syslog));

    // searching a subtree only sees that subtree
    assert_eq!(tree.find_nodes(var, "config").unwrap(), vec![syslog]);
}

#[test]
fn given_base_name_with_delimiter_when_building_full_name_then_component_is_escaped() {
    let mut tree = FileTree::new();
    let dir = tree.add_directory("a/b", tree.root()).unwrap();
    let full_name = tree.full_name(dir).unwrap();

    assert_eq!(full_name.no_components().unwrap(), 2);
    assert_eq!(full_name.component(1).unwrap(), "a/b");
    assert_eq!(full_name.as_data_string().unwrap(), r"/a\/b");
}

#[test]
fn given_moved_and_renamed_node_when_building_full_name_then_reflects_new_place() {
    let mut tree = FileTree::new();
    let home = tree.add_directory("home", tree.root()).unwrap();
    let tmp = tree.add_directory("tmp", tree.root()).unwrap();
    let file = tree.add_file("notes", tmp).unwrap();

    tree.move_node(file, home).unwrap();
    tree.rename(file, "todo").unwrap();

    assert_eq!(tree.parent(file).unwrap(), home);
    assert!(tree.children(tmp).unwrap().is_empty());
    assert_eq!(
        tree.full_name(file).unwrap().as_string(None).unwrap(),
        "/home/todo"
    );
}

// ============================================================
// Error escalation
// ============================================================

#[test]
fn given_buggy_files_when_finding_then_service_failure_triggered_by_invalid_state() {
    let tree = sample_tree(true).unwrap();
    let err = tree.find_nodes(tree.root(), "ls").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServiceFailure);
    assert!(err.has_trigger());
    assert_eq!(err.trigger().unwrap().kind(), ErrorKind::InvalidState);
}

#[test]
fn given_valid_match_before_buggy_sibling_when_finding_then_no_partial_result() {
    let mut tree = FileTree::new();
    let usr = tree.add_directory("usr", tree.root()).unwrap();
    tree.add_file("x", usr).unwrap();
    tree.add_buggy_file("x", usr).unwrap();

    let err = tree.find_nodes(usr, "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServiceFailure);
    assert_eq!(err.root_cause().kind(), ErrorKind::InvalidState);
}

#[test]
fn given_unknown_parent_when_adding_then_illegal_argument_not_service_failure() {
    let mut other = FileTree::new();
    let foreign = other.add_directory("a", other.root()).unwrap();
    let mut tree = FileTree::new();

    let err = tree.add_file("f", foreign).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

// ============================================================
// File state machine
// ============================================================

#[test]
fn given_file_when_opening_reading_closing_then_state_follows() {
    let mut tree = FileTree::new();
    let f = tree.add_file("data", tree.root()).unwrap();

    assert_eq!(tree.read(f, 4).unwrap_err().kind(), ErrorKind::InvalidState);
    tree.open(f).unwrap();
    assert_eq!(tree.kind(f).unwrap(), NodeKind::File(FileState::Open));
    assert_eq!(tree.read(f, 4).unwrap(), vec![0u8; 4]);
    tree.close(f).unwrap();
    tree.delete(f).unwrap();
    assert_eq!(tree.open(f).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn given_directory_when_reading_then_illegal_argument() {
    let tree = FileTree::new();
    assert!(tree.read(tree.root(), 1).unwrap_err().is_precondition());
}
