use assert_fs::TempDir;
use assert_fs::prelude::*;
use common::command::repository_dir;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};
use sit::areas::refs::RefValue;
use sit::areas::repository::Repository;
use sit::artifacts::branch::branch_name::SymRefName;
use sit::artifacts::objects::object_type::ObjectType;
use sit::artifacts::objects::tree::FlatTree;
use sit::errors::{Result, SitError};
use std::collections::BTreeMap;

mod common;

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn repository(repository_dir: TempDir) -> (TempDir, Repository) {
    let repository = Repository::new(repository_dir.path()).expect("Failed to open repository");
    repository.init().expect("Failed to initialize repository");

    (repository_dir, repository)
}

#[rstest]
fn first_commit_has_no_parent_and_the_empty_tree(repository: (TempDir, Repository)) -> TestResult {
    let (_dir, repository) = repository;

    let first = repository.commit("first")?;
    let commit = repository.get_commit(&first)?;

    assert_eq!(commit.parent(), None);
    assert_eq!(
        commit.tree_oid(),
        &repository.database().put(b"", ObjectType::Tree)?
    );
    assert_eq!(commit.message(), "first");

    let second = repository.commit("second")?;
    assert_eq!(repository.get_commit(&second)?.parent(), Some(&first));

    Ok(())
}

#[rstest]
fn history_is_breadth_first_without_duplicates(repository: (TempDir, Repository)) -> TestResult {
    let (dir, repository) = repository;

    let c1 = repository.commit("c1")?;
    dir.child("file.txt").write_str("two")?;
    let c2 = repository.commit("c2")?;

    let history = repository
        .iterate_history([c2.clone()])
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(history, vec![c2.clone(), c1.clone()]);

    let history = repository
        .iterate_history([c2.clone(), c1.clone()])
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(history, vec![c2, c1]);

    Ok(())
}

#[rstest]
fn symbolic_resolution_follows_or_stops(repository: (TempDir, Repository)) -> TestResult {
    let (_dir, repository) = repository;
    let refs = repository.refs();
    let main = SymRefName::new("refs/heads/main".to_string());
    let oid = repository.database().put(b"x", ObjectType::Blob)?;

    refs.update_ref(&SymRefName::head(), RefValue::symbolic(&main), false)?;
    refs.update_ref(&main, RefValue::direct(&oid), true)?;

    assert_eq!(refs.read_ref(&SymRefName::head(), true)?, RefValue::direct(&oid));
    assert_eq!(
        refs.read_ref(&SymRefName::head(), false)?,
        RefValue::symbolic(&main)
    );

    Ok(())
}

#[rstest]
fn cyclic_references_are_reported(repository: (TempDir, Repository)) -> TestResult {
    let (_dir, repository) = repository;
    let refs = repository.refs();
    let a = SymRefName::new("refs/heads/a".to_string());
    let b = SymRefName::new("refs/heads/b".to_string());

    refs.update_ref(&a, RefValue::symbolic(&b), false)?;
    refs.update_ref(&b, RefValue::symbolic(&a), false)?;

    assert!(matches!(
        refs.read_ref(&a, true),
        Err(SitError::BrokenReferenceChain { .. })
    ));
    assert!(matches!(
        repository.resolve_name("a"),
        Err(SitError::BrokenReferenceChain { .. })
    ));

    Ok(())
}

#[rstest]
fn branch_checkout_then_commit_moves_the_branch(repository: (TempDir, Repository)) -> TestResult {
    let (dir, repository) = repository;
    let base = repository.commit("base")?;

    repository.branch("b1", None)?;
    let outcome = repository.checkout("b1")?;
    assert!(!outcome.is_detached());
    assert_eq!(
        repository.refs().read_ref(&SymRefName::head(), false)?,
        RefValue::symbolic(&SymRefName::new("refs/heads/b1".to_string()))
    );

    dir.child("b1.txt").write_str("b1")?;
    let tip = repository.commit("on b1")?;

    assert_eq!(repository.resolve_name("b1")?, tip);
    assert_eq!(repository.resolve_name("master")?, base);
    assert_eq!(repository.refs().current_ref()?.as_ref_path(), "refs/heads/b1");

    Ok(())
}

#[rstest]
fn checkout_of_a_bare_oid_detaches(repository: (TempDir, Repository)) -> TestResult {
    let (_dir, repository) = repository;
    let base = repository.commit("base")?;

    let outcome = repository.checkout(base.as_ref())?;

    assert!(outcome.is_detached());
    assert_eq!(
        repository.refs().read_ref(&SymRefName::head(), false)?,
        RefValue::direct(&base)
    );

    Ok(())
}

#[rstest]
fn checkout_of_a_blob_is_a_type_mismatch(repository: (TempDir, Repository)) -> TestResult {
    let (_dir, repository) = repository;
    let blob = repository.database().put(b"not a commit", ObjectType::Blob)?;

    assert!(matches!(
        repository.checkout(blob.as_ref()),
        Err(SitError::TypeMismatch {
            expected: ObjectType::Commit,
            actual: ObjectType::Blob,
            ..
        })
    ));

    Ok(())
}

#[rstest]
fn tags_resolve_before_heads(repository: (TempDir, Repository)) -> TestResult {
    let (dir, repository) = repository;
    let first = repository.commit("first")?;
    dir.child("file.txt").write_str("second")?;
    let second = repository.commit("second")?;

    repository.tag("foo", Some(first.as_ref()))?;
    repository.branch("foo", Some(second.as_ref()))?;

    assert_eq!(repository.resolve_name("foo")?, first);
    assert_eq!(repository.resolve_name("heads/foo")?, second);
    assert_eq!(repository.resolve_name("@")?, second);

    Ok(())
}

#[rstest]
fn unknown_names_are_reported(repository: (TempDir, Repository)) {
    let (_dir, repository) = repository;

    assert!(matches!(
        repository.resolve_name("missing"),
        Err(SitError::UnknownName { .. })
    ));
    // too short to be taken as an object ID
    assert!(matches!(
        repository.resolve_name("abc123"),
        Err(SitError::UnknownName { .. })
    ));
}

#[rstest]
fn update_ref_rejects_empty_values(repository: (TempDir, Repository)) {
    let (_dir, repository) = repository;

    assert!(matches!(
        repository.refs().update_ref(
            &SymRefName::new("refs/heads/empty".to_string()),
            RefValue::unset(),
            true
        ),
        Err(SitError::EmptyValue { .. })
    ));
}

#[rstest]
fn changed_paths_between_commits(repository: (TempDir, Repository)) -> TestResult {
    let (dir, repository) = repository;
    dir.child("keep.txt").write_str("keep")?;
    dir.child("dir/edit.txt").write_str("before")?;
    let before = repository.commit("before")?;

    dir.child("dir/edit.txt").write_str("after")?;
    let after = repository.commit("after")?;

    let changes = repository.diff(before.as_ref(), after.as_ref())?;

    assert_eq!(changes.keys().collect::<Vec<_>>(), vec!["dir/edit.txt"]);
    assert_eq!(changes["dir/edit.txt"].status_char(), 'M');

    Ok(())
}

#[rstest]
#[case("x\r")]
#[case("a\\b.txt")]
#[case("dir\r/inner.txt")]
fn unusual_file_names_survive_commit_and_checkout(
    repository: (TempDir, Repository),
    #[case] path: &str,
) -> TestResult {
    let (dir, repository) = repository;
    dir.child(path).write_str("content")?;
    let tip = repository.commit("unusual name")?;

    let flat = repository.read_tree(repository.get_commit(&tip)?.tree_oid())?;
    assert_eq!(flat.keys().collect::<Vec<_>>(), vec![path]);

    std::fs::remove_file(dir.child(path).path())?;
    repository.checkout(tip.as_ref())?;
    dir.child(path).assert("content");

    Ok(())
}

#[rstest]
fn names_that_cannot_be_encoded_are_skipped(repository: (TempDir, Repository)) -> TestResult {
    let (dir, repository) = repository;
    dir.child("kept.txt").write_str("kept")?;
    dir.child("line\nbreak.txt").write_str("skipped")?;
    dir.child("line\nbreak/nested.txt").write_str("skipped")?;

    let tree_oid = repository.write_tree()?;

    assert_eq!(
        repository.read_tree(&tree_oid)?.keys().collect::<Vec<_>>(),
        vec!["kept.txt"]
    );

    Ok(())
}

#[cfg(unix)]
#[rstest]
fn symbolic_links_are_never_followed(repository: (TempDir, Repository)) -> TestResult {
    let (dir, repository) = repository;
    dir.child("d/f.txt").write_str("f")?;
    std::os::unix::fs::symlink("..", dir.child("d/loop").path())?;
    std::os::unix::fs::symlink("f.txt", dir.child("d/link.txt").path())?;

    let tree_oid = repository.write_tree()?;

    assert_eq!(
        repository.read_tree(&tree_oid)?.keys().collect::<Vec<_>>(),
        vec!["d/f.txt"]
    );

    Ok(())
}

#[rstest]
fn checkout_repairs_a_cyclic_head(repository: (TempDir, Repository)) -> TestResult {
    let (_dir, repository) = repository;
    let base = repository.commit("base")?;
    repository
        .refs()
        .set_head(RefValue::symbolic(&SymRefName::head()))?;

    let outcome = repository.checkout("master")?;

    assert_eq!(outcome.previous_ref, SymRefName::head());
    assert_eq!(outcome.oid, base);
    assert_eq!(repository.refs().read_head()?, Some(base));

    Ok(())
}

#[rstest]
fn commit_keeps_the_message_verbatim(repository: (TempDir, Repository)) -> TestResult {
    let (_dir, repository) = repository;

    let oid = repository.commit("  indented subject\n")?;

    assert_eq!(repository.get_commit(&oid)?.message(), "  indented subject\n");

    Ok(())
}

fn file_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(\\.txt)?"
}

fn snapshot() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    prop::collection::btree_map(
        prop_oneof![
            file_name(),
            (file_name(), file_name()).prop_map(|(dir, name)| format!("d_{dir}/{name}")),
        ],
        prop::collection::vec(any::<u8>(), 0..64),
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn write_tree_then_read_tree_recovers_the_snapshot(files in snapshot()) {
        common::redirect_temp_dir();
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repository = Repository::new(dir.path()).expect("Failed to open repository");
        repository.init().expect("Failed to initialize repository");

        let mut expected = FlatTree::new();
        for (path, content) in &files {
            dir.child(path).write_binary(content).expect("Failed to write file");
            expected.insert(
                path.clone(),
                repository.database().put(content, ObjectType::Blob).expect("Failed to store blob"),
            );
        }

        let tree_oid = repository.write_tree().expect("Failed to write tree");
        prop_assert_eq!(repository.read_tree(&tree_oid).expect("Failed to read tree"), expected);
        prop_assert_eq!(repository.write_tree().expect("Failed to write tree"), tree_oid);
    }
}
