use crate::common::command::{
    OUTPUT_DIR, run_diffcheck_binary, run_wikisnap_command, wikisnap_diffcheck,
    wikisnap_snapshot, workspace_dir,
};
use crate::common::file::{FileSpec, write_file, write_list, write_page};
use assert_fs::TempDir;
use predicates::prelude::{PredicateBooleanExt, predicate};
use rstest::{fixture, rstest};
use std::path::Path;

mod common;

fn page_line(dir: &Path, title: &str) -> String {
    let file = title.to_lowercase().replace(' ', "_");
    format!(
        "{title} | {} | 2025-01-10",
        dir.join("pages").join(format!("{file}.html")).display()
    )
}

/// Archives "Hash table", "Trie" and "Heap" on 2025-01-15.
#[fixture]
fn first_snapshot(workspace_dir: TempDir) -> TempDir {
    let dir = workspace_dir.path();
    let lines = vec![
        write_page(dir, "hash_table", "Hash table", "<p>Buckets.</p>", "2025-01-10"),
        write_page(dir, "trie", "Trie", "<p>Prefix tree.</p>", "2025-01-10"),
        write_page(dir, "heap", "Heap", "<p>Priority queue.</p>", "2025-01-10"),
    ];
    write_list(dir, "pages.txt", &lines);

    wikisnap_snapshot(dir, "pages.txt", "2025-01-15 10:00:00")
        .assert()
        .success();

    workspace_dir
}

#[rstest]
fn changed_article_is_reported_after_seven_days(first_snapshot: TempDir) {
    let dir = first_snapshot.path();
    write_page(
        dir,
        "hash_table",
        "Hash table",
        "<p>Buckets and open addressing.</p>",
        "2025-01-10",
    );

    wikisnap_snapshot(dir, "pages.txt", "2025-01-22 10:00:00")
        .assert()
        .success();

    let expected_output = format!(
        "The following pages changed in the last 7 days:\n\n  - Hash table ({})\n",
        dir.join("pages").join("hash_table.html").display()
    );
    wikisnap_diffcheck(dir, 7, "2025-01-22 18:00:00", &[])
        .assert()
        .success()
        .stdout(expected_output);
}

#[rstest]
fn whitespace_only_edits_are_not_changes(first_snapshot: TempDir) {
    let dir = first_snapshot.path();
    write_page(
        dir,
        "trie",
        "Trie",
        "<p>Prefix   tree.</p>\n\n\n<p></p>",
        "2025-01-10",
    );

    wikisnap_snapshot(dir, "pages.txt", "2025-01-22 10:00:00")
        .assert()
        .success();

    wikisnap_diffcheck(dir, 7, "2025-01-22 18:00:00", &[])
        .assert()
        .success()
        .stdout("No changes detected in any page over the last 7 days.\n");
}

#[rstest]
fn added_and_removed_articles_are_reported(first_snapshot: TempDir) {
    let dir = first_snapshot.path();
    let lines = vec![
        page_line(dir, "Hash table"),
        page_line(dir, "Trie"),
        write_page(dir, "b_tree", "B-tree", "<p>Balanced.</p>", "2025-01-10"),
    ];
    write_list(dir, "pages.txt", &lines);

    wikisnap_snapshot(dir, "pages.txt", "2025-01-22 10:00:00")
        .assert()
        .success();

    let expected_output = format!(
        "The following pages were added in the last 7 days:\n\n  - B-tree ({})\n\n\
         The following pages were removed in the last 7 days:\n\n  - Heap ({})\n",
        dir.join("pages").join("b_tree.html").display(),
        dir.join("pages").join("heap.html").display()
    );
    wikisnap_diffcheck(dir, 7, "2025-01-22 18:00:00", &[])
        .assert()
        .success()
        .stdout(expected_output);

    wikisnap_diffcheck(dir, 7, "2025-01-22 18:00:00", &["--diff-filter", "M"])
        .assert()
        .success()
        .stdout("No changes detected in any page over the last 7 days.\n");
}

#[rstest]
fn future_dated_article_is_never_reported(workspace_dir: TempDir) {
    let dir = workspace_dir.path();
    let lines = vec![
        write_page(dir, "hash_table", "Hash table", "<p>Buckets.</p>", "2025-01-10"),
        write_page(dir, "heap", "Heap", "<p>Priority queue.</p>", "2025-03-01"),
    ];
    write_list(dir, "pages.txt", &lines);

    wikisnap_snapshot(dir, "pages.txt", "2025-01-15 10:00:00")
        .assert()
        .success();

    write_page(dir, "hash_table", "Hash table", "<p>Open addressing.</p>", "2025-01-10");
    wikisnap_snapshot(dir, "pages.txt", "2025-01-22 10:00:00")
        .assert()
        .success();

    wikisnap_diffcheck(dir, 7, "2025-01-22 18:00:00", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("The following pages changed in the last 7 days:"))
        .stdout(predicate::str::contains("Heap").not())
        .stdout(predicate::str::contains("were removed").not());
}

#[rstest]
fn latest_archive_of_the_day_is_compared(first_snapshot: TempDir) {
    let dir = first_snapshot.path();
    write_page(dir, "heap", "Heap", "<p>Binary heap.</p>", "2025-01-10");
    wikisnap_snapshot(dir, "pages.txt", "2025-01-22 08:00:00")
        .assert()
        .success();

    write_page(dir, "heap", "Heap", "<p>Priority queue.</p>", "2025-01-10");
    wikisnap_snapshot(dir, "pages.txt", "2025-01-22 09:00:00")
        .assert()
        .success();

    wikisnap_diffcheck(dir, 7, "2025-01-22 18:00:00", &[])
        .assert()
        .success()
        .stdout("No changes detected in any page over the last 7 days.\n");
}

#[rstest]
#[case(7, "2025-01-23 08:00:00", "no archive found from 2025-01-16")]
#[case(0, "2025-01-16 08:00:00", "no archive found from 2025-01-16")]
fn missing_archive_exits_2(
    first_snapshot: TempDir,
    #[case] days: u32,
    #[case] now: &str,
    #[case] message: &str,
) {
    wikisnap_diffcheck(first_snapshot.path(), days, now, &[])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains(message));
}

#[rstest]
fn empty_output_directory_exits_2(workspace_dir: TempDir) {
    std::fs::create_dir(workspace_dir.path().join(OUTPUT_DIR)).unwrap();

    wikisnap_diffcheck(workspace_dir.path(), 7, "2025-01-22 18:00:00", &[])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no archives found"));
}

#[rstest]
fn corrupt_archive_exits_4(first_snapshot: TempDir) {
    let dir = first_snapshot.path();
    write_file(FileSpec::new(
        dir.join(OUTPUT_DIR).join("2025-01-22_10-00-00.tar.gz"),
        "not a gzip stream".to_string(),
    ));

    wikisnap_diffcheck(dir, 7, "2025-01-22 18:00:00", &[])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("corrupt archive"));
}

#[rstest]
fn missing_output_directory_exits_1(workspace_dir: TempDir) {
    wikisnap_diffcheck(workspace_dir.path(), 7, "2025-01-22 18:00:00", &[])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("output directory not found"));
}

#[rstest]
#[case(&["diffcheck", "--days", "-3", "--output-dir", OUTPUT_DIR])]
#[case(&["diffcheck", "--days", "seven", "--output-dir", OUTPUT_DIR])]
#[case(&["diffcheck", "--days", "7", "--output-dir", OUTPUT_DIR, "--diff-filter", "X"])]
fn invalid_arguments_exit_1(workspace_dir: TempDir, #[case] args: &[&str]) {
    run_wikisnap_command(workspace_dir.path(), args)
        .assert()
        .code(1);
}

#[rstest]
fn standalone_diffcheck_binary_matches_the_subcommand(first_snapshot: TempDir) {
    let dir = first_snapshot.path();
    write_page(dir, "trie", "Trie", "<p>Prefix tree, or digital tree.</p>", "2025-01-10");

    wikisnap_snapshot(dir, "pages.txt", "2025-01-22 10:00:00")
        .assert()
        .success();

    let subcommand = wikisnap_diffcheck(dir, 7, "2025-01-22 18:00:00", &[])
        .assert()
        .success();
    let expected = String::from_utf8(subcommand.get_output().stdout.clone()).unwrap();

    run_diffcheck_binary(dir, 7, "2025-01-22 18:00:00", &[])
        .assert()
        .success()
        .stdout(expected)
        .stdout(predicate::str::contains("  - Trie ("));
}

#[rstest]
fn standalone_diffcheck_binary_keeps_the_exit_statuses(first_snapshot: TempDir) {
    let dir = first_snapshot.path();

    run_diffcheck_binary(dir, 30, "2025-01-15 18:00:00", &[])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no archive found from 2024-12-16"));
    run_diffcheck_binary(dir, 7, "2025-01-15 18:00:00", &["--diff-filter", "X"])
        .assert()
        .code(1);
}
