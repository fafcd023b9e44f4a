use std::fs;
use std::path::Path;
use tempfile::tempdir;
use treepack::output::{self, OutputFormat};
use treepack::{
    IgnoreToggle, TOO_LARGE_PLACEHOLDER, TreeNode, TreepackBuilder, TreepackError, Verdict,
    WarningKind, treepack,
};

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn verdict_of(tree: &TreeNode, path: &str) -> Option<Verdict> {
    match tree.find(path)? {
        TreeNode::File { verdict, .. } => Some(*verdict),
        TreeNode::Directory { .. } => None,
    }
}

#[test]
fn integration_reference_layout() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "node_modules/x.js", b"module.exports = 1;");
    write(root, "src/a.ts", b"export const a = 1;");
    write(root, ".env", b"SECRET=1");
    write(root, "img.png", b"\x89PNG");

    let result = treepack(TreepackBuilder::new(root).build()).unwrap();

    assert!(result.tree.find("node_modules").is_none());
    assert!(result.tree.find(".env").is_none());
    assert_eq!(verdict_of(&result.tree, "img.png"), Some(Verdict::Soft));
    assert_eq!(verdict_of(&result.tree, "src/a.ts"), Some(Verdict::Include));

    assert_eq!(result.files.len(), 1);
    assert!(result.files[0].record.path.ends_with("src/a.ts"));
    assert_eq!(result.files[0].content, "export const a = 1;");
    assert!(result.stats.technologies.contains("TypeScript"));
    // Soft files still count; hard ones do not.
    assert_eq!(result.stats.total_files, 2);
    assert_eq!(result.stats.extensions.get(".png"), Some(&1));
    assert!(!result.stats.extensions.contains_key(".js"));
    assert!(result.warnings.is_empty());
}

#[test]
fn integration_hard_filter_prunes_subtree() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "tests/foo.js", b"test()");
    write(root, "lib/tests/bar.js", b"test()");
    write(root, "lib/main.js", b"main()");

    let options = TreepackBuilder::new(root)
        .hard_filters(vec!["tests".into()])
        .build();
    let result = treepack(options).unwrap();

    assert!(result.tree.find("tests").is_none());
    assert!(result.tree.find("lib/tests").is_none());
    assert_eq!(result.files.len(), 1);
    assert!(result.files[0].record.path.ends_with("lib/main.js"));
    assert_eq!(result.stats.total_files, 1);
}

#[test]
fn integration_soft_directory_is_still_listed() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "docs/guide.md", b"# Guide");
    write(root, "docs/api/ref.md", b"# Ref");
    write(root, "README.md", b"# Readme");

    let options = TreepackBuilder::new(root)
        .soft_filters(vec!["docs".into()])
        .build();
    let result = treepack(options).unwrap();

    assert_eq!(verdict_of(&result.tree, "docs/guide.md"), Some(Verdict::Soft));
    assert_eq!(verdict_of(&result.tree, "docs/api/ref.md"), Some(Verdict::Soft));
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.stats.total_files, 3);
}

#[test]
fn integration_per_directory_gitignore_is_scoped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "subdir/.gitignore", b"foo.txt\n");
    write(root, "subdir/foo.txt", b"hidden");
    write(root, "subdir/keep.txt", b"kept");
    write(root, "other/foo.txt", b"visible");

    let options = TreepackBuilder::new(root)
        .repo_gitignore(IgnoreToggle::HARD)
        .build();
    let result = treepack(options).unwrap();

    assert!(result.tree.find("subdir/foo.txt").is_none());
    assert_eq!(verdict_of(&result.tree, "subdir/keep.txt"), Some(Verdict::Include));
    assert_eq!(verdict_of(&result.tree, "other/foo.txt"), Some(Verdict::Include));
}

#[test]
fn integration_soft_gitignore_keeps_listing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitignore", b"out/\n*.log\n");
    write(root, "out/bundle.js", b"bundle");
    write(root, "run.log", b"log");
    write(root, "main.py", b"print(1)");

    let options = TreepackBuilder::new(root)
        .repo_gitignore(IgnoreToggle::SOFT)
        .build();
    let result = treepack(options).unwrap();

    assert_eq!(verdict_of(&result.tree, "out/bundle.js"), Some(Verdict::Soft));
    assert_eq!(verdict_of(&result.tree, "run.log"), Some(Verdict::Soft));
    assert_eq!(result.files.len(), 1);
    assert!(result.stats.technologies.contains("Python"));
}

#[test]
fn integration_idempotent() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "b.rs", b"fn b() {}");
    write(root, "a/c.rs", b"fn c() {}");
    write(root, "a/d.bin", b"\0\0\0");

    let first = treepack(TreepackBuilder::new(root).build()).unwrap();
    let second = treepack(TreepackBuilder::new(root).build()).unwrap();
    assert_eq!(first.tree, second.tree);
    assert_eq!(first.stats, second.stats);
    let names: Vec<_> = first.files.iter().map(|f| f.record.relative.clone()).collect();
    assert_eq!(names, vec![Path::new("a/c.rs"), Path::new("b.rs")]);
}

#[test]
fn integration_root_must_be_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "x").unwrap();
    let err = treepack(TreepackBuilder::new(&file).build()).unwrap_err();
    assert!(matches!(err, TreepackError::ConfigInvalid { .. }));
    let err = treepack(TreepackBuilder::new(dir.path().join("missing")).build()).unwrap_err();
    assert!(matches!(err, TreepackError::ConfigInvalid { .. }));
}

#[test]
fn integration_max_depth_and_size_limit() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "top.txt", &vec![b'A'; 5000]);
    write(root, "one/two/deep.txt", b"deep");

    let options = TreepackBuilder::new(root)
        .max_depth(2)
        .file_size_limit(Some(100))
        .build();
    let result = treepack(options).unwrap();

    assert!(result.tree.find("one/two").is_some());
    assert!(result.tree.find("one/two/deep.txt").is_none());
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].content, TOO_LARGE_PLACEHOLDER);
}

#[test]
fn integration_text_report() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "src/a.ts", b"export const a = 1;");
    write(root, "logo.svg", b"<svg/>");

    let result = treepack(TreepackBuilder::new(root).build()).unwrap();
    let report = output::format_result(&result, OutputFormat::Text, false).unwrap();

    assert!(report.starts_with("Project Overview\n"));
    assert!(report.contains("Total Files: 2\n"));
    assert!(report.contains("  - TypeScript\n"));
    assert!(report.contains("├── logo.svg (6 B) ✗\n"));
    assert!(report.contains("└── src/\n    └── a.ts (19 B) ✓\n"));
    assert!(report.contains("File Name: src/a.ts\nSize: 19 B\nCode:\nexport const a = 1;\n"));

    let json = output::format_result(&result, OutputFormat::Json, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["stats"]["total_files"], 2);
}

#[test]
fn integration_child_gitignore_cannot_unexclude() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitignore", b"*.log\n");
    write(root, "sub/.gitignore", b"!keep.log\n");
    write(root, "sub/keep.log", b"kept?");
    write(root, "sub/notes.txt", b"notes");

    let options = TreepackBuilder::new(root)
        .repo_gitignore(IgnoreToggle::HARD)
        .build();
    let result = treepack(options).unwrap();

    assert!(result.tree.find("sub/keep.log").is_none());
    assert_eq!(verdict_of(&result.tree, "sub/notes.txt"), Some(Verdict::Include));
    assert_eq!(result.stats.total_files, 1);
}

#[test]
fn integration_hard_gitignore_directory_rule_prunes() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitignore", b"out/\n");
    write(root, "out/bundle.js", b"bundle");
    write(root, "out/nested/chunk.js", b"chunk");
    write(root, "main.py", b"print(1)");

    let options = TreepackBuilder::new(root)
        .repo_gitignore(IgnoreToggle::HARD)
        .build();
    let result = treepack(options).unwrap();

    assert!(result.tree.find("out").is_none());
    assert_eq!(result.stats.total_files, 1);
    assert!(!result.stats.extensions.contains_key(".js"));
    assert_eq!(result.files.len(), 1);
}

#[test]
fn integration_global_gitignore_is_applied() {
    let dir = tempdir().unwrap();
    let global = dir.path().join("global_ignore");
    fs::write(&global, "*.tmp\n").unwrap();
    let root = dir.path().join("proj");
    write(&root, "scratch.tmp", b"tmp");
    write(&root, "lib.rs", b"pub fn f() {}");

    let hard = TreepackBuilder::new(&root)
        .global_gitignore(IgnoreToggle::HARD)
        .global_gitignore_path(&global)
        .build();
    let result = treepack(hard).unwrap();
    assert!(result.tree.find("scratch.tmp").is_none());
    assert_eq!(verdict_of(&result.tree, "lib.rs"), Some(Verdict::Include));
    assert!(result.warnings.is_empty());

    let soft = TreepackBuilder::new(&root)
        .global_gitignore(IgnoreToggle::SOFT)
        .global_gitignore_path(&global)
        .build();
    let result = treepack(soft).unwrap();
    assert_eq!(verdict_of(&result.tree, "scratch.tmp"), Some(Verdict::Soft));
    assert_eq!(result.files.len(), 1);
}

#[cfg(unix)]
#[test]
fn integration_dangling_link_warns_and_siblings_survive() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.txt", b"a");
    write(root, "z.txt", b"z");
    symlink(root.join("missing_target"), root.join("m_broken")).unwrap();
    symlink(root.join("missing_target"), root.join(".hidden_broken")).unwrap();

    let result = treepack(TreepackBuilder::new(root).build()).unwrap();

    assert_eq!(result.files.len(), 2);
    assert!(result.tree.find("m_broken").is_none());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::EntryStatFailed);
    assert!(result.warnings[0].path.ends_with("m_broken"));
}

#[cfg(unix)]
#[test]
fn integration_links_are_classified_before_resolving() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "real/x.txt", b"x");
    write(root, "notes.md", b"# notes");
    symlink(root.join("real"), root.join("linked")).unwrap();
    symlink(root.join("notes.md"), root.join("alias.md")).unwrap();
    symlink(root.join("gone"), root.join("skipme")).unwrap();

    let options = TreepackBuilder::new(root)
        .hard_filters(vec!["skipme".into()])
        .build();
    let result = treepack(options).unwrap();

    assert!(result.warnings.is_empty());
    assert_eq!(
        result.tree.find("linked"),
        Some(&TreeNode::Directory {
            name: "linked".into(),
            children: Vec::new(),
        })
    );
    assert_eq!(verdict_of(&result.tree, "alias.md"), Some(Verdict::Include));
    let names: Vec<_> = result.files.iter().map(|f| f.record.relative.clone()).collect();
    assert_eq!(
        names,
        vec![Path::new("alias.md"), Path::new("notes.md"), Path::new("real/x.txt")]
    );
}
