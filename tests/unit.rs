use std::fs;
use std::path::Path;
use tempfile::tempdir;
use treepack::{
    BinaryDetection, Classifier, EntryKind, IgnoreResolver, IgnoreToggle, Reason, RuleStack,
    SniffFallback, TreepackBuilder, Verdict, WarningKind, is_binary,
};

fn file_verdict(classifier: &Classifier, path: &Path) -> Verdict {
    classifier.classify(path, EntryKind::File, &RuleStack::default())
}

#[test]
fn test_binary_sniff_ignores_extension() {
    let dir = tempdir().unwrap();
    let mut bytes = b"console.log('hi');".to_vec();
    bytes.push(0);
    fs::write(dir.path().join("looks_like.js"), &bytes).unwrap();
    fs::write(dir.path().join("plain.js"), "console.log('hi');").unwrap();
    let options = TreepackBuilder::new(dir.path()).build();
    let classifier = Classifier::new(&options);
    assert_eq!(
        file_verdict(&classifier, &dir.path().join("looks_like.js")),
        Verdict::Soft
    );
    assert_eq!(
        file_verdict(&classifier, &dir.path().join("plain.js")),
        Verdict::Include
    );
}

#[test]
fn test_binary_sniff_only_reads_prefix() {
    let dir = tempdir().unwrap();
    let mut bytes = vec![b'a'; 600];
    bytes.push(0);
    let path = dir.path().join("late_nul.txt");
    fs::write(&path, &bytes).unwrap();
    assert!(!is_binary(&path, BinaryDetection::Simple, 512).unwrap());
    assert!(is_binary(&path, BinaryDetection::Simple, 1024).unwrap());
}

#[test]
fn test_sniff_fallback_applies_on_unreadable_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("vanished.txt");
    let binary = TreepackBuilder::new(dir.path()).build();
    let classification =
        Classifier::new(&binary).explain(&missing, EntryKind::File, &RuleStack::default());
    assert_eq!(classification.verdict, Verdict::Soft);
    assert!(matches!(classification.reason, Some(Reason::SniffFailed(_))));

    let text = TreepackBuilder::new(dir.path())
        .sniff_fallback(SniffFallback::Text)
        .build();
    assert_eq!(
        file_verdict(&Classifier::new(&text), &missing),
        Verdict::Include
    );
}

#[test]
fn test_hard_beats_soft() {
    let dir = tempdir().unwrap();
    let options = TreepackBuilder::new(dir.path())
        .soft_filters(vec!["node_modules".into(), "generated".into()])
        .hard_filters(vec!["generated".into()])
        .build();
    let classifier = Classifier::new(&options);
    let stack = RuleStack::default();
    assert_eq!(
        classifier.classify(&dir.path().join("node_modules"), EntryKind::Directory, &stack),
        Verdict::Hard
    );
    assert_eq!(
        classifier.classify(&dir.path().join("src/generated"), EntryKind::Directory, &stack),
        Verdict::Hard
    );
}

#[test]
fn test_dotfiles_are_always_hard() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".env"), "SECRET=1").unwrap();
    let options = TreepackBuilder::new(dir.path())
        .soft_filters(vec![".env".into()])
        .build();
    let classification = Classifier::new(&options).explain(
        &dir.path().join(".env"),
        EntryKind::File,
        &RuleStack::default(),
    );
    assert_eq!(classification.verdict, Verdict::Hard);
    assert_eq!(classification.reason, Some(Reason::Dotfile));
}

#[test]
fn test_static_content_table_is_soft() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("img.png"), "not really a png").unwrap();
    let options = TreepackBuilder::new(dir.path()).build();
    let classification = Classifier::new(&options).explain(
        &dir.path().join("img.png"),
        EntryKind::File,
        &RuleStack::default(),
    );
    assert_eq!(classification.verdict, Verdict::Soft);
    assert_eq!(classification.reason, Some(Reason::StaticContent));
}

#[test]
fn test_root_location_does_not_trigger_tables() {
    let outer = tempdir().unwrap();
    let root = outer.path().join("build").join("project");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("main.rs"), "fn main() {}").unwrap();
    let options = TreepackBuilder::new(&root).build();
    assert_eq!(
        file_verdict(&Classifier::new(&options), &root.join("main.rs")),
        Verdict::Include
    );
}

#[test]
fn test_resolver_loads_specific_and_reports_missing_global() {
    let dir = tempdir().unwrap();
    let rules = dir.path().join("rules.ignore");
    fs::write(&rules, "*.log\n").unwrap();
    let options = TreepackBuilder::new(dir.path())
        .specific_gitignore_soft(Some(rules))
        .global_gitignore(IgnoreToggle::HARD)
        .global_gitignore_path(dir.path().join("no_such_global"))
        .build();
    let mut warnings = Vec::new();
    let stack = IgnoreResolver::new(&options).root_stack(dir.path(), &mut warnings);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::IgnoreFileUnreadable);

    fs::write(dir.path().join("app.log"), "line").unwrap();
    let classifier = Classifier::new(&options);
    assert_eq!(
        classifier.classify(&dir.path().join("app.log"), EntryKind::File, &stack),
        Verdict::Soft
    );
}

#[test]
fn test_descend_keeps_parent_stack_untouched() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join(".gitignore"), "foo.txt\n").unwrap();
    let options = TreepackBuilder::new(dir.path())
        .repo_gitignore(IgnoreToggle { hard: true, soft: true })
        .build();
    let resolver = IgnoreResolver::new(&options);
    let mut warnings = Vec::new();
    let parent = RuleStack::default();
    let child = resolver.descend(&sub, &parent, &mut warnings);
    assert!(warnings.is_empty());
    assert!(parent.is_empty());
    assert_eq!(child.len(treepack::Strength::Hard), 1);
    assert_eq!(child.len(treepack::Strength::Soft), 1);
}
