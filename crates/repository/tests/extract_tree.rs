use docsample_repository::{
    backup_sources, restore_sources, RepositoryError, SampleRepository, DEFAULT_BACKUP_EXCLUDES,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_project(root: &Path) {
    write(
        root,
        "src/sample/kotlin/IntSample.kt",
        r#"package test

class IntSample {
    fun addition() {
        val x = 1
        val y = 2
        check(x + y == 3)
    }

    fun subtraction(): Unit = check(2 - 1 == 1)
}
"#,
    );
    write(
        root,
        "src/sample/java/StringSample.java",
        r#"package test;

public class StringSample {
    public void concatenation() {
        System.out.println("a" + "b");
    }
}
"#,
    );
    write(
        root,
        "src/main/kotlin/Int.kt",
        "/** SAMPLE: [test.IntSample.addition] */\nfun addition(x: Int, y: Int): Int = x + y\n",
    );
}

#[test]
fn extraction_is_idempotent() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_project(root);
    let output = root.join("build/extracted");
    let repository = SampleRepository::default();

    let stats = repository.extract_into(&root.join("src"), &output).unwrap();
    assert_eq!(stats.samples, 3);
    assert_eq!(stats.languages.get("java"), Some(&1));

    let artifact = output.join("test/IntSample/addition.md");
    let first = fs::read(&artifact).unwrap();
    assert_eq!(
        String::from_utf8(first.clone()).unwrap(),
        "```kotlin\nval x = 1\nval y = 2\ncheck(x + y == 3)\n```\n"
    );
    assert_eq!(
        fs::read_to_string(output.join("test/StringSample/concatenation.md")).unwrap(),
        "```java\nSystem.out.println(\"a\" + \"b\");\n```\n"
    );

    repository.extract_into(&root.join("src"), &output).unwrap();
    assert_eq!(fs::read(&artifact).unwrap(), first);
}

#[test]
fn one_bad_sample_source_fails_the_whole_extraction() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_project(root);
    write(
        root,
        "src/sample/kotlin/LongSample.kt",
        "class LongSample {}\nclass OtherSample {}\n",
    );

    let output = root.join("build/extracted");
    let err = SampleRepository::default()
        .extract_into(&root.join("src"), &output)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Extraction(ref messages) if messages.len() == 1));
    assert!(!output.exists(), "nothing is written when extraction fails");
}

#[test]
fn backup_then_restore_reproduces_sources() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_project(root);
    let src = root.join("src");
    let backup = root.join("build/backup");
    let original = fs::read_to_string(src.join("main/kotlin/Int.kt")).unwrap();

    assert_eq!(backup_sources(&src, &backup, DEFAULT_BACKUP_EXCLUDES).unwrap(), 1);
    fs::write(src.join("main/kotlin/Int.kt"), "changed\n").unwrap();
    assert_eq!(restore_sources(&backup, &src).unwrap(), 1);

    assert_eq!(fs::read_to_string(src.join("main/kotlin/Int.kt")).unwrap(), original);
    assert!(src.join("sample/kotlin/IntSample.kt").is_file());
}
