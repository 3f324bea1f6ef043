#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    use assert_cmd::Command;
    use lox_lang::{CollectingReporter, Failure, Lox, Object};

    tests! {
        pprint in misc is OK
        "a 1 nil true"
        ""
    }

    tests! {
        clock in misc is OK
        "true"
    }

    #[test]
    fn final_expression_value_is_surfaced() {
        let mut output = Vec::new();
        let mut lox = Lox::new(&mut output);
        let value = lox.run("1 + 2 * 3;").unwrap();

        drop(lox);
        assert_eq!(value, Some(Object::from(7.0)));
        assert!(output.is_empty());
    }

    #[test]
    fn state_persists_across_runs() {
        let mut output = Vec::new();
        let mut lox = Lox::new(&mut output);
        lox.run("var a = 1;").unwrap();
        lox.run("fun next() { a = a + 1; return a; }").unwrap();
        let value = lox.run("next();").unwrap();

        drop(lox);
        assert_eq!(value, Some(Object::from(2.0)));
    }

    #[test]
    fn a_failed_line_does_not_poison_the_session() {
        let mut output = Vec::new();
        let mut lox = Lox::new(&mut output)
            .with_reporter(Box::new(CollectingReporter::default()));
        lox.run("var a = 5;").unwrap();
        assert_eq!(lox.run("a +;"), Err(Failure::Compile));
        let value = lox.run("a;").unwrap();

        drop(lox);
        assert_eq!(value, Some(Object::from(5.0)));
    }

    #[test]
    fn class_fields_can_be_disabled() {
        let mut output = Vec::new();
        let mut lox = Lox::new(&mut output)
            .with_class_fields(false)
            .with_reporter(Box::new(CollectingReporter::default()));

        assert_eq!(lox.run("class C {}\nC.value = 1;"), Err(Failure::Runtime));
    }

    #[test]
    fn static_errors_block_all_output() {
        Command::cargo_bin("lox").unwrap()
            .arg("tests/target/misc/static_error.lox")
            .assert()
            .stdout("")
            .stderr("[line 2] Error at '1': Expect variable name\n")
            .code(65);
    }

    #[test]
    fn runtime_errors_keep_earlier_output() {
        Command::cargo_bin("lox").unwrap()
            .arg("tests/target/misc/runtime_error_midway.lox")
            .assert()
            .stdout("before\n")
            .stderr("Operands must be two numbers or two strings.\n[line 2]\n")
            .code(70);
    }

    #[test]
    fn strict_profile_rejects_unused_locals() {
        Command::cargo_bin("lox").unwrap()
            .arg("tests/target/misc/unused_local.lox")
            .assert()
            .stdout("")
            .stderr("[line 2] Error at 'unused': Local variable is never used\n")
            .code(65);
    }

    #[test]
    fn non_strict_profile_allows_unused_locals() {
        Command::cargo_bin("lox").unwrap()
            .arg("-profile=non-strict")
            .arg("tests/target/misc/unused_local.lox")
            .assert()
            .stdout("done\n")
            .stderr("")
            .success();
    }

    #[test]
    fn missing_script_file_is_reported() {
        use predicates::prelude::*;

        Command::cargo_bin("lox").unwrap()
            .arg("tests/target/misc/does_not_exist.lox")
            .assert()
            .stderr(predicate::str::contains("Could not read"))
            .code(66);
    }

    #[test]
    fn too_many_arguments_is_cli_misuse() {
        Command::cargo_bin("lox").unwrap()
            .args(["one.lox", "two.lox"])
            .assert()
            .stderr("Usage: lox [script]\n")
            .code(64);
    }

    #[test]
    fn unknown_profile_is_cli_misuse() {
        Command::cargo_bin("lox").unwrap()
            .arg("-profile=fancy")
            .assert()
            .stderr("Usage: lox [script]\n")
            .code(64);
    }
}
