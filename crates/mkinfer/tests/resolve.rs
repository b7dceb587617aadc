//! End-to-end resolution through the public facade, driving the built-in
//! rule table the way a build driver would.

use mkinfer::core::{builtin, error::ErrorClass};
use mkinfer::prelude::*;
use std::{collections::BTreeSet, rc::Rc, time::SystemTime};

///
/// FileSet
///
/// Mtime oracle backed by a fixed set of file names.
///

struct FileSet(BTreeSet<String>);

impl FileSet {
    fn new(files: &[&str]) -> Self {
        Self(files.iter().map(|file| (*file).to_owned()).collect())
    }
}

impl MtimeOracle for FileSet {
    fn probe(&self, name: &str) -> Option<Timestamp> {
        self.0
            .contains(name)
            .then(|| Timestamp::new(SystemTime::UNIX_EPOCH))
    }
}

#[test]
fn builtin_rules_compile_c_sources() {
    let mut names = NameRegistry::new();
    let config = Config::default();
    builtin::install(&mut names, &config).expect("install builtin table");

    let target = names.intern("prog.o");
    let disk = FileSet::new(&["prog.c"]);
    let mut rule = Rule::default();
    let found = Resolver::new(&mut names, &config, &disk)
        .resolve(target, Some(&mut rule))
        .expect("resolution must not fail");

    let prereq = found.expect("prog.c must be inferred");
    assert_eq!(names.name(prereq), "prog.c");
    assert_eq!(rule.deps, vec![prereq]);
    assert_eq!(rule.commands.as_slice(), ["$(CC) $(CFLAGS) -c $<"]);
}

#[test]
fn earlier_suffix_declarations_win_ties() {
    let mut names = NameRegistry::new();
    let config = Config::default();
    builtin::install(&mut names, &config).expect("install builtin table");

    // Both a C and a yacc source exist; `.c` is declared before `.y`.
    let target = names.intern("x.o");
    let disk = FileSet::new(&["x.c", "x.y"]);
    let found = Resolver::new(&mut names, &config, &disk)
        .resolve(target, None)
        .expect("resolution must not fail");

    assert_eq!(names.name(found.expect("a prerequisite")), "x.c");
}

#[test]
fn chained_inference_reaches_through_yacc() {
    let mut names = NameRegistry::new();
    let config = Config::default();
    builtin::install(&mut names, &config).expect("install builtin table");

    // Only prog.y exists: prog is linked from prog.c, which yacc produces.
    let target = names.intern("prog");
    let disk = FileSet::new(&["prog.y"]);
    let mut rule = Rule::default();
    let found = Resolver::new(&mut names, &config, &disk)
        .resolve(target, Some(&mut rule))
        .expect("resolution must not fail");

    let prereq = found.expect("chained inference must succeed");
    assert_eq!(names.name(prereq), "prog.c");
    assert_eq!(
        rule.commands.as_slice(),
        ["$(CC) $(CFLAGS) $(LDFLAGS) -o $@ $<"]
    );
}

#[test]
fn posix_mode_stops_the_chain() {
    let mut names = NameRegistry::new();
    let config = Config {
        posix: true,
        ..Config::default()
    };
    builtin::install(&mut names, &config).expect("install builtin table");

    let target = names.intern("prog");
    let disk = FileSet::new(&["prog.y"]);
    let found = Resolver::new(&mut names, &config, &disk)
        .resolve(target, None)
        .expect("resolution must not fail");

    assert!(found.is_none());
}

#[test]
fn archive_members_use_the_library_rule() {
    let mut names = NameRegistry::new();
    let config = Config::default();
    builtin::install(&mut names, &config).expect("install builtin table");

    let target = names.intern("libutil.a(bar.o)");
    let disk = FileSet::new(&["bar.c"]);
    let mut rule = Rule::default();
    let found = Resolver::new(&mut names, &config, &disk)
        .resolve(target, Some(&mut rule))
        .expect("resolution must not fail");

    assert_eq!(names.name(found.expect("member source")), "bar.c");
    assert_eq!(
        rule.commands.as_slice(),
        [
            "$(CC) -c $(CFLAGS) $<",
            "$(AR) $(ARFLAGS) $@ $*.o",
            "rm -f $*.o",
        ]
    );
}

#[test]
fn unknown_suffixes_resolve_to_nothing() {
    let mut names = NameRegistry::new();
    let config = Config::default();
    builtin::install(&mut names, &config).expect("install builtin table");

    let target = names.intern("archive.zip");
    let disk = FileSet::new(&["archive.c"]);
    let found = Resolver::new(&mut names, &config, &disk)
        .resolve(target, None)
        .expect("resolution must not fail");

    assert!(found.is_none());
}

#[test]
fn default_macros_come_back_from_install() {
    let mut names = NameRegistry::new();
    let macros =
        builtin::install(&mut names, &Config::default()).expect("install builtin table");

    assert_eq!(macros.get("CC").map(String::as_str), Some("c99"));
    assert_eq!(macros.get("LDFLAGS").map(String::as_str), Some(""));
}

#[test]
fn suppressed_builtin_rules_leave_nothing_to_infer() {
    let mut names = NameRegistry::new();
    let config = Config {
        no_builtin_rules: true,
        ..Config::default()
    };
    let macros = builtin::install(&mut names, &config).expect("install macro table");
    assert_eq!(macros.get("CC").map(String::as_str), Some("c99"));

    let target = names.intern("prog.o");
    let disk = FileSet::new(&["prog.c"]);
    let found = Resolver::new(&mut names, &config, &disk)
        .resolve(target, None)
        .expect("resolution must not fail");

    assert!(found.is_none());
}

#[cfg(feature = "pattern-rules")]
#[test]
fn pattern_suffixes_extend_the_builtin_table() {
    let mut names = NameRegistry::new();
    let config = Config::default();
    builtin::install(&mut names, &config).expect("install builtin table");

    // A loaded makefile appends a pattern suffix and its rule.
    let suffixes = names.find(SUFFIXES).expect(".SUFFIXES installed");
    let pattern = names.intern("lib%.a");
    names.push_rule(suffixes, Rule::new(vec![pattern], Rc::new(Commands::default())));
    names.push_rule(
        pattern,
        Rule::new(
            Vec::new(),
            Rc::new(Commands::new(vec!["$(AR) $(ARFLAGS) $@ $?".to_owned()])),
        ),
    );

    let target = names.intern("game");
    let disk = FileSet::new(&["libgame.a"]);
    let found = Resolver::new(&mut names, &config, &disk)
        .resolve(target, None)
        .expect("resolution must not fail");

    assert_eq!(names.name(found.expect("library inferred")), "libgame.a");
}

#[cfg(feature = "pattern-rules")]
#[test]
fn malformed_patterns_surface_as_invariant_violations() {
    let mut names = NameRegistry::new();
    let suffixes = names.intern(SUFFIXES);
    let pattern = names.intern("%x%.a");
    names.push_rule(suffixes, Rule::new(vec![pattern], Rc::new(Commands::default())));
    names.push_rule(
        pattern,
        Rule::new(
            Vec::new(),
            Rc::new(Commands::new(vec!["bogus".to_owned()])),
        ),
    );

    let target = names.intern("y");
    let config = Config::default();
    let disk = FileSet::new(&[]);
    let err = Resolver::new(&mut names, &config, &disk)
        .resolve(target, None)
        .expect_err("two placeholders must fail");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
}
