use crate::{
    config::Config,
    error::{EngineError, ErrorClass, ErrorOrigin},
    names::{NameId, NameRegistry},
    rules::{Commands, Rule},
};
use derive_more::Deref;
use std::{collections::HashMap, rc::Rc};
use thiserror::Error as ThisError;

/// Default suffix list and transformation rules, installed at startup.
/// Data, not algorithm: the resolver never interprets this text.
pub const BUILTIN_RULES: &str = ".SUFFIXES:.o .c .y .l .a .sh .f\n\
    .c.o:\n\
    \t$(CC) $(CFLAGS) -c $<\n\
    .f.o:\n\
    \t$(FC) $(FFLAGS) -c $<\n\
    .y.o:\n\
    \t$(YACC) $(YFLAGS) $<\n\
    \t$(CC) $(CFLAGS) -c y.tab.c\n\
    \trm -f y.tab.c\n\
    \tmv y.tab.o $@\n\
    .y.c:\n\
    \t$(YACC) $(YFLAGS) $<\n\
    \tmv y.tab.c $@\n\
    .l.o:\n\
    \t$(LEX) $(LFLAGS) $<\n\
    \t$(CC) $(CFLAGS) -c lex.yy.c\n\
    \trm -f lex.yy.c\n\
    \tmv lex.yy.o $@\n\
    .l.c:\n\
    \t$(LEX) $(LFLAGS) $<\n\
    \tmv lex.yy.c $@\n\
    .c.a:\n\
    \t$(CC) -c $(CFLAGS) $<\n\
    \t$(AR) $(ARFLAGS) $@ $*.o\n\
    \trm -f $*.o\n\
    .f.a:\n\
    \t$(FC) -c $(FFLAGS) $<\n\
    \t$(AR) $(ARFLAGS) $@ $*.o\n\
    \trm -f $*.o\n\
    .c:\n\
    \t$(CC) $(CFLAGS) $(LDFLAGS) -o $@ $<\n\
    .f:\n\
    \t$(FC) $(FFLAGS) $(LDFLAGS) -o $@ $<\n\
    .sh:\n\
    \tcp $< $@\n\
    \tchmod a+x $@\n";

/// Default macro assignments. Values are stored unexpanded; macro expansion
/// belongs to the makefile stage.
pub const BUILTIN_MACROS: &str = "CC=c99\n\
    CFLAGS=-O1\n\
    FC=fort77\n\
    FFLAGS=-O1\n\
    YACC=yacc\n\
    YFLAGS=\n\
    LEX=lex\n\
    LFLAGS=\n\
    AR=ar\n\
    ARFLAGS=-rv\n\
    LDFLAGS=\n";

///
/// BuiltinError
///
/// The built-in table is trusted data; a line that fits no form is an
/// invariant violation, not a recoverable parse error.
///

#[derive(Debug, ThisError)]
pub enum BuiltinError {
    #[error("command line outside any rule in the built-in table: '{line}'")]
    DanglingCommand { line: String },

    #[error("unrecognized line in the built-in table: '{line}'")]
    Unrecognized { line: String },
}

impl BuiltinError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::InvariantViolation
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Builtin
    }
}

impl From<BuiltinError> for EngineError {
    fn from(err: BuiltinError) -> Self {
        Self::new(err.class(), err.origin(), err.to_string())
    }
}

///
/// Macros
///
/// Default macro table keyed by macro name.
///

#[derive(Clone, Debug, Default, Deref)]
pub struct Macros(HashMap<String, String>);

/// Iterate the built-in tables line by line, the way the startup loader
/// consumes them. With `no_builtin_rules` the rule text is skipped and only
/// the default macros remain.
pub fn builtin_lines(config: &Config) -> impl Iterator<Item = &'static str> {
    let rules = if config.no_builtin_rules {
        ""
    } else {
        BUILTIN_RULES
    };
    rules.lines().chain(BUILTIN_MACROS.lines())
}

/// Install the built-in suffix list, transformation rules, and default
/// macros into `names`; returns the macro table.
pub fn install(names: &mut NameRegistry, config: &Config) -> Result<Macros, EngineError> {
    install_lines(names, builtin_lines(config))
}

// One rule header plus the command lines gathered so far.
struct OpenRule {
    target: NameId,
    deps: Vec<NameId>,
    commands: Vec<String>,
}

fn install_lines<'a>(
    names: &mut NameRegistry,
    lines: impl Iterator<Item = &'a str>,
) -> Result<Macros, EngineError> {
    let mut macros = HashMap::new();
    let mut open: Option<OpenRule> = None;

    for line in lines {
        if line.is_empty() {
            continue;
        }
        if let Some(command) = line.strip_prefix('\t') {
            let Some(rule) = open.as_mut() else {
                return Err(BuiltinError::DanglingCommand {
                    line: line.to_owned(),
                }
                .into());
            };
            rule.commands.push(command.to_owned());
            continue;
        }
        // An '=' before any ':' makes the line a macro assignment.
        let eq = line.find('=');
        let colon = line.find(':');
        match (eq, colon) {
            (Some(at), until) if until.is_none_or(|c| at < c) => {
                macros.insert(line[..at].to_owned(), line[at + 1..].to_owned());
            }
            (_, Some(at)) => {
                flush(names, open.take());
                let target = names.intern(&line[..at]);
                let deps = line[at + 1..]
                    .split_whitespace()
                    .map(|dep| names.intern(dep))
                    .collect();
                open = Some(OpenRule {
                    target,
                    deps,
                    commands: Vec::new(),
                });
            }
            _ => {
                return Err(BuiltinError::Unrecognized {
                    line: line.to_owned(),
                }
                .into());
            }
        }
    }
    flush(names, open.take());

    Ok(Macros(macros))
}

fn flush(names: &mut NameRegistry, open: Option<OpenRule>) {
    if let Some(rule) = open {
        names.mark_target(rule.target);
        names.push_rule(
            rule.target,
            Rule::new(rule.deps, Rc::new(Commands::new(rule.commands))),
        );
    }
}
