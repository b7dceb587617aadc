///
/// Config
///
/// Mode flags owned by the build driver and read by the engine.
///
/// Wildcard pattern support is a build-time toggle instead: the
/// `pattern-rules` cargo feature.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Strict POSIX mode; disables chained inference.
    pub posix: bool,

    /// Skip the built-in rule table at startup. Default macros are kept.
    pub no_builtin_rules: bool,
}
