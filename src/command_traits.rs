//! Type-safe command argument contracts.
//!
//! Every external program aixsuma runs (`suma`, `oslevel`,
//! `install_all_updates`) is described by a struct implementing `ToolArgs`.
//! The struct definition is the contract: flag spelling lives in exactly one
//! place and the runner never sees raw string vectors built ad hoc.

/// Locale forced on every external command so output parsing is stable.
pub const C_LOCALE_ENV: &[(&str, &str)] = &[
    ("LANG", "C"),
    ("LC_ALL", "C"),
    ("LC_MESSAGES", "C"),
    ("LC_CTYPE", "C"),
];

/// Trait for typed command arguments.
///
/// # Contract
///
/// - `program()`: absolute path of the executable.
/// - `to_cli_args()`: arguments exactly as the program expects them.
/// - `get_env_vars()`: environment overrides, the C locale by default.
///
/// # Example
///
/// ```ignore
/// use aixsuma::commands::system::InstallAllUpdatesArgs;
///
/// let args = InstallAllUpdatesArgs { target: "/usr/sys/inst.images".into() };
/// assert_eq!(args.to_cli_args(), ["-Yd", "/usr/sys/inst.images"]);
/// ```
pub trait ToolArgs {
    /// Absolute path of the program to run.
    fn program(&self) -> &'static str;

    /// Convert struct fields to command-line arguments.
    fn to_cli_args(&self) -> Vec<String>;

    /// Environment variables the command runs with.
    fn get_env_vars(&self) -> Vec<(String, String)> {
        C_LOCALE_ENV
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Space-joined command line, used in messages and logs.
    fn command_line(&self) -> String {
        let mut parts = vec![self.program().to_string()];
        parts.extend(self.to_cli_args());
        parts.join(" ")
    }
}
