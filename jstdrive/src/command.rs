use crate::run::RunError;

/// Platform path-list separator used when joining `-cp` search path entries.
pub const SEARCH_PATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Flag(String),
    Value(String, String),
}

impl Arg {
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag(name.into())
    }

    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Value(name.into(), value.into())
    }
}

/// Ordered description of one child-process invocation: the host program,
/// pre-invocation tuning options, an optional `-cp` search path, and the
/// runner arguments in insertion order. Nothing is reordered, deduplicated,
/// or dropped once added; `render()` is a pure function of accumulated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    host_options: Vec<String>,
    search_path: Option<String>,
    args: Vec<Arg>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Result<Self, RunError> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(RunError::Configuration {
                message: "command program must not be empty".to_string(),
            });
        }
        Ok(Self {
            program,
            host_options: vec![],
            search_path: None,
            args: vec![],
        })
    }

    pub fn host_option(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !token.trim().is_empty() {
            self.host_options.push(token);
        }
    }

    /// Joins `entries` into a single `-cp` option value. Zero (or all-empty)
    /// entries emit no option at all; an empty search path is never rendered.
    pub fn search_path<I, S>(&mut self, entries: I, delimiter: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = entries
            .into_iter()
            .map(|e| e.as_ref().to_string())
            .filter(|e| !e.trim().is_empty())
            .collect::<Vec<_>>()
            .join(delimiter);
        self.search_path = (!joined.is_empty()).then_some(joined);
    }

    pub fn arg(&mut self, name: impl Into<String>) {
        self.args.push(Arg::flag(name));
    }

    pub fn arg_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.args.push(Arg::value(name, value));
    }

    pub fn push(&mut self, arg: Arg) {
        self.args.push(arg);
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The flattened command:
    /// `[program, host_options..., "-cp", search_path?, args...]`.
    pub fn render(&self) -> Vec<String> {
        let mut out = vec![self.program.clone()];
        out.extend(self.host_options.iter().cloned());
        if let Some(search_path) = &self.search_path {
            out.push("-cp".to_string());
            out.push(search_path.clone());
        }
        self.args.iter().for_each(|arg| match arg {
            Arg::Flag(name) => out.push(name.clone()),
            Arg::Value(name, value) => {
                out.push(name.clone());
                out.push(value.clone());
            }
        });
        out
    }

    pub fn display(&self) -> String {
        self.render().join(" ")
    }
}
