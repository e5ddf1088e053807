// Compiler Error Handling

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CompilerError {
    // Resolution errors
    UnknownActor(String),
    UnknownVariable(String),
    NoActiveEntity,

    // Control flow errors
    DuplicateLabel(String),
    StackImbalance(String, usize, usize), // label or construct, expected, found
    StackUnderflow(usize, usize),         // requested, depth
    UndefinedLabel(String),

    // Event tree errors
    NoEventCompiler,
    UnknownCommand(String, String),  // event id, command
    InvalidArgument(String, String), // command, message

    // Configuration and IO errors
    ConfigError(String),
    IOError(String),
}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompilerError::UnknownActor(id) => {
                write!(f, "Unknown actor '{}' in scene", id)
            }
            CompilerError::UnknownVariable(id) => {
                write!(f, "Unknown variable '{}'", id)
            }
            CompilerError::NoActiveEntity => {
                write!(f, "Self reference used in a script with no owning actor")
            }
            CompilerError::DuplicateLabel(name) => {
                write!(f, "Label '{}' defined more than once", name)
            }
            CompilerError::StackImbalance(target, expected, found) => {
                write!(
                    f,
                    "Stack imbalance at '{}': expected depth {}, found {}",
                    target, expected, found
                )
            }
            CompilerError::StackUnderflow(requested, depth) => {
                write!(
                    f,
                    "Stack underflow: cannot pop {} word(s) at depth {}",
                    requested, depth
                )
            }
            CompilerError::UndefinedLabel(name) => {
                write!(f, "Jump to label '{}' which is never defined", name)
            }
            CompilerError::NoEventCompiler => {
                write!(f, "Event branch given but no event compiler is configured")
            }
            CompilerError::UnknownCommand(id, command) => {
                write!(f, "Unknown command '{}' in event '{}'", command, id)
            }
            CompilerError::InvalidArgument(command, msg) => {
                write!(f, "Invalid argument for {}: {}", command, msg)
            }
            CompilerError::ConfigError(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            CompilerError::IOError(msg) => {
                write!(f, "IO error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CompilerError {}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IOError(err.to_string())
    }
}

impl From<toml::de::Error> for CompilerError {
    fn from(err: toml::de::Error) -> Self {
        CompilerError::ConfigError(err.to_string())
    }
}
