use thiserror::Error;

/// Errors raised while building a [`RouteTree`](crate::RouteTree)
///
/// These are integrator mistakes: they surface once, at startup, and are not
/// recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteConfigError {
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("duplicate route pattern `{pattern}` under `{parent}`")]
    DuplicateSibling { parent: String, pattern: String },

    #[error("parameter `${name}` is declared more than once in `{pattern}`")]
    DuplicateParam { name: String, pattern: String },

    #[error("route `{pattern}` refers to a parent that is not registered before it in this tree")]
    UnknownParent { pattern: String },

    #[error("index route `{pattern}` cannot have child routes")]
    IndexWithChildren { pattern: String },
}

/// Errors raised while turning a [`Link`](crate::Link) into an href
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("no route is registered for `{pattern}`")]
    UnknownRoute { pattern: String },

    #[error("missing value for parameter `${name}` of `{pattern}`")]
    MissingParam { pattern: String, name: String },

    #[error("`{pattern}` has no parameter `${name}`")]
    UnexpectedParam { pattern: String, name: String },

    #[error("parameter `${name}` of `{pattern}` cannot be empty")]
    EmptyParam { pattern: String, name: String },
}

/// Errors raised when reading a typed path parameter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("parameter `${name}` was not matched")]
    Missing { name: String },

    #[error("parameter `${name}` has invalid value `{value}`: {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },
}
