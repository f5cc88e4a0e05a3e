//! Types assigned to expressions during type checking.

use core::fmt;

/// C-minus has a single value type, `int`. Boolean values only arise
/// from comparisons and `Void` marks functions without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Integer,
    Boolean,
}

impl Type {
    pub fn is_integer(self) -> bool {
        matches!(self, Type::Integer)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, Type::Boolean)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Type::Void => "void",
            Type::Integer => "integer",
            Type::Boolean => "boolean",
        })
    }
}
