//! The eleven primitive type names usable in a JDDF `Type` form.
use std::{convert::TryFrom, fmt};

/// One of the eleven primitive type names accepted by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Boolean,
    Float32,
    Float64,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    String,
    Timestamp,
}

impl Type {
    /// Inclusive bounds for the integer-valued variants. `None` for the
    /// non-integer variants.
    pub(crate) fn integer_bounds(self) -> Option<(f64, f64)> {
        match self {
            Type::Int8 => Some((i8::min_value() as f64, i8::max_value() as f64)),
            Type::Uint8 => Some((u8::min_value() as f64, u8::max_value() as f64)),
            Type::Int16 => Some((i16::min_value() as f64, i16::max_value() as f64)),
            Type::Uint16 => Some((u16::min_value() as f64, u16::max_value() as f64)),
            Type::Int32 => Some((i32::min_value() as f64, i32::max_value() as f64)),
            Type::Uint32 => Some((u32::min_value() as f64, u32::max_value() as f64)),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => write!(f, "boolean"),
            Type::Float32 => write!(f, "float32"),
            Type::Float64 => write!(f, "float64"),
            Type::Int8 => write!(f, "int8"),
            Type::Uint8 => write!(f, "uint8"),
            Type::Int16 => write!(f, "int16"),
            Type::Uint16 => write!(f, "uint16"),
            Type::Int32 => write!(f, "int32"),
            Type::Uint32 => write!(f, "uint32"),
            Type::String => write!(f, "string"),
            Type::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl TryFrom<&str> for Type {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "boolean" => Ok(Type::Boolean),
            "float32" => Ok(Type::Float32),
            "float64" => Ok(Type::Float64),
            "int8" => Ok(Type::Int8),
            "uint8" => Ok(Type::Uint8),
            "int16" => Ok(Type::Int16),
            "uint16" => Ok(Type::Uint16),
            "int32" => Ok(Type::Int32),
            "uint32" => Ok(Type::Uint32),
            "string" => Ok(Type::String),
            "timestamp" => Ok(Type::Timestamp),
            _ => Err(()),
        }
    }
}
