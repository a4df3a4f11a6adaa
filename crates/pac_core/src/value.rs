//! Loosely-typed values exchanged with other scripts
//!
//! Command arguments, command results and item tag values all use this
//! type. Conversions are lenient in the same way a dynamically typed caller
//! expects: numbers parse from strings, integers read as booleans, and so on.

use std::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::{InventoryId, ItemId, ScriptId};

/// Runtime value type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Value {
    /// Null/unit value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer (64-bit signed)
    Int(i64),
    /// Float (64-bit)
    Float(f64),
    /// String
    String(String),
    /// Identity token
    Id(Uuid),
    /// Raw native handle (texture pointers and the like)
    Handle(u64),
}

impl Value {
    /// Get type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Id(_) => "id",
            Self::Handle(_) => "handle",
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to convert to int
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(*f as i64),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::String(s) => s.trim().parse().ok(),
            Self::Handle(h) => i64::try_from(*h).ok(),
            _ => None,
        }
    }

    /// Try to convert to an unsigned 32-bit integer (content hashes)
    pub fn to_u32(&self) -> Option<u32> {
        match self {
            // Hashes are often passed through signed 32-bit slots
            Self::Int(n) if *n < 0 && *n >= i64::from(i32::MIN) => Some(*n as i32 as u32),
            _ => self.to_int().and_then(|n| u32::try_from(n).ok()),
        }
    }

    /// Try to convert to float
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to bool
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(n) => Some(*n != 0),
            Self::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Try to convert to an identity
    pub fn to_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Id(id) => Some(*id),
            Self::String(s) => Uuid::parse_str(s.trim()).ok(),
            _ => None,
        }
    }

    /// Try to convert to a raw native handle
    pub fn to_handle(&self) -> Option<u64> {
        match self {
            Self::Handle(h) => Some(*h),
            Self::Int(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Convert to string
    ///
    /// Null converts to the empty string; only compound-free scalars exist,
    /// so every value has a textual form.
    pub fn to_string_value(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s.clone(),
            Self::Id(id) => id.to_string(),
            Self::Handle(h) => format!("{:#x}", h),
        }
    }

    /// Borrow as str if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => (a - b).abs() < f64::EPSILON,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                (*a as f64 - b).abs() < f64::EPSILON
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Id(a), Self::Id(b)) => a == b,
            (Self::Handle(a), Self::Handle(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::String(s) => write!(f, "\"{}\"", s),
            other => write!(f, "{}", other.to_string_value()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Id(v)
    }
}

impl From<InventoryId> for Value {
    fn from(v: InventoryId) -> Self {
        Self::Id(v.as_uuid())
    }
}

impl From<ItemId> for Value {
    fn from(v: ItemId) -> Self {
        Self::Id(v.as_uuid())
    }
}

impl From<ScriptId> for Value {
    fn from(v: ScriptId) -> Self {
        Self::Id(v.as_uuid())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
