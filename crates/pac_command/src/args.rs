//! Positional argument coercion

use pac_core::{InventoryError, InventoryId, ItemId, Result, Value};

/// Borrowed view of a command's positional arguments
#[derive(Debug, Clone, Copy)]
pub struct Args<'a>(&'a [Value]);

impl<'a> Args<'a> {
    /// Wrap an argument slice
    pub fn new(values: &'a [Value]) -> Self {
        Self(values)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no arguments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw argument
    pub fn value(&self, index: usize) -> Result<&'a Value> {
        self.0.get(index).ok_or(InventoryError::InvalidArgument {
            index,
            expected: "value",
            found: "nothing",
        })
    }

    /// Raw argument, Null when absent
    pub fn value_or_null(&self, index: usize) -> Value {
        self.0.get(index).cloned().unwrap_or_default()
    }

    pub fn inventory_id(&self, index: usize) -> Result<InventoryId> {
        self.coerce(index, "id", |v| v.to_uuid().map(InventoryId::from_uuid))
    }

    pub fn item_id(&self, index: usize) -> Result<ItemId> {
        self.coerce(index, "id", |v| v.to_uuid().map(ItemId::from_uuid))
    }

    pub fn int(&self, index: usize) -> Result<i64> {
        self.coerce(index, "int", Value::to_int)
    }

    pub fn u32(&self, index: usize) -> Result<u32> {
        self.coerce(index, "u32", Value::to_u32)
    }

    pub fn bool(&self, index: usize) -> Result<bool> {
        self.coerce(index, "bool", Value::to_bool)
    }

    pub fn handle(&self, index: usize) -> Result<u64> {
        self.coerce(index, "handle", Value::to_handle)
    }

    /// String argument; every present value has a textual form
    pub fn string(&self, index: usize) -> Result<String> {
        self.value(index).map(Value::to_string_value)
    }

    fn coerce<T>(
        &self,
        index: usize,
        expected: &'static str,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T> {
        let value = self.0.get(index).ok_or(InventoryError::InvalidArgument {
            index,
            expected,
            found: "nothing",
        })?;
        convert(value).ok_or(InventoryError::InvalidArgument {
            index,
            expected,
            found: value.type_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pac_core::ErrorKind;

    #[test]
    fn test_coercions() {
        let inv = InventoryId::new();
        let values = vec![
            Value::from(inv),
            Value::from(inv.to_string()),
            Value::Int(-1),
            Value::from("true"),
        ];
        let args = Args::new(&values);

        assert_eq!(args.inventory_id(0).unwrap(), inv);
        assert_eq!(args.inventory_id(1).unwrap(), inv);
        assert_eq!(args.u32(2).unwrap(), u32::MAX);
        assert!(args.bool(3).unwrap());
        assert_eq!(args.string(2).unwrap(), "-1");
    }

    #[test]
    fn test_missing_and_mistyped() {
        let values = vec![Value::Float(1.5)];
        let args = Args::new(&values);

        let err = args.item_id(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            err,
            InventoryError::InvalidArgument {
                index: 0,
                expected: "id",
                found: "float",
            }
        );

        assert!(args.string(1).is_err());
        assert!(args.value_or_null(4).is_null());
    }
}
