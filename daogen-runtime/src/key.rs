//! Identity values flattened into statement parameters.

use crate::json::Timestamp;
use crate::value::SqlValue;

/// An identity that can be matched against primary key columns.
pub trait KeyValues {
    /// One value per key column, in key order.
    fn key_values(&self) -> Vec<SqlValue>;
}

macro_rules! scalar_key {
    ($($ty:ty),*) => {
        $(
            impl KeyValues for $ty {
                fn key_values(&self) -> Vec<SqlValue> {
                    vec![SqlValue::from(self.clone())]
                }
            }
        )*
    };
}

scalar_key!(
    bool,
    i8,
    i16,
    i32,
    i64,
    f32,
    f64,
    String,
    Vec<u8>,
    Timestamp
);

macro_rules! tuple_key {
    ($($name:ident),+) => {
        impl<$($name: KeyValues),+> KeyValues for ($($name,)+) {
            #[allow(non_snake_case)]
            fn key_values(&self) -> Vec<SqlValue> {
                let ($($name,)+) = self;
                let mut values = Vec::new();
                $(values.extend($name.key_values());)+
                values
            }
        }
    };
}

tuple_key!(A, B);
tuple_key!(A, B, C);
tuple_key!(A, B, C, D);
tuple_key!(A, B, C, D, E);
tuple_key!(A, B, C, D, E, F);
tuple_key!(A, B, C, D, E, F, G);
tuple_key!(A, B, C, D, E, F, G, H);
tuple_key!(A, B, C, D, E, F, G, H, I);
tuple_key!(A, B, C, D, E, F, G, H, I, J);
tuple_key!(A, B, C, D, E, F, G, H, I, J, K);
tuple_key!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Untyped identity for keys wider than the typed tuple limit.
///
/// Per-column typing is lost; values must be supplied in key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordKey(pub Vec<SqlValue>);

impl RecordKey {
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl KeyValues for RecordKey {
    fn key_values(&self) -> Vec<SqlValue> {
        self.0.clone()
    }
}
