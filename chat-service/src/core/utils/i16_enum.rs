#[macro_export]
macro_rules! impl_i16_enum {
    ($name:ident { $first:ident = $first_val:expr, $($variant:ident = $val:expr),* $(,)? }) => {
        impl From<i16> for $name {
            fn from(value: i16) -> Self {
                match value {
                    $first_val => $name::$first,
                    $( $val => $name::$variant, )*
                    _ => $name::$first,
                }
            }
        }

        impl From<$name> for i16 {
            fn from(value: $name) -> i16 {
                value as i16
            }
        }
    };
}
