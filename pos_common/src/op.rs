//! Operator boilerplate for single-field tuple structs.

/// Forwards an operator trait implementation to the wrapped scalar of a newtype.
///
/// `op!(binary Rupees, Add, add)` expands to `impl Add for Rupees` that adds the inner
/// values and rewraps the result. `inplace` covers the `*Assign` traits and `unary`
/// covers `Neg`.
#[macro_export]
macro_rules! op {
    (binary $name:ident, $op:ident, $fn:ident) => {
        impl $op for $name {
            type Output = Self;

            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }
    };
    (inplace $name:ident, $op:ident, $fn:ident) => {
        impl $op for $name {
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0);
            }
        }
    };
    (unary $name:ident, $op:ident, $fn:ident) => {
        impl $op for $name {
            type Output = Self;

            fn $fn(self) -> Self::Output {
                Self(self.0.$fn())
            }
        }
    };
}
