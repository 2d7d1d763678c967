//! Bounded floating-point value objects.
//!
//! Profile scores are stored as `f64` but must never leave their declared
//! range. `bounded_f64!` generates a newtype that clamps on construction
//! (including deserialization) and offers a validating `try_new`.

/// Declares a clamped `f64` newtype.
macro_rules! bounded_f64 {
    ($(#[$meta:meta])* $name:ident, field = $field:expr, min = $min:expr, max = $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "f64", into = "f64")]
        pub struct $name(f64);

        impl $name {
            /// Lowest accepted value.
            pub const MIN: f64 = $min;

            /// Highest accepted value.
            pub const MAX: f64 = $max;

            /// Creates a value, clamping into range. NaN maps to the minimum.
            pub fn new(value: f64) -> Self {
                if value.is_nan() {
                    Self(Self::MIN)
                } else {
                    Self(value.clamp(Self::MIN, Self::MAX))
                }
            }

            /// Creates a value, returning error if out of range or not finite.
            pub fn try_new(
                value: f64,
            ) -> Result<Self, $crate::domain::foundation::ValidationError> {
                if !value.is_finite() || value < Self::MIN || value > Self::MAX {
                    return Err($crate::domain::foundation::ValidationError::out_of_range(
                        $field,
                        Self::MIN,
                        Self::MAX,
                        value,
                    ));
                }
                Ok(Self(value))
            }

            /// Returns the raw value.
            pub fn value(&self) -> f64 {
                self.0
            }

            /// Returns a new value shifted by `delta`, clamped into range.
            pub fn adjusted_by(&self, delta: f64) -> Self {
                Self::new(self.0 + delta)
            }
        }

        impl From<f64> for $name {
            fn from(value: f64) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use bounded_f64;

bounded_f64!(
    /// A 0-100 score (comprehension, communication, adaptability, engagement).
    Score,
    field = "score",
    min = 0.0,
    max = 100.0
);

bounded_f64!(
    /// A 0-10 affinity or comfort rating inside neural patterns.
    Affinity,
    field = "affinity",
    min = 0.0,
    max = 10.0
);
