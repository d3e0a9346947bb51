//! Typed variant keys
//!
//! Components usually know their variant groups at compile time. Declaring
//! them as enums with [`variant_enum!`] keeps selections and compound
//! conditions spelled correctly; the string-keyed API stays underneath.

/// A closed set of values for one variant group
pub trait VariantKey: Copy + 'static {
    /// Group name in the schema
    const GROUP: &'static str;

    /// This value's key in the group
    fn key(self) -> &'static str;

    /// Every value, in declaration order
    fn all() -> &'static [Self];
}

/// Declare a [`VariantKey`] enum
///
/// ```
/// strata_variants::variant_enum! {
///     /// Button size
///     pub enum Size("size") {
///         Sm => "sm",
///         Md => "md",
///         Lg => "lg",
///     }
/// }
///
/// use strata_variants::VariantKey;
/// assert_eq!(Size::GROUP, "size");
/// assert_eq!(Size::Md.key(), "md");
/// assert_eq!(Size::all().len(), 3);
/// ```
#[macro_export]
macro_rules! variant_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($group:literal) {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::VariantKey for $name {
            const GROUP: &'static str = $group;

            fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::VariantKey::key(*self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::variant_enum! {
        enum Intent("intent") {
            Primary => "primary",
            Danger => "danger",
        }
    }

    #[test]
    fn keys_and_order() {
        assert_eq!(Intent::GROUP, "intent");
        assert_eq!(Intent::all(), &[Intent::Primary, Intent::Danger]);
        assert_eq!(Intent::Danger.to_string(), "danger");
    }
}
