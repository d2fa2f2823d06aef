//! # Status Declaration Macro
//!
//! Both order-status representations are declared through [`order_status!`] so that
//! their member lists, wire names and parsing rules are generated from the same
//! template. Reconciliation between them still goes by member *name* (see
//! [`StatusRepr`](crate::status::StatusRepr)), which is what keeps a future
//! divergence between the two lists from turning into a silent mis-mapping.

/// Declares an order-status enum together with everything the reconciler needs.
///
/// Generated items:
/// - the enum itself, `Copy` and serde-(de)serializable by its SCREAMING_SNAKE_CASE name
/// - `ALL`, `as_str()`, `from_name()` and one `is_<member>()` predicate per member
/// - `Display`, `FromStr` (erroring with [`StatusError::Unknown`](crate::status::StatusError::Unknown)) and `Default`
/// - the [`StatusRepr`](crate::status::StatusRepr) implementation
///
/// The wire name listed for each member must be the SCREAMING_SNAKE_CASE form of
/// the variant, since serde derives its names from the variant.
///
/// ```rust,ignore
/// order_status! {
///     /// Status as seen by the warehouse.
///     pub enum OrderStatus as "warehouse" {
///         fallback Pending;
///         Pending => "PENDING",
///         Shipped => "SHIPPED",
///     }
/// }
/// ```
macro_rules! order_status {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $label:literal {
            fallback $fallback:ident;
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
            #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
            $vis enum $name {
                $( $(#[$vmeta])* $variant, )+
            }

            #[allow(dead_code)]
            impl $name {
                /// Every member, in declaration order.
                pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

                /// The exact, case-sensitive name of this member.
                pub const fn as_str(&self) -> &'static str {
                    match self {
                        $( $name::$variant => $wire, )+
                    }
                }

                /// Looks a member up by its exact name.
                pub fn from_name(name: &str) -> Option<Self> {
                    match name {
                        $( $wire => Some($name::$variant), )+
                        _ => None,
                    }
                }

                $(
                    pub const fn [<is_ $variant:snake>](&self) -> bool {
                        matches!(self, $name::$variant)
                    }
                )+
            }

            impl Default for $name {
                fn default() -> Self {
                    $name::$fallback
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl std::str::FromStr for $name {
                type Err = $crate::status::StatusError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $name::from_name(s).ok_or_else(|| $crate::status::StatusError::Unknown {
                        value: s.to_string(),
                    })
                }
            }

            impl $crate::status::StatusRepr for $name {
                const FALLBACK: Self = $name::$fallback;
                const LABEL: &'static str = $label;

                fn name(&self) -> &'static str {
                    self.as_str()
                }

                fn from_name(name: &str) -> Option<Self> {
                    $name::from_name(name)
                }
            }
        }
    };
}

pub(crate) use order_status;
