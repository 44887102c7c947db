//! Closed string enumerations used by node configs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An enumeration with a fixed table of literal spellings.
pub trait ContractEnum: Sized + Copy + 'static {
    /// Type name used in error messages, e.g. `KneeMode`.
    const NAME: &'static str;
    /// Every variant paired with its literal, in declaration order.
    const VARIANTS: &'static [(&'static str, Self)];
    /// Literals only, in the same order as [`Self::VARIANTS`].
    const LITERALS: &'static [&'static str];

    fn from_literal(literal: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(name, _)| *name == literal)
            .map(|(_, variant)| *variant)
    }

    fn literal(self) -> &'static str;
}

macro_rules! contract_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $literal:literal),+ $(,)?
        }
        default = $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $literal)]
                $variant,
            )+
        }

        impl ContractEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [(&'static str, Self)] = &[$(($literal, $name::$variant)),+];
            const LITERALS: &'static [&'static str] = &[$($literal),+];

            fn literal(self) -> &'static str {
                match self {
                    $($name::$variant => $literal,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.literal())
            }
        }
    };
}

contract_enum! {
    /// Signal level detection algorithm of a dynamics processor.
    DetectionMode {
        Max => "max",
        /// Root mean square.
        Rms => "rms",
    }
    default = Max
}

contract_enum! {
    /// Shape of the knee in a dynamics transfer function.
    KneeMode {
        Hard => "hard",
        Soft => "soft",
    }
    default = Hard
}

contract_enum! {
    /// Which frequencies a filter attenuates.
    FilterType {
        /// Attenuates frequencies above `highCutoff`.
        LowPass => "lowPass",
        /// Attenuates frequencies below `lowCutoff`.
        HighPass => "highPass",
        /// Attenuates outside `[lowCutoff, highCutoff]`.
        BandPass => "bandPass",
    }
    default = BandPass
}
