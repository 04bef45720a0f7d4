//! Typed partial updates for answer sections.
//!
//! Every section has a companion `...Patch` struct whose fields are all
//! `Option<T>`. Applying a patch overwrites only the fields that are `Some`,
//! so a caller supplying a subset of a section never resets the rest.

/// A partial update for one answer section.
pub trait SectionPatch {
    type Section;

    /// Shallow-merges the present fields into `section`.
    fn apply_to(self, section: &mut Self::Section);

    /// True when no field is present.
    fn is_empty(&self) -> bool;
}

/// Reads a present JSON field, `null` included, as `Some`.
///
/// Lets a patch tell "clear this optional field" (`null`) apart from an
/// absent key.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Declares a patch struct for a section, with one builder method per field.
macro_rules! section_patch {
    (
        $(#[$meta:meta])*
        $patch:ident => $section:ty {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
        $(#[$meta])*
        #[serde(default, deny_unknown_fields)]
        pub struct $patch {
            $( $(#[$fmeta])* pub $field: Option<$ty>, )+
        }

        impl $patch {
            $(
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )+
        }

        impl $crate::profile::patch::SectionPatch for $patch {
            type Section = $section;

            fn apply_to(self, section: &mut $section) {
                $(
                    if let Some(value) = self.$field {
                        section.$field = value;
                    }
                )+
            }

            fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }
        }
    };
}

pub(crate) use section_patch;
