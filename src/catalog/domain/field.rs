//! Typed field tables for each source record family.
//!
//! Every dot-path in the catalog is bound to one of these enums before it is
//! read. The resolver matches on them exhaustively, so adding a field here
//! without teaching the resolver how to read it is a compile error.

use super::{SourcePath, SourceType};

/// Declares a field enum with its dot-path spelling and whether the field
/// holds a nested document that may be walked further.
macro_rules! field_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal, nested: $nested:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every field in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the dot-path segment naming this field.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Returns `true` when the field holds a nested document.
            #[must_use]
            pub const fn is_nested(self) -> bool {
                match self {
                    $(Self::$variant => $nested,)+
                }
            }

            /// Looks up a field by its dot-path segment.
            #[must_use]
            pub fn from_segment(segment: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|field| field.as_str() == segment)
            }
        }
    };
}

field_table! {
    /// Fields readable from a recipient record.
    RecipientField {
        /// Given name.
        FirstName => "firstName", nested: false;
        /// Family name.
        LastName => "lastName", nested: false;
        /// Phone number in E.164 form.
        PhoneNumber => "phoneNumber", nested: false;
        /// Contact e-mail address.
        Email => "email", nested: false;
        /// Free-form lead information document.
        LeadInfo => "leadInfo", nested: true;
    }
}

field_table! {
    /// Fields readable from the owner (operator) profile.
    OwnerField {
        /// Given name.
        FirstName => "firstName", nested: false;
        /// Family name.
        LastName => "lastName", nested: false;
        /// Name shown to recipients in messages.
        DisplayName => "displayName", nested: false;
        /// Contact e-mail address.
        Email => "email", nested: false;
        /// Business or practice name.
        BusinessName => "businessName", nested: false;
    }
}

field_table! {
    /// Fields readable from an agent configuration record.
    AgentConfigField {
        /// Internal agent name.
        AgentName => "agentName", nested: false;
        /// Business name presented by the agent.
        BusinessName => "businessName", nested: false;
        /// Operator name the agent introduces itself with.
        ConsultantDisplayName => "consultantDisplayName", nested: false;
        /// Short business description.
        BusinessDescription => "businessDescription", nested: false;
        /// Sending phone number.
        WhatsappNumber => "whatsappNumber", nested: false;
        /// Free-form positioning document (vision, mission, USP, ...).
        Profile => "profile", nested: true;
    }
}

field_table! {
    /// Values derived from the recipient record.
    ComputedField {
        /// Given and family name joined by a space.
        FullName => "fullName", nested: false;
        /// Upper-case initials of the given and family name.
        Initials => "initials", nested: false;
        /// Given name with the first letter upper-cased.
        GreetingName => "greetingName", nested: false;
    }
}

/// A field of one of the source record families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceField {
    /// Recipient record field.
    Recipient(RecipientField),
    /// Owner profile field.
    Owner(OwnerField),
    /// Agent configuration field.
    AgentConfig(AgentConfigField),
    /// Computed recipient value.
    Computed(ComputedField),
}

impl SourceField {
    fn bind(source_type: SourceType, segment: &str) -> Option<Self> {
        match source_type {
            SourceType::Recipient => RecipientField::from_segment(segment).map(Self::Recipient),
            SourceType::Owner => OwnerField::from_segment(segment).map(Self::Owner),
            SourceType::AgentConfig => {
                AgentConfigField::from_segment(segment).map(Self::AgentConfig)
            }
            SourceType::Computed => ComputedField::from_segment(segment).map(Self::Computed),
        }
    }

    const fn is_nested(self) -> bool {
        match self {
            Self::Recipient(field) => field.is_nested(),
            Self::Owner(field) => field.is_nested(),
            Self::AgentConfig(field) => field.is_nested(),
            Self::Computed(field) => field.is_nested(),
        }
    }
}

/// A dot-path bound to a typed field plus the nested segments to walk
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSelector {
    field: SourceField,
    nested: Vec<String>,
}

impl FieldSelector {
    /// Binds a path against the field table of `source_type`.
    ///
    /// Returns `None` when the head segment names no field, or when nested
    /// segments follow a scalar field.
    #[must_use]
    pub fn bind(source_type: SourceType, path: &SourcePath) -> Option<Self> {
        let field = SourceField::bind(source_type, path.head())?;
        let nested = path.tail();
        if !nested.is_empty() && !field.is_nested() {
            return None;
        }
        Some(Self {
            field,
            nested: nested.to_vec(),
        })
    }

    /// Returns the bound field.
    #[must_use]
    pub const fn field(&self) -> SourceField {
        self.field
    }

    /// Returns the segments to walk inside a nested field.
    #[must_use]
    pub fn nested(&self) -> &[String] {
        &self.nested
    }
}
