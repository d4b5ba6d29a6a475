use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Represents optional field semantics in PUT/PATCH bodies.
///
/// - `Unchanged` → field absent from the body
/// - `SetToNull` → field present as `null`
/// - `SetToValue` → field present with a value
///
/// Use together with `#[serde(default)]` so absent fields stay `Unchanged`.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionField<T> {
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<T> Default for OptionField<T> {
    fn default() -> Self {
        OptionField::Unchanged
    }
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

impl<T: Serialize> Serialize for OptionField<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OptionField::SetToValue(value) => serializer.serialize_some(value),
            _ => serializer.serialize_none(),
        }
    }
}

impl<T> OptionField<T> {
    /// Convert to nested option:
    /// - `None` → unchanged
    /// - `Some(None)` → set null
    /// - `Some(Some(T))` → set to value
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(v) => Some(Some(v)),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn is_set_to_null(&self) -> bool {
        matches!(self, Self::SetToNull)
    }

    /// If `SetToValue`, returns a reference to inner value.
    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Only `SetToValue` carries data; `Unchanged` and `SetToNull` both flatten to `None`.
    pub fn flatten(self) -> Option<T> {
        match self {
            OptionField::SetToValue(v) => Some(v),
            _ => None
        }
    }
}

impl<T> From<Option<Option<T>>> for OptionField<T> {
    fn from(opt: Option<Option<T>>) -> Self {
        match opt {
            None => OptionField::Unchanged,
            Some(None) => OptionField::SetToNull,
            Some(Some(v)) => OptionField::SetToValue(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Default)]
    #[serde(default)]
    struct Patch {
        title: OptionField<String>,
        live_url: OptionField<String>,
        featured: OptionField<bool>,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let patch: Patch = serde_json::from_str(r#"{"live_url": null, "featured": true}"#).unwrap();
        assert_eq!(patch.title, OptionField::Unchanged);
        assert_eq!(patch.live_url, OptionField::SetToNull);
        assert_eq!(patch.featured, OptionField::SetToValue(true));
    }

    #[test]
    fn nested_option_round_trip() {
        let field: OptionField<u8> = Some(None).into();
        assert_eq!(field.into_option(), Some(None));
        let field: OptionField<u8> = None.into();
        assert!(field.is_unchanged());
    }
}
