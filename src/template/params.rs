use std::collections::HashMap;

/// A value bound to a template variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A single string value
    Scalar(String),
    /// An ordered list of values
    List(Vec<String>),
    /// Ordered name/value pairs (an associative array in RFC 6570 terms)
    Assoc(Vec<(String, String)>),
}

impl ParamValue {
    /// Builds an associative value from name/value pairs
    pub fn assoc<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Assoc(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns false for values the RFC treats as undefined
    ///
    /// Empty lists and empty associative arrays are undefined; an empty
    /// string is defined.
    pub fn is_defined(&self) -> bool {
        match self {
            Self::Scalar(_) => true,
            Self::List(items) => !items.is_empty(),
            Self::Assoc(pairs) => !pairs.is_empty(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Scalar(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.to_string())
    }
}

macro_rules! scalar_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T: ToString> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Variables available to a template expansion
///
/// ```
/// use hal_navigator::template::Params;
///
/// let params = Params::new().with("id", 123).with("tags", vec!["a", "b"]);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the params with `name` bound to `value`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `name` to `value`, replacing any previous binding
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Looks up `name`, treating undefined values as absent
    pub(crate) fn defined(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name).filter(|value| value.is_defined())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
