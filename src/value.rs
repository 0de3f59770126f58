//! Plot arguments

use std::borrow::Cow;

use crate::traits::Data;

/// An argument to a plot command: either gnuplot text or numeric samples
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Passed through verbatim, e.g. an expression like `sin(x)` or a modifier like `w lp`
    Text(String),
    /// One column of data, saved to a temporary data file before being referenced
    Samples(Vec<f64>),
}

impl Value {
    /// Returns the text, if this is a textual argument
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Samples(_) => None,
        }
    }

    /// Returns the samples, if this is an array-style argument
    pub fn as_samples(&self) -> Option<&[f64]> {
        match self {
            Value::Text(_) => None,
            Value::Samples(samples) => Some(samples),
        }
    }

    /// Collects anything iterable over plottable numbers into samples
    pub fn samples<I>(iter: I) -> Value
    where
        I: IntoIterator,
        I::Item: Data,
    {
        Value::Samples(iter.into_iter().map(Data::f64).collect())
    }
}

impl<'a> From<&'a str> for Value {
    fn from(text: &'a str) -> Value {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Value {
        Value::Text(text)
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    fn from(text: Cow<'a, str>) -> Value {
        Value::Text(text.into_owned())
    }
}

impl<'a, T> From<&'a [T]> for Value
where
    &'a T: Data,
{
    fn from(samples: &'a [T]) -> Value {
        Value::samples(samples)
    }
}

impl<'a, T> From<&'a Vec<T>> for Value
where
    &'a T: Data,
{
    fn from(samples: &'a Vec<T>) -> Value {
        Value::samples(samples)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Data,
{
    fn from(samples: Vec<T>) -> Value {
        Value::samples(samples)
    }
}

impl<T, const N: usize> From<[T; N]> for Value
where
    T: Data,
{
    fn from(samples: [T; N]) -> Value {
        Value::samples(samples)
    }
}

// Scalars are option values (`dashtype 0`, `lw 2.5`), not data
macro_rules! impl_scalar {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(scalar: $ty) -> Value {
                    Value::Text(scalar.to_string())
                }
            }
        )+
    }
}

impl_scalar!(f32, f64, i16, i32, i64, i8, isize, u16, u32, u64, u8, usize);

#[cfg(test)]
mod test {
    use super::Value;

    #[test]
    fn text_conversions() {
        assert_eq!(Value::from("sin(x)"), Value::Text("sin(x)".into()));
        assert_eq!(Value::from(String::from("w l")).as_text(), Some("w l"));
        assert_eq!(Value::from(0).as_text(), Some("0"));
        assert_eq!(Value::from(2.5).as_text(), Some("2.5"));
    }

    #[test]
    fn sample_conversions() {
        let ints = vec![0, 1, 3];
        assert_eq!(Value::from(&ints).as_samples(), Some(&[0., 1., 3.][..]));
        assert_eq!(Value::from(&ints[..2]).as_samples(), Some(&[0., 1.][..]));
        assert_eq!(Value::from([0.5f32, 1.]).as_samples(), Some(&[0.5, 1.][..]));
        assert_eq!(Value::from(ints).as_text(), None);
        assert_eq!(
            Value::samples((1..4).map(|i| i * 2)),
            Value::Samples(vec![2., 4., 6.])
        );
    }
}
