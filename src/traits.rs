//! Traits

/// Types that can be plotted
pub trait Data {
    /// Convert the type into a double precision float
    fn f64(self) -> f64;
}

/// Overloaded `set` method
pub trait Set<T> {
    /// Sets some property
    fn set(self, value: T) -> Self;
}
