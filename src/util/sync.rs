#[cfg(feature = "threadsafe")]
pub(crate) mod inner {
    /// Reference-counted sharing of the document context.
    pub(crate) type Shared<T> = std::sync::Arc<T>;

    /// One-time initialization cell with single-writer construction.
    pub(crate) type Once<T> = std::sync::OnceLock<T>;
}

#[cfg(not(feature = "threadsafe"))]
pub(crate) mod inner {
    pub(crate) type Shared<T> = std::rc::Rc<T>;

    pub(crate) type Once<T> = std::cell::OnceCell<T>;
}

pub(crate) use inner::{Once, Shared};
