/// A value that is overwritten by input events and read on demand.
///
/// Observers run synchronously on every `set`, in registration order.
pub struct Param<T: Copy> {
    value: T,
    observers: Vec<Box<dyn FnMut(T)>>,
}

impl<T: Copy> Param<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            observers: Vec::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Replace the value (last write wins) and notify observers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for observer in self.observers.iter_mut() {
            observer(value);
        }
    }

    pub fn observe(&mut self, observer: impl FnMut(T) + 'static) {
        self.observers.push(Box::new(observer));
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Param")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}
