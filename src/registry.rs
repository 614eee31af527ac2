use std::collections::BTreeMap;

/// Something that holds a browser resource until released.
pub trait Release {
    fn release(&mut self);
}

impl<R: Release + ?Sized> Release for Box<R> {
    fn release(&mut self) {
        (**self).release();
    }
}

/// Name-keyed handles, at most one per feature name.
///
/// Inserting under a name that is already taken releases the previous handle
/// first, so re-initializing a feature never leaves a duplicate running.
pub struct Registry<H: Release> {
    entries: BTreeMap<&'static str, H>,
}

impl<H: Release> Default for Registry<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<H: Release> Registry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when an earlier handle was replaced.
    pub fn insert(&mut self, name: &'static str, handle: H) -> bool {
        match self.entries.insert(name, handle) {
            Some(mut previous) => {
                previous.release();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(mut handle) => {
                handle.release();
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Releases every handle and empties the registry. Returns how many were
    /// released.
    pub fn release_all(&mut self) -> usize {
        let released = self.entries.len();
        for (_, mut handle) in std::mem::take(&mut self.entries) {
            handle.release();
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeHandle {
        released: Rc<Cell<u32>>,
    }

    impl Release for FakeHandle {
        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn handle() -> (FakeHandle, Rc<Cell<u32>>) {
        let released = Rc::new(Cell::new(0));
        (
            FakeHandle {
                released: Rc::clone(&released),
            },
            released,
        )
    }

    #[test]
    fn reinserting_a_name_releases_the_previous_handle() {
        let mut registry = Registry::new();
        let (first, first_released) = handle();
        let (second, second_released) = handle();

        assert!(!registry.insert("scroll", first));
        assert!(registry.insert("scroll", second));

        assert_eq!(registry.len(), 1);
        assert_eq!(first_released.get(), 1);
        assert_eq!(second_released.get(), 0);
    }

    #[test]
    fn release_all_releases_each_handle_once() {
        let mut registry = Registry::new();
        let (scroll, scroll_released) = handle();
        let (skills, skills_released) = handle();
        registry.insert("scroll", scroll);
        registry.insert("skills", skills);

        assert_eq!(registry.release_all(), 2);
        assert!(registry.is_empty());
        assert_eq!(scroll_released.get(), 1);
        assert_eq!(skills_released.get(), 1);

        assert_eq!(registry.release_all(), 0);
        assert_eq!(scroll_released.get(), 1);
    }

    #[test]
    fn remove_releases_only_the_named_handle() {
        let mut registry = Registry::new();
        let (typing, typing_released) = handle();
        let (loading, loading_released) = handle();
        registry.insert("typing", typing);
        registry.insert("loading", loading);

        assert!(registry.remove("loading"));
        assert!(!registry.remove("loading"));
        assert_eq!(loading_released.get(), 1);
        assert_eq!(typing_released.get(), 0);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["typing"]);
    }

    #[test]
    fn boxed_handles_of_different_types_share_a_registry() {
        struct Other(Rc<Cell<bool>>);
        impl Release for Other {
            fn release(&mut self) {
                self.0.set(true);
            }
        }

        let mut registry: Registry<Box<dyn Release>> = Registry::new();
        let (fake, fake_released) = handle();
        let other_released = Rc::new(Cell::new(false));
        registry.insert("fake", Box::new(fake));
        registry.insert("other", Box::new(Other(Rc::clone(&other_released))));

        registry.release_all();
        assert_eq!(fake_released.get(), 1);
        assert!(other_released.get());
    }
}
