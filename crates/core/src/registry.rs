//! Insertion-ordered collection of parameter descriptors.

use log::warn;

use crate::descriptor::Descriptor;

/// Short name of the built-in help parameter.
pub const HELP_NAME: &str = "h";
/// Long flag of the built-in help parameter, as typed.
pub const HELP_ALTERNATIVE: &str = "--help";

#[derive(Default)]
pub struct Registry {
    descriptors: Vec<Descriptor>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor. Reusing a flag is logged but allowed; lookups
    /// keep returning the earliest registration.
    pub(crate) fn push(&mut self, descriptor: Descriptor) -> &mut Descriptor {
        for flag in [descriptor.command(), descriptor.alternative()] {
            if !flag.is_empty() && self.find(flag).is_some() {
                warn!("Flag `{flag}` is already registered; the earlier parameter takes precedence");
            }
        }

        self.descriptors.push(descriptor);
        let last = self.descriptors.len() - 1;
        &mut self.descriptors[last]
    }

    /// Index of the first descriptor whose short or long flag is `flag`.
    #[must_use]
    pub fn find(&self, flag: &str) -> Option<usize> {
        self.descriptors
            .iter()
            .position(|descriptor| descriptor.is(flag))
    }

    /// Index of the first descriptor with an empty name.
    #[must_use]
    pub fn find_default(&self) -> Option<usize> {
        self.descriptors
            .iter()
            .position(|descriptor| descriptor.name().is_empty())
    }

    /// Descriptor registered under `name`, matching short names before long
    /// flags.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Descriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.name() == name)
            .or_else(|| {
                self.descriptors.iter().find(|descriptor| {
                    !descriptor.long_flag().is_empty() && descriptor.long_flag() == name
                })
            })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Descriptor> {
        self.descriptors.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Descriptor> {
        self.descriptors.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Descriptor> {
        self.descriptors.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    #[must_use]
    pub fn required_count(&self) -> usize {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.is_required())
            .count()
    }

    fn help_position(&self) -> Option<usize> {
        self.descriptors.iter().position(|descriptor| {
            descriptor.name() == HELP_NAME && descriptor.alternative() == HELP_ALTERNATIVE
        })
    }

    #[must_use]
    pub fn has_help(&self) -> bool {
        self.help_position().is_some()
    }

    /// Removes the built-in help parameter. Returns whether one was present.
    pub(crate) fn remove_help(&mut self) -> bool {
        match self.help_position() {
            Some(position) => {
                self.descriptors.remove(position);
                true
            }
            None => false,
        }
    }
}
