//! Ordered breakpoint → size mapping.
//!
//! A [`SizeList`] maps viewport triggers (pixel thresholds) to [`SizeSpec`]s
//! and knows the order in which those entries must be presented in a CSS
//! `sizes` attribute.
//!
//! ## Iteration Order
//!
//! The browser evaluates `sizes` left to right and takes the first matching
//! media condition, so the unconditioned default has to come last:
//!
//! | Mode | Triggers are | Walked | Last (unconditioned) entry |
//! |---|---|---|---|
//! | mobile-first | `min-width` | largest → smallest | smallest trigger |
//! | desktop-first | `max-width` | smallest → largest | largest trigger |
//!
//! Getting this backwards produces markup that is syntactically fine and
//! silently picks the wrong image, so [`SizeList::entries`] is the only way to
//! walk a list.

use crate::size::SizeSpec;
use crate::types::SizingError;

/// One position of a [`SizeList`] traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub trigger: u32,
    pub spec: &'a SizeSpec,
    /// True only for the final position of the traversal.
    pub is_last: bool,
}

/// Breakpoint triggers mapped to target sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeList {
    mobile_first: bool,
    /// Insertion order is kept so `widest` can break ties by first insert.
    sizes: Vec<(u32, SizeSpec)>,
    max_width: Option<u32>,
    max_height: Option<u32>,
}

impl SizeList {
    pub fn new(mobile_first: bool) -> Self {
        Self {
            mobile_first,
            sizes: Vec::new(),
            max_width: None,
            max_height: None,
        }
    }

    /// Build a list from `(trigger, spec)` pairs, in order.
    pub fn from_entries(
        mobile_first: bool,
        entries: impl IntoIterator<Item = (u32, SizeSpec)>,
    ) -> Self {
        let mut list = Self::new(mobile_first);
        for (trigger, spec) in entries {
            list.push(trigger, spec);
        }
        list
    }

    /// Clamp every spec appended from now on.
    pub fn with_max_size(
        mut self,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Result<Self, SizingError> {
        if max_width == Some(0) || max_height == Some(0) {
            return Err(SizingError::InvalidConfiguration(
                "size list clamps must be positive".into(),
            ));
        }
        self.max_width = max_width;
        self.max_height = max_height;
        Ok(self)
    }

    /// Insert `spec` at `trigger`, replacing any existing entry there.
    pub fn append(&mut self, trigger: u32, spec: SizeSpec) -> &mut Self {
        self.push(trigger, spec);
        self
    }

    fn push(&mut self, trigger: u32, mut spec: SizeSpec) {
        spec.apply_clamp(self.max_width, self.max_height);
        match self.sizes.iter_mut().find(|(t, _)| *t == trigger) {
            Some(slot) => slot.1 = spec,
            None => self.sizes.push((trigger, spec)),
        }
    }

    pub fn is_mobile_first(&self) -> bool {
        self.mobile_first
    }

    /// CSS media feature the triggers stand for.
    pub fn media_feature(&self) -> &'static str {
        if self.mobile_first {
            "min-width"
        } else {
            "max-width"
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn get(&self, trigger: u32) -> Option<&SizeSpec> {
        self.sizes
            .iter()
            .find(|(t, _)| *t == trigger)
            .map(|(_, spec)| spec)
    }

    /// The spec with the largest effective width. Ties keep the first inserted.
    pub fn widest(&self) -> Result<&SizeSpec, SizingError> {
        self.sizes
            .iter()
            .map(|(_, spec)| spec)
            .reduce(|widest, spec| {
                if spec.effective_width() > widest.effective_width() {
                    spec
                } else {
                    widest
                }
            })
            .ok_or(SizingError::EmptyCollection)
    }

    /// Walk the list in presentation order.
    ///
    /// The order is recomputed on every call, so the same list can be walked
    /// any number of times with identical results.
    pub fn entries(&self) -> Result<Entries<'_>, SizingError> {
        if self.is_empty() {
            return Err(SizingError::EmptyCollection);
        }
        let mut order: Vec<&(u32, SizeSpec)> = self.sizes.iter().collect();
        if self.mobile_first {
            order.sort_by(|a, b| b.0.cmp(&a.0));
        } else {
            order.sort_by(|a, b| a.0.cmp(&b.0));
        }
        Ok(Entries {
            order: order.into_iter(),
        })
    }
}

/// Traversal of a [`SizeList`] in presentation order.
#[derive(Debug)]
pub struct Entries<'a> {
    order: std::vec::IntoIter<&'a (u32, SizeSpec)>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (trigger, spec) = self.order.next()?;
        Some(Entry {
            trigger: *trigger,
            spec,
            is_last: self.order.len() == 0,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}
