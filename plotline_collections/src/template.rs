// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Template-backed collections: members are created by cloning a prototype.

use core::fmt;
use core::hash::Hash;
use core::ops::{Deref, DerefMut};

use crate::dictionary::Dictionary;
use crate::identity::Identity;
use crate::list::List;
use crate::ordered::OrderedList;

/// A value that can serve as a prototype for new collection members.
///
/// The prototype itself is flagged as a template so consumers can tell it
/// apart from real members. Copies made with
/// [`clone_template`](Self::clone_template) are not flagged.
pub trait Template: Clone {
    /// Returns `true` if this value is a prototype.
    fn is_template(&self) -> bool;

    /// Flags or unflags this value as a prototype.
    fn set_is_template(&mut self, is_template: bool);

    /// Returns an unflagged deep copy.
    #[must_use]
    fn clone_template(&self) -> Self {
        let mut copy = self.clone();
        copy.set_is_template(false);
        copy
    }
}

fn flagged<T: Template>(mut template: T) -> T {
    template.set_is_template(true);
    template
}

/// A [`List`] that creates members from a template.
///
/// The underlying list is reachable through `Deref`/`DerefMut`.
///
/// # Example
///
/// ```
/// use plotline_collections::{ListTemplate, Template};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Label {
///     text: String,
///     is_template: bool,
/// }
///
/// impl Template for Label {
///     fn is_template(&self) -> bool {
///         self.is_template
///     }
///     fn set_is_template(&mut self, is_template: bool) {
///         self.is_template = is_template;
///     }
/// }
///
/// let mut labels = ListTemplate::new(Label { text: "-".into(), is_template: false });
/// assert!(labels.template().is_template());
///
/// let label = labels.create();
/// assert!(!label.is_template());
/// assert_eq!(labels.len(), 1);
/// ```
pub struct ListTemplate<T: Template + 'static> {
    template: T,
    list: List<T>,
}

impl<T: Template + PartialEq + 'static> ListTemplate<T> {
    /// Creates an empty list with `template` as its prototype.
    #[must_use]
    pub fn new(template: T) -> Self {
        Self {
            template: flagged(template),
            list: List::new(),
        }
    }

    /// The prototype.
    #[must_use]
    pub fn template(&self) -> &T {
        &self.template
    }

    /// Replaces the prototype. Existing members are unaffected.
    pub fn set_template(&mut self, template: T) {
        self.template = flagged(template);
    }

    /// Clones the prototype, appends the clone and returns it.
    pub fn create(&mut self) -> T {
        let item = self.template.clone_template();
        self.list.push(item.clone());
        item
    }

    /// Takes over `source`'s prototype and replaces the members with copies
    /// of `source`'s members.
    pub fn copy_from(&mut self, source: &Self) {
        self.set_template(source.template.clone());
        self.list
            .set_all(source.list.iter().map(Template::clone_template));
    }
}

impl<T: Template + 'static> Deref for ListTemplate<T> {
    type Target = List<T>;

    fn deref(&self) -> &List<T> {
        &self.list
    }
}

impl<T: Template + 'static> DerefMut for ListTemplate<T> {
    fn deref_mut(&mut self) -> &mut List<T> {
        &mut self.list
    }
}

impl<T: Template + fmt::Debug + 'static> fmt::Debug for ListTemplate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListTemplate")
            .field("template", &self.template)
            .field("list", &self.list)
            .finish()
    }
}

/// A [`Dictionary`] whose values are created on demand from a template.
pub struct DictionaryTemplate<K: 'static, V: Template + 'static> {
    template: V,
    dictionary: Dictionary<K, V>,
}

impl<K, V> DictionaryTemplate<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: Template + Identity + 'static,
{
    /// Creates an empty dictionary with `template` as its prototype.
    #[must_use]
    pub fn new(template: V) -> Self {
        Self {
            template: flagged(template),
            dictionary: Dictionary::new(),
        }
    }

    /// The prototype.
    #[must_use]
    pub fn template(&self) -> &V {
        &self.template
    }

    /// Replaces the prototype. Existing values are unaffected.
    pub fn set_template(&mut self, template: V) {
        self.template = flagged(template);
    }

    /// Returns the value for `key`, cloning the prototype into it first if
    /// the key is absent.
    pub fn create(&mut self, key: K) -> &V {
        let template = &self.template;
        self.dictionary
            .insert_key_if_empty(key, || template.clone_template())
    }

    /// Takes over `source`'s prototype and sets a copy of each of its values.
    pub fn copy_from(&mut self, source: &Self) {
        self.set_template(source.template.clone());
        for (key, value) in source.dictionary.iter() {
            self.dictionary.set_key(key.clone(), value.clone_template());
        }
    }
}

impl<K: 'static, V: Template + 'static> Deref for DictionaryTemplate<K, V> {
    type Target = Dictionary<K, V>;

    fn deref(&self) -> &Dictionary<K, V> {
        &self.dictionary
    }
}

impl<K: 'static, V: Template + 'static> DerefMut for DictionaryTemplate<K, V> {
    fn deref_mut(&mut self) -> &mut Dictionary<K, V> {
        &mut self.dictionary
    }
}

impl<K: fmt::Debug + 'static, V: Template + fmt::Debug + 'static> fmt::Debug
    for DictionaryTemplate<K, V>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryTemplate")
            .field("template", &self.template)
            .field("dictionary", &self.dictionary)
            .finish()
    }
}

/// An [`OrderedList`] that creates members from a template.
pub struct OrderedListTemplate<T: Template + 'static> {
    template: T,
    list: OrderedList<T>,
}

impl<T: Template + PartialEq + 'static> OrderedListTemplate<T> {
    /// Creates an empty list with `template` as its prototype.
    #[must_use]
    pub fn new(template: T) -> Self {
        Self {
            template: flagged(template),
            list: OrderedList::new(),
        }
    }

    /// The prototype.
    #[must_use]
    pub fn template(&self) -> &T {
        &self.template
    }

    /// Replaces the prototype. Existing members are unaffected.
    pub fn set_template(&mut self, template: T) {
        self.template = flagged(template);
    }

    /// Clones the prototype, inserts the clone and returns it.
    pub fn create(&mut self) -> T {
        let item = self.template.clone_template();
        self.list.insert(item.clone());
        item
    }

    /// Takes over `source`'s prototype and replaces the members with copies
    /// of `source`'s members.
    pub fn copy_from(&mut self, source: &Self) {
        self.set_template(source.template.clone());
        self.list
            .set_all(source.list.iter().map(Template::clone_template));
    }
}

impl<T: Template + 'static> Deref for OrderedListTemplate<T> {
    type Target = OrderedList<T>;

    fn deref(&self) -> &OrderedList<T> {
        &self.list
    }
}

impl<T: Template + 'static> DerefMut for OrderedListTemplate<T> {
    fn deref_mut(&mut self) -> &mut OrderedList<T> {
        &mut self.list
    }
}

impl<T: Template + fmt::Debug + 'static> fmt::Debug for OrderedListTemplate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedListTemplate")
            .field("template", &self.template)
            .field("list", &self.list)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[derive(Clone, Debug, PartialEq)]
    struct Bullet {
        radius: f64,
        is_template: bool,
    }

    impl Template for Bullet {
        fn is_template(&self) -> bool {
            self.is_template
        }

        fn set_is_template(&mut self, is_template: bool) {
            self.is_template = is_template;
        }
    }

    impl Identity for Bullet {}

    fn bullet(radius: f64) -> Bullet {
        Bullet {
            radius,
            is_template: false,
        }
    }

    #[test]
    fn created_members_are_unflagged_copies() {
        let mut bullets = ListTemplate::new(bullet(3.0));
        let a = bullets.create();
        bullets.set_template(bullet(5.0));
        let b = bullets.create();
        assert!(bullets.template().is_template());
        assert!(!a.is_template() && !b.is_template());
        assert_eq!(bullets.values(), [bullet(3.0), bullet(5.0)]);
    }

    #[test]
    fn dictionary_template_is_get_or_create() {
        let mut per_series = DictionaryTemplate::new(bullet(1.0));
        let inserts = Rc::new(Cell::new(0));
        {
            let inserts = inserts.clone();
            per_series
                .events()
                .on(
                    crate::DictionaryEventKind::InsertKey,
                    plotline_events::Handler::new(move |_: &crate::DictionaryEvent<u32, Bullet>| {
                        inserts.set(inserts.get() + 1);
                    }),
                    None,
                    true,
                )
                .unwrap();
        }
        assert_eq!(per_series.create(7).radius, 1.0);
        per_series.set_key(7, bullet(2.0));
        assert_eq!(per_series.create(7).radius, 2.0);
        assert_eq!(inserts.get(), 1);
    }

    #[test]
    fn copy_from_clones_template_and_members() {
        let mut source = OrderedListTemplate::new(bullet(4.0));
        source.create();
        source.create();

        let mut copy = OrderedListTemplate::new(bullet(0.0));
        copy.create();
        copy.copy_from(&source);
        assert_eq!(copy.template().radius, 4.0);
        assert!(copy.template().is_template());
        assert_eq!(copy.len(), 2);
        assert!(copy.iter().all(|b| !b.is_template()));

        let mut dict_source = DictionaryTemplate::new(bullet(1.0));
        dict_source.create("a");
        let mut dict_copy = DictionaryTemplate::new(bullet(9.0));
        dict_copy.copy_from(&dict_source);
        assert_eq!(dict_copy.get_key(&"a"), Some(&bullet(1.0)));
    }
}
