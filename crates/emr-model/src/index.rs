//! Holder index for exclusive tags
//!
//! Preferred and short tags are exclusive: within one concept each scope has
//! at most one live holder. Scoped tags are keyed by the tag's locale, plain
//! tags by the holder's own locale. The index is updated in the same call that
//! changes a name's tags, so lookups never rescan the name collection.

use crate::name::NameId;
use crate::tag::{ConceptNameTag, TagKind, TagScope};
use emr_locale::Locale;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    Scoped(Locale),
    Plain(Locale),
}

/// Index key: tag kind plus the scope slot it occupies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct TagKey {
    kind: TagKind,
    slot: Slot,
}

impl TagKey {
    /// Key occupied by `tag` on a name in `holder_locale`; `None` for non-exclusive tags
    pub(crate) fn for_tag(tag: &ConceptNameTag, holder_locale: &Locale) -> Option<Self> {
        if !tag.kind().is_exclusive() {
            return None;
        }
        let slot = match tag.scope() {
            TagScope::Plain => Slot::Plain(holder_locale.clone()),
            TagScope::Locale(locale) => Slot::Scoped(locale.clone()),
        };
        Some(Self {
            kind: tag.kind().clone(),
            slot,
        })
    }

    /// Key of a tag of `kind` scoped to `locale`
    pub(crate) fn scoped(kind: TagKind, locale: &Locale) -> Self {
        Self {
            kind,
            slot: Slot::Scoped(locale.clone()),
        }
    }

    /// Key of a plain tag of `kind` held by a name in `locale`
    pub(crate) fn plain(kind: TagKind, locale: &Locale) -> Self {
        Self {
            kind,
            slot: Slot::Plain(locale.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TagIndex {
    holders: HashMap<TagKey, NameId>,
}

impl TagIndex {
    pub(crate) fn holder(&self, key: &TagKey) -> Option<NameId> {
        self.holders.get(key).copied()
    }

    /// Make `id` the holder of `key`; returns the displaced holder, if another
    pub(crate) fn claim(&mut self, key: TagKey, id: NameId) -> Option<NameId> {
        self.holders.insert(key, id).filter(|previous| *previous != id)
    }

    /// Release `key` if `id` holds it
    pub(crate) fn release(&mut self, key: &TagKey, id: NameId) {
        if self.holders.get(key) == Some(&id) {
            self.holders.remove(key);
        }
    }

    /// Release every key held by `id`
    pub(crate) fn release_all(&mut self, id: NameId) {
        self.holders.retain(|_, holder| *holder != id);
    }

    /// Number of holders of `kind` across all slots
    pub(crate) fn count(&self, kind: &TagKind) -> usize {
        self.holders.keys().filter(|key| &key.kind == kind).count()
    }
}
